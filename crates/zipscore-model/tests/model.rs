//! Tests for zipscore-model types.

use std::io::Write;

use tempfile::NamedTempFile;
use zipscore_model::{
    AreaScore, CategoryScores, ComparisonResult, ConfigError, Higher, OutputScale, Score,
    ScoringConfig,
};

fn area(code: &str, rounded: u32) -> AreaScore {
    AreaScore {
        postal_code: code.to_string(),
        county: None,
        population: None,
        score: Score {
            composite: f64::from(rounded),
            rounded,
            value: OutputScale::Ten.display(rounded),
            scale: OutputScale::Ten,
            categories: CategoryScores {
                pollution: 50.0,
                health: 50.0,
                socioeconomic: 50.0,
                accessibility: 50.0,
            },
        },
    }
}

#[test]
fn comparison_picks_higher_side() {
    let result = ComparisonResult::new(area("90012", 52), area("90210", 61));
    assert_eq!(result.higher, Higher::B);
    assert_eq!(result.higher_code(), Some("90210"));

    let result = ComparisonResult::new(area("90210", 61), area("90012", 52));
    assert_eq!(result.higher, Higher::A);
    assert_eq!(result.higher_code(), Some("90210"));
}

#[test]
fn equal_scores_are_a_tie() {
    let result = ComparisonResult::new(area("90012", 52), area("90013", 52));
    assert!(result.is_tie());
    assert_eq!(result.higher_code(), None);
}

#[test]
fn score_display_per_scale() {
    let score = area("90012", 52).score;
    assert_eq!(score.to_string(), "5.2/10");

    let hundred = Score {
        scale: OutputScale::Hundred,
        value: OutputScale::Hundred.display(52),
        ..score
    };
    assert_eq!(hundred.to_string(), "52/100");
}

#[test]
fn comparison_reports_larger_population() {
    let populated = |code: &str, rounded: u32, population: u64| AreaScore {
        population: Some(population),
        ..area(code, rounded)
    };

    let result = ComparisonResult::new(populated("90012", 52, 36_000), populated("90210", 79, 21_734));
    assert_eq!(result.higher, Higher::B);
    assert_eq!(result.larger_population, Some(Higher::A));

    let result = ComparisonResult::new(populated("90012", 52, 500), populated("90013", 40, 500));
    assert_eq!(result.larger_population, Some(Higher::Tie));

    let result = ComparisonResult::new(populated("90012", 52, 500), area("90013", 40));
    assert_eq!(result.larger_population, None);
}

#[test]
fn comparison_serializes() {
    let result = ComparisonResult::new(area("90012", 52), area("90012", 52));
    let json = serde_json::to_value(&result).expect("serialize comparison");
    assert_eq!(json["higher"], "tie");
    assert_eq!(json["a"]["postal_code"], "90012");
    assert_eq!(json["a"]["score"]["rounded"], 52);
    assert!(json["a"].get("county").is_none());
    assert!(json.get("larger_population").is_none());

    let round: ComparisonResult = serde_json::from_value(json).expect("deserialize comparison");
    assert_eq!(round, result);
}

#[test]
fn config_loads_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "scale = \"hundred\"").unwrap();
    let config = ScoringConfig::load(file.path()).unwrap();
    assert_eq!(config.scale, OutputScale::Hundred);
}

#[test]
fn config_missing_file() {
    let err = ScoringConfig::load(std::path::Path::new("/nonexistent/zipscore.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn config_serializes_to_toml_round_trip() {
    let config = ScoringConfig::default();
    let text = toml::to_string_pretty(&config).unwrap();
    let parsed = ScoringConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, config);
}
