//! Pairwise comparison of two postal codes.

use zipscore_ingest::{Dataset, HeaderIndex, LocationRecord};
use zipscore_model::{AreaScore, ComparisonResult, MetricKey};

use crate::calculator::ScoreCalculator;
use crate::error::{LookupError, RequestError};
use crate::locate::find_by_postal_code;

/// Score a located record and attach its descriptive fields.
pub fn area_score(
    calculator: &ScoreCalculator,
    record: &LocationRecord<'_>,
) -> Result<AreaScore, RequestError> {
    let score = calculator.score(record)?;
    Ok(AreaScore {
        postal_code: record.postal_code().unwrap_or_default().to_string(),
        county: record
            .get(MetricKey::County)
            .filter(|county| !county.is_empty())
            .map(str::to_string),
        population: record.get(MetricKey::Population).and_then(parse_population),
        score,
    })
}

/// Lenient population parse: integers, thousands separators, or whole floats.
pub fn parse_population(raw: &str) -> Option<u64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<u64>().ok().or_else(|| {
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .map(|value| value.round() as u64)
    })
}

/// Compare two postal codes with an arbitrary lookup.
///
/// Both lookups run before failing so the error names every missing code.
pub fn compare_with<'a, F>(
    calculator: &ScoreCalculator,
    lookup: F,
    code_a: &str,
    code_b: &str,
) -> Result<ComparisonResult, RequestError>
where
    F: Fn(&str) -> Result<LocationRecord<'a>, LookupError>,
{
    let record_a = lookup(code_a);
    let record_b = lookup(code_b);

    let (record_a, record_b) = match (record_a, record_b) {
        (Ok(a), Ok(b)) => (a, b),
        (a, b) => {
            let mut missing_codes: Vec<String> = Vec::new();
            for LookupError::NotFound { code } in [a.err(), b.err()].into_iter().flatten() {
                if !missing_codes.contains(&code) {
                    missing_codes.push(code);
                }
            }
            tracing::debug!(?missing_codes, "comparison lookup failed");
            return Err(RequestError::NotFound { missing_codes });
        }
    };

    let a = area_score(calculator, &record_a)?;
    let b = area_score(calculator, &record_b)?;
    let result = ComparisonResult::new(a, b);
    tracing::debug!(
        code_a = %result.a.postal_code,
        score_a = result.a.score.rounded,
        code_b = %result.b.postal_code,
        score_b = result.b.score.rounded,
        higher = ?result.higher,
        "comparison complete"
    );
    Ok(result)
}

/// Compare two postal codes by linear scan with the default calculator.
pub fn compare(
    dataset: &Dataset,
    index: &HeaderIndex,
    code_a: &str,
    code_b: &str,
) -> Result<ComparisonResult, RequestError> {
    compare_with(
        &ScoreCalculator::default(),
        |code| find_by_postal_code(dataset, index, code),
        code_a,
        code_b,
    )
}
