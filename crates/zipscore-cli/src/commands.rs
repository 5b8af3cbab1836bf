use anyhow::{Context, Result};
use zipscore_cli::input::validate_postal_code;
use zipscore_cli::summary::{
    ResolvedHeader, print_comparison, print_headers, print_scores, to_json,
};
use zipscore_engine::{LocationEngine, RequestError};
use zipscore_model::ScoringConfig;

use crate::cli::{Cli, Command, CompareArgs, OutputArgs, ScoreArgs};

pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Score(args) => run_score(cli, args),
        Command::Compare(args) => run_compare(cli, args),
        Command::Headers(args) => run_headers(cli, args),
    }
}

fn load_engine(cli: &Cli) -> Result<LocationEngine> {
    let config = match &cli.config {
        Some(path) => ScoringConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScoringConfig::default(),
    };
    let dataset = cli.dataset_path()?;
    LocationEngine::load(dataset, config)
        .with_context(|| format!("failed to load dataset {}", dataset.display()))
}

fn run_score(cli: &Cli, args: &ScoreArgs) -> Result<()> {
    let codes = args
        .codes
        .iter()
        .map(|raw| validate_postal_code(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let engine = load_engine(cli)?;

    let mut areas = Vec::with_capacity(codes.len());
    let mut missing: Vec<String> = Vec::new();
    for code in &codes {
        match engine.score_code(code) {
            Ok(area) => areas.push(area),
            Err(RequestError::NotFound { missing_codes }) => {
                for code in missing_codes {
                    if !missing.contains(&code) {
                        missing.push(code);
                    }
                }
            }
            Err(error) => {
                return Err(error).with_context(|| format!("failed to score {code}"));
            }
        }
    }
    if !missing.is_empty() {
        return Err(RequestError::NotFound {
            missing_codes: missing,
        }
        .into());
    }
    tracing::debug!(count = areas.len(), "scored postal codes");

    if args.output.json {
        println!("{}", to_json(&areas)?);
    } else {
        print_scores(&areas);
    }
    Ok(())
}

fn run_compare(cli: &Cli, args: &CompareArgs) -> Result<()> {
    let code_a = validate_postal_code(&args.code_a)?;
    let code_b = validate_postal_code(&args.code_b)?;
    let engine = load_engine(cli)?;

    let result = engine.compare(&code_a, &code_b)?;
    tracing::debug!(a = %code_a, b = %code_b, higher = ?result.higher, "compared postal codes");

    if args.output.json {
        println!("{}", to_json(&result)?);
    } else {
        print_comparison(&result);
    }
    Ok(())
}

fn run_headers(cli: &Cli, args: &OutputArgs) -> Result<()> {
    let engine = load_engine(cli)?;
    let headers = ResolvedHeader::collect(&engine);
    if args.json {
        println!("{}", to_json(&headers)?);
    } else {
        print_headers(&headers);
    }
    Ok(())
}
