use clap::Args;
use receipt_points::config::AppConfig;
use receipt_points::error::AppError;
use receipt_points::receipts::{Receipt, ReceiptValidator, ScoreOutcome, ScoringEngine};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    pub(crate) receipt: PathBuf,
    /// Print the outcome as JSON instead of the text breakdown
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let validator = ReceiptValidator::new(config.validation);
    let outcome = score_file(&args.receipt, &validator)?;

    if args.json {
        let payload = json!({
            "points": outcome.total_points,
            "breakdown": outcome.breakdown,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!("{}", outcome.report());
    }
    Ok(())
}

fn score_file(path: &Path, validator: &ReceiptValidator) -> Result<ScoreOutcome, AppError> {
    let raw = fs::read_to_string(path)?;
    let receipt: Receipt = serde_json::from_str(&raw)?;

    let errors = validator.validate(&receipt);
    if !errors.is_empty() {
        for message in errors.messages() {
            eprintln!("- {message}");
        }
        return Err(errors.into());
    }

    Ok(ScoringEngine::new().score(&receipt)?)
}
