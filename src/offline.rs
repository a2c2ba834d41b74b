//! Offline scoring of a JSON financial data document.

use anyhow::Context;

use crate::models::CreditScoreResponse;
use crate::scoring::score_credit;
use crate::validation::FinancialData;

/// Parses, validates and scores a `FinancialData` JSON document.
///
/// Produces the same response document `POST /predict` returns.
///
/// # Errors
///
/// Fails on malformed JSON, on validation failures (the error wraps
/// `AppError::Validation`) and on scoring precondition failures.
pub fn score_json(raw: &str) -> anyhow::Result<CreditScoreResponse> {
    let data: FinancialData = serde_json::from_str(raw).context("invalid financial data JSON")?;
    let record = data.validate()?;
    let result = score_credit(&record)?;
    Ok(CreditScoreResponse::from(result))
}
