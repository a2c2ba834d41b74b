//! Credit scoring engine.
//!
//! Maps a [`FinancialRecord`] to a [`ScoreResult`] by adding five independent
//! factor contributions to a base score:
//!
//! 1. Payment history (up to 200 points)
//! 2. Credit utilization (up to 150 points)
//! 3. Debt-to-income ratio (up to 100 points)
//! 4. Credit mix (0, 50 or 100 points)
//! 5. Savings (up to 100 points)
//!
//! A factor whose inputs are absent is skipped. The engine is pure: no I/O,
//! no logging, same input always yields the same output.
use crate::models::{Factor, FactorContribution, FinancialRecord, Recommendation, ScoreResult};
use std::fmt;

pub const BASE_SCORE: f64 = 300.0;
pub const MIN_SCORE: u16 = 300;
pub const MAX_SCORE: u16 = 850;

const UTILIZATION_THRESHOLD_PCT: f64 = 30.0;
const DTI_THRESHOLD_PCT: f64 = 43.0;
const SAVINGS_THRESHOLD_RATIO: f64 = 3.0;

/// Raised when the caller breaks the engine's precondition.
///
/// Requests are validated before they reach the engine, so this signals a bug
/// in the caller rather than bad user input.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// `monthly_income` is not a finite number greater than 0.
    InvalidIncome(f64),
    /// `monthly_expenses` is not a finite number of at least 0.
    InvalidExpenses(f64),
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::InvalidIncome(v) => {
                write!(f, "monthly_income must be greater than 0, got {}", v)
            }
            ScoringError::InvalidExpenses(v) => {
                write!(f, "monthly_expenses must be 0 or greater, got {}", v)
            }
        }
    }
}

impl std::error::Error for ScoringError {}

/// Computes the credit score and ranked recommendations for a record.
///
/// # Errors
///
/// Returns [`ScoringError`] only if the mandatory fields are out of range.
/// Missing optional fields never produce an error.
pub fn score_credit(record: &FinancialRecord) -> Result<ScoreResult, ScoringError> {
    if !record.monthly_income.is_finite() || record.monthly_income <= 0.0 {
        return Err(ScoringError::InvalidIncome(record.monthly_income));
    }
    if !record.monthly_expenses.is_finite() || record.monthly_expenses < 0.0 {
        return Err(ScoringError::InvalidExpenses(record.monthly_expenses));
    }

    let mut total = BASE_SCORE;
    let mut breakdown = Vec::new();
    let mut recommendations = Vec::new();

    let outcomes = [
        payment_history(record),
        credit_utilization(record),
        debt_to_income(record),
        Some(credit_mix(record)),
        savings(record),
    ];

    for (factor_points, rec) in outcomes.into_iter().flatten() {
        total += factor_points.points;
        breakdown.push(factor_points);
        recommendations.extend(rec);
    }

    // Stable sort keeps evaluation order for equal impact.
    recommendations.sort_by(|a, b| b.impact_points.cmp(&a.impact_points));

    Ok(ScoreResult {
        score: clamp_score(total),
        recommendations,
        breakdown,
    })
}

/// Rounds half to even, then clamps into `[MIN_SCORE, MAX_SCORE]`.
fn clamp_score(raw: f64) -> u16 {
    raw.round_ties_even()
        .clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u16
}

type FactorOutcome = (FactorContribution, Option<Recommendation>);

fn contribution(factor: Factor, points: f64) -> FactorContribution {
    FactorContribution { factor, points }
}

fn recommendation(
    timeframe: &str,
    action: &str,
    impact_points: u32,
    steps: Vec<String>,
) -> Recommendation {
    Recommendation {
        timeframe: timeframe.to_string(),
        action: action.to_string(),
        impact_points,
        steps,
    }
}

fn steps(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn payment_history(record: &FinancialRecord) -> Option<FactorOutcome> {
    let (Some(on_time), Some(late), Some(missed)) = (
        record.on_time_payments,
        record.late_payments,
        record.missed_payments,
    ) else {
        return None;
    };

    let total = on_time.saturating_add(late).saturating_add(missed);
    if total == 0 {
        return None;
    }

    let points = (on_time as f64 / total as f64) * 200.0;
    let rec = (late > 0 || missed > 0).then(|| {
        recommendation(
            "6-12 months",
            "Improve Payment History",
            50,
            steps(&[
                "Set up automatic payments",
                "Create payment reminders",
                "Build an emergency fund",
                "Contact creditors if you might miss a payment",
            ]),
        )
    });

    Some((contribution(Factor::PaymentHistory, points), rec))
}

fn credit_utilization(record: &FinancialRecord) -> Option<FactorOutcome> {
    let (Some(limit), Some(balance)) = (record.credit_limit, record.current_balance) else {
        return None;
    };
    if limit <= 0.0 {
        return None;
    }

    let utilization_pct = (balance / limit) * 100.0;
    let points = (150.0 - utilization_pct * 1.5).max(0.0);
    let rec = (utilization_pct > UTILIZATION_THRESHOLD_PCT).then(|| {
        let mut remediation = vec![format!(
            "Aim to reduce utilization from {:.1}% to below 30%",
            utilization_pct
        )];
        remediation.extend(steps(&[
            "Make multiple payments per month",
            "Request a credit limit increase",
            "Consider debt consolidation",
        ]));
        recommendation("1-3 months", "Reduce Credit Utilization", 30, remediation)
    });

    Some((contribution(Factor::CreditUtilization, points), rec))
}

fn debt_to_income(record: &FinancialRecord) -> Option<FactorOutcome> {
    if record.monthly_income <= 0.0 {
        return None;
    }

    let dti_pct = (record.monthly_expenses / record.monthly_income) * 100.0;
    let points = (100.0 - dti_pct).max(0.0);
    let rec = (dti_pct > DTI_THRESHOLD_PCT).then(|| {
        recommendation(
            "3-6 months",
            "Improve Debt-to-Income Ratio",
            40,
            steps(&[
                "Create a budget to reduce expenses",
                "Look for additional income sources",
                "Negotiate better interest rates",
                "Consider debt consolidation",
            ]),
        )
    });

    Some((contribution(Factor::DebtToIncome, points), rec))
}

fn credit_mix(record: &FinancialRecord) -> FactorOutcome {
    let has = |amount: Option<f64>| amount.unwrap_or(0.0) > 0.0;

    let revolving = has(record.credit_card_debt);
    let installment =
        has(record.personal_loan) || has(record.student_loan) || has(record.mortgage);

    let points = match (revolving, installment) {
        (true, true) => 100.0,
        (true, false) | (false, true) => 50.0,
        (false, false) => 0.0,
    };

    let rec = (points < 100.0).then(|| {
        recommendation(
            "6-12 months",
            "Diversify Credit Mix",
            25,
            steps(&[
                "Consider adding a mix of revolving and installment credit",
                "Maintain both credit cards and installment loans responsibly",
                "Focus on managing existing credit well before adding new accounts",
                "Keep older accounts open to build credit history",
            ]),
        )
    });

    (contribution(Factor::CreditMix, points), rec)
}

fn savings(record: &FinancialRecord) -> Option<FactorOutcome> {
    let savings = record.savings?;
    if record.monthly_income <= 0.0 {
        return None;
    }

    // Months of income saved, not months of expenses.
    let ratio = savings / record.monthly_income;
    let points = (ratio * 50.0).min(100.0);
    let rec = (ratio < SAVINGS_THRESHOLD_RATIO).then(|| {
        recommendation(
            "6-12 months",
            "Build Emergency Savings",
            20,
            steps(&[
                "Set up automatic savings transfers",
                "Save at least 20% of monthly income",
                "Build 3-6 months emergency fund",
                "Consider high-yield savings accounts",
            ]),
        )
    });

    Some((contribution(Factor::Savings, points), rec))
}
