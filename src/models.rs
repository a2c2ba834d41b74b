use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============ Domain Models ============

/// Validated financial data handed to the scoring engine.
///
/// Only `monthly_income` and `monthly_expenses` are mandatory. Every other
/// field is optional and a factor whose inputs are missing is skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialRecord {
    /// Monthly income, always greater than 0.
    pub monthly_income: f64,
    /// Monthly expenses, between 0 and `monthly_income`.
    pub monthly_expenses: f64,
    /// Total savings.
    pub savings: Option<f64>,
    /// Number of payments made on time.
    pub on_time_payments: Option<u64>,
    /// Number of late payments.
    pub late_payments: Option<u64>,
    /// Number of missed payments.
    pub missed_payments: Option<u64>,
    /// Total credit limit across all accounts.
    pub credit_limit: Option<f64>,
    /// Current balance across all accounts.
    pub current_balance: Option<f64>,
    /// Revolving debt.
    pub credit_card_debt: Option<f64>,
    /// Installment debt.
    pub personal_loan: Option<f64>,
    /// Installment debt.
    pub student_loan: Option<f64>,
    /// Installment debt.
    pub mortgage: Option<f64>,
}

impl FinancialRecord {
    /// Creates a record holding only the two required fields.
    pub fn new(monthly_income: f64, monthly_expenses: f64) -> Self {
        Self {
            monthly_income,
            monthly_expenses,
            ..Default::default()
        }
    }
}

/// An improvement suggestion produced by one scoring factor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    /// Expected time to see results (e.g. "6-12 months").
    pub timeframe: String,
    /// Short title of the action.
    pub action: String,
    /// Estimated score gain in points. Recommendations are ranked by this.
    pub impact_points: u32,
    /// Ordered remediation steps.
    pub steps: Vec<String>,
}

impl Recommendation {
    /// Renders the impact for display, e.g. `"+50 points"`.
    pub fn impact(&self) -> String {
        format!("+{} points", self.impact_points)
    }
}

/// Scoring factors, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    PaymentHistory,
    CreditUtilization,
    DebtToIncome,
    CreditMix,
    Savings,
}

impl Factor {
    pub fn label(&self) -> &'static str {
        match self {
            Factor::PaymentHistory => "payment_history",
            Factor::CreditUtilization => "credit_utilization",
            Factor::DebtToIncome => "debt_to_income",
            Factor::CreditMix => "credit_mix",
            Factor::Savings => "savings",
        }
    }
}

/// Points a single factor added to the base score.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub factor: Factor,
    pub points: f64,
}

/// Output of the scoring engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// Final score in `[300, 850]`.
    pub score: u16,
    /// Recommendations, most impactful first.
    pub recommendations: Vec<Recommendation>,
    /// Contributions of the factors that were evaluated, in evaluation order.
    pub breakdown: Vec<FactorContribution>,
}

// ============ API Response Models ============

/// Recommendation as rendered in the JSON response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Improvement {
    /// Expected time to see results.
    #[schema(example = "6-12 months")]
    pub timeframe: String,
    /// Short title of the action.
    #[schema(example = "Improve Payment History")]
    pub action: String,
    /// Estimated score gain.
    #[schema(example = "+50 points")]
    pub impact: String,
    /// Ordered remediation steps.
    pub steps: Vec<String>,
}

impl From<Recommendation> for Improvement {
    fn from(rec: Recommendation) -> Self {
        Self {
            impact: rec.impact(),
            timeframe: rec.timeframe,
            action: rec.action,
            steps: rec.steps,
        }
    }
}

/// Response body of `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct CreditScoreResponse {
    /// Always "success".
    pub status: String,
    /// Score between 300 and 850.
    pub credit_score: u16,
    /// Improvement recommendations, most impactful first.
    pub improvements: Vec<Improvement>,
    /// Human readable message.
    pub message: String,
}

impl From<ScoreResult> for CreditScoreResponse {
    fn from(result: ScoreResult) -> Self {
        Self {
            status: "success".to_string(),
            credit_score: result.score,
            improvements: result
                .recommendations
                .into_iter()
                .map(Improvement::from)
                .collect(),
            message: "Credit score calculated successfully".to_string(),
        }
    }
}

/// Response body of the health endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub documentation: String,
}

/// A single rejected input field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// Why it was rejected.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error body returned for any failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ErrorResponse {
    /// Always "error".
    pub status: String,
    pub message: String,
    /// Per-field validation failures, present only for 422 responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}
