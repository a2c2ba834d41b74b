//! Request body validation for the scoring endpoint.
//!
//! Turns the raw `POST /predict` payload into a [`FinancialRecord`],
//! collecting every constraint violation instead of stopping at the first.

use crate::errors::AppError;
use crate::models::{FieldError, FinancialRecord};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw financial data as submitted by the client.
///
/// Counts are read as plain JSON numbers so `2.0` is accepted as `2`, and a
/// negative or fractional count is reported as a field error rather than
/// failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[schema(example = json!({
    "monthly_income": 5000,
    "monthly_expenses": 3000,
    "savings": 10000,
    "on_time_payments": 24,
    "late_payments": 2,
    "missed_payments": 0,
    "credit_limit": 15000,
    "current_balance": 4500,
    "credit_card_debt": 4500,
    "personal_loan": 10000,
    "student_loan": 20000,
    "mortgage": 200000
}))]
pub struct FinancialData {
    /// Monthly income (must be greater than 0).
    pub monthly_income: f64,
    /// Monthly expenses (0 or greater, not above income).
    pub monthly_expenses: f64,
    /// Total savings amount.
    #[serde(default)]
    pub savings: Option<f64>,
    /// Number of on-time payments.
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub on_time_payments: Option<f64>,
    /// Number of late payments.
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub late_payments: Option<f64>,
    /// Number of missed payments.
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub missed_payments: Option<f64>,
    /// Total credit limit across all accounts.
    #[serde(default)]
    pub credit_limit: Option<f64>,
    /// Current total balance across all accounts.
    #[serde(default)]
    pub current_balance: Option<f64>,
    /// Total credit card debt.
    #[serde(default)]
    pub credit_card_debt: Option<f64>,
    /// Total personal loan amount.
    #[serde(default)]
    pub personal_loan: Option<f64>,
    /// Total student loan amount.
    #[serde(default)]
    pub student_loan: Option<f64>,
    /// Total mortgage amount.
    #[serde(default)]
    pub mortgage: Option<f64>,
}

impl FinancialData {
    /// Validates the payload and converts it into a [`FinancialRecord`].
    ///
    /// # Returns
    ///
    /// * `Result<FinancialRecord, AppError>` - The record, or
    ///   `AppError::Validation` listing every rejected field.
    pub fn validate(self) -> Result<FinancialRecord, AppError> {
        let mut errors = Vec::new();

        let income_valid = self.monthly_income.is_finite() && self.monthly_income > 0.0;
        if !income_valid {
            errors.push(FieldError::new(
                "monthly_income",
                "Monthly income must be greater than 0",
            ));
        }

        if !self.monthly_expenses.is_finite() || self.monthly_expenses < 0.0 {
            errors.push(FieldError::new(
                "monthly_expenses",
                "Monthly expenses must be 0 or greater",
            ));
        } else if income_valid && self.monthly_expenses > self.monthly_income {
            errors.push(FieldError::new(
                "monthly_expenses",
                "Monthly expenses cannot be greater than monthly income",
            ));
        }

        let savings = non_negative_amount("savings", self.savings, &mut errors);
        let on_time_payments = count("on_time_payments", self.on_time_payments, &mut errors);
        let late_payments = count("late_payments", self.late_payments, &mut errors);
        let missed_payments = count("missed_payments", self.missed_payments, &mut errors);
        let credit_limit = non_negative_amount("credit_limit", self.credit_limit, &mut errors);
        let current_balance =
            non_negative_amount("current_balance", self.current_balance, &mut errors);
        let credit_card_debt =
            non_negative_amount("credit_card_debt", self.credit_card_debt, &mut errors);
        let personal_loan = non_negative_amount("personal_loan", self.personal_loan, &mut errors);
        let student_loan = non_negative_amount("student_loan", self.student_loan, &mut errors);
        let mortgage = non_negative_amount("mortgage", self.mortgage, &mut errors);

        if let (Some(limit), Some(balance)) = (credit_limit, current_balance) {
            if balance > limit {
                errors.push(FieldError::new(
                    "current_balance",
                    "Current balance cannot be greater than credit limit",
                ));
            }
        }

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        Ok(FinancialRecord {
            monthly_income: self.monthly_income,
            monthly_expenses: self.monthly_expenses,
            savings,
            on_time_payments,
            late_payments,
            missed_payments,
            credit_limit,
            current_balance,
            credit_card_debt,
            personal_loan,
            student_loan,
            mortgage,
        })
    }
}

/// Checks an optional monetary amount. Invalid values are recorded and dropped.
fn non_negative_amount(
    field: &str,
    value: Option<f64>,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            errors.push(FieldError::new(field, format!("{} must be 0 or greater", field)));
            None
        }
        other => other,
    }
}

/// Checks an optional payment count. Invalid values are recorded and dropped.
///
/// Whole-number floats such as `2.0` are accepted.
fn count(field: &str, value: Option<f64>, errors: &mut Vec<FieldError>) -> Option<u64> {
    let v = value?;
    if !v.is_finite() || v < 0.0 {
        errors.push(FieldError::new(field, format!("{} must be 0 or greater", field)));
        return None;
    }
    if v.fract() != 0.0 {
        errors.push(FieldError::new(field, format!("{} must be a whole number", field)));
        return None;
    }
    Some(v as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_errors(data: FinancialData) -> Vec<FieldError> {
        match data.validate() {
            Err(AppError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_count_conversion() {
        let mut errors = Vec::new();
        assert_eq!(count("late_payments", Some(3.0), &mut errors), Some(3));
        assert_eq!(count("late_payments", None, &mut errors), None);
        assert!(errors.is_empty());

        assert_eq!(count("late_payments", Some(-1.0), &mut errors), None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "late_payments");
    }

    #[test]
    fn test_whole_number_float_counts_accepted() {
        let data: FinancialData = serde_json::from_value(serde_json::json!({
            "monthly_income": 5000,
            "monthly_expenses": 3000,
            "on_time_payments": 24,
            "late_payments": 2.0,
            "missed_payments": 0
        }))
        .unwrap();
        let record = data.validate().unwrap();

        assert_eq!(record.on_time_payments, Some(24));
        assert_eq!(record.late_payments, Some(2));
        assert_eq!(record.missed_payments, Some(0));
    }

    #[test]
    fn test_fractional_count_rejected() {
        let errors = field_errors(FinancialData {
            monthly_income: 1000.0,
            monthly_expenses: 100.0,
            missed_payments: Some(1.5),
            ..Default::default()
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "missed_payments");
        assert_eq!(errors[0].message, "missed_payments must be a whole number");
    }

    #[test]
    fn test_expenses_above_income_rejected() {
        let errors = field_errors(FinancialData {
            monthly_income: 1000.0,
            monthly_expenses: 1000.01,
            ..Default::default()
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Monthly expenses cannot be greater than monthly income"
        );
    }

    #[test]
    fn test_expenses_compared_only_against_valid_income() {
        let errors = field_errors(FinancialData {
            monthly_income: 0.0,
            monthly_expenses: 500.0,
            ..Default::default()
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "monthly_income");
    }

    #[test]
    fn test_balance_checked_only_when_limit_present() {
        let record = FinancialData {
            monthly_income: 1000.0,
            monthly_expenses: 100.0,
            current_balance: Some(99_999.0),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(record.current_balance, Some(99_999.0));
        assert_eq!(record.credit_limit, None);
    }
}
