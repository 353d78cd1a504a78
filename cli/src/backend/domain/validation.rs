//! Expense form validation.
//!
//! All input rules for the add-expense and add-funds flows live here as
//! pure functions over strings. The interactive menu owns the retry loops
//! and only renders the typed results this module returns, so the rules
//! are testable without a terminal attached.

use chrono::NaiveDate;
use shared::{ExpenseFormValidation, ExpenseValidationConfig, ExpenseValidationError};

/// Field delimiter of the ledger wire format. Item names containing it
/// are rejected instead of corrupting the record line.
pub const RECORD_DELIMITER: char = '|';

/// Validation service for expense and funds input.
#[derive(Clone)]
pub struct ExpenseValidator {
    config: ExpenseValidationConfig,
}

impl ExpenseValidator {
    pub fn new() -> Self {
        Self {
            config: ExpenseValidationConfig::default(),
        }
    }

    pub fn with_config(config: ExpenseValidationConfig) -> Self {
        Self { config }
    }

    /// Validate the full add-expense form input.
    pub fn validate_expense_form(
        &self,
        date: &str,
        item_name: &str,
        amount_input: &str,
    ) -> ExpenseFormValidation {
        let mut errors = Vec::new();

        if let Err(error) = self.validate_date(date) {
            errors.push(error);
        }
        if let Err(error) = self.validate_item_name(item_name) {
            errors.push(error);
        }

        let cleaned_amount = match self.validate_amount(amount_input) {
            Ok(amount) => Some(amount),
            Err(error) => {
                errors.push(error);
                None
            }
        };

        ExpenseFormValidation {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount,
        }
    }

    /// Validate a date string: exact YYYY-MM-DD shape and a real calendar
    /// date.
    pub fn validate_date(&self, date: &str) -> Result<NaiveDate, ExpenseValidationError> {
        let date = date.trim();
        if !has_date_shape(date) {
            return Err(ExpenseValidationError::InvalidDateFormat(date.to_string()));
        }
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ExpenseValidationError::NotACalendarDate(date.to_string()))
    }

    /// Validate an item name: non-empty after trimming, bounded length,
    /// free of the record delimiter.
    pub fn validate_item_name(&self, item_name: &str) -> Result<String, ExpenseValidationError> {
        let trimmed = item_name.trim();
        if trimmed.is_empty() {
            return Err(ExpenseValidationError::EmptyItemName);
        }
        if trimmed.len() > self.config.max_item_name_length {
            return Err(ExpenseValidationError::ItemNameTooLong(trimmed.len()));
        }
        if trimmed.contains(RECORD_DELIMITER) {
            return Err(ExpenseValidationError::ItemNameContainsDelimiter);
        }
        Ok(trimmed.to_string())
    }

    /// Validate an amount string and return the parsed value.
    pub fn validate_amount(&self, amount_input: &str) -> Result<f64, ExpenseValidationError> {
        if amount_input.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyAmount);
        }
        let amount = self
            .clean_and_parse_amount(amount_input)
            .map_err(ExpenseValidationError::InvalidAmountFormat)?;
        self.validate_amount_value(amount)
    }

    /// Validate an already-parsed amount value.
    pub fn validate_amount_value(&self, amount: f64) -> Result<f64, ExpenseValidationError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ExpenseValidationError::AmountNotPositive);
        }
        if amount > self.config.max_amount {
            return Err(ExpenseValidationError::AmountTooLarge(self.config.max_amount));
        }
        if has_too_many_decimal_places(amount) {
            return Err(ExpenseValidationError::AmountPrecisionTooHigh);
        }
        Ok(amount)
    }

    /// Clean and parse an amount input string, stripping the currency
    /// symbol, commas and spaces.
    pub fn clean_and_parse_amount(&self, amount_input: &str) -> Result<f64, String> {
        let cleaned = amount_input
            .trim()
            .replace(&self.config.currency_symbol, "")
            .replace(',', "")
            .replace(' ', "");

        if cleaned.is_empty() {
            return Err("empty amount after cleaning".to_string());
        }

        cleaned
            .parse::<f64>()
            .map_err(|e| format!("invalid number: {}", e))
    }

    /// Format an amount for display.
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.config.currency_symbol, amount)
    }

    /// User-facing message for a validation error.
    pub fn get_error_message(&self, error: &ExpenseValidationError) -> String {
        match error {
            ExpenseValidationError::InvalidDateFormat(date) => {
                format!("Invalid date format '{}'. Please use YYYY-MM-DD.", date)
            }
            ExpenseValidationError::NotACalendarDate(date) => {
                format!("'{}' is not a real calendar date.", date)
            }
            ExpenseValidationError::EmptyItemName => "Item name cannot be empty.".to_string(),
            ExpenseValidationError::ItemNameTooLong(len) => format!(
                "Item name is too long ({} characters). Maximum is {}.",
                len, self.config.max_item_name_length
            ),
            ExpenseValidationError::ItemNameContainsDelimiter => {
                "Item name cannot contain the '|' character.".to_string()
            }
            ExpenseValidationError::EmptyAmount => "Please enter an amount.".to_string(),
            ExpenseValidationError::InvalidAmountFormat(msg) => {
                format!("Please enter a valid number (like 4.50): {}", msg)
            }
            ExpenseValidationError::AmountNotPositive => {
                "Amount must be a positive number.".to_string()
            }
            ExpenseValidationError::AmountTooLarge(max) => {
                format!("Amount is too large. Maximum is {}.", self.format_amount(*max))
            }
            ExpenseValidationError::AmountPrecisionTooHigh => {
                "Use at most 2 decimal places (like 4.50).".to_string()
            }
        }
    }

    pub fn get_config(&self) -> &ExpenseValidationConfig {
        &self.config
    }
}

impl Default for ExpenseValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the literal YYYY-MM-DD shape: ten ASCII characters, digits with
/// hyphens at positions 4 and 7.
fn has_date_shape(date: &str) -> bool {
    let bytes = date.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}

/// Check whether an amount carries more than two significant decimal
/// places.
fn has_too_many_decimal_places(amount: f64) -> bool {
    let amount_str = format!("{:.3}", amount);
    if let Some(decimal_pos) = amount_str.find('.') {
        let decimal_part = &amount_str[decimal_pos + 1..];
        if decimal_part.len() > 2 && !decimal_part.ends_with('0') {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_validator() -> ExpenseValidator {
        ExpenseValidator::new()
    }

    #[test]
    fn test_validate_expense_form_success() {
        let validator = create_test_validator();

        let validation = validator.validate_expense_form("2025-11-07", "Coffee", "4.50");

        assert!(validation.is_valid);
        assert!(validation.errors.is_empty());
        assert_eq!(validation.cleaned_amount, Some(4.50));
    }

    #[test]
    fn test_validate_date_rejects_wrong_shape() {
        let validator = create_test_validator();

        assert!(matches!(
            validator.validate_date("2025/11/07"),
            Err(ExpenseValidationError::InvalidDateFormat(_))
        ));
        assert!(matches!(
            validator.validate_date("25-11-07"),
            Err(ExpenseValidationError::InvalidDateFormat(_))
        ));
        assert!(matches!(
            validator.validate_date("2025-1-7"),
            Err(ExpenseValidationError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_validate_date_rejects_impossible_dates() {
        let validator = create_test_validator();

        assert!(matches!(
            validator.validate_date("2025-02-30"),
            Err(ExpenseValidationError::NotACalendarDate(_))
        ));
        assert!(matches!(
            validator.validate_date("2025-13-01"),
            Err(ExpenseValidationError::NotACalendarDate(_))
        ));
    }

    #[test]
    fn test_validate_date_accepts_leap_day() {
        let validator = create_test_validator();

        assert!(validator.validate_date("2024-02-29").is_ok());
        assert!(validator.validate_date("2025-02-29").is_err());
    }

    #[test]
    fn test_validate_item_name() {
        let validator = create_test_validator();

        assert_eq!(validator.validate_item_name("  Coffee  ").unwrap(), "Coffee");
        assert!(matches!(
            validator.validate_item_name("   "),
            Err(ExpenseValidationError::EmptyItemName)
        ));
        assert!(matches!(
            validator.validate_item_name("milk|sugar"),
            Err(ExpenseValidationError::ItemNameContainsDelimiter)
        ));
    }

    #[test]
    fn test_clean_and_parse_amount() {
        let validator = create_test_validator();

        assert_eq!(validator.clean_and_parse_amount("4.50").unwrap(), 4.50);
        assert_eq!(validator.clean_and_parse_amount("$4.50").unwrap(), 4.50);
        assert_eq!(validator.clean_and_parse_amount(" $1,234.56 ").unwrap(), 1234.56);
        assert_eq!(validator.clean_and_parse_amount("5").unwrap(), 5.0);

        assert!(validator.clean_and_parse_amount("abc").is_err());
        assert!(validator.clean_and_parse_amount("").is_err());
    }

    #[test]
    fn test_validate_amount_rejects_non_positive() {
        let validator = create_test_validator();

        assert!(matches!(
            validator.validate_amount("-5.00"),
            Err(ExpenseValidationError::AmountNotPositive)
        ));
        assert!(matches!(
            validator.validate_amount("0"),
            Err(ExpenseValidationError::AmountNotPositive)
        ));
    }

    #[test]
    fn test_validate_amount_rejects_excess_precision() {
        let validator = create_test_validator();

        assert!(matches!(
            validator.validate_amount("4.505"),
            Err(ExpenseValidationError::AmountPrecisionTooHigh)
        ));
        assert!(validator.validate_amount("4.50").is_ok());
    }

    #[test]
    fn test_error_messages() {
        let validator = create_test_validator();

        let message = validator.get_error_message(&ExpenseValidationError::EmptyItemName);
        assert_eq!(message, "Item name cannot be empty.");

        let message =
            validator.get_error_message(&ExpenseValidationError::InvalidDateFormat("nope".into()));
        assert!(message.contains("YYYY-MM-DD"));
    }
}
