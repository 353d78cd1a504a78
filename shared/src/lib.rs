use serde::{Deserialize, Serialize};

/// A committed expense entry as exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Sequential id, unique within the expense's date partition
    pub id: u32,
    /// Calendar date of the expense (YYYY-MM-DD)
    pub date: String,
    /// What the money was spent on
    pub item_name: String,
    /// When the entry was recorded (YYYY-MM-DD HH:MM:SS)
    pub timestamp: String,
    /// Amount paid (always positive, two decimal places)
    pub amount: f64,
}

/// Balance figures shown by the balance report screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub current_balance: f64,
    /// Sum of every recorded expense, recomputed from the ledger
    pub total_expenses: f64,
    pub available_balance: f64,
}

/// Request for adding money to the balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFundsRequest {
    pub amount: f64,
}

/// Response after adding money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFundsResponse {
    pub new_balance: f64,
    pub formatted_amount: String,
    pub success_message: String,
}

/// Request for submitting a new expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitExpenseRequest {
    /// Expense date (YYYY-MM-DD)
    pub date: String,
    pub item_name: String,
    pub amount: f64,
    /// Whether the user confirmed the expense summary
    pub confirmed: bool,
}

/// Outcome of submitting an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubmitExpenseResponse {
    /// The expense was written and the balance debited
    Committed {
        expense_id: u32,
        new_balance: f64,
        success_message: String,
    },
    /// The user declined the confirmation; nothing was written
    Cancelled { message: String },
    /// The amount exceeded the available balance; nothing was written
    Rejected {
        reason: String,
        available_balance: f64,
        required_amount: f64,
    },
}

/// Matches returned by the expense search screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSearchResponse {
    pub matches: Vec<Expense>,
}

/// Validation result for the add-expense form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFormValidation {
    pub is_valid: bool,
    pub errors: Vec<ExpenseValidationError>,
    /// Parsed amount when the amount field validated
    pub cleaned_amount: Option<f64>,
}

/// Specific validation errors for expense form fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpenseValidationError {
    /// The date string does not have the YYYY-MM-DD shape
    InvalidDateFormat(String),
    /// The date string has the right shape but is not a real calendar date
    NotACalendarDate(String),
    EmptyItemName,
    ItemNameTooLong(usize),
    /// Item names may not contain the record delimiter
    ItemNameContainsDelimiter,
    EmptyAmount,
    InvalidAmountFormat(String),
    AmountNotPositive,
    AmountTooLarge(f64),
    AmountPrecisionTooHigh,
}

/// Configuration for expense form validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseValidationConfig {
    pub max_item_name_length: usize,
    pub max_amount: f64,
    pub currency_symbol: String,
}

impl Default for ExpenseValidationConfig {
    fn default() -> Self {
        Self {
            max_item_name_length: 256,
            max_amount: 1_000_000.0,
            currency_symbol: "$".to_string(),
        }
    }
}
