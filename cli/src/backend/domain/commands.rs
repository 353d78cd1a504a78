//! Domain-level command and result types.
//!
//! These structs are used by services inside the domain layer and are not
//! exposed over the public API. The menu layer is responsible for mapping
//! the public DTOs defined in the `shared` crate to these internal types.

pub mod funds {
    /// Input for adding money to the balance.
    #[derive(Debug, Clone)]
    pub struct AddFundsCommand {
        pub amount: f64,
    }

    /// Result of adding money.
    #[derive(Debug, Clone)]
    pub struct AddFundsResult {
        pub new_balance: f64,
        pub amount_added: f64,
    }
}

pub mod expenses {
    use chrono::NaiveDate;

    use crate::backend::domain::models::expense::ExpenseRecord;

    /// Input for submitting a new expense.
    #[derive(Debug, Clone)]
    pub struct SubmitExpenseCommand {
        /// Expense date as entered by the user (YYYY-MM-DD)
        pub date: String,
        pub item_name: String,
        pub amount: f64,
        /// Whether the user confirmed the expense summary
        pub confirmed: bool,
    }

    /// Terminal state of the submit-expense workflow.
    #[derive(Debug, Clone, PartialEq)]
    pub enum SubmitExpenseOutcome {
        /// The record was appended and the balance debited
        Committed { expense_id: u32, new_balance: f64 },
        /// The user declined the confirmation; no state was changed
        Cancelled,
        /// The amount exceeded the available balance; no state was changed
        Rejected { available: f64, required: f64 },
    }

    /// One search hit: the partition date plus the matching record.
    #[derive(Debug, Clone)]
    pub struct ExpenseMatch {
        pub date: NaiveDate,
        pub record: ExpenseRecord,
    }

    /// Balance figures for the report screen.
    #[derive(Debug, Clone)]
    pub struct BalanceReportResult {
        pub current_balance: f64,
        pub total_expenses: f64,
        pub available_balance: f64,
    }
}
