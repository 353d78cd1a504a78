//! Conversions between domain results and the `shared` DTOs consumed by
//! the presentation layer.

use crate::backend::domain::commands::expenses::{
    BalanceReportResult, ExpenseMatch, SubmitExpenseCommand, SubmitExpenseOutcome,
};
use crate::backend::domain::commands::funds::{AddFundsCommand, AddFundsResult};

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_submit_command(request: shared::SubmitExpenseRequest) -> SubmitExpenseCommand {
        SubmitExpenseCommand {
            date: request.date,
            item_name: request.item_name,
            amount: request.amount,
            confirmed: request.confirmed,
        }
    }

    pub fn to_add_funds_command(request: shared::AddFundsRequest) -> AddFundsCommand {
        AddFundsCommand {
            amount: request.amount,
        }
    }

    pub fn to_dto(entry: ExpenseMatch) -> shared::Expense {
        shared::Expense {
            id: entry.record.id,
            date: entry.date.format("%Y-%m-%d").to_string(),
            item_name: entry.record.item_name.clone(),
            timestamp: entry.record.formatted_timestamp(),
            amount: entry.record.amount,
        }
    }

    pub fn to_balance_report_dto(result: BalanceReportResult) -> shared::BalanceReport {
        shared::BalanceReport {
            current_balance: result.current_balance,
            total_expenses: result.total_expenses,
            available_balance: result.available_balance,
        }
    }

    pub fn to_add_funds_dto(result: AddFundsResult) -> shared::AddFundsResponse {
        shared::AddFundsResponse {
            new_balance: result.new_balance,
            formatted_amount: format!("${:.2}", result.amount_added),
            success_message: format!("${:.2} added to your balance.", result.amount_added),
        }
    }

    pub fn to_submit_expense_dto(outcome: SubmitExpenseOutcome) -> shared::SubmitExpenseResponse {
        match outcome {
            SubmitExpenseOutcome::Committed {
                expense_id,
                new_balance,
            } => shared::SubmitExpenseResponse::Committed {
                expense_id,
                new_balance,
                success_message: format!("Expense saved with ID #{}", expense_id),
            },
            SubmitExpenseOutcome::Cancelled => shared::SubmitExpenseResponse::Cancelled {
                message: "Expense cancelled.".to_string(),
            },
            SubmitExpenseOutcome::Rejected {
                available,
                required,
            } => shared::SubmitExpenseResponse::Rejected {
                reason: "Insufficient balance! Cannot save expense.".to_string(),
                available_balance: available,
                required_amount: required,
            },
        }
    }
}
