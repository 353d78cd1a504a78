//! Interactive text menu.
//!
//! All terminal concerns live here: prompts, retry loops, table
//! rendering. The menu calls the domain services with typed commands and
//! renders the `shared` DTOs returned by the mappers. Storage errors are
//! reported and the session continues; only EOF or an explicit exit ends
//! the loop.

use std::io::{self, Write};

use anyhow::Result;

use crate::backend::io::mappers::expense_mapper::ExpenseMapper;
use crate::backend::AppState;

const BANNER_WIDTH: usize = 50;
const TABLE_WIDTH: usize = 80;

/// Whether the menu loop should keep going after a flow returns.
#[derive(Debug, PartialEq)]
enum MenuSignal {
    Continue,
    Quit,
}

/// Run the main menu loop until the user exits or stdin closes.
pub fn run(state: &AppState) -> Result<()> {
    print_banner("WELCOME TO PERSONAL EXPENSES TRACKER");

    loop {
        print_main_menu();
        let Some(choice) = prompt("\nEnter your choice (1-4): ")? else {
            return goodbye();
        };

        let signal = match choice.as_str() {
            "1" => check_balance(state)?,
            "2" => view_expenses(state)?,
            "3" => add_expense(state)?,
            "4" => return goodbye(),
            _ => {
                println!("\nInvalid choice. Please enter a number between 1 and 4.");
                MenuSignal::Continue
            }
        };

        if signal == MenuSignal::Quit {
            return goodbye();
        }
    }
}

fn print_main_menu() {
    println!("\n{}", "=".repeat(BANNER_WIDTH));
    println!("   PERSONAL EXPENSES TRACKER");
    println!("{}", "=".repeat(BANNER_WIDTH));
    println!("\n1. Check Remaining Balance");
    println!("2. View Expenses");
    println!("3. Add New Expense");
    println!("4. Exit");
    println!("\n{}", "=".repeat(BANNER_WIDTH));
}

/// Balance report screen, with an optional add-funds prompt.
fn check_balance(state: &AppState) -> Result<MenuSignal> {
    let report = match state.expense_service.balance_report() {
        Ok(report) => ExpenseMapper::to_balance_report_dto(report),
        Err(e) => {
            println!("Error reading balance report: {}", e);
            return Ok(MenuSignal::Continue);
        }
    };

    print_banner("BALANCE REPORT");
    println!("\nCurrent Balance:        ${:.2}", report.current_balance);
    println!("Total Expenses to Date: ${:.2}", report.total_expenses);
    println!("Available Balance:      ${:.2}", report.available_balance);
    println!("\n{}", "=".repeat(BANNER_WIDTH));

    let Some(answer) = prompt("\nWould you like to add money to your balance? (y/n): ")? else {
        return Ok(MenuSignal::Quit);
    };
    if answer.to_lowercase() != "y" {
        return Ok(MenuSignal::Continue);
    }

    loop {
        let Some(input) = prompt("Enter amount to add: $")? else {
            return Ok(MenuSignal::Quit);
        };
        let amount = match state.validator.validate_amount(&input) {
            Ok(amount) => amount,
            Err(error) => {
                println!("Error: {}", state.validator.get_error_message(&error));
                continue;
            }
        };

        let request = shared::AddFundsRequest { amount };
        match state
            .balance_service
            .add_funds(ExpenseMapper::to_add_funds_command(request))
        {
            Ok(result) => {
                let response = ExpenseMapper::to_add_funds_dto(result);
                println!("\nSuccess! {}", response.success_message);
                println!("New Balance: ${:.2}", response.new_balance);
            }
            Err(e) => println!("Error adding funds: {}", e),
        }
        return Ok(MenuSignal::Continue);
    }
}

/// Add-expense flow: collect date, item and amount with retry loops,
/// confirm, submit.
fn add_expense(state: &AppState) -> Result<MenuSignal> {
    let available = state.balance_service.current_balance();
    print_banner(&format!("AVAILABLE BALANCE: ${:.2}", available));

    let date = loop {
        let Some(input) = prompt("\nEnter date (YYYY-MM-DD, e.g., 2025-11-07): ")? else {
            return Ok(MenuSignal::Quit);
        };
        match state.validator.validate_date(&input) {
            Ok(_) => break input,
            Err(error) => println!("Error: {}", state.validator.get_error_message(&error)),
        }
    };

    let item_name = loop {
        let Some(input) = prompt("Enter item name: ")? else {
            return Ok(MenuSignal::Quit);
        };
        match state.validator.validate_item_name(&input) {
            Ok(item_name) => break item_name,
            Err(error) => println!("Error: {}", state.validator.get_error_message(&error)),
        }
    };

    let amount = loop {
        let Some(input) = prompt("Enter amount paid: $")? else {
            return Ok(MenuSignal::Quit);
        };
        match state.validator.validate_amount(&input) {
            Ok(amount) => break amount,
            Err(error) => println!("Error: {}", state.validator.get_error_message(&error)),
        }
    };

    println!("\n{}", "-".repeat(BANNER_WIDTH));
    println!("EXPENSE DETAILS:");
    println!("Date:   {}", date);
    println!("Item:   {}", item_name);
    println!("Amount: ${:.2}", amount);
    println!("{}", "-".repeat(BANNER_WIDTH));

    let Some(answer) = prompt("\nConfirm this expense? (y/n): ")? else {
        return Ok(MenuSignal::Quit);
    };
    let confirmed = answer.to_lowercase() == "y";

    let request = shared::SubmitExpenseRequest {
        date,
        item_name,
        amount,
        confirmed,
    };
    match state
        .expense_service
        .submit_expense(ExpenseMapper::to_submit_command(request))
    {
        Ok(outcome) => match ExpenseMapper::to_submit_expense_dto(outcome) {
            shared::SubmitExpenseResponse::Committed {
                new_balance,
                success_message,
                ..
            } => {
                println!("\nSuccess! {}", success_message);
                println!("Remaining Balance: ${:.2}", new_balance);
            }
            shared::SubmitExpenseResponse::Cancelled { message } => println!("{}", message),
            shared::SubmitExpenseResponse::Rejected {
                reason,
                available_balance,
                required_amount,
            } => {
                println!("\nError: {}", reason);
                println!(
                    "Available: ${:.2}, Required: ${:.2}",
                    available_balance, required_amount
                );
            }
        },
        Err(e) => println!("Error saving expense: {}", e),
    }

    Ok(MenuSignal::Continue)
}

/// View-expenses submenu with the two search screens.
fn view_expenses(state: &AppState) -> Result<MenuSignal> {
    loop {
        print_banner("VIEW EXPENSES");
        println!("\n1. Search by item name");
        println!("2. Search by amount");
        println!("3. Back to main menu");
        println!("\n{}", "=".repeat(BANNER_WIDTH));

        let Some(choice) = prompt("\nEnter your choice (1-3): ")? else {
            return Ok(MenuSignal::Quit);
        };
        match choice.as_str() {
            "1" => {
                if search_by_name(state)? == MenuSignal::Quit {
                    return Ok(MenuSignal::Quit);
                }
            }
            "2" => {
                if search_by_amount(state)? == MenuSignal::Quit {
                    return Ok(MenuSignal::Quit);
                }
            }
            "3" => return Ok(MenuSignal::Continue),
            _ => println!("Invalid choice. Please enter 1, 2, or 3."),
        }
    }
}

fn search_by_name(state: &AppState) -> Result<MenuSignal> {
    let Some(term) = prompt("\nEnter item name to search: ")? else {
        return Ok(MenuSignal::Quit);
    };

    match state.expense_service.search_by_name(&term) {
        Ok(matches) => {
            let response = shared::ExpenseSearchResponse {
                matches: matches.into_iter().map(ExpenseMapper::to_dto).collect(),
            };
            if response.matches.is_empty() {
                println!("\nNo expenses found matching '{}'", term);
            } else {
                print_search_results(&response.matches);
            }
        }
        Err(e) => println!("Error searching expenses: {}", e),
    }
    Ok(MenuSignal::Continue)
}

fn search_by_amount(state: &AppState) -> Result<MenuSignal> {
    let amount = loop {
        let Some(input) = prompt("\nEnter amount to search: $")? else {
            return Ok(MenuSignal::Quit);
        };
        match state.validator.clean_and_parse_amount(&input) {
            Ok(amount) => break amount,
            Err(_) => println!("Error: Please enter a valid number."),
        }
    };

    match state.expense_service.search_by_amount(amount) {
        Ok(matches) => {
            let response = shared::ExpenseSearchResponse {
                matches: matches.into_iter().map(ExpenseMapper::to_dto).collect(),
            };
            if response.matches.is_empty() {
                println!("\nNo expenses found with amount ${:.2}", amount);
            } else {
                print_search_results(&response.matches);
            }
        }
        Err(e) => println!("Error searching expenses: {}", e),
    }
    Ok(MenuSignal::Continue)
}

fn print_search_results(expenses: &[shared::Expense]) {
    println!("\n{}", "=".repeat(TABLE_WIDTH));
    println!("   SEARCH RESULTS");
    println!("{}", "=".repeat(TABLE_WIDTH));
    println!(
        "{:<5} {:<12} {:<25} {:<20} {:>10}",
        "ID", "Date", "Item", "Timestamp", "Amount"
    );
    println!("{}", "-".repeat(TABLE_WIDTH));
    for expense in expenses {
        println!(
            "{:<5} {:<12} {:<25} {:<20} {:>10}",
            expense.id,
            expense.date,
            expense.item_name,
            expense.timestamp,
            format!("${:.2}", expense.amount)
        );
    }
    println!("{}", "=".repeat(TABLE_WIDTH));
}

fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(BANNER_WIDTH));
    println!("   {}", title);
    println!("{}", "=".repeat(BANNER_WIDTH));
}

fn goodbye() -> Result<()> {
    print_banner("Thank you for using Expense Tracker!");
    println!();
    Ok(())
}

/// Print a prompt and read one trimmed line. Returns `None` when stdin
/// reaches EOF, which callers treat as a clean exit request.
fn prompt(text: &str) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes_read = io::stdin().read_line(&mut line)?;
    if bytes_read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
