//! Add command handler.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::form::ExpenseForm;
use crate::model::Expense;
use crate::utils::today;
use crate::{Config, Result};
use tracing::debug;

/// Records a new expense dated today.
///
/// The input goes through the same validation as the form: the name must be non-empty after
/// trimming and the amount must be a number greater than zero. A unique ID is generated for the
/// expense and returned along with it.
///
/// # Errors
///
/// - Returns a `Request` error, and records nothing, if the input is invalid.
/// - Returns a `Storage` error if the expenses could not be saved.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<Expense>> {
    let form = ExpenseForm {
        name: args.name().to_string(),
        amount: args.amount().to_string(),
        category: args.category().to_string(),
    };

    // Unlike `ExpenseForm::submit`, report why the input was rejected
    let expense = form
        .validate()
        .pub_result(ErrorType::Request)?
        .into_expense(today());
    debug!("Adding expense {}", expense.id());

    let mut store = config.open_store().await;
    store
        .add(expense.clone())
        .await
        .pub_result(ErrorType::Storage)?;

    let message = format!(
        "Added {} ({}) for {} with ID: {}",
        expense.name(),
        expense.category(),
        expense.amount().display_with(config.currency_symbol()),
        expense.id()
    );
    Ok(Out::new(message, expense))
}
