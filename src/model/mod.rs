//! Types that represent the core data model, such as `Expense`, `Amount` and `Category`.
mod amount;
mod category;
mod expense;

pub use amount::{Amount, AmountError, DEFAULT_CURRENCY_SYMBOL};
pub use category::{color_for, Category, Color, Filter, ALL};
pub use expense::Expense;
