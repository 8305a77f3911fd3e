pub mod args;
pub mod commands;
mod config;
mod error;
pub mod form;
pub mod model;
pub mod storage;
pub mod store;
mod utils;
pub mod view;


pub use config::Config;
pub use error::{Error, ErrorType, IntoResult, Result};
pub use form::ExpenseForm;
pub use store::ExpenseStore;
