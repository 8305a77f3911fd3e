use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the expenses home directory and an initial `config.json` with default settings. Running
/// it again on an existing directory leaves the configuration and data untouched.
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(expenses_home: &Path) -> Result<Out<()>> {
    let config = Config::create(expenses_home)
        .await
        .context("Unable to create the data directory and config")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Expenses home is ready at {}",
        config.root().to_string_lossy()
    )
    .into())
}
