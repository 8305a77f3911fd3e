//! These structs provide the CLI interface for the expenses CLI.

use crate::model::{Category, Filter};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line tool for tracking what you spend.
///
/// Record named expenses with an amount and a category, list them, filter them by category,
/// delete them and see the running total. Everything is kept in a single JSON file in your
/// expenses home directory.
#[derive(Debug, Parser, Clone)]
#[command(version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the expenses home directory and its configuration file.
    ///
    /// By default this is $HOME/expenses. Pass --expenses-home or set EXPENSES_HOME to keep your
    /// data somewhere else.
    Init,
    /// Record a new expense dated today.
    Add(AddArgs),
    /// Delete one or more expenses by ID.
    Delete(DeleteArgs),
    /// Show expenses, optionally limited to one category, along with the total.
    List(ListArgs),
    /// Show the total of all expenses.
    Total,
    /// Show the categories that can be chosen when adding an expense.
    Categories,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where expenses and configuration are held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_expenses_home())]
    expenses_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, expenses_home: PathBuf) -> Self {
        Self {
            log_level,
            expenses_home: expenses_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn expenses_home(&self) -> &DisplayPath {
        &self.expenses_home
    }
}

/// Args for the `expenses add` command.
#[derive(Debug, Parser, Clone, Serialize, Deserialize)]
pub struct AddArgs {
    /// What the money was spent on, e.g. "Coffee".
    name: String,

    /// How much was spent. Must be greater than zero. A leading ₹ or $ and thousands separators
    /// are accepted, e.g. 4.50 or ₹1,200.
    #[arg(allow_hyphen_values = true)]
    amount: String,

    /// The category of the expense.
    #[arg(long, short, value_enum, default_value_t = Category::Food)]
    category: Category,
}

impl AddArgs {
    pub fn new(name: impl Into<String>, amount: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            category,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Args for the `expenses delete` command.
#[derive(Debug, Parser, Clone, Serialize, Deserialize)]
pub struct DeleteArgs {
    /// The IDs of the expenses to delete, as shown by `expenses list`.
    #[arg(required = true)]
    ids: Vec<String>,
}

impl DeleteArgs {
    pub fn new<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// Args for the `expenses list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Show only this category. "All" shows everything.
    #[arg(long, short, default_value = "All")]
    category: Filter,

    /// Do not color the category swatches.
    #[arg(long)]
    plain: bool,
}

impl ListArgs {
    pub fn new(category: Filter, plain: bool) -> Self {
        Self { category, plain }
    }

    pub fn category(&self) -> &Filter {
        &self.category
    }

    pub fn plain(&self) -> bool {
        self.plain
    }
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --expenses-home or EXPENSES_HOME instead of relying on the \
                default expenses home directory. If you continue using the program right now, \
                you may have problems!",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_add_defaults_to_food() {
        let args = parse(&["expenses", "--expenses-home", "/tmp/x", "add", "Coffee", "4.50"]);
        assert_eq!(args.common().expenses_home().path(), Path::new("/tmp/x"));
        match args.command() {
            Command::Add(add) => {
                assert_eq!(add.name(), "Coffee");
                assert_eq!(add.amount(), "4.50");
                assert_eq!(add.category(), Category::Food);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_with_category() {
        let args = parse(&["expenses", "add", "Bus", "2", "--category", "Transport"]);
        match args.command() {
            Command::Add(add) => assert_eq!(add.category(), Category::Transport),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_negative_amount_reaches_validation() {
        let args = parse(&["expenses", "add", "Refund", "-5"]);
        match args.command() {
            Command::Add(add) => assert_eq!(add.amount(), "-5"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_rejects_unknown_category() {
        let result = Args::try_parse_from(["expenses", "add", "Rent", "900", "-c", "Housing"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_list() {
        let args = parse(&["expenses", "list"]);
        match args.command() {
            Command::List(list) => {
                assert_eq!(list.category(), &Filter::All);
                assert!(!list.plain());
            }
            other => panic!("unexpected command {other:?}"),
        }

        let args = parse(&["expenses", "list", "-c", "Bills", "--plain"]);
        match args.command() {
            Command::List(list) => {
                assert_eq!(list.category(), &Filter::from(Category::Bills));
                assert!(list.plain());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete_requires_ids() {
        assert!(Args::try_parse_from(["expenses", "delete"]).is_err());
        let args = parse(&["expenses", "delete", "a", "b"]);
        match args.command() {
            Command::Delete(delete) => assert_eq!(delete.ids(), ["a", "b"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_log_level() {
        let args = parse(&["expenses", "--log-level", "debug", "total"]);
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
    }
}
