//! Validates raw user input and turns it into new expenses.

use crate::model::{Amount, AmountError, Category, Expense};
use crate::utils::generate_expense_id;
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The raw contents of the "add expense" form.
///
/// After a successful `submit`, `name` and `amount` are cleared while `category` keeps its value
/// so that several expenses in the same category can be entered in a row.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ExpenseForm {
    pub name: String,
    pub amount: String,
    pub category: String,
}

/// The reason a form submission did not produce an expense.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Rejection {
    /// The name is empty after trimming.
    EmptyName,
    /// The amount is not a number.
    InvalidAmount,
    /// The amount is zero or negative.
    NonPositiveAmount,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::EmptyName => write!(f, "The expense name cannot be empty"),
            Rejection::InvalidAmount => write!(f, "The amount must be a number"),
            Rejection::NonPositiveAmount => write!(f, "The amount must be greater than zero"),
        }
    }
}

impl std::error::Error for Rejection {}

/// The validated fields of a form, ready to become an `Expense`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ValidExpense {
    pub name: String,
    pub amount: Amount,
    pub category: String,
}

impl ValidExpense {
    /// Builds the expense with a fresh id dated `date`.
    pub fn into_expense(self, date: NaiveDate) -> Expense {
        Expense::new(
            generate_expense_id(),
            self.name,
            self.amount,
            self.category,
            date,
        )
    }
}

impl ExpenseForm {
    /// Creates an empty form with the default category selected.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            category: Category::default().to_string(),
        }
    }

    /// Checks the current input without changing it.
    pub fn validate(&self) -> Result<ValidExpense, Rejection> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Rejection::EmptyName);
        }
        let amount = Amount::from_str(&self.amount).map_err(|e| match e {
            AmountError::Empty
            | AmountError::Invalid(_)
            | AmountError::Malformed
            | AmountError::OutOfRange => Rejection::InvalidAmount,
        })?;
        if !amount.is_positive() {
            return Err(Rejection::NonPositiveAmount);
        }
        Ok(ValidExpense {
            name: name.to_string(),
            amount,
            category: self.category.clone(),
        })
    }

    /// Validates the input and, if it is acceptable, returns a new expense dated `today` and
    /// clears `name` and `amount`. Invalid input yields `None` and the form is left as it was.
    pub fn submit(&mut self, today: NaiveDate) -> Option<Expense> {
        let valid = self.validate().ok()?;
        self.name.clear();
        self.amount.clear();
        Some(valid.into_expense(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Filter;
    use crate::storage::MemoryStorage;
    use crate::store::{ExpenseStore, DEFAULT_STORAGE_KEY};

    fn form(name: &str, amount: &str, category: &str) -> ExpenseForm {
        ExpenseForm {
            name: name.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_new_defaults_to_food() {
        let form = ExpenseForm::new();
        assert_eq!(form.category, "Food");
        assert!(form.name.is_empty());
        assert!(form.amount.is_empty());
    }

    #[test]
    fn test_submit_valid() {
        let mut f = form("  Coffee ", "4.50", "Food");
        let expense = f.submit(today()).unwrap();
        assert_eq!(expense.name(), "Coffee");
        assert_eq!(expense.amount(), Amount::from_str("4.5").unwrap());
        assert_eq!(expense.category(), "Food");
        assert_eq!(expense.date(), today());
        assert!(!expense.id().is_empty());

        // name and amount are cleared, category stays
        assert_eq!(f, form("", "", "Food"));
    }

    #[test]
    fn test_submit_generates_distinct_ids() {
        let a = form("A", "1", "Other").submit(today()).unwrap();
        let b = form("A", "1", "Other").submit(today()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_rejections() {
        let cases = [
            ("", "4.50", Rejection::EmptyName),
            ("   ", "4.50", Rejection::EmptyName),
            ("Coffee", "", Rejection::InvalidAmount),
            ("Coffee", "four", Rejection::InvalidAmount),
            ("Coffee", "--5", Rejection::InvalidAmount),
            ("Coffee", "-₹-5", Rejection::InvalidAmount),
            ("Coffee", "0", Rejection::NonPositiveAmount),
            ("Coffee", "-3", Rejection::NonPositiveAmount),
        ];
        for (name, amount, want) in cases {
            let mut f = form(name, amount, "Food");
            assert_eq!(f.validate(), Err(want), "{name:?} {amount:?}");
            assert!(f.submit(today()).is_none());
            // rejected input is left in place
            assert_eq!(f, form(name, amount, "Food"));
        }
    }

    #[test]
    fn test_out_of_set_category_is_accepted() {
        let expense = form("Rent", "900", "Housing").submit(today()).unwrap();
        assert_eq!(expense.category(), "Housing");
    }

    #[tokio::test]
    async fn test_valid_submissions_grow_the_store_and_invalid_do_not() {
        let mut store = ExpenseStore::load(MemoryStorage::new(), DEFAULT_STORAGE_KEY).await;
        let inputs = [
            ("Coffee", "4.50", true),
            ("", "4.50", false),
            ("Tea", "abc", false),
            ("Tea", "0", false),
            ("Tea", "-1", false),
            ("Tea", "0.01", true),
        ];
        for (name, amount, valid) in inputs {
            let before = store.len();
            if let Some(expense) = form(name, amount, "Food").submit(today()) {
                let parsed = Amount::from_str(amount).unwrap();
                assert_eq!(expense.amount(), parsed);
                store.add(expense).await.unwrap();
            }
            let expected = if valid { before + 1 } else { before };
            assert_eq!(store.len(), expected, "{name:?} {amount:?}");
        }
    }

    #[tokio::test]
    async fn test_coffee_and_bus() {
        let mut store = ExpenseStore::load(MemoryStorage::new(), DEFAULT_STORAGE_KEY).await;
        let mut form = ExpenseForm::new();

        form.name = "Coffee".to_string();
        form.amount = "4.50".to_string();
        form.category = "Food".to_string();
        let coffee = form.submit(today()).unwrap();
        let coffee_id = coffee.id().to_string();
        store.add(coffee).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.total(), Amount::from_str("4.50").unwrap());

        form.name = "Bus".to_string();
        form.amount = "2".to_string();
        form.category = "Transport".to_string();
        store.add(form.submit(today()).unwrap()).await.unwrap();
        assert_eq!(store.total(), Amount::from_str("6.50").unwrap());

        let food = Filter::Category("Food".to_string());
        let view: Vec<&Expense> = store.filter_by_category(&food).collect();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id(), coffee_id);

        store.remove(&coffee_id).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.expenses()[0].name(), "Bus");
        assert_eq!(store.total(), Amount::from_str("2").unwrap());
    }
}
