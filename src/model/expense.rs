use crate::model::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single recorded expense. Expenses are never changed after they are created; the store only
/// appends new ones or removes them by `id`.
///
/// The JSON form is the persisted format of the storage slot:
///
/// ```json
/// {
///   "id": "2f1d0c0e-8a7e-4c51-9a59-2d1b3c4e5f60",
///   "name": "Coffee",
///   "amount": 4.5,
///   "category": "Food",
///   "date": "2026-10-19"
/// }
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Expense {
    id: String,
    name: String,
    amount: Amount,
    category: String,
    date: NaiveDate,
}

impl Expense {
    pub(crate) fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: Amount,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            category: category.into(),
            date,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_serialize_persisted_format() {
        let expense = Expense::new(
            "abc",
            "Coffee",
            Amount::from_str("4.50").unwrap(),
            "Food",
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        );
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "abc",
                "name": "Coffee",
                "amount": 4.5,
                "category": "Food",
                "date": "2026-10-19"
            })
        );
    }

    #[test]
    fn test_deserialize_unknown_category() {
        let json = r#"{"id":"1","name":"Rent","amount":900,"category":"Housing","date":"2024-02-29"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.category(), "Housing");
        assert_eq!(expense.amount(), Amount::from_str("900").unwrap());
        assert_eq!(
            expense.date(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_deserialize_bad_date_is_error() {
        let json = r#"{"id":"1","name":"Rent","amount":900,"category":"Bills","date":"29/02/2024"}"#;
        assert!(serde_json::from_str::<Expense>(json).is_err());
    }
}
