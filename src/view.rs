//! Derived, read-only state for displaying the expense list.
//!
//! A `ViewModel` holds no state of its own. It is rebuilt from the store whenever the store or the
//! active filter changes.

use crate::model::{color_for, Amount, Color, Expense, Filter, DEFAULT_CURRENCY_SYMBOL};
use crate::store::ExpenseStore;
use serde::Serialize;

/// Shown in place of the list when the filtered view is empty.
pub const EMPTY_MESSAGE: &str = "No expenses found. Add some!";

const SWATCH: &str = "●";

/// One displayed expense with its swatch color.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Row {
    #[serde(flatten)]
    pub expense: Expense,
    pub color: Color,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ViewModel {
    #[serde(serialize_with = "serialize_filter")]
    filter: Filter,
    rows: Vec<Row>,
    total: Amount,
}

impl ViewModel {
    pub fn new<S>(store: &ExpenseStore<S>, filter: Filter) -> Self {
        let rows = store
            .filter_by_category(&filter)
            .map(|e| Row {
                expense: e.clone(),
                color: color_for(e.category()),
            })
            .collect();
        Self {
            total: store.total(),
            filter,
            rows,
        }
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The total of the whole store, not just the visible rows.
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Renders the list as text. `color` controls whether swatches carry terminal colors.
    pub fn render(&self, currency: &str, color: bool) -> String {
        let mut out = format!("Expenses ({})\n", self.filter);
        if self.rows.is_empty() {
            out.push_str(EMPTY_MESSAGE);
            out.push('\n');
        } else {
            let amounts: Vec<String> = self
                .rows
                .iter()
                .map(|r| r.expense.amount().display_with(currency))
                .collect();
            let name_w = width(self.rows.iter().map(|r| r.expense.name()));
            let cat_w = width(self.rows.iter().map(|r| r.expense.category()));
            let amt_w = width(amounts.iter().map(String::as_str));
            for (row, amount) in self.rows.iter().zip(&amounts) {
                let swatch = if color {
                    row.color.paint(SWATCH)
                } else {
                    SWATCH.to_string()
                };
                let e = &row.expense;
                out.push_str(&format!(
                    "{swatch} {:<name_w$}  {:<cat_w$}  {}  {:>amt_w$}  {}\n",
                    e.name(),
                    e.category(),
                    e.date().format("%Y-%m-%d"),
                    amount,
                    e.id(),
                ));
            }
        }
        out.push_str(&format!(
            "Total Expenses: {}",
            self.total.display_with(currency)
        ));
        out
    }
}

impl std::fmt::Display for ViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(DEFAULT_CURRENCY_SYMBOL, false))
    }
}

fn width<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.map(|s| s.chars().count()).max().unwrap_or(0)
}

fn serialize_filter<S>(filter: &Filter, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(filter)
}
