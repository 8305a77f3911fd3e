//! The in-memory list of expenses and its write-through mirror in a storage slot.

use crate::model::{Amount, Expense, Filter};
use crate::storage::Storage;
use crate::Result;
use anyhow::Context;
use tracing::{debug, warn};

/// The storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "expenses";

/// Holds the ordered list of expenses. Every change is written, in full, to the storage slot
/// named by `key` before the mutating call returns.
#[derive(Debug)]
pub struct ExpenseStore<S> {
    storage: S,
    key: String,
    expenses: Vec<Expense>,
}

impl<S> ExpenseStore<S>
where
    S: Storage,
{
    /// Reads the slot named `key` from `storage`. A missing, unreadable or corrupt slot yields an
    /// empty store; this never fails.
    pub async fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let expenses = match read_slot(&storage, &key).await {
            Ok(expenses) => expenses,
            Err(e) => {
                warn!("Starting with no expenses because the stored data could not be loaded: {e:#}");
                Vec::new()
            }
        };
        debug!("Loaded {} expenses from slot '{key}'", expenses.len());
        Self {
            storage,
            key,
            expenses,
        }
    }

    /// Appends `expense` and persists. If persisting fails the expense is not kept.
    pub async fn add(&mut self, expense: Expense) -> Result<()> {
        self.expenses.push(expense);
        if let Err(e) = self.persist().await {
            let _ = self.expenses.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Removes the expense with `id` and persists. Returns the removed expense, or `None` if no
    /// expense has that id.
    pub async fn remove(&mut self, id: &str) -> Result<Option<Expense>> {
        let removed = match self.expenses.iter().position(|e| e.id() == id) {
            Some(ix) => Some((ix, self.expenses.remove(ix))),
            None => None,
        };
        if let Err(e) = self.persist().await {
            if let Some((ix, expense)) = removed {
                self.expenses.insert(ix, expense);
            }
            return Err(e);
        }
        Ok(removed.map(|(_, expense)| expense))
    }

    async fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.expenses)
            .context("Unable to serialize expenses")?;
        self.storage
            .set_item(&self.key, &json)
            .await
            .with_context(|| format!("Unable to persist expenses to slot '{}'", self.key))
    }
}

impl<S> ExpenseStore<S> {
    /// The sum of every expense, regardless of any filter being displayed.
    pub fn total(&self) -> Amount {
        self.expenses.iter().map(Expense::amount).sum()
    }

    /// A lazy view of the expenses matching `filter`, in insertion order. The iterator can be
    /// cloned to walk the view again.
    pub fn filter_by_category<'a>(
        &'a self,
        filter: &'a Filter,
    ) -> impl Iterator<Item = &'a Expense> + Clone + 'a {
        self.expenses
            .iter()
            .filter(move |e| filter.matches(e.category()))
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

async fn read_slot<S: Storage>(storage: &S, key: &str) -> Result<Vec<Expense>> {
    let Some(json) = storage.get_item(key).await? else {
        return Ok(Vec::new());
    };
    let expenses: Option<Vec<Expense>> = serde_json::from_str(&json)
        .with_context(|| format!("The data in slot '{key}' is not a list of expenses"))?;
    Ok(expenses.unwrap_or_default())
}
