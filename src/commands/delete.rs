//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use tracing::warn;

/// Deletes expenses by ID. IDs that match no expense are skipped with a warning, so deleting the
/// same ID twice is harmless. The IDs that were actually deleted are returned.
///
/// # Errors
///
/// - Returns a `Storage` error if the expenses could not be saved.
pub async fn delete(config: Config, args: DeleteArgs) -> Result<Out<Vec<String>>> {
    let mut store = config.open_store().await;
    let mut deleted = Vec::new();
    for id in args.ids() {
        match store.remove(id).await.pub_result(ErrorType::Storage)? {
            Some(expense) => deleted.push(expense.id().to_string()),
            None => warn!("No expense found with ID: {id}"),
        }
    }

    let count = deleted.len();
    let message = format!("Deleted {count} expense{}", plural(count, "", "s"));
    Ok(Out::new(message, deleted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_delete_success() {
        let env = TestEnv::new().await;
        let coffee = env.insert_expense("Coffee", "4.50", "Food").await;
        let bus = env.insert_expense("Bus", "2", "Transport").await;

        let out = delete(env.config(), DeleteArgs::new([coffee.as_str()]))
            .await
            .unwrap();
        assert_eq!(out.message(), "Deleted 1 expense");
        assert_eq!(out.structure().unwrap(), &vec![coffee.clone()]);

        let store = env.store().await;
        assert_eq!(store.len(), 1);
        assert!(store.get(&coffee).is_none());
        assert!(store.get(&bus).is_some());
    }

    #[tokio::test]
    async fn test_delete_multiple() {
        let env = TestEnv::new().await;
        let a = env.insert_expense("A", "1", "Food").await;
        let b = env.insert_expense("B", "2", "Bills").await;
        let out = delete(env.config(), DeleteArgs::new([a, b])).await.unwrap();
        assert_eq!(out.message(), "Deleted 2 expenses");
        assert!(env.store().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let env = TestEnv::new().await;
        env.insert_expense("Coffee", "4.50", "Food").await;

        let out = delete(env.config(), DeleteArgs::new(["nonexistent-id"]))
            .await
            .unwrap();
        assert_eq!(out.message(), "Deleted 0 expenses");
        assert!(out.structure().unwrap().is_empty());
        assert_eq!(env.store().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_twice_is_idempotent() {
        let env = TestEnv::new().await;
        let coffee = env.insert_expense("Coffee", "4.50", "Food").await;
        env.insert_expense("Bus", "2", "Transport").await;

        delete(env.config(), DeleteArgs::new([coffee.as_str()]))
            .await
            .unwrap();
        let out = delete(env.config(), DeleteArgs::new([coffee.as_str(), coffee.as_str()]))
            .await
            .unwrap();
        assert_eq!(out.message(), "Deleted 0 expenses");
        assert_eq!(env.store().await.len(), 1);
    }
}
