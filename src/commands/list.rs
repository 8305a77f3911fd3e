//! List and total command handlers.

use crate::args::ListArgs;
use crate::commands::{plural, Out};
use crate::model::{Amount, Filter};
use crate::view::ViewModel;
use crate::{Config, Result};

/// Shows the expenses matching the requested category, in the order they were added, followed by
/// the total of all expenses. The rendered list is the body of the output; the view model is the
/// structure.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<ViewModel>> {
    let store = config.open_store().await;
    let view = ViewModel::new(&store, args.category().clone());
    let body = view.render(config.currency_symbol(), !args.plain());

    let shown = view.rows().len();
    let message = match view.filter() {
        Filter::All => format!("Showing {shown} expense{}", plural(shown, "", "s")),
        Filter::Category(name) => format!(
            "Showing {shown} of {} expenses in {name}",
            store.len()
        ),
    };
    Ok(Out::new(message, view).with_body(body))
}

/// Shows the total of all expenses.
pub async fn total(config: Config) -> Result<Out<Amount>> {
    let store = config.open_store().await;
    let total = store.total();
    let count = store.len();
    let message = format!(
        "Total of {count} expense{}: {}",
        plural(count, "", "s"),
        total.display_with(config.currency_symbol())
    );
    Ok(Out::new(message, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::test::TestEnv;
    use crate::view::EMPTY_MESSAGE;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_list_empty() {
        let env = TestEnv::new().await;
        let out = list(env.config(), ListArgs::new(Filter::All, true))
            .await
            .unwrap();
        assert_eq!(out.message(), "Showing 0 expenses");
        assert!(out.body().unwrap().contains(EMPTY_MESSAGE));
        assert!(out.body().unwrap().ends_with("Total Expenses: ₹0.00"));
    }

    #[tokio::test]
    async fn test_list_filtered() {
        let env = TestEnv::new().await;
        let coffee = env.insert_expense("Coffee", "4.50", "Food").await;
        env.insert_expense("Bus", "2", "Transport").await;

        let out = list(env.config(), ListArgs::new(Filter::from(Category::Food), true))
            .await
            .unwrap();
        assert_eq!(out.message(), "Showing 1 of 2 expenses in Food");
        let view = out.structure().unwrap();
        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.rows()[0].expense.id(), coffee);
        assert_eq!(view.total(), Amount::from_str("6.50").unwrap());

        let body = out.body().unwrap();
        assert!(body.contains("Coffee"));
        assert!(!body.contains("Bus"));
        assert!(body.ends_with("Total Expenses: ₹6.50"));
    }

    #[tokio::test]
    async fn test_list_keeps_unknown_categories() {
        let env = TestEnv::new().await;
        env.write_slot(
            r#"[{"id":"x1","name":"Rent","amount":900,"category":"Housing","date":"2024-01-01"}]"#,
        )
        .await;
        let out = list(env.config(), ListArgs::new(Filter::All, true))
            .await
            .unwrap();
        assert_eq!(out.message(), "Showing 1 expense");
        assert!(out.body().unwrap().contains("Housing"));
    }

    #[tokio::test]
    async fn test_list_corrupt_slot_shows_empty_list() {
        let env = TestEnv::new().await;
        env.write_slot("this is not json").await;
        let out = list(env.config(), ListArgs::new(Filter::All, true))
            .await
            .unwrap();
        assert_eq!(out.message(), "Showing 0 expenses");
    }

    #[tokio::test]
    async fn test_total() {
        let env = TestEnv::new().await;
        env.insert_expense("Coffee", "4.50", "Food").await;
        env.insert_expense("Bus", "2", "Transport").await;
        let out = total(env.config()).await.unwrap();
        assert_eq!(out.message(), "Total of 2 expenses: ₹6.50");
        assert_eq!(out.structure().unwrap(), &Amount::from_str("6.5").unwrap());
    }
}
