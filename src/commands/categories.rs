use crate::commands::Out;
use crate::model::{Category, Color};
use serde::Serialize;

/// A category and its swatch color.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct CategoryInfo {
    pub name: Category,
    pub color: Color,
}

/// Lists the fixed categories, in order, with their colors.
pub fn categories() -> Out<Vec<CategoryInfo>> {
    let infos: Vec<CategoryInfo> = Category::ALL
        .into_iter()
        .map(|c| CategoryInfo {
            name: c,
            color: c.color(),
        })
        .collect();
    let body = infos
        .iter()
        .map(|i| format!("{} {} ({})", i.color.paint("●"), i.name, i.color))
        .collect::<Vec<_>>()
        .join("\n");
    Out::new(format!("{} categories", infos.len()), infos).with_body(body)
}
