//! The fixed category set, the display color of each category, and the category filter.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The filter sentinel that selects every expense. It is not a category.
pub const ALL: &str = "All";

/// One of the fixed categories offered when recording an expense.
///
/// Stored expenses keep their category as a plain string, so data that names some other category
/// still loads. See `color_for`.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum Category {
    #[default]
    #[value(name = "Food")]
    Food,
    #[value(name = "Transport")]
    Transport,
    #[value(name = "Entertainment")]
    Entertainment,
    #[value(name = "Shopping")]
    Shopping,
    #[value(name = "Bills")]
    Bills,
    #[value(name = "Other")]
    Other,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

impl Category {
    /// The fixed category set in display order.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Bills,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Other => "Other",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Category::Food => Color::Amber,
            Category::Transport => Color::Blue,
            Category::Entertainment => Color::Purple,
            Category::Shopping => Color::Pink,
            Category::Bills => Color::Red,
            Category::Other => Color::Gray,
        }
    }

    /// Finds the fixed category with exactly this name.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

/// The swatch color shown next to an expense.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Amber,
    Blue,
    Purple,
    Pink,
    Red,
    #[default]
    Gray,
}

serde_plain::derive_display_from_serialize!(Color);
serde_plain::derive_fromstr_from_deserialize!(Color);

impl Color {
    /// The ANSI SGR foreground code for a 256-color terminal.
    pub fn ansi_code(&self) -> &'static str {
        match self {
            Color::Amber => "38;5;214",
            Color::Blue => "38;5;33",
            Color::Purple => "38;5;135",
            Color::Pink => "38;5;205",
            Color::Red => "38;5;196",
            Color::Gray => "38;5;245",
        }
    }

    /// Wraps `text` in this color's escape codes.
    pub fn paint(&self, text: &str) -> String {
        format!("\x1b[{}m{text}\x1b[0m", self.ansi_code())
    }
}

/// Returns the display color for `category`. Names outside the fixed set get the default neutral
/// color, never an error.
pub fn color_for(category: &str) -> Color {
    Category::from_name(category)
        .map(|c| c.color())
        .unwrap_or_default()
}

/// Selects which expenses are shown: everything, or a single category by exact name.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(name) => name == category,
        }
    }
}

impl From<Category> for Filter {
    fn from(value: Category) -> Self {
        Filter::Category(value.as_str().to_string())
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL {
            Filter::All
        } else {
            Filter::Category(s.to_string())
        })
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => f.write_str(ALL),
            Filter::Category(name) => f.write_str(name),
        }
    }
}
