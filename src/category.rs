//! User-defined categories (called "families" by the server), used to color-code tasks

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::task::Task;

pub type CategoryId = i64;

/// Tasks with no (or an unknown) category are painted with this token
pub const DEFAULT_COLOR_TOKEN: &str = "bg-gray-500";

/// A semantic color, such as `bg-red-500`. Plain CSS colors (`#ff8800`, `teal`) are accepted too.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(String);

impl ColorToken {
    pub fn new<S: ToString>(token: S) -> Self {
        Self(token.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dark backgrounds (`bg-zinc-*`, `bg-gray-*`) need a light foreground
    pub fn is_dark(&self) -> bool {
        self.0.starts_with("bg-zinc") || self.0.starts_with("bg-gray")
    }

    /// Resolves this token to an actual color, if possible.
    ///
    /// CSS colors are parsed as is. For `<prefix>-<hue>-<shade>` tokens, the hue is looked up as a CSS color name,
    /// which works for the common hues (`red`, `green`, `blue`, `orange`...) but not for palette-only ones (`zinc`, `emerald`...).
    pub fn to_css(&self) -> Option<csscolorparser::Color> {
        if let Ok(color) = csscolorparser::parse(&self.0) {
            return Some(color);
        }
        let hue = self.0.split('-').nth(1)?;
        csscolorparser::parse(hue).ok()
    }
}

impl Default for ColorToken {
    fn default() -> Self {
        Self(DEFAULT_COLOR_TOKEN.to_string())
    }
}

impl Display for ColorToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// A label/color grouping for tasks
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    color: Option<ColorToken>,
}

impl Category {
    pub fn new<S: ToString>(id: CategoryId, name: S, color: ColorToken) -> Self {
        Self { id, name: name.to_string(), color: Some(color) }
    }

    pub fn id(&self) -> CategoryId { self.id }
    pub fn name(&self) -> &str { &self.name }

    /// The color of this category, or the default one if it has none
    pub fn color(&self) -> ColorToken {
        self.color.clone().unwrap_or_default()
    }
}

/// Find a category by its ID
pub fn find(categories: &[Category], id: Option<CategoryId>) -> Option<&Category> {
    let id = id?;
    categories.iter().find(|cat| cat.id == id)
}

/// The color a task should be painted with.
/// Tasks with no category, or with a reference to a category that does not exist, get the default color.
pub fn color_for(categories: &[Category], task: &Task) -> ColorToken {
    match find(categories, task.category()) {
        Some(category) => category.color(),
        None => ColorToken::default(),
    }
}
