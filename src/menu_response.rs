use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::menu_options::Difficulty;
use crate::validation::{LenientFields, ValidationReport};

pub const PLACEHOLDER_NAME: &str = "Invalid";
pub const PLACEHOLDER_DESCRIPTION: &str = "No description provided.";

/// One suggested recipe as returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub servings: i64,
    pub cooking_time: i64,
    pub difficulty: Difficulty,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl Default for MenuItem {
    fn default() -> Self {
        MenuItem {
            name: PLACEHOLDER_NAME.to_string(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            servings: 1,
            cooking_time: 0,
            difficulty: Difficulty::Any,
            ingredients: Vec::new(),
            instructions: Vec::new(),
        }
    }
}

impl MenuItem {
    pub fn from_value(raw: &Value) -> Self {
        let defaults = MenuItem::default();
        let mut fields = LenientFields::new(raw);
        let item = MenuItem {
            name: fields.scalar("name", defaults.name),
            description: fields.scalar("description", defaults.description),
            servings: fields.integer("servings", defaults.servings),
            cooking_time: fields.integer("cookingTime", defaults.cooking_time),
            difficulty: fields.scalar("difficulty", defaults.difficulty),
            ingredients: fields.list("ingredients", defaults.ingredients),
            instructions: fields.list("instructions", defaults.instructions),
        };
        if !fields.rejected.is_empty() {
            tracing::debug!(
                fields = ?fields.rejected,
                "menu item fields replaced with placeholders"
            );
        }
        item
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseViolation {
    #[error("Menu {0}: name is missing")]
    MissingName(usize),
    #[error("Menu {0}: no ingredients listed")]
    NoIngredients(usize),
    #[error("Menu {0}: no instructions provided")]
    NoInstructions(usize),
    #[error("Menu {0}: servings must be at least 1")]
    ServingsTooLow(usize),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuResponse {
    pub menus: Vec<MenuItem>,
}

impl MenuResponse {
    pub fn from_value(raw: &Value) -> Self {
        let menus = match raw.get("menus") {
            Some(Value::Array(entries)) => entries.iter().map(MenuItem::from_value).collect(),
            _ => Vec::new(),
        };
        MenuResponse { menus }
    }

    /// Always passes. Kept lenient so that partially filled replies still
    /// reach the caller with their placeholders.
    pub fn validate(&self) -> ValidationReport {
        ValidationReport::passed()
    }

    /// Structural checks on every menu item. Menus are numbered from 1.
    pub fn validate_strict(&self) -> ValidationReport {
        let mut violations = Vec::new();
        for (index, item) in self.menus.iter().enumerate() {
            let number = index + 1;
            let name = item.name.trim();
            if name.is_empty() || name == PLACEHOLDER_NAME {
                violations.push(ResponseViolation::MissingName(number));
            }
            if item.ingredients.is_empty() {
                violations.push(ResponseViolation::NoIngredients(number));
            }
            if item.instructions.is_empty() {
                violations.push(ResponseViolation::NoInstructions(number));
            }
            if item.servings < 1 {
                violations.push(ResponseViolation::ServingsTooLow(number));
            }
        }
        ValidationReport::from_violations(violations)
    }
}
