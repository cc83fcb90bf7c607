use serde_json::Value;
use thiserror::Error;

use crate::menu_response::MenuResponse;

/// Reply text meaning the model found no feasible meal.
pub const INSUFFICIENT_INGREDIENTS: &str = "INSUFFICIENT_INGREDIENTS";

#[derive(Debug, Clone, PartialEq)]
pub enum MenuReply {
    Menus(MenuResponse),
    InsufficientIngredients,
}

#[derive(Debug, Error)]
pub enum ReplyParseError {
    #[error("reply content is empty after stripping markdown")]
    EmptyContent,
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("reply JSON is not an object")]
    NotAnObject,
}

/// Removes a surrounding ```` ```json ```` or ```` ``` ```` fence, if any.
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    if !trimmed.ends_with("```") {
        return trimmed;
    }
    let inner = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };
    inner
        .strip_suffix("```")
        .unwrap_or(inner)
        .trim()
}

pub fn parse_menu_reply(content: &str) -> Result<MenuReply, ReplyParseError> {
    let content = strip_code_fences(content);
    tracing::debug!(content, "parsing menu reply");

    if content == INSUFFICIENT_INGREDIENTS {
        return Ok(MenuReply::InsufficientIngredients);
    }
    if content.is_empty() {
        return Err(ReplyParseError::EmptyContent);
    }

    let value: Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(ReplyParseError::NotAnObject);
    }
    Ok(MenuReply::Menus(MenuResponse::from_value(&value)))
}
