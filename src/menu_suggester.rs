use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::api_connection::{ApiConnectionError, MenuLlm};
use crate::menu_request::{normalize_and_validate, MenuRequest};
use crate::menu_response::MenuResponse;
use crate::prompt_formatter::build_menu_messages;
use crate::suggestion_parser::{parse_menu_reply, MenuReply, ReplyParseError};
use crate::validation::ValidationReport;

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Invalid menu request: {}", .0.errors.join("; "))]
    InvalidRequest(ValidationReport),
    #[error("Not enough ingredients to suggest a menu")]
    InsufficientIngredients,
    #[error("LLM request failed: {0}")]
    Upstream(#[from] ApiConnectionError),
    #[error("LLM reply was not in the expected format: {0}")]
    UpstreamFormat(#[from] ReplyParseError),
    #[error("LLM reply failed validation: {}", .0.errors.join("; "))]
    InvalidResponse(ValidationReport),
}

impl SuggestionError {
    /// HTTP status a serving layer should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SuggestionError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SuggestionError::InsufficientIngredients => StatusCode::UNPROCESSABLE_ENTITY,
            SuggestionError::Upstream(_)
            | SuggestionError::UpstreamFormat(_)
            | SuggestionError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// A normalized request together with the menus suggested for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub request: MenuRequest,
    pub response: MenuResponse,
}

pub struct MenuSuggester<L> {
    llm: L,
    strict_response: bool,
}

impl<L: MenuLlm> MenuSuggester<L> {
    pub fn new(llm: L) -> Self {
        MenuSuggester {
            llm,
            strict_response: false,
        }
    }

    pub fn with_strict_response(mut self, strict: bool) -> Self {
        self.strict_response = strict;
        self
    }

    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// Runs the whole cycle for a raw JSON request body.
    pub async fn suggest(&self, raw: &Value) -> Result<Suggestion, SuggestionError> {
        let draft = MenuRequest::from_value(raw);
        self.suggest_for(&draft).await
    }

    pub async fn suggest_for(&self, draft: &MenuRequest) -> Result<Suggestion, SuggestionError> {
        let (request, report) = normalize_and_validate(draft);
        if !report.valid {
            tracing::info!(errors = ?report.errors, "rejecting menu request");
            return Err(SuggestionError::InvalidRequest(report));
        }

        let messages = build_menu_messages(&request);
        let reply = self.llm.complete(messages).await.map_err(|err| {
            tracing::warn!(error = %err, "menu suggestion call failed");
            SuggestionError::Upstream(err)
        })?;

        let response = match parse_menu_reply(&reply)? {
            MenuReply::InsufficientIngredients => {
                tracing::info!(
                    ingredients = request.ingredients.len(),
                    "model reported insufficient ingredients"
                );
                return Err(SuggestionError::InsufficientIngredients);
            }
            MenuReply::Menus(response) => response,
        };

        let report = if self.strict_response {
            response.validate_strict()
        } else {
            response.validate()
        };
        if !report.valid {
            tracing::warn!(errors = ?report.errors, "menu reply failed validation");
            return Err(SuggestionError::InvalidResponse(report));
        }

        tracing::info!(menus = response.menus.len(), "menu suggestions ready");
        Ok(Suggestion { request, response })
    }
}
