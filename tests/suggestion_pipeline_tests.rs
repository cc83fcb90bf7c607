use menu_suggest::api_connection::{ApiConnectionError, ChatMessage, MenuLlm};
use menu_suggest::menu_options::MealType;
use menu_suggest::menu_suggester::{MenuSuggester, SuggestionError};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Mutex;

/// Replies with a canned answer and remembers the prompts it was sent.
struct FakeLlm {
    reply: Result<String, StatusCode>,
    prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl FakeLlm {
    fn replying(reply: &str) -> Self {
        FakeLlm {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing(status: StatusCode) -> Self {
        FakeLlm {
            reply: Err(status),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl MenuLlm for FakeLlm {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, ApiConnectionError> {
        self.prompts.lock().unwrap().push(messages);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(ApiConnectionError::ApiError {
                status: *status,
                error_body: "upstream unavailable".to_string(),
            }),
        }
    }
}

const GOOD_REPLY: &str = r#"```json
{
  "menus": [
    {
      "name": "Spinach Omelette",
      "description": "A quick folded omelette.",
      "servings": 2,
      "cookingTime": 15,
      "difficulty": "easy",
      "ingredients": ["4 eggs", "2 cups spinach"],
      "instructions": ["Whisk eggs", "Wilt spinach", "Fold and serve"]
    }
  ]
}
```"#;

#[tokio::test]
async fn test_successful_suggestion_uses_corrected_request() {
    let suggester = MenuSuggester::new(FakeLlm::replying(GOOD_REPLY));
    let suggestion = suggester
        .suggest(&json!({
            "ingredients": ["eggs", "spinach"],
            "servings": 2,
            "mealType": "other",
            "mealTypeCustom": " Brunch "
        }))
        .await
        .unwrap();

    assert_eq!(suggestion.request.meal_type, MealType::Other);
    assert_eq!(suggestion.request.meal_type_custom, "Brunch");
    assert_eq!(suggestion.response.menus.len(), 1);
    assert_eq!(suggestion.response.menus[0].name, "Spinach Omelette");
    assert_eq!(suggestion.response.menus[0].cooking_time, 15);

    let prompts = suggester.llm().prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0][1].content.contains("Available ingredients: eggs, spinach"));
    assert!(prompts[0][1].content.contains("Meal type: Brunch"));
}

#[tokio::test]
async fn test_invalid_request_is_rejected_before_calling_model() {
    let suggester = MenuSuggester::new(FakeLlm::replying(GOOD_REPLY));
    let err = suggester
        .suggest(&json!({ "maxCookingTime": 2 }))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    let SuggestionError::InvalidRequest(report) = &err else {
        panic!("expected InvalidRequest, got {:?}", err);
    };
    assert_eq!(
        report.errors,
        vec![
            "At least one ingredient is required",
            "Cooking time must be between 10 and 720 minutes"
        ]
    );
    assert_eq!(suggester.llm().calls(), 0);
}

#[tokio::test]
async fn test_sentinel_reply_maps_to_insufficient_ingredients() {
    let suggester = MenuSuggester::new(FakeLlm::replying("INSUFFICIENT_INGREDIENTS"));
    let err = suggester
        .suggest(&json!({ "ingredients": ["salt"] }))
        .await
        .unwrap_err();
    assert!(matches!(err, SuggestionError::InsufficientIngredients));
    assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unparseable_reply_is_upstream_format_error() {
    let suggester = MenuSuggester::new(FakeLlm::replying("Sure! Here are three ideas..."));
    let err = suggester
        .suggest(&json!({ "ingredients": ["rice"] }))
        .await
        .unwrap_err();
    assert!(matches!(err, SuggestionError::UpstreamFormat(_)));
    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_transport_failure_is_upstream_error() {
    let suggester = MenuSuggester::new(FakeLlm::failing(StatusCode::SERVICE_UNAVAILABLE));
    let err = suggester
        .suggest(&json!({ "ingredients": ["rice"] }))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SuggestionError::Upstream(ApiConnectionError::ApiError { status, .. })
            if status == StatusCode::SERVICE_UNAVAILABLE
    ));
    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_placeholder_menus_pass_lenient_validation() {
    let reply = r#"{"menus": [{}]}"#;

    let lenient = MenuSuggester::new(FakeLlm::replying(reply));
    let suggestion = lenient
        .suggest(&json!({ "ingredients": ["rice"] }))
        .await
        .unwrap();
    assert_eq!(suggestion.response.menus[0].name, "Invalid");

    let strict = MenuSuggester::new(FakeLlm::replying(reply)).with_strict_response(true);
    let err = strict
        .suggest(&json!({ "ingredients": ["rice"] }))
        .await
        .unwrap_err();
    let SuggestionError::InvalidResponse(report) = &err else {
        panic!("expected InvalidResponse, got {:?}", err);
    };
    assert!(report.has_error("Menu 1: name is missing"));
    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_strict_validation_accepts_complete_menus() {
    let suggester = MenuSuggester::new(FakeLlm::replying(GOOD_REPLY)).with_strict_response(true);
    let suggestion = suggester
        .suggest(&json!({ "ingredients": ["eggs"] }))
        .await
        .unwrap();
    assert_eq!(suggestion.response.menus.len(), 1);
}
