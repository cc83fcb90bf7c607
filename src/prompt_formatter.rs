use std::fmt::Display;

use crate::api_connection::ChatMessage;
use crate::menu_options::{
    Allergy, CookingMethod, CuisineType, DietaryRestriction, Difficulty, FlavorProfile, MealType,
};
use crate::menu_request::MenuRequest;
use crate::suggestion_parser::INSUFFICIENT_INGREDIENTS;

const NO_PREFERENCE: &str = "no preference";
const NONE: &str = "none";

fn system_prompt() -> String {
    format!(
        "/no_thinking
You are a cooking assistant. Suggest recipes that can be made mostly from the ingredients the user has available, respecting every allergy and dietary restriction they list.
Return the output as a JSON object. The JSON object must be the only content in your response. Do not include any explanatory text, comments, or markdown formatting (like ```json) before or after the JSON object.
The JSON object must have a single top-level property \"menus\": an array of recipe objects. Each recipe object must have:
- \"name\": string, the recipe title.
- \"description\": string, one or two sentences.
- \"servings\": integer.
- \"cookingTime\": integer, total minutes.
- \"difficulty\": one of \"easy\", \"medium\", \"hard\".
- \"ingredients\": array of strings, each with quantity and unit.
- \"instructions\": array of strings, one step each.

If the available ingredients cannot reasonably make any meal, respond with exactly {} and nothing else.",
        INSUFFICIENT_INGREDIENTS
    )
}

/// Joins a multi-choice selection, replacing `other` with the custom entries.
fn describe_choices<T: Display + PartialEq>(
    choices: &[T],
    other: T,
    customs: &[String],
) -> String {
    let mut parts: Vec<String> = Vec::new();
    for choice in choices {
        if *choice == other {
            parts.extend(customs.iter().cloned());
        } else {
            parts.push(choice.to_string());
        }
    }
    if parts.is_empty() {
        NONE.to_string()
    } else {
        parts.join(", ")
    }
}

fn describe_choice<T: Display + PartialEq>(choice: T, any: T, other: T, custom: &str) -> String {
    if choice == any {
        NO_PREFERENCE.to_string()
    } else if choice == other {
        custom.to_string()
    } else {
        choice.to_string()
    }
}

fn describe_flavors(request: &MenuRequest) -> String {
    if request.flavor_profiles.as_slice() == [FlavorProfile::Any] {
        return NO_PREFERENCE.to_string();
    }
    describe_choices(
        &request.flavor_profiles,
        FlavorProfile::Other,
        &request.flavor_profiles_custom,
    )
}

fn user_prompt(request: &MenuRequest) -> String {
    let difficulty = match request.difficulty {
        Difficulty::Any => NO_PREFERENCE.to_string(),
        other => other.to_string(),
    };

    format!(
        "Available ingredients: {}
Servings: {}
Meal type: {}
Cuisine: {}
Cooking method: {}
Flavor profiles: {}
Allergies (must avoid): {}
Dietary restrictions: {}
Maximum cooking time: {} minutes
Difficulty: {}",
        request.ingredients.join(", "),
        request.servings,
        describe_choice(
            request.meal_type,
            MealType::Any,
            MealType::Other,
            &request.meal_type_custom
        ),
        describe_choice(
            request.cuisine_type,
            CuisineType::Any,
            CuisineType::Other,
            &request.cuisine_type_custom
        ),
        describe_choice(
            request.cooking_method,
            CookingMethod::Any,
            CookingMethod::Other,
            &request.cooking_method_custom
        ),
        describe_flavors(request),
        describe_choices(&request.allergies, Allergy::Other, &request.allergies_custom),
        describe_choices(
            &request.dietary_restrictions,
            DietaryRestriction::Other,
            &request.dietary_restrictions_custom
        ),
        request.max_cooking_time,
        difficulty,
    )
}

/// Builds the chat messages for an already normalized request.
pub fn build_menu_messages(request: &MenuRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt()),
        ChatMessage::user(user_prompt(request)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_system_prompt_mentions_sentinel() {
        let messages = build_menu_messages(&MenuRequest::default());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("respond with exactly INSUFFICIENT_INGREDIENTS"));
        assert!(messages[0].content.contains("\"menus\""));
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn test_user_prompt_lists_preferences() {
        let request = MenuRequest::from_value(&json!({
            "ingredients": ["chickpeas", "spinach"],
            "servings": 3,
            "mealType": "other",
            "mealTypeCustom": "Midnight Snack",
            "cuisineType": "indian",
            "allergies": ["peanuts", "other"],
            "allergiesCustom": ["Pollen"],
            "flavorProfiles": ["spicy"],
            "maxCookingTime": 40,
            "difficulty": "easy"
        }));
        let user = &build_menu_messages(&request)[1].content;

        assert!(user.contains("Available ingredients: chickpeas, spinach"));
        assert!(user.contains("Servings: 3"));
        assert!(user.contains("Meal type: Midnight Snack"));
        assert!(user.contains("Cuisine: indian"));
        assert!(user.contains("Cooking method: no preference"));
        assert!(user.contains("Flavor profiles: spicy"));
        assert!(user.contains("Allergies (must avoid): peanuts, Pollen"));
        assert!(user.contains("Dietary restrictions: none"));
        assert!(user.contains("Maximum cooking time: 40 minutes"));
        assert!(user.contains("Difficulty: easy"));
    }

    #[test]
    fn test_default_flavor_is_no_preference() {
        let user = &build_menu_messages(&MenuRequest::default())[1].content;
        assert!(user.contains("Flavor profiles: no preference"));
        assert!(user.contains("Difficulty: no preference"));
    }
}
