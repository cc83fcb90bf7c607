use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::menu_options::{
    Allergy, CookingMethod, CuisineType, CustomText, DietaryRestriction, Difficulty,
    FlavorProfile, MealType,
};
use crate::validation::{LenientFields, ValidationReport};

pub const MIN_SERVINGS: i64 = 1;
pub const DEFAULT_SERVINGS: i64 = 1;
pub const MAX_FLAVOR_PROFILES: usize = 3;
pub const MIN_COOKING_TIME: i64 = 10;
pub const MAX_COOKING_TIME: i64 = 720;
pub const DEFAULT_COOKING_TIME: i64 = 60;

/// A menu suggestion request as sent by a client.
///
/// Construction never validates. Run [`normalize_and_validate`] (or
/// [`MenuRequest::validate`]) to get a corrected copy plus a report of what
/// had to be fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuRequest {
    pub ingredients: Vec<String>,
    pub allergies: Vec<Allergy>,
    pub allergies_custom: Vec<String>,
    pub dietary_restrictions: Vec<DietaryRestriction>,
    pub dietary_restrictions_custom: Vec<String>,
    pub servings: i64,
    pub meal_type: MealType,
    pub meal_type_custom: String,
    pub flavor_profiles: Vec<FlavorProfile>,
    pub flavor_profiles_custom: Vec<String>,
    pub cuisine_type: CuisineType,
    pub cuisine_type_custom: String,
    pub cooking_method: CookingMethod,
    pub cooking_method_custom: String,
    pub max_cooking_time: i64,
    pub difficulty: Difficulty,
    /// Raw fields whose values could not be represented and fell back to defaults.
    #[serde(skip)]
    unrecognized: Vec<&'static str>,
}

impl Default for MenuRequest {
    fn default() -> Self {
        MenuRequest {
            ingredients: Vec::new(),
            allergies: Vec::new(),
            allergies_custom: Vec::new(),
            dietary_restrictions: Vec::new(),
            dietary_restrictions_custom: Vec::new(),
            servings: DEFAULT_SERVINGS,
            meal_type: MealType::Any,
            meal_type_custom: String::new(),
            flavor_profiles: vec![FlavorProfile::Any],
            flavor_profiles_custom: Vec::new(),
            cuisine_type: CuisineType::Any,
            cuisine_type_custom: String::new(),
            cooking_method: CookingMethod::Any,
            cooking_method_custom: String::new(),
            max_cooking_time: DEFAULT_COOKING_TIME,
            difficulty: Difficulty::Any,
            unrecognized: Vec::new(),
        }
    }
}

/// One broken rule found while normalizing a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestViolation {
    #[error("Unrecognized value for {0}")]
    UnrecognizedValue(&'static str),
    #[error("At least one ingredient is required")]
    MissingIngredients,
    #[error("Servings must be at least 1")]
    ServingsTooLow,
    #[error("Maximum 3 flavor profiles allowed")]
    TooManyFlavorProfiles,
    #[error("'any' cannot be combined with other flavors")]
    AnyFlavorCombined,
    #[error("Cooking time must be between 10 and 720 minutes")]
    CookingTimeOutOfRange,
    #[error("Custom meal type required but invalid format provided")]
    InvalidCustomMealType,
    #[error("Custom cuisine type required but invalid format provided")]
    InvalidCustomCuisineType,
    #[error("Custom cooking method required but invalid format provided")]
    InvalidCustomCookingMethod,
    #[error("Custom allergy required but invalid format provided")]
    InvalidCustomAllergy,
    #[error("Custom dietary restriction required but invalid format provided")]
    InvalidCustomDietaryRestriction,
    #[error("Custom flavor profile required but invalid format provided")]
    InvalidCustomFlavorProfile,
}

impl MenuRequest {
    /// Builds a request from untyped JSON, taking defaults for anything
    /// missing or unusable.
    pub fn from_value(raw: &Value) -> Self {
        let defaults = MenuRequest::default();
        let mut fields = LenientFields::new(raw);

        let mut request = MenuRequest {
            ingredients: fields.list("ingredients", defaults.ingredients),
            allergies: fields.list("allergies", defaults.allergies),
            allergies_custom: fields.list("allergiesCustom", defaults.allergies_custom),
            dietary_restrictions: fields.list("dietaryRestrictions", defaults.dietary_restrictions),
            dietary_restrictions_custom: fields
                .list("dietaryRestrictionsCustom", defaults.dietary_restrictions_custom),
            servings: fields.integer("servings", defaults.servings),
            meal_type: fields.scalar("mealType", defaults.meal_type),
            meal_type_custom: fields.scalar("mealTypeCustom", defaults.meal_type_custom),
            flavor_profiles: fields.list("flavorProfiles", defaults.flavor_profiles),
            flavor_profiles_custom: fields
                .list("flavorProfilesCustom", defaults.flavor_profiles_custom),
            cuisine_type: fields.scalar("cuisineType", defaults.cuisine_type),
            cuisine_type_custom: fields
                .scalar("cuisineTypeCustom", defaults.cuisine_type_custom),
            cooking_method: fields.scalar("cookingMethod", defaults.cooking_method),
            cooking_method_custom: fields
                .scalar("cookingMethodCustom", defaults.cooking_method_custom),
            max_cooking_time: fields.integer("maxCookingTime", defaults.max_cooking_time),
            difficulty: fields.scalar("difficulty", defaults.difficulty),
            unrecognized: Vec::new(),
        };
        request.unrecognized = fields.rejected;
        request
    }

    /// Fields whose raw values were replaced during construction.
    pub fn unrecognized_fields(&self) -> &[&'static str] {
        &self.unrecognized
    }

    pub fn validate(&self) -> (MenuRequest, ValidationReport) {
        normalize_and_validate(self)
    }
}

/// Applies every request rule to a copy of `draft`.
///
/// The returned request is always fully corrected, even when the report is
/// not valid. Feeding the corrected request back in yields a valid report and
/// an identical request.
pub fn normalize_and_validate(draft: &MenuRequest) -> (MenuRequest, ValidationReport) {
    let mut request = draft.clone();
    let mut violations = Vec::new();

    for field in request.unrecognized.drain(..) {
        violations.push(RequestViolation::UnrecognizedValue(field));
    }

    if request.ingredients.is_empty() {
        violations.push(RequestViolation::MissingIngredients);
    }

    if request.servings < MIN_SERVINGS {
        tracing::debug!(servings = request.servings, "raising servings to minimum");
        request.servings = MIN_SERVINGS;
        violations.push(RequestViolation::ServingsTooLow);
    }

    // exclusivity is judged on the truncated list
    if request.flavor_profiles.len() > MAX_FLAVOR_PROFILES {
        request.flavor_profiles.truncate(MAX_FLAVOR_PROFILES);
        violations.push(RequestViolation::TooManyFlavorProfiles);
    }
    let has_any = request.flavor_profiles.contains(&FlavorProfile::Any);
    let has_specific = request
        .flavor_profiles
        .iter()
        .any(|flavor| *flavor != FlavorProfile::Any);
    if has_any && has_specific {
        request.flavor_profiles = vec![FlavorProfile::Any];
        violations.push(RequestViolation::AnyFlavorCombined);
    }

    if !(MIN_COOKING_TIME..=MAX_COOKING_TIME).contains(&request.max_cooking_time) {
        tracing::debug!(
            max_cooking_time = request.max_cooking_time,
            "clamping cooking time"
        );
        request.max_cooking_time = request
            .max_cooking_time
            .clamp(MIN_COOKING_TIME, MAX_COOKING_TIME);
        violations.push(RequestViolation::CookingTimeOutOfRange);
    }

    if !settle_single_choice(
        &mut request.meal_type,
        &mut request.meal_type_custom,
        MealType::Any,
        MealType::Other,
    ) {
        violations.push(RequestViolation::InvalidCustomMealType);
    }
    if !settle_single_choice(
        &mut request.cuisine_type,
        &mut request.cuisine_type_custom,
        CuisineType::Any,
        CuisineType::Other,
    ) {
        violations.push(RequestViolation::InvalidCustomCuisineType);
    }
    if !settle_single_choice(
        &mut request.cooking_method,
        &mut request.cooking_method_custom,
        CookingMethod::Any,
        CookingMethod::Other,
    ) {
        violations.push(RequestViolation::InvalidCustomCookingMethod);
    }

    if !settle_multi_choice(
        &mut request.allergies,
        &mut request.allergies_custom,
        Allergy::Other,
    ) {
        violations.push(RequestViolation::InvalidCustomAllergy);
    }
    if !settle_multi_choice(
        &mut request.dietary_restrictions,
        &mut request.dietary_restrictions_custom,
        DietaryRestriction::Other,
    ) {
        violations.push(RequestViolation::InvalidCustomDietaryRestriction);
    }
    if !settle_multi_choice(
        &mut request.flavor_profiles,
        &mut request.flavor_profiles_custom,
        FlavorProfile::Other,
    ) {
        violations.push(RequestViolation::InvalidCustomFlavorProfile);
    }

    if !violations.is_empty() {
        tracing::debug!(count = violations.len(), "menu request corrected");
    }
    (request, ValidationReport::from_violations(violations))
}

/// Single-slot option: an `other` choice needs one valid custom text,
/// otherwise both fields reset.
fn settle_single_choice<T: Copy + PartialEq>(
    choice: &mut T,
    custom: &mut String,
    any: T,
    other: T,
) -> bool {
    if *choice != other {
        return true;
    }
    match CustomText::parse(custom) {
        Ok(text) => {
            *custom = text.into_string();
            true
        }
        Err(err) => {
            tracing::debug!(custom = %custom, error = %err, "resetting custom option");
            *choice = any;
            custom.clear();
            false
        }
    }
}

/// Multi-slot option: an `other` selection keeps only the valid custom
/// entries, and is dropped when none remain.
fn settle_multi_choice<T: Copy + PartialEq>(
    choices: &mut Vec<T>,
    customs: &mut Vec<String>,
    other: T,
) -> bool {
    if !choices.contains(&other) {
        return true;
    }
    let kept: Vec<String> = customs
        .iter()
        .filter_map(|raw| CustomText::parse(raw).ok())
        .map(CustomText::into_string)
        .collect();

    if kept.is_empty() {
        choices.retain(|choice| *choice != other);
        customs.clear();
        false
    } else {
        *customs = kept;
        true
    }
}
