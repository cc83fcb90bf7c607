use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Upper bound on the trimmed length of any custom option text.
pub const CUSTOM_TEXT_MAX_LEN: usize = 20;

macro_rules! option_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

option_enum!(
    /// Allergens the suggested menus must avoid.
    Allergy {
        Nuts => "nuts",
        Peanuts => "peanuts",
        Dairy => "dairy",
        Eggs => "eggs",
        Gluten => "gluten",
        Soy => "soy",
        Fish => "fish",
        Shellfish => "shellfish",
        Sesame => "sesame",
        Other => "other",
    }
);

option_enum!(
    DietaryRestriction {
        Vegetarian => "vegetarian",
        Vegan => "vegan",
        Pescatarian => "pescatarian",
        GlutenFree => "gluten-free",
        DairyFree => "dairy-free",
        Keto => "keto",
        Paleo => "paleo",
        LowCarb => "low-carb",
        Halal => "halal",
        Kosher => "kosher",
        Other => "other",
    }
);

option_enum!(
    MealType {
        Any => "any",
        Breakfast => "breakfast",
        Lunch => "lunch",
        Dinner => "dinner",
        Snack => "snack",
        Dessert => "dessert",
        Other => "other",
    }
);

option_enum!(
    FlavorProfile {
        Any => "any",
        Sweet => "sweet",
        Savory => "savory",
        Spicy => "spicy",
        Sour => "sour",
        Bitter => "bitter",
        Umami => "umami",
        Tangy => "tangy",
        Smoky => "smoky",
        Other => "other",
    }
);

option_enum!(
    CuisineType {
        Any => "any",
        Italian => "italian",
        Mexican => "mexican",
        Chinese => "chinese",
        Japanese => "japanese",
        Indian => "indian",
        Thai => "thai",
        French => "french",
        Mediterranean => "mediterranean",
        American => "american",
        MiddleEastern => "middle-eastern",
        Other => "other",
    }
);

option_enum!(
    CookingMethod {
        Any => "any",
        Baking => "baking",
        Grilling => "grilling",
        Frying => "frying",
        Roasting => "roasting",
        Steaming => "steaming",
        Boiling => "boiling",
        SlowCooking => "slow-cooking",
        StirFrying => "stir-frying",
        NoCook => "no-cook",
        Other => "other",
    }
);

option_enum!(
    /// Difficulty has no custom variant.
    Difficulty {
        Any => "any",
        Easy => "easy",
        Medium => "medium",
        Hard => "hard",
    }
);

macro_rules! default_any {
    ($($name:ident),+) => {
        $(
            impl Default for $name {
                fn default() -> Self {
                    $name::Any
                }
            }
        )+
    };
}

default_any!(MealType, FlavorProfile, CuisineType, CookingMethod, Difficulty);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomTextError {
    #[error("custom text is empty")]
    Empty,
    #[error("custom text is longer than {max} characters")]
    TooLong { max: usize },
    #[error("custom text may only contain letters, spaces and hyphens")]
    InvalidCharacters,
}

/// Free text standing in for an `other` option selection.
///
/// Stored trimmed. Letters, spaces and hyphens only, 1 to 20 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CustomText(String);

fn custom_text_regex() -> &'static Regex {
    static CUSTOM_TEXT_RE: OnceLock<Regex> = OnceLock::new();
    CUSTOM_TEXT_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z -]{1,20}$").expect("valid custom text regex")
    })
}

impl CustomText {
    pub fn parse(raw: &str) -> Result<Self, CustomTextError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CustomTextError::Empty);
        }
        if custom_text_regex().is_match(trimmed) {
            return Ok(CustomText(trimmed.to_string()));
        }

        let allowed = trimmed
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '-');
        if allowed {
            Err(CustomTextError::TooLong {
                max: CUSTOM_TEXT_MAX_LEN,
            })
        } else {
            Err(CustomTextError::InvalidCharacters)
        }
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
