use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Outcome of a validation pass: `valid` is true exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn passed() -> Self {
        ValidationReport {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn from_violations<I, E>(violations: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Display,
    {
        let errors: Vec<String> = violations.into_iter().map(|v| v.to_string()).collect();
        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn has_error(&self, message: &str) -> bool {
        self.errors.iter().any(|e| e == message)
    }
}

/// Field-by-field reader over an untyped JSON object.
///
/// Missing and `null` fields take the supplied default. Values of the wrong
/// shape also take the default (or are dropped from lists) and the key is
/// remembered in `rejected`.
pub(crate) struct LenientFields<'a> {
    fields: Option<&'a Map<String, Value>>,
    pub(crate) rejected: Vec<&'static str>,
}

impl<'a> LenientFields<'a> {
    pub(crate) fn new(raw: &'a Value) -> Self {
        LenientFields {
            fields: raw.as_object(),
            rejected: Vec::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        match self.fields.and_then(|fields| fields.get(key)) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    pub(crate) fn scalar<T: DeserializeOwned>(&mut self, key: &'static str, default: T) -> T {
        let Some(value) = self.get(key) else {
            return default;
        };
        match T::deserialize(value) {
            Ok(parsed) => parsed,
            Err(_) => {
                self.rejected.push(key);
                default
            }
        }
    }

    /// Whole numbers written as floats (`2.0`, `1e3`) are accepted.
    pub(crate) fn integer(&mut self, key: &'static str, default: i64) -> i64 {
        let Some(value) = self.get(key) else {
            return default;
        };
        if let Some(whole) = value.as_i64() {
            return whole;
        }
        match value.as_f64() {
            Some(float)
                if float.is_finite()
                    && float.fract() == 0.0
                    && float >= i64::MIN as f64
                    && float < i64::MAX as f64 =>
            {
                float as i64
            }
            _ => {
                self.rejected.push(key);
                default
            }
        }
    }

    pub(crate) fn list<T: DeserializeOwned>(
        &mut self,
        key: &'static str,
        default: Vec<T>,
    ) -> Vec<T> {
        let Some(value) = self.get(key) else {
            return default;
        };
        let Value::Array(items) = value else {
            self.rejected.push(key);
            return default;
        };

        let mut parsed = Vec::with_capacity(items.len());
        let mut dropped_any = false;
        for item in items {
            match T::deserialize(item) {
                Ok(entry) => parsed.push(entry),
                Err(_) => dropped_any = true,
            }
        }
        if dropped_any {
            self.rejected.push(key);
        }
        parsed
    }
}
