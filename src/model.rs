//! Movie record, request payload and field validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

const REQUIRED: &str = "This field is required.";
const NULL: &str = "This field may not be null.";
const BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";

/// A persisted movie. `id` is assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub year: String,
}

/// Validated fields for create and full update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub genre: String,
    pub year: String,
}

impl NewMovie {
    pub fn into_movie(self, id: i64) -> Movie {
        Movie {
            id,
            title: self.title,
            genre: self.genre,
            year: self.year,
        }
    }
}

/// Raw request payload. Keys are optional here so that absence is reported
/// as a field error rather than a decode failure. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct MovieInput {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub genre: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub year: Option<Value>,
}

/// Keeps an explicit `null` distinguishable from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl MovieInput {
    /// Check every field and collect all errors before returning.
    pub fn validate(self) -> Result<NewMovie, FieldErrors> {
        let mut errors = FieldErrors::default();
        let title = required_text(&mut errors, "title", self.title);
        let genre = required_text(&mut errors, "genre", self.genre);
        let year = required_text(&mut errors, "year", self.year);
        match (title, genre, year) {
            (Some(title), Some(genre), Some(year)) if errors.is_empty() => {
                Ok(NewMovie { title, genre, year })
            }
            _ => Err(errors),
        }
    }
}

fn required_text(errors: &mut FieldErrors, field: &'static str, value: Option<Value>) -> Option<String> {
    let text = match value {
        None => {
            errors.add(field, REQUIRED);
            return None;
        }
        Some(Value::Null) => {
            errors.add(field, NULL);
            return None;
        }
        Some(Value::String(s)) => s,
        // Numbers are accepted as their decimal text; year stays an opaque string.
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            errors.add(field, NOT_A_STRING);
            return None;
        }
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        errors.add(field, BLANK);
        return None;
    }
    Some(trimmed.to_string())
}

/// Field name to error messages, serialized as a JSON object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(v: Value) -> MovieInput {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn accepts_complete_payload() {
        let movie = input(json!({"title": "The Big Lebowski", "genre": "comedy", "year": "1998"}))
            .validate()
            .unwrap();
        assert_eq!(movie.title, "The Big Lebowski");
        assert_eq!(movie.genre, "comedy");
        assert_eq!(movie.year, "1998");
    }

    #[test]
    fn empty_object_reports_every_field() {
        let errors = input(json!({})).validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["genre", "title", "year"]);
        assert_eq!(errors.get("year").unwrap(), [REQUIRED.to_string()]);
    }

    #[test]
    fn missing_year_is_the_only_error() {
        let errors = input(json!({"title": "The Big Lebowski", "genre": "comedy"}))
            .validate()
            .unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["year"]);
    }

    #[test]
    fn blank_and_null_are_distinguished() {
        let errors = input(json!({"title": "   ", "genre": null, "year": "1998"}))
            .validate()
            .unwrap_err();
        assert_eq!(errors.get("title").unwrap(), [BLANK.to_string()]);
        assert_eq!(errors.get("genre").unwrap(), [NULL.to_string()]);
        assert!(errors.get("year").is_none());
    }

    #[test]
    fn year_is_not_checked_for_digits() {
        let movie = input(json!({"title": "Heat", "genre": "crime", "year": "mid nineties"}))
            .validate()
            .unwrap();
        assert_eq!(movie.year, "mid nineties");
    }

    #[test]
    fn numbers_become_text_and_booleans_are_rejected() {
        let movie = input(json!({"title": "1917", "genre": "war", "year": 2019}))
            .validate()
            .unwrap();
        assert_eq!(movie.year, "2019");

        let errors = input(json!({"title": true, "genre": ["war"], "year": 2019}))
            .validate()
            .unwrap_err();
        assert_eq!(errors.get("title").unwrap(), [NOT_A_STRING.to_string()]);
        assert_eq!(errors.get("genre").unwrap(), [NOT_A_STRING.to_string()]);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let movie = input(json!({"title": "  Fargo ", "genre": "crime", "year": "1996"}))
            .validate()
            .unwrap();
        assert_eq!(movie.title, "Fargo");
    }

    #[test]
    fn unknown_keys_and_id_are_ignored() {
        let movie = input(json!({"id": 42, "title": "Fargo", "genre": "crime", "year": "1996", "rating": 5}))
            .validate()
            .unwrap();
        assert_eq!(movie.into_movie(7).id, 7);
    }

    #[test]
    fn display_lists_fields() {
        let mut errors = FieldErrors::default();
        errors.add("title", REQUIRED);
        errors.add("year", BLANK);
        assert_eq!(
            errors.to_string(),
            "title: This field is required.; year: This field may not be blank."
        );
    }
}
