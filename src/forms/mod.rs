use thiserror::Error;
use validator::ValidationErrors;

pub mod products;
pub mod users;

/// Result type returned by the form helpers.
pub type FormResult<T> = Result<T, FormError>;

/// Errors that can occur while converting a request payload into a domain value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// One or more fields were malformed or out of range. Field names are
    /// sorted and unique.
    #[error("invalid fields: {}", .0.join(", "))]
    InvalidFields(Vec<String>),
}

impl FormError {
    /// Names of the offending fields.
    pub fn fields(&self) -> &[String] {
        match self {
            FormError::InvalidFields(fields) => fields,
        }
    }
}

/// Accumulates offending field names across derive and manual checks so a
/// single error reports every problem.
#[derive(Debug, Default)]
pub(crate) struct InvalidFields(Vec<String>);

impl InvalidFields {
    pub(crate) fn from_validation(result: Result<(), ValidationErrors>) -> Self {
        match result {
            Ok(()) => Self::default(),
            Err(errors) => Self(errors.errors().keys().map(|key| key.to_string()).collect()),
        }
    }

    pub(crate) fn push(&mut self, field: &str) {
        self.0.push(field.to_string());
    }

    pub(crate) fn check(&mut self, condition: bool, field: &str) {
        if !condition {
            self.push(field);
        }
    }

    pub(crate) fn finish(self) -> FormResult<()> {
        let mut fields = self.0;
        if fields.is_empty() {
            return Ok(());
        }
        fields.sort_unstable();
        fields.dedup();
        Err(FormError::InvalidFields(fields))
    }
}

/// Collapse runs of whitespace into single spaces and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize each line of a free-text block, dropping leading and trailing
/// blank lines and squeezing repeated blank lines.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut previous_empty = true;

    for line in input.lines().map(sanitize_inline_text) {
        let is_empty = line.is_empty();
        if is_empty && previous_empty {
            continue;
        }
        previous_empty = is_empty;
        result.push(line);
    }

    while matches!(result.last(), Some(line) if line.is_empty()) {
        result.pop();
    }

    result.join("\n")
}

/// Sanitize an optional inline value, mapping blank input to `None`.
pub(crate) fn optional_inline(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_is_collapsed() {
        assert_eq!(sanitize_inline_text("  Raquette \t power\n78 "), "Raquette power 78");
    }

    #[test]
    fn multiline_text_keeps_single_blank_lines() {
        let input = "\n\nLigne une\n\n\n  Ligne   deux \n\n";

        assert_eq!(sanitize_multiline_text(input), "Ligne une\n\nLigne deux");
    }

    #[test]
    fn invalid_fields_are_sorted_and_unique() {
        let mut invalid = InvalidFields::default();
        invalid.push("price");
        invalid.push("name");
        invalid.push("price");

        let err = invalid.finish().expect_err("expected invalid fields");

        assert_eq!(err.fields(), ["name".to_string(), "price".to_string()]);
        assert_eq!(err.to_string(), "invalid fields: name, price");
    }

    #[test]
    fn optional_inline_drops_blank_values() {
        assert_eq!(optional_inline(Some("   ")), None);
        assert_eq!(optional_inline(Some(" Kipsta ")).as_deref(), Some("Kipsta"));
        assert_eq!(optional_inline(None), None);
    }
}
