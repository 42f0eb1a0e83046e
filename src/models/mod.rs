// src/models/mod.rs

pub mod quiz;
pub mod result;

use validator::ValidationErrors;

/// Picks the first failing check's message, walking fields in their
/// declaration order so validation surfaces one failure at a time.
pub fn first_validation_message(errors: &ValidationErrors, fields: &[&str]) -> String {
    let by_field = errors.field_errors();
    for &field in fields {
        if let Some(field_errors) = by_field.get(field) {
            if let Some(error) = field_errors.first() {
                return error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
            }
        }
    }
    errors.to_string()
}
