//! Presence check shared by every owner field.

/// True when `value` exists and is non-empty once surrounding whitespace is trimmed.
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}
