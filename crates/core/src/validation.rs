//! Field-presence checks used by request handlers.

/// Require that a text field is present and not blank.
///
/// Whitespace-only input counts as missing.
pub fn require_non_blank(field: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(format!("{field} is required")),
    }
}

/// Require that every named field is present and not blank.
///
/// Reports all missing fields in one message, in the order given.
pub fn require_all(fields: &[(&str, Option<&str>)]) -> Result<(), String> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| require_non_blank("", *value).is_err())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing required fields: {}", missing.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_value_passes() {
        assert!(require_non_blank("title", Some("hello")).is_ok());
    }

    #[test]
    fn blank_and_absent_values_fail() {
        assert!(require_non_blank("title", Some("   ")).is_err());
        assert!(require_non_blank("title", Some("")).is_err());
        let msg = require_non_blank("title", None).unwrap_err();
        assert!(msg.contains("title"));
    }

    #[test]
    fn require_all_lists_every_missing_field() {
        let msg = require_all(&[
            ("username", Some("alice")),
            ("email", None),
            ("password", Some(" ")),
        ])
        .unwrap_err();
        assert_eq!(msg, "Missing required fields: email, password");
    }

    #[test]
    fn require_all_passes_when_complete() {
        assert!(require_all(&[("email", Some("a@x.com")), ("password", Some("pw"))]).is_ok());
    }
}
