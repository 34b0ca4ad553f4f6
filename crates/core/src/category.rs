//! Category constants and validation.
//!
//! Every user owns exactly one protected default category. It is created at
//! registration, cannot be deleted, and receives the memos of any category
//! that is deleted.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Name of the protected per-user default category ("Default").
pub const DEFAULT_CATEGORY_NAME: &str = "기본";

/// Neutral gray applied when a category is created without a color.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6c757d";

/// Maximum length of a category color string.
pub const MAX_CATEGORY_COLOR_LENGTH: usize = 32;

/// Maximum length of a category name in characters.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Whether `name` is the protected default category name.
pub fn is_default_category(name: &str) -> bool {
    name == DEFAULT_CATEGORY_NAME
}

/// Validate a category name: non-blank and bounded in length.
pub fn validate_category_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Category name is required".to_string());
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(format!(
            "Category name exceeds maximum length of {MAX_CATEGORY_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate an optional color. `None` means "use the default / keep existing".
pub fn validate_category_color(color: Option<&str>) -> Result<(), String> {
    let Some(color) = color else {
        return Ok(());
    };
    if color.trim().is_empty() {
        return Err("Category color must not be empty".to_string());
    }
    if color.len() > MAX_CATEGORY_COLOR_LENGTH {
        return Err(format!(
            "Category color exceeds maximum length of {MAX_CATEGORY_COLOR_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate a rename of an existing category.
///
/// The default category may change color but must keep its name.
pub fn validate_rename(current_name: &str, new_name: &str) -> Result<(), String> {
    validate_category_name(new_name)?;
    if is_default_category(current_name) && !is_default_category(new_name) {
        return Err("The default category cannot be renamed".to_string());
    }
    Ok(())
}

/// Check that a category may be deleted.
pub fn validate_deletable(name: &str) -> Result<(), String> {
    if is_default_category(name) {
        return Err("The default category cannot be deleted".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_is_recognised() {
        assert!(is_default_category("기본"));
        assert!(!is_default_category("Work"));
        assert!(!is_default_category(" 기본"));
    }

    #[test]
    fn empty_name_rejected() {
        assert!(validate_category_name("").is_err());
        assert!(validate_category_name("   ").is_err());
        assert!(validate_category_name("Work").is_ok());
    }

    #[test]
    fn overlong_name_rejected() {
        let name = "가".repeat(MAX_CATEGORY_NAME_LENGTH + 1);
        assert!(validate_category_name(&name).is_err());
        let name = "가".repeat(MAX_CATEGORY_NAME_LENGTH);
        assert!(validate_category_name(&name).is_ok());
    }

    #[test]
    fn color_is_optional_but_not_blank() {
        assert!(validate_category_color(None).is_ok());
        assert!(validate_category_color(Some("#28a745")).is_ok());
        assert!(validate_category_color(Some("")).is_err());
        assert!(validate_category_color(Some(&"f".repeat(33))).is_err());
    }

    #[test]
    fn default_category_keeps_its_name() {
        assert!(validate_rename("기본", "기본").is_ok());
        assert!(validate_rename("기본", "Inbox").is_err());
        assert!(validate_rename("Work", "Personal").is_ok());
    }

    #[test]
    fn default_category_is_not_deletable() {
        let msg = validate_deletable("기본").unwrap_err();
        assert!(msg.contains("cannot be deleted"));
        assert!(validate_deletable("Work").is_ok());
    }
}
