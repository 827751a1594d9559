//! The fixed clothing-category vocabulary and its selection rules.
//!
//! The add-item form offers a fixed set of categories plus an `Other` escape
//! hatch with a free-text field. When `Other` is chosen, the custom text is
//! what gets persisted -- never the literal string `Other`.

use crate::error::CoreError;

/// Categories offered by the item form, in display order.
pub const CATEGORY_OPTIONS: &[&str] = &[
    "Tops",
    "T-Shirts",
    "Hoodies",
    "Jackets",
    "Pants",
    "Jeans",
    "Shorts",
    "Skirts",
    "Dresses",
    "Shoes",
    "Sneakers",
    "Bags",
    "Accessories",
    "Sportswear",
    "Underwear",
    "Swimwear",
    "Other",
];

/// The sentinel selection that enables the free-text category field.
pub const OTHER: &str = "Other";

/// Whether `category` is one of the fixed vocabulary entries.
pub fn is_known(category: &str) -> bool {
    CATEGORY_OPTIONS.contains(&category)
}

/// Resolve a form submission into the category string to persist.
///
/// A selection of [`OTHER`] requires a non-empty custom value and resolves to
/// that value (trimmed). Any other selection must be a vocabulary entry and
/// resolves to itself.
pub fn resolve(selection: &str, custom: Option<&str>) -> Result<String, CoreError> {
    if selection == OTHER {
        let custom = custom.map(str::trim).unwrap_or("");
        if custom.is_empty() {
            return Err(CoreError::Validation(
                "A custom category is required when 'Other' is selected".into(),
            ));
        }
        return Ok(custom.to_string());
    }

    if !is_known(selection) {
        return Err(CoreError::Validation(format!(
            "Unknown category '{selection}'"
        )));
    }

    Ok(selection.to_string())
}

/// The dropdown selection to pre-fill when editing an item.
///
/// A stored category outside the vocabulary (a custom `Other` value) maps to
/// no selection: the user must re-choose rather than seeing the raw value in
/// the dropdown.
pub fn edit_selection(stored: &str) -> Option<&str> {
    if is_known(stored) {
        Some(stored)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_keeps_vocabulary_entry() {
        let category = resolve("Hoodies", None).expect("known category should resolve");
        assert_eq!(category, "Hoodies");
    }

    #[test]
    fn resolve_other_persists_custom_value() {
        // The persisted value is the custom text, not the literal "Other".
        let category = resolve("Other", Some("Jewelry")).expect("custom category should resolve");
        assert_eq!(category, "Jewelry");
    }

    #[test]
    fn resolve_other_trims_custom_value() {
        let category = resolve("Other", Some("  Suit ")).expect("custom category should resolve");
        assert_eq!(category, "Suit");
    }

    #[test]
    fn resolve_other_without_custom_fails() {
        assert!(resolve("Other", None).is_err());
        assert!(resolve("Other", Some("   ")).is_err());
    }

    #[test]
    fn resolve_rejects_unknown_selection() {
        assert!(resolve("Jewelry", None).is_err());
    }

    #[test]
    fn edit_selection_coerces_custom_values_to_none() {
        assert_eq!(edit_selection("Jackets"), Some("Jackets"));
        // A custom value stored via "Other" is not offered back in the dropdown.
        assert_eq!(edit_selection("Jewelry"), None);
    }
}
