//! Category targets and category name validation.
//!
//! Older clients send the literal category ID `"0"` to mean "no category".
//! [`CategoryTarget`] makes that choice explicit so a real category can never
//! be confused with the absence of one.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Id;

/// Category ID that legacy clients use to mean "uncategorized".
pub const LEGACY_UNCATEGORIZED_ID: &str = "0";

/// Maximum length of a category name, in characters.
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

/// Where a board should be placed for a given user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub enum CategoryTarget {
    /// Place the board in this category.
    Category(Id),
    /// Take the board out of every category.
    Uncategorized,
}

impl CategoryTarget {
    /// Parse a category ID as sent by legacy clients.
    ///
    /// `"0"` maps to [`CategoryTarget::Uncategorized`]; an empty or
    /// whitespace-only ID is rejected.
    pub fn from_legacy(category_id: &str) -> Result<Self, CoreError> {
        if category_id == LEGACY_UNCATEGORIZED_ID {
            return Ok(Self::Uncategorized);
        }
        if category_id.trim().is_empty() {
            return Err(CoreError::Validation(
                "category_id must not be empty".to_string(),
            ));
        }
        Ok(Self::Category(category_id.to_string()))
    }

    /// The target category ID, or `None` when uncategorized.
    pub fn category_id(&self) -> Option<&str> {
        match self {
            Self::Category(id) => Some(id),
            Self::Uncategorized => None,
        }
    }
}

impl TryFrom<Option<String>> for CategoryTarget {
    type Error = CoreError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value {
            Some(id) => Self::from_legacy(&id),
            None => Ok(Self::Uncategorized),
        }
    }
}

impl From<CategoryTarget> for Option<String> {
    fn from(value: CategoryTarget) -> Self {
        match value {
            CategoryTarget::Category(id) => Some(id),
            CategoryTarget::Uncategorized => None,
        }
    }
}

/// Validate a category name: non-blank and at most
/// [`MAX_CATEGORY_NAME_LEN`] characters.
pub fn validate_category_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "category name must not be empty".to_string(),
        ));
    }
    let len = name.chars().count();
    if len > MAX_CATEGORY_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "category name must be at most {MAX_CATEGORY_NAME_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- CategoryTarget ------------------------------------------------------

    #[test]
    fn legacy_zero_is_uncategorized() {
        let target = CategoryTarget::from_legacy("0").unwrap();
        assert_eq!(target, CategoryTarget::Uncategorized);
        assert_eq!(target.category_id(), None);
    }

    #[test]
    fn legacy_regular_id_is_category() {
        let target = CategoryTarget::from_legacy("cat1").unwrap();
        assert_eq!(target, CategoryTarget::Category("cat1".to_string()));
        assert_eq!(target.category_id(), Some("cat1"));
    }

    #[test]
    fn legacy_ids_that_only_contain_zero_are_categories() {
        assert_eq!(
            CategoryTarget::from_legacy("00").unwrap(),
            CategoryTarget::Category("00".to_string())
        );
    }

    #[test]
    fn legacy_empty_id_rejected() {
        assert!(CategoryTarget::from_legacy("").is_err());
        assert!(CategoryTarget::from_legacy("   ").is_err());
    }

    #[test]
    fn try_from_option_treats_legacy_zero_as_uncategorized() {
        assert_eq!(
            CategoryTarget::try_from(None::<String>).unwrap(),
            CategoryTarget::Uncategorized
        );
        assert_eq!(
            CategoryTarget::try_from(Some("0".to_string())).unwrap(),
            CategoryTarget::Uncategorized
        );
        assert_eq!(
            CategoryTarget::try_from(Some("c".to_string())).unwrap(),
            CategoryTarget::Category("c".to_string())
        );
    }

    #[test]
    fn deserializes_null_and_legacy_zero() {
        let null: CategoryTarget = serde_json::from_str("null").unwrap();
        assert_eq!(null, CategoryTarget::Uncategorized);

        let zero: CategoryTarget = serde_json::from_str("\"0\"").unwrap();
        assert_eq!(zero, CategoryTarget::Uncategorized);

        let cat: CategoryTarget = serde_json::from_str("\"cat9\"").unwrap();
        assert_eq!(cat, CategoryTarget::Category("cat9".to_string()));
    }

    #[test]
    fn deserialize_rejects_empty_string() {
        assert!(serde_json::from_str::<CategoryTarget>("\"\"").is_err());
    }

    #[test]
    fn serializes_as_nullable_id() {
        let json = serde_json::to_string(&CategoryTarget::Uncategorized).unwrap();
        assert_eq!(json, "null");
        let json = serde_json::to_string(&CategoryTarget::Category("c1".into())).unwrap();
        assert_eq!(json, "\"c1\"");
    }

    // -- validate_category_name ----------------------------------------------

    #[test]
    fn valid_name() {
        assert!(validate_category_name("Favorites").is_ok());
    }

    #[test]
    fn blank_name_rejected() {
        assert!(validate_category_name("").is_err());
        assert!(validate_category_name("  \t").is_err());
    }

    #[test]
    fn name_at_limit_accepted() {
        let name = "a".repeat(MAX_CATEGORY_NAME_LEN);
        assert!(validate_category_name(&name).is_ok());
    }

    #[test]
    fn name_over_limit_rejected() {
        let name = "a".repeat(MAX_CATEGORY_NAME_LEN + 1);
        assert!(validate_category_name(&name).is_err());
    }
}
