//! Category model.

use boardcat_core::category::validate_category_name;
use boardcat_core::error::CoreError;
use boardcat_core::types::{Id, Millis};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub user_id: Id,
    pub team_id: Id,
    pub collapsed: bool,
    pub create_at: Millis,
    pub update_at: Millis,
    pub delete_at: Millis,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub collapsed: Option<bool>,
}

impl CreateCategory {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_category_name(&self.name)
    }
}
