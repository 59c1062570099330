//! Category-board mapping model and the per-category read model.

use boardcat_core::types::{Id, Millis};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::category::Category;

/// A row from the `category_boards` table.
///
/// `delete_at == 0` marks the active mapping; soft-deleted rows keep their
/// last `category_id` as history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CategoryBoard {
    pub id: Id,
    pub user_id: Id,
    pub category_id: Id,
    pub board_id: Id,
    pub create_at: Millis,
    pub update_at: Millis,
    pub delete_at: Millis,
}

impl CategoryBoard {
    pub fn is_active(&self) -> bool {
        self.delete_at == 0
    }
}

/// A category together with the boards actively mapped to it.
///
/// Built on read; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBoards {
    #[serde(flatten)]
    pub category: Category,
    pub board_ids: Vec<Id>,
}
