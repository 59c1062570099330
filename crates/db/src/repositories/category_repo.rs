//! Repository for the `categories` table.

use boardcat_core::types::{new_id, now_millis, Id};
use sqlx::PgConnection;

use crate::models::category::{Category, CreateCategory};

/// Column list for categories queries.
const COLUMNS: &str = "id, name, user_id, team_id, collapsed, create_at, update_at, delete_at";

/// Provides the category lookups the category-board store depends on.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List a user's active categories within a team, ordered by name, then ID.
    pub async fn list_for_user_and_team(
        conn: &mut PgConnection,
        user_id: &str,
        team_id: &str,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories \
             WHERE user_id = $1 AND team_id = $2 AND delete_at = 0 \
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(team_id)
            .fetch_all(conn)
            .await
    }

    /// Find an active category by its ID.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1 AND delete_at = 0");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Create a new category owned by `user_id` in `team_id`, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        user_id: &str,
        team_id: &str,
        input: &CreateCategory,
    ) -> Result<Category, sqlx::Error> {
        let id: Id = new_id();
        let now = now_millis();
        let query = format!(
            "INSERT INTO categories \
                 (id, name, user_id, team_id, collapsed, create_at, update_at, delete_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6, 0) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&id)
            .bind(&input.name)
            .bind(user_id)
            .bind(team_id)
            .bind(input.collapsed.unwrap_or(false))
            .bind(now)
            .fetch_one(conn)
            .await
    }

    /// Soft-delete a category. Returns `true` if an active row was deleted.
    ///
    /// Boards mapped to the category are left untouched; callers pair this
    /// with `CategoryBoardRepo::uncategorize_all` inside one transaction.
    pub async fn soft_delete(conn: &mut PgConnection, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE categories SET delete_at = $2, update_at = $2 \
             WHERE id = $1 AND delete_at = 0",
        )
        .bind(id)
        .bind(now_millis())
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
