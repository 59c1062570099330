//! Repository for the `category_boards` table.
//!
//! Tracks which of a user's categories each board sits in. A user has at
//! most one active row per board. Moving a board rewrites that row in place,
//! and removing it from its category soft-deletes the row, so the row's
//! `create_at` survives every reassignment.

use boardcat_core::category::CategoryTarget;
use boardcat_core::types::{new_id, now_millis, Id};
use sqlx::PgConnection;

use crate::error::{is_active_mapping_violation, CategoryBoardError, ErrorContext};
use crate::models::category_board::{CategoryBoard, CategoryBoards};
use crate::repositories::CategoryRepo;

/// Column list for category_boards queries.
const COLUMNS: &str = "id, user_id, category_id, board_id, create_at, update_at, delete_at";

/// Provides membership operations between users' categories and boards.
pub struct CategoryBoardRepo;

impl CategoryBoardRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List every category the user has in the team, each with its active
    /// board IDs.
    ///
    /// Categories keep the order `CategoryRepo::list_for_user_and_team`
    /// returns them in. Categories without boards are included with an empty
    /// list. Any failed lookup fails the whole call.
    pub async fn list_user_category_boards(
        conn: &mut PgConnection,
        user_id: &str,
        team_id: &str,
    ) -> Result<Vec<CategoryBoards>, CategoryBoardError> {
        let categories = CategoryRepo::list_for_user_and_team(&mut *conn, user_id, team_id)
            .await
            .map_err(|e| {
                CategoryBoardError::from_sqlx(
                    "list_user_category_boards",
                    ErrorContext::default().user(user_id).team(team_id),
                    e,
                )
            })?;

        let mut result = Vec::with_capacity(categories.len());
        for category in categories {
            let board_ids = Self::get_category_board_ids(&mut *conn, &category.id).await?;
            result.push(CategoryBoards {
                category,
                board_ids,
            });
        }
        Ok(result)
    }

    /// Board IDs actively mapped to a category, ordered by board ID.
    ///
    /// Returns an empty list for a category with no boards.
    pub async fn get_category_board_ids(
        conn: &mut PgConnection,
        category_id: &str,
    ) -> Result<Vec<Id>, CategoryBoardError> {
        sqlx::query_scalar::<_, String>(
            "SELECT board_id FROM category_boards \
             WHERE category_id = $1 AND delete_at = 0 \
             ORDER BY board_id",
        )
        .bind(category_id)
        .fetch_all(conn)
        .await
        .map_err(|e| {
            CategoryBoardError::from_sqlx(
                "get_category_board_ids",
                ErrorContext::default().category(category_id),
                e,
            )
        })
    }

    /// The user's active mapping for a board, if the board is categorized.
    pub async fn find_active_mapping(
        conn: &mut PgConnection,
        user_id: &str,
        board_id: &str,
    ) -> Result<Option<CategoryBoard>, CategoryBoardError> {
        let query = format!(
            "SELECT {COLUMNS} FROM category_boards \
             WHERE user_id = $1 AND board_id = $2 AND delete_at = 0"
        );
        sqlx::query_as::<_, CategoryBoard>(&query)
            .bind(user_id)
            .bind(board_id)
            .fetch_optional(conn)
            .await
            .map_err(|e| {
                CategoryBoardError::from_sqlx(
                    "find_active_mapping",
                    ErrorContext::default().user(user_id).board(board_id),
                    e,
                )
            })
    }

    /// Every mapping row the user has for a board, soft-deleted ones
    /// included, oldest first.
    pub async fn list_mapping_history(
        conn: &mut PgConnection,
        user_id: &str,
        board_id: &str,
    ) -> Result<Vec<CategoryBoard>, CategoryBoardError> {
        let query = format!(
            "SELECT {COLUMNS} FROM category_boards \
             WHERE user_id = $1 AND board_id = $2 \
             ORDER BY create_at ASC, id ASC"
        );
        sqlx::query_as::<_, CategoryBoard>(&query)
            .bind(user_id)
            .bind(board_id)
            .fetch_all(conn)
            .await
            .map_err(|e| {
                CategoryBoardError::from_sqlx(
                    "list_mapping_history",
                    ErrorContext::default().user(user_id).board(board_id),
                    e,
                )
            })
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Place a board in one of the user's categories, or take it out of
    /// every category.
    ///
    /// [`CategoryTarget::Uncategorized`] behaves exactly like
    /// [`Self::remove_board_from_category`]. Otherwise the user's existing
    /// row for the board is repointed at the category and reactivated if it
    /// was soft-deleted. A new row is inserted only when the user has never
    /// categorized the board. Finding more than one row for the pair fails
    /// with [`CategoryBoardError::DuplicateMapping`].
    pub async fn assign_board_to_category(
        conn: &mut PgConnection,
        user_id: &str,
        target: &CategoryTarget,
        board_id: &str,
    ) -> Result<(), CategoryBoardError> {
        let category_id = match target {
            CategoryTarget::Category(id) => id.as_str(),
            CategoryTarget::Uncategorized => {
                return Self::remove_board_from_category(conn, user_id, board_id).await;
            }
        };

        match Self::update_mapping(&mut *conn, user_id, category_id, board_id).await? {
            0 => Self::insert_mapping(conn, user_id, category_id, board_id).await,
            1 => Ok(()),
            rows => {
                tracing::warn!(
                    %user_id,
                    %board_id,
                    rows,
                    "Reassignment touched more than one category board mapping"
                );
                Err(CategoryBoardError::DuplicateMapping {
                    user_id: user_id.to_string(),
                    board_id: board_id.to_string(),
                })
            }
        }
    }

    /// Soft-delete the user's active mapping for a board.
    ///
    /// Succeeds whether or not an active mapping existed, so repeated calls
    /// are harmless.
    pub async fn remove_board_from_category(
        conn: &mut PgConnection,
        user_id: &str,
        board_id: &str,
    ) -> Result<(), CategoryBoardError> {
        let result = sqlx::query(
            "UPDATE category_boards SET delete_at = $3, update_at = $3 \
             WHERE user_id = $1 AND board_id = $2 AND delete_at = 0",
        )
        .bind(user_id)
        .bind(board_id)
        .bind(now_millis())
        .execute(conn)
        .await
        .map_err(|e| {
            CategoryBoardError::from_sqlx(
                "remove_board_from_category",
                ErrorContext::default().user(user_id).board(board_id),
                e,
            )
        })?;

        tracing::debug!(
            %user_id,
            %board_id,
            removed = result.rows_affected(),
            "Board removed from category"
        );
        Ok(())
    }

    /// Soft-delete every active mapping the user has in a category.
    ///
    /// Returns the number of boards that became uncategorized.
    pub async fn uncategorize_all(
        conn: &mut PgConnection,
        user_id: &str,
        category_id: &str,
    ) -> Result<u64, CategoryBoardError> {
        let result = sqlx::query(
            "UPDATE category_boards SET delete_at = $3, update_at = $3 \
             WHERE user_id = $1 AND category_id = $2 AND delete_at = 0",
        )
        .bind(user_id)
        .bind(category_id)
        .bind(now_millis())
        .execute(conn)
        .await
        .map_err(|e| {
            CategoryBoardError::from_sqlx(
                "uncategorize_all",
                ErrorContext::default().user(user_id).category(category_id),
                e,
            )
        })?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Repoint and reactivate every row for `(user_id, board_id)`.
    ///
    /// Returns the number of rows touched.
    async fn update_mapping(
        conn: &mut PgConnection,
        user_id: &str,
        category_id: &str,
        board_id: &str,
    ) -> Result<u64, CategoryBoardError> {
        let result = sqlx::query(
            "UPDATE category_boards \
             SET category_id = $3, delete_at = 0, update_at = $4 \
             WHERE user_id = $1 AND board_id = $2",
        )
        .bind(user_id)
        .bind(board_id)
        .bind(category_id)
        .bind(now_millis())
        .execute(conn)
        .await;

        match result {
            Ok(done) => Ok(done.rows_affected()),
            // Reactivating a second row for the pair trips the active-mapping index.
            Err(e) if is_active_mapping_violation(&e) => {
                Err(CategoryBoardError::DuplicateMapping {
                    user_id: user_id.to_string(),
                    board_id: board_id.to_string(),
                })
            }
            Err(e) => Err(CategoryBoardError::from_sqlx(
                "assign_board_to_category",
                ErrorContext::default()
                    .user(user_id)
                    .category(category_id)
                    .board(board_id),
                e,
            )),
        }
    }

    /// Insert the first mapping for `(user_id, board_id)`.
    ///
    /// A concurrent first assignment of the same board wins the insert race;
    /// the conflict clause then repoints that row instead of failing.
    async fn insert_mapping(
        conn: &mut PgConnection,
        user_id: &str,
        category_id: &str,
        board_id: &str,
    ) -> Result<(), CategoryBoardError> {
        sqlx::query(
            "INSERT INTO category_boards \
                 (id, user_id, category_id, board_id, create_at, update_at, delete_at) \
             VALUES ($1, $2, $3, $4, $5, $5, 0) \
             ON CONFLICT (user_id, board_id) WHERE delete_at = 0 \
             DO UPDATE SET category_id = EXCLUDED.category_id, update_at = EXCLUDED.update_at",
        )
        .bind(new_id())
        .bind(user_id)
        .bind(category_id)
        .bind(board_id)
        .bind(now_millis())
        .execute(conn)
        .await
        .map_err(|e| {
            CategoryBoardError::from_sqlx(
                "assign_board_to_category",
                ErrorContext::default()
                    .user(user_id)
                    .category(category_id)
                    .board(board_id),
                e,
            )
        })?;

        tracing::debug!(%user_id, %category_id, %board_id, "Board categorized for the first time");
        Ok(())
    }
}
