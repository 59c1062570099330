//! Errors raised by the category-board store.
//!
//! Repository methods never log. Each error carries the operation name and
//! the identifiers involved so the caller can log it once with
//! [`CategoryBoardError::log`] and decide how to surface it.
//!
//! ```no_run
//! use boardcat_core::category::CategoryTarget;
//! use boardcat_core::error::CoreError;
//! use boardcat_db::repositories::CategoryBoardRepo;
//!
//! async fn move_board(
//!     pool: &sqlx::PgPool,
//!     user_id: &str,
//!     category_id: &str,
//!     board_id: &str,
//! ) -> Result<(), CoreError> {
//!     let mut conn = pool
//!         .acquire()
//!         .await
//!         .map_err(|e| CoreError::Internal(e.to_string()))?;
//!     let target = CategoryTarget::Category(category_id.to_string());
//!     CategoryBoardRepo::assign_board_to_category(&mut conn, user_id, &target, board_id)
//!         .await
//!         .map_err(|e| {
//!             e.log();
//!             CoreError::from(e)
//!         })
//! }
//! ```

use std::fmt;

use boardcat_core::error::CoreError;
use boardcat_core::types::Id;

/// Name of the partial unique index guarding one active mapping per
/// `(user_id, board_id)`.
pub const ACTIVE_MAPPING_INDEX: &str = "uq_category_boards_active_user_board";

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Identifiers attached to an error for diagnosis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    pub user_id: Option<Id>,
    pub team_id: Option<Id>,
    pub category_id: Option<Id>,
    pub board_id: Option<Id>,
}

impl ErrorContext {
    pub fn user(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    pub fn team(mut self, team_id: &str) -> Self {
        self.team_id = Some(team_id.to_string());
        self
    }

    pub fn category(mut self, category_id: &str) -> Self {
        self.category_id = Some(category_id.to_string());
        self
    }

    pub fn board(mut self, board_id: &str) -> Self {
        self.board_id = Some(board_id.to_string());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("user_id", &self.user_id),
            ("team_id", &self.team_id),
            ("category_id", &self.category_id),
            ("board_id", &self.board_id),
        ];
        let mut first = true;
        for (name, value) in fields {
            if let Some(value) = value {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{name}={value}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CategoryBoardError {
    /// The backend rejected or failed a statement.
    #[error("{op} failed ({context}): {source}")]
    Execution {
        op: &'static str,
        context: ErrorContext,
        #[source]
        source: sqlx::Error,
    },

    /// More than one mapping row exists for the same user and board.
    #[error(
        "duplicate entries found for user-board-category mapping \
         (user_id={user_id}, board_id={board_id})"
    )]
    DuplicateMapping { user_id: Id, board_id: Id },

    /// A result row could not be decoded.
    #[error("{op} could not decode row ({context}): {source}")]
    RowScan {
        op: &'static str,
        context: ErrorContext,
        #[source]
        source: sqlx::Error,
    },
}

impl CategoryBoardError {
    /// Wrap a sqlx error, separating decode failures from execution failures.
    pub(crate) fn from_sqlx(op: &'static str, context: ErrorContext, source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::TypeNotFound { .. } => Self::RowScan {
                op,
                context,
                source,
            },
            source => Self::Execution {
                op,
                context,
                source,
            },
        }
    }

    /// Name of the failed operation, if the error came from the backend.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Execution { op, .. } | Self::RowScan { op, .. } => Some(*op),
            Self::DuplicateMapping { .. } => None,
        }
    }

    /// Emit one structured log event for this error.
    pub fn log(&self) {
        match self {
            Self::Execution { op, context, source } | Self::RowScan { op, context, source } => {
                tracing::error!(
                    op,
                    user_id = context.user_id.as_deref(),
                    team_id = context.team_id.as_deref(),
                    category_id = context.category_id.as_deref(),
                    board_id = context.board_id.as_deref(),
                    error = %source,
                    "Category board store error"
                );
            }
            Self::DuplicateMapping { user_id, board_id } => {
                tracing::error!(
                    %user_id,
                    %board_id,
                    "Duplicate category board mappings found"
                );
            }
        }
    }
}

impl From<CategoryBoardError> for CoreError {
    fn from(err: CategoryBoardError) -> Self {
        match err {
            CategoryBoardError::DuplicateMapping { .. } => CoreError::Conflict(err.to_string()),
            other => CoreError::Internal(other.to_string()),
        }
    }
}

/// Whether a sqlx error is a unique violation of the active-mapping index.
pub(crate) fn is_active_mapping_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(ACTIVE_MAPPING_INDEX)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn context_display_lists_present_fields_in_order() {
        let ctx = ErrorContext::default().board("b1").user("u1");
        assert_eq!(ctx.to_string(), "user_id=u1, board_id=b1");
    }

    #[test]
    fn empty_context_displays_nothing() {
        assert_eq!(ErrorContext::default().to_string(), "");
    }

    #[test]
    fn decode_errors_become_row_scan() {
        let err = CategoryBoardError::from_sqlx(
            "get_category_board_ids",
            ErrorContext::default().category("c1"),
            sqlx::Error::ColumnNotFound("board_id".to_string()),
        );
        assert_matches!(err, CategoryBoardError::RowScan { op: "get_category_board_ids", .. });
    }

    #[test]
    fn other_errors_become_execution() {
        let err = CategoryBoardError::from_sqlx(
            "remove_board_from_category",
            ErrorContext::default().user("u1").board("b1"),
            sqlx::Error::PoolTimedOut,
        );
        assert_matches!(err, CategoryBoardError::Execution { .. });
        assert_eq!(err.operation(), Some("remove_board_from_category"));
        assert!(err.to_string().contains("user_id=u1, board_id=b1"));
    }

    #[test]
    fn duplicate_mapping_message() {
        let err = CategoryBoardError::DuplicateMapping {
            user_id: "u1".to_string(),
            board_id: "b1".to_string(),
        };
        assert!(err
            .to_string()
            .starts_with("duplicate entries found for user-board-category mapping"));
        assert_eq!(err.operation(), None);
    }

    #[test]
    fn duplicate_mapping_converts_to_conflict() {
        let err = CategoryBoardError::DuplicateMapping {
            user_id: "u1".to_string(),
            board_id: "b1".to_string(),
        };
        assert_matches!(CoreError::from(err), CoreError::Conflict(_));
    }

    #[test]
    fn execution_converts_to_internal() {
        let err = CategoryBoardError::from_sqlx(
            "list_user_category_boards",
            ErrorContext::default(),
            sqlx::Error::PoolClosed,
        );
        assert_matches!(CoreError::from(err), CoreError::Internal(_));
    }

    #[test]
    fn non_database_errors_are_not_mapping_violations() {
        assert!(!is_active_mapping_violation(&sqlx::Error::RowNotFound));
    }
}
