//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus any create DTOs or read models built from it.

pub mod category;
pub mod category_board;
