//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&mut PgConnection` as the first argument. Pass a pooled
//! connection (`&mut pool.acquire().await?`) for standalone calls or an
//! open transaction (`&mut tx`) to batch several calls into one atomic
//! unit. Repositories never begin or commit transactions themselves.

pub mod category_board_repo;
pub mod category_repo;

pub use category_board_repo::CategoryBoardRepo;
pub use category_repo::CategoryRepo;
