//! Shared types for the category-board store.
//!
//! Holds identifier and timestamp primitives, the explicit category target
//! used when (re)assigning boards, and the domain error type.

pub mod category;
pub mod error;
pub mod types;
