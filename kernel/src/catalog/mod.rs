//! Catalog module: moves, goal list, and the immutable move catalog.

pub mod error;
pub mod goals;
pub mod move_catalog;
pub mod move_id;

pub use error::CatalogError;
pub use goals::GoalList;
pub use move_catalog::MoveCatalog;
pub use move_id::{MoveId, START};
