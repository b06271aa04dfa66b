pub mod entity;
pub mod manager;
pub mod models;
pub mod repository;

pub use entity::{Entity, NoFilter};
pub use manager::{Database, DatabaseError};
pub use repository::Repository;
