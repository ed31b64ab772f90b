//! Data models shared across services

mod category;
mod dish;
mod order;
mod user;

pub use category::Category;
pub use dish::{CategoryRef, Dish};
pub use order::{OrderItem, OrderRecord, OrderRequest};
pub use user::Identity;
