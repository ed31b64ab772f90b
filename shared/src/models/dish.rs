//! Dish Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

/// Dish entity as served by dishes-service
///
/// Read-only from the gateway's perspective: fetched fresh per request,
/// never cached across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub category: Option<Category>,
}

/// Category reference in a create payload: either an existing id or a name.
///
/// dishes-service resolves a numeric value (or digit string) as an id and
/// anything else as a name, creating the category if it does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i64),
    Name(String),
}
