// src/domain/account.rs

use crate::domain::property::{Property, PropertyId};
use serde::Serialize;

/// Public view of an account; the password hash never leaves `db::users`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Row in `saved_properties`.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedItem {
    pub id: i64,
    pub user_id: i64,
    pub property_id: PropertyId,
    pub added_at: i64,
}

/// Saved item with its listing resolved, as returned by the cart endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProperty {
    pub id: i64,
    pub user_id: i64,
    pub added_at: i64,
    pub property_id: PropertyId,
    pub property: Property,
}

impl SavedProperty {
    pub fn new(item: SavedItem, property: Property) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            added_at: item.added_at,
            property_id: item.property_id,
            property,
        }
    }
}
