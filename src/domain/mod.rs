pub mod account;
pub mod property;

pub use account::{SavedItem, SavedProperty, User};
pub use property::{Property, PropertyId, PropertyType};
