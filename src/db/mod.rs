pub mod cart;
pub mod connection;
pub mod properties;
pub mod users;

pub use connection::{init_db, Database};
pub use properties::replace_all_properties;
