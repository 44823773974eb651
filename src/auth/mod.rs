pub mod accounts;
pub mod password;
pub mod sessions;
pub mod token;

pub use accounts::{login, signup};
pub use sessions::authenticate;
