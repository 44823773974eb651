//! Search client: debounced queries against the listing API, with local
//! filtering over the bundled dataset when the API cannot answer.

pub mod backend;
pub mod controller;
pub mod debounce;

pub use backend::HttpSearchBackend;
pub use controller::{ResultSource, SearchController, SearchOutcome};
