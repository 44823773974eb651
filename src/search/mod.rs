//! Listing search: criteria parsing, filtering, pagination, and the
//! store-or-sample dispatch shared by the API and the search client.

pub mod criteria;
pub mod dispatcher;
pub mod filter;
pub mod pagination;
pub mod sample;

pub use criteria::{FilterCriteria, FilterField, QueryParams};
pub use dispatcher::{PropertyStore, QueryDispatcher};
pub use filter::filter_properties;
pub use pagination::{paginate, Page, PageRequest};
pub use sample::SampleDataset;
