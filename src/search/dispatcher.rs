// src/search/dispatcher.rs
use crate::domain::{Property, PropertyId};
use crate::errors::ServerError;
use crate::search::criteria::FilterCriteria;
use crate::search::filter::filter_properties;
use crate::search::pagination::{paginate, Page, PageRequest};
use crate::search::sample::SampleDataset;
use tracing::debug;

/// Read access to the primary listing store.
pub trait PropertyStore {
    fn count(&self) -> Result<usize, ServerError>;

    /// Every listing, in insertion order.
    fn list(&self) -> Result<Vec<Property>, ServerError>;

    fn get(&self, id: &PropertyId) -> Result<Option<Property>, ServerError>;
}

/// Where a listing request is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Primary,
    Sample,
}

/// Routes listing queries to the primary store, or to the sample dataset
/// when the store holds no records. Store faults are returned as errors;
/// only an empty store selects the sample dataset.
pub struct QueryDispatcher<'a> {
    store: &'a dyn PropertyStore,
    sample: &'a SampleDataset,
}

impl<'a> QueryDispatcher<'a> {
    pub fn new(store: &'a dyn PropertyStore, sample: &'a SampleDataset) -> Self {
        Self { store, sample }
    }

    pub fn select_source(&self) -> Result<DataSource, ServerError> {
        if self.store.count()? > 0 {
            Ok(DataSource::Primary)
        } else {
            Ok(DataSource::Sample)
        }
    }

    pub fn search(
        &self,
        criteria: &FilterCriteria,
        page: PageRequest,
    ) -> Result<Page<Property>, ServerError> {
        let source = self.select_source()?;
        let candidates = match source {
            DataSource::Primary => self.store.list()?,
            DataSource::Sample => self.sample.all().to_vec(),
        };

        let result = paginate(filter_properties(candidates, criteria), page);
        debug!(
            ?source,
            total = result.total,
            page = result.page,
            "listing query served"
        );
        Ok(result)
    }

    /// Primary store first, then the sample dataset.
    pub fn find(&self, id: &PropertyId) -> Result<Option<Property>, ServerError> {
        if let Some(p) = self.store.get(id)? {
            return Ok(Some(p));
        }
        Ok(self.sample.find(id).cloned())
    }
}
