use crate::db::Database;
use crate::search::{QueryDispatcher, SampleDataset};
use std::sync::Arc;

/// Shared by every worker thread. The database handle is only a path;
/// connections are opened per thread.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub sample: Arc<SampleDataset>,
}

impl AppState {
    pub fn new(db: Database, sample: SampleDataset) -> Self {
        Self {
            db,
            sample: Arc::new(sample),
        }
    }

    pub fn dispatcher(&self) -> QueryDispatcher<'_> {
        QueryDispatcher::new(&self.db, &self.sample)
    }
}
