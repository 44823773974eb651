// src/client/controller.rs
use crate::client::backend::SearchBackend;
use crate::client::debounce::Debouncer;
use crate::domain::Property;
use crate::search::{
    filter_properties, paginate, FilterCriteria, FilterField, Page, PageRequest, SampleDataset,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Where a delivered page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Remote,
    LocalFallback,
}

/// A result page handed to the `on_result` callback.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Sequence number of the request that produced this page.
    pub seq: u64,
    pub criteria: FilterCriteria,
    pub page: Page<Property>,
    pub source: ResultSource,
}

type ResultSink = Box<dyn Fn(SearchOutcome) + Send + Sync>;

#[derive(Debug, Clone)]
struct Snapshot {
    criteria: FilterCriteria,
    page: PageRequest,
}

/// State shared with the debounce worker and in-flight request threads.
struct Shared {
    backend: Arc<dyn SearchBackend>,
    fallback: Arc<SampleDataset>,
    on_result: ResultSink,
    latest_seq: AtomicU64,
    /// Sequence number of the last page handed to `on_result`. Held while
    /// the callback runs so deliveries are applied in issue order.
    delivered: Mutex<u64>,
    closed: AtomicBool,
}

impl Shared {
    /// Start a request on its own thread. Its result is delivered only if
    /// no later request was issued in the meantime.
    fn issue(self: &Arc<Self>, snapshot: Snapshot) {
        let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, criteria = ?snapshot.criteria, "issuing search request");

        let shared = Arc::clone(self);
        let spawned = thread::Builder::new()
            .name(format!("search-request-{seq}"))
            .spawn(move || shared.run(seq, snapshot));

        if let Err(e) = spawned {
            warn!(seq, error = %e, "could not spawn request thread");
        }
    }

    fn run(&self, seq: u64, snapshot: Snapshot) {
        let Snapshot { criteria, page } = snapshot;

        let (result, source) = match self.backend.fetch(&criteria, page) {
            Ok(result) => (result, ResultSource::Remote),
            Err(e) => {
                warn!(seq, error = %e, "search request failed, filtering locally");
                let local = filter_properties(self.fallback.all().to_vec(), &criteria);
                (paginate(local, page), ResultSource::LocalFallback)
            }
        };

        let mut delivered = self
            .delivered
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if self.closed.load(Ordering::SeqCst) {
            return;
        }
        if self.latest_seq.load(Ordering::SeqCst) != seq || seq <= *delivered {
            debug!(seq, "dropping superseded search response");
            return;
        }
        *delivered = seq;

        (self.on_result)(SearchOutcome {
            seq,
            criteria,
            page: result,
            source,
        });
    }
}

/// Holds the current filters and page, and turns edits into queries:
/// field edits are debounced, explicit actions query at once.
pub struct SearchController {
    criteria: FilterCriteria,
    page: usize,
    limit: usize,
    shared: Arc<Shared>,
    debouncer: Debouncer<Snapshot>,
}

impl SearchController {
    pub fn new<F>(
        backend: Arc<dyn SearchBackend>,
        fallback: Arc<SampleDataset>,
        debounce: Duration,
        on_result: F,
    ) -> Self
    where
        F: Fn(SearchOutcome) + Send + Sync + 'static,
    {
        let shared = Arc::new(Shared {
            backend,
            fallback,
            on_result: Box::new(on_result),
            latest_seq: AtomicU64::new(0),
            delivered: Mutex::new(0),
            closed: AtomicBool::new(false),
        });

        let worker_shared = Arc::clone(&shared);
        let debouncer = Debouncer::new(debounce, move |snapshot| worker_shared.issue(snapshot));

        let defaults = PageRequest::default();
        Self {
            criteria: FilterCriteria::default(),
            page: defaults.page(),
            limit: defaults.limit(),
            shared,
            debouncer,
        }
    }

    /// Change the page size and fetch its first page now.
    pub fn set_page_size(&mut self, limit: usize) {
        self.limit = PageRequest::new(1, limit).limit();
        self.page = 1;
        self.debouncer.fire_now(self.snapshot());
    }

    #[cfg(test)]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Edit one field. Resets to page 1. Clearing the last active filter
    /// fetches the unfiltered list immediately; other edits are debounced.
    pub fn set_filter(&mut self, field: FilterField, raw: &str) {
        self.criteria.set(field, raw);
        self.page = 1;

        if self.criteria.is_empty() {
            self.debouncer.fire_now(self.snapshot());
        } else {
            self.debouncer.schedule(self.snapshot());
        }
    }

    /// Explicit search: skips the debounce delay.
    pub fn submit(&mut self) {
        self.debouncer.fire_now(self.snapshot());
    }

    /// Drop every filter and fetch the first unfiltered page now.
    pub fn clear(&mut self) {
        self.criteria = FilterCriteria::default();
        self.page = 1;
        self.debouncer.fire_now(self.snapshot());
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = PageRequest::new(page, self.limit).page();
        self.debouncer.fire_now(self.snapshot());
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            criteria: self.criteria.clone(),
            page: PageRequest::new(self.page, self.limit),
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::SeqCst);
    }
}
