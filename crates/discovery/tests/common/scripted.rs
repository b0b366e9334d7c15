//! Scripted collaborators.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use arogya_discovery::core::{AccommodationFinder, HospitalCatalog, TravelEstimator};
use arogya_discovery::error::{CollaboratorError, CollaboratorResult};
use arogya_discovery::types::{Accommodation, GeoPoint, HospitalSummary, ResultPage, TravelEstimate};

/// A remote failure with a 503 status.
pub fn unavailable(service: &str) -> CollaboratorError {
    CollaboratorError::Status {
        service: service.to_string(),
        status: 503,
        message: "service unavailable".to_string(),
    }
}

struct Scripted<T> {
    gate: Option<oneshot::Receiver<()>>,
    result: CollaboratorResult<T>,
}

/// Per-key queues of responses plus a log of the keys that were called.
pub struct Responses<T> {
    service: &'static str,
    queue: Mutex<HashMap<String, VecDeque<Scripted<T>>>>,
    calls: Mutex<Vec<String>>,
}

impl<T: Send> Responses<T> {
    fn new(service: &'static str) -> Self {
        Self {
            service,
            queue: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queues a response returned immediately.
    pub fn push(&self, key: impl Into<String>, result: CollaboratorResult<T>) {
        self.enqueue(key.into(), None, result);
    }

    /// Queues a response held back until the returned sender fires (or is dropped).
    pub fn push_gated(
        &self,
        key: impl Into<String>,
        result: CollaboratorResult<T>,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.enqueue(key.into(), Some(rx), result);
        tx
    }

    /// Keys called so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn enqueue(&self, key: String, gate: Option<oneshot::Receiver<()>>, result: CollaboratorResult<T>) {
        self.queue
            .lock()
            .entry(key)
            .or_default()
            .push_back(Scripted { gate, result });
    }

    async fn answer(&self, key: String) -> CollaboratorResult<T> {
        self.calls.lock().push(key.clone());
        let scripted = self.queue.lock().get_mut(&key).and_then(VecDeque::pop_front);
        let Some(scripted) = scripted else {
            return Err(CollaboratorError::Unavailable {
                service: format!("{} (unscripted call '{}')", self.service, key),
            });
        };
        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }
        scripted.result
    }
}

/// Catalog keyed by `"<term>#<page>"` for searches and by the query for suggestions.
pub struct ScriptedCatalog {
    pub pages: Responses<ResultPage>,
    pub suggestions: Responses<Vec<HospitalSummary>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self {
            pages: Responses::new("hospital-catalog"),
            suggestions: Responses::new("hospital-catalog"),
        }
    }

    /// Key used for a search call.
    pub fn page_key(term: &str, page: u32) -> String {
        format!("{}#{}", term, page)
    }

    pub fn page(&self, term: &str, page: u32, result: ResultPage) {
        self.pages.push(Self::page_key(term, page), Ok(result));
    }

    pub fn gated_page(&self, term: &str, page: u32, result: ResultPage) -> oneshot::Sender<()> {
        self.pages.push_gated(Self::page_key(term, page), Ok(result))
    }

    pub fn failing_page(&self, term: &str, page: u32) {
        self.pages
            .push(Self::page_key(term, page), Err(unavailable("hospital-catalog")));
    }

    pub fn suggestion(&self, query: &str, items: Vec<HospitalSummary>) {
        self.suggestions.push(query, Ok(items));
    }

    pub fn gated_suggestion(&self, query: &str, items: Vec<HospitalSummary>) -> oneshot::Sender<()> {
        self.suggestions.push_gated(query, Ok(items))
    }

    pub fn failing_suggestion(&self, query: &str) {
        self.suggestions.push(query, Err(unavailable("hospital-catalog")));
    }
}

impl Default for ScriptedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HospitalCatalog for ScriptedCatalog {
    async fn search(
        &self,
        term: &str,
        _specialty: Option<&str>,
        page: u32,
    ) -> CollaboratorResult<ResultPage> {
        self.pages.answer(Self::page_key(term, page)).await
    }

    async fn suggest(&self, query: &str) -> CollaboratorResult<Vec<HospitalSummary>> {
        self.suggestions.answer(query.to_string()).await
    }
}

/// Travel estimator keyed by `"<origin> -> <destination>"`.
pub struct ScriptedEstimator {
    pub estimates: Responses<TravelEstimate>,
}

impl ScriptedEstimator {
    pub fn new() -> Self {
        Self {
            estimates: Responses::new("travel-estimator"),
        }
    }

    pub fn key(origin: &str, destination: &str) -> String {
        format!("{} -> {}", origin, destination)
    }
}

impl Default for ScriptedEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TravelEstimator for ScriptedEstimator {
    async fn estimate_travel(
        &self,
        origin: &str,
        destination: &str,
    ) -> CollaboratorResult<TravelEstimate> {
        self.estimates.answer(Self::key(origin, destination)).await
    }
}

/// Accommodation finder keyed by `"<lat>,<lng>@<radius>"`.
pub struct ScriptedFinder {
    pub stays: Responses<Vec<Accommodation>>,
}

impl ScriptedFinder {
    pub fn new() -> Self {
        Self {
            stays: Responses::new("accommodation-finder"),
        }
    }

    pub fn key(location: GeoPoint, radius: f64) -> String {
        format!("{},{}@{}", location.lat, location.lng, radius)
    }
}

impl Default for ScriptedFinder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccommodationFinder for ScriptedFinder {
    async fn find_near(
        &self,
        location: GeoPoint,
        radius: f64,
    ) -> CollaboratorResult<Vec<Accommodation>> {
        self.stays.answer(Self::key(location, radius)).await
    }
}
