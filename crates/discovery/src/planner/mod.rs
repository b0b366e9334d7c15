//! Two-phase trip planning.
//!
//! A [`TripPlanner`] collects a travel origin for one destination hospital and
//! turns it into a [`CarePlan`]:
//!
//! ```text
//! CollectingOrigin --submit--> (generating) --travel estimate ok--> Ready
//!                                   |
//!                                   +--travel estimate failed--> CollectingOrigin
//! Ready --start_over--> CollectingOrigin
//! ```
//!
//! The travel estimate is mandatory; a plan is never exposed without one. The
//! nearby stays lookup is enrichment: a missing destination location or a failed
//! lookup yields a plan with no stays.
//!
//! Each submission carries a token. [`TripPlanner::start_over`] and later
//! submissions invalidate earlier tokens, and a submission whose token is stale
//! when its calls complete is dropped without changing the phase.

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::DiscoveryConfig;
use crate::core::{DynAccommodationFinder, DynSession, DynTravelEstimator};
use crate::error::{DiscoveryError, DiscoveryResult, ErrorKind, ValidationError};
use crate::types::{Accommodation, CarePlan, Destination};

/// Phase of a planning session.
#[derive(Debug, Clone, PartialEq)]
pub enum TripPlanPhase {
    /// Waiting for an origin (also while a plan is being generated).
    CollectingOrigin,
    /// A plan has been generated.
    Ready(CarePlan),
}

impl TripPlanPhase {
    /// Returns true in the `Ready` phase.
    pub fn is_ready(&self) -> bool {
        matches!(self, TripPlanPhase::Ready(_))
    }
}

/// Result of a submission that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// The plan was generated and the planner is `Ready`.
    Ready(CarePlan),
    /// The planner was reset or resubmitted before this submission finished.
    Superseded,
}

#[derive(Debug)]
struct PlannerState {
    token: u64,
    phase: TripPlanPhase,
    generating: bool,
    last_error: Option<ErrorKind>,
}

/// Builds care plans from a travel estimator and an accommodation finder.
pub struct TripPlanner {
    estimator: DynTravelEstimator,
    finder: DynAccommodationFinder,
    config: DiscoveryConfig,
    session: Option<DynSession>,
    state: Mutex<PlannerState>,
}

impl TripPlanner {
    /// Creates a planner in the `CollectingOrigin` phase.
    pub fn new(
        estimator: DynTravelEstimator,
        finder: DynAccommodationFinder,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            estimator,
            finder,
            config,
            session: None,
            state: Mutex::new(PlannerState {
                token: 0,
                phase: TripPlanPhase::CollectingOrigin,
                generating: false,
                last_error: None,
            }),
        }
    }

    /// Attaches the signed-in user context. Plans are attributed to the user in logs.
    pub fn with_session(mut self, session: DynSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Generates a care plan from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// * `Validation` if `origin` is blank or a plan is already `Ready`
    /// * `PlanGenerationFailed` if the travel estimate fails; the planner
    ///   stays in `CollectingOrigin`
    pub async fn submit(
        &self,
        origin: &str,
        destination: Destination,
    ) -> DiscoveryResult<PlanOutcome> {
        let origin = origin.trim();
        if origin.is_empty() {
            return Err(ValidationError::MissingRequiredField {
                field: "origin".to_string(),
            }
            .into());
        }

        let token = {
            let mut state = self.state.lock();
            if state.phase.is_ready() {
                return Err(ValidationError::InvalidState {
                    operation: "submit an origin".to_string(),
                    state: "a plan is ready".to_string(),
                }
                .into());
            }
            state.token += 1;
            state.generating = true;
            state.last_error = None;
            state.token
        };

        let user = self
            .session
            .as_ref()
            .and_then(|s| s.current_user())
            .map(|u| u.id);
        debug!(token, origin, destination = %destination.name, user = ?user, "generating care plan");

        let estimate = match self
            .estimator
            .estimate_travel(origin, &destination.label())
            .await
        {
            Ok(estimate) => estimate,
            Err(source) => {
                let mut state = self.state.lock();
                if state.token != token {
                    debug!(token, "dropping failed estimate from superseded submission");
                    return Ok(PlanOutcome::Superseded);
                }
                state.generating = false;
                state.phase = TripPlanPhase::CollectingOrigin;
                state.last_error = Some(ErrorKind::PlanGenerationFailed);
                return Err(DiscoveryError::PlanGenerationFailed {
                    origin: origin.to_string(),
                    source,
                });
            }
        };

        if !self.is_current(token) {
            debug!(token, "submission superseded before stays lookup");
            return Ok(PlanOutcome::Superseded);
        }

        let stays = self.nearby_stays(&destination).await;

        let plan = CarePlan::compose(
            origin,
            destination,
            estimate,
            stays,
            self.config.stay_nights,
            self.config.max_nearby_stays,
        );

        let mut state = self.state.lock();
        if state.token != token {
            debug!(token, "dropping plan from superseded submission");
            return Ok(PlanOutcome::Superseded);
        }
        state.generating = false;
        state.phase = TripPlanPhase::Ready(plan.clone());

        info!(
            plan_id = %plan.id,
            origin = %plan.origin,
            destination = %plan.destination.name,
            stays = plan.nearby_stays.len(),
            total_estimate = plan.total_estimate,
            user = ?user,
            "care plan ready"
        );
        Ok(PlanOutcome::Ready(plan))
    }

    async fn nearby_stays(&self, destination: &Destination) -> Vec<Accommodation> {
        let Some(location) = destination.location else {
            debug!(destination = %destination.name, "no destination location, skipping stays");
            return Vec::new();
        };
        if !location.is_valid() {
            warn!(
                lat = location.lat,
                lng = location.lng,
                "destination location out of range, skipping stays"
            );
            return Vec::new();
        }

        match self
            .finder
            .find_near(location, self.config.default_radius)
            .await
        {
            Ok(stays) => stays,
            Err(source) => {
                let err = DiscoveryError::AccommodationLookupFailed { source };
                warn!(error = %err, destination = %destination.name, "plan proceeds without stays");
                Vec::new()
            }
        }
    }

    /// Discards the current plan and any submission in flight.
    pub fn start_over(&self) {
        let mut state = self.state.lock();
        state.token += 1;
        state.phase = TripPlanPhase::CollectingOrigin;
        state.generating = false;
        state.last_error = None;
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TripPlanPhase {
        self.state.lock().phase.clone()
    }

    /// Returns the ready plan, if any.
    pub fn plan(&self) -> Option<CarePlan> {
        match &self.state.lock().phase {
            TripPlanPhase::Ready(plan) => Some(plan.clone()),
            TripPlanPhase::CollectingOrigin => None,
        }
    }

    /// Returns true while a submission is being generated.
    pub fn is_generating(&self) -> bool {
        self.state.lock().generating
    }

    /// Returns the kind of the last failed submission, if any.
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.state.lock().last_error
    }

    fn is_current(&self, token: u64) -> bool {
        self.state.lock().token == token
    }
}
