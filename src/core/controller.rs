//! Request lifecycle controller.
//!
//! Owns the single [`RequestState`] and is its only writer. A submission moves
//! the state `Idle | Succeeded | Failed -> Loading -> Succeeded | Failed`.
//! At most one request is outstanding: `submit` is refused while `Loading`.
//!
//! Submission is split in two phases so the UI can render `Loading` while the
//! call is in flight:
//! - [`Controller::begin`] validates, enters `Loading` and hands out a [`Ticket`]
//! - [`Controller::settle`] publishes the outcome for that ticket
//! - [`Controller::abandon`] gives up on a ticket whose call will never finish
//!
//! A ticket must be settled or abandoned, otherwise the controller stays
//! `Loading` and refuses every later submission.
//! [`Controller::submit`] runs both phases around a single backend call and
//! abandons its ticket if the future is dropped before the call returns.

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::adapters::{Backend, BackendError};
use crate::domain::{is_submittable, RequestState, VerificationResult};

/// Failure message published when a submission is abandoned
pub const CANCELLED: &str = "Request cancelled";

/// Reasons a submission is declined without contacting the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("A verification request is already in progress")]
    InFlight,
}

/// Proof that a submission was started; redeemed by [`Controller::settle`]
#[derive(Debug)]
pub struct Ticket {
    seq: u64,
    query: String,
}

impl Ticket {
    /// Sequence number of this submission (starts at 1)
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The query exactly as submitted
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Drives submissions against a [`Backend`]
pub struct Controller<B> {
    backend: B,
    state: RequestState,
    /// Sequence number of the latest issued ticket
    issued: u64,
}

impl<B> Controller<B> {
    /// Create a controller in the `Idle` state
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: RequestState::Idle,
            issued: 0,
        }
    }

    /// Current state (read-only)
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// The backend this controller submits to
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of submissions started so far
    pub fn submissions(&self) -> u64 {
        self.issued
    }

    /// Start a submission.
    ///
    /// On success the state is `Loading` and any previous result or error is
    /// gone. On rejection nothing changes.
    pub fn begin(&mut self, query: &str) -> Result<Ticket, Rejected> {
        if self.state.is_loading() {
            debug!("Submission refused: request already in flight");
            return Err(Rejected::InFlight);
        }
        if !is_submittable(query) {
            debug!("Submission declined: empty query");
            return Err(Rejected::EmptyQuery);
        }

        self.issued += 1;
        debug!(
            seq = self.issued,
            previous = self.state.label(),
            "Entering loading"
        );
        self.state = RequestState::Loading;

        Ok(Ticket {
            seq: self.issued,
            query: query.to_string(),
        })
    }

    /// Publish the outcome of a submission.
    ///
    /// Returns `false` (and changes nothing) if the ticket is stale: either a
    /// newer submission was issued or this one has already been settled.
    pub fn settle(
        &mut self,
        ticket: Ticket,
        outcome: Result<VerificationResult, BackendError>,
    ) -> bool {
        if ticket.seq != self.issued || !self.state.is_loading() {
            debug!(
                seq = ticket.seq,
                latest = self.issued,
                "Discarding stale verification outcome"
            );
            return false;
        }

        self.state = match outcome {
            Ok(result) => {
                info!(
                    seq = ticket.seq,
                    status = result.verification.status.as_deref().unwrap_or("unknown"),
                    "Verification succeeded"
                );
                RequestState::Succeeded(result)
            }
            Err(err) => {
                warn!(seq = ticket.seq, error = %err, "Verification failed");
                RequestState::Failed(err.to_string())
            }
        };
        debug!(seq = ticket.seq, state = self.state.label(), "Request settled");

        true
    }

    /// Give up on a submission whose outcome will never arrive.
    ///
    /// Moves the state to `Failed("Request cancelled")` if the ticket is the
    /// latest one and still `Loading`. Returns `false` (and changes nothing)
    /// for a stale or already settled ticket.
    pub fn abandon(&mut self, ticket: Ticket) -> bool {
        if ticket.seq != self.issued || !self.state.is_loading() {
            return false;
        }

        warn!(seq = ticket.seq, "Verification abandoned");
        self.state = RequestState::Failed(CANCELLED.to_string());
        true
    }
}

/// Abandons the held ticket on drop unless it was taken for settling
struct Pending<'a, B> {
    controller: &'a mut Controller<B>,
    ticket: Option<Ticket>,
}

impl<B> Drop for Pending<'_, B> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.controller.abandon(ticket);
        }
    }
}

impl<B: Backend> Controller<B> {
    /// Submit a query and wait for the outcome.
    ///
    /// Every accepted submission leaves `Loading` exactly once, whatever the
    /// backend does. Dropping the returned future mid-call (a timeout or
    /// `select!`) leaves the state `Failed("Request cancelled")`.
    #[instrument(skip(self, query), fields(backend = self.backend.name()))]
    pub async fn submit(&mut self, query: &str) -> Result<&RequestState, Rejected> {
        let ticket = self.begin(query)?;
        debug!(seq = ticket.seq, query = ticket.query(), "Submitting query");

        let query = ticket.query().to_string();
        {
            let mut pending = Pending {
                controller: &mut *self,
                ticket: Some(ticket),
            };

            let outcome = pending.controller.backend.ask(&query).await;

            if let Some(ticket) = pending.ticket.take() {
                pending.controller.settle(ticket, outcome);
            }
        }

        Ok(&self.state)
    }
}
