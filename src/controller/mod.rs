//! Client-side state for the transaction list, its filter and the detail
//! modal.
//!
//! [`Controller`] is a reducer: every user intent is a method, and anything
//! that needs the remote service comes back as a [`Request`] for the caller
//! to execute. Results are fed back in through [`Controller::complete`].

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::filter;
use crate::models::{Transaction, TransactionDetail, TransactionId};
use crate::source::SourceError;

/// Remote work produced by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Request {
    /// `ticket` identifies the load this fetch belongs to.
    List { ticket: u64 },
    /// `ticket` identifies the selection this fetch belongs to.
    Detail { id: TransactionId, ticket: u64 },
    /// `seq` orders writes to the same transaction.
    SetInternal {
        id: TransactionId,
        internal: bool,
        seq: u64,
    },
}

/// Outcome of a [`Request`].
#[derive(Debug, Clone)]
pub(crate) enum Completion {
    Listed {
        ticket: u64,
        result: Result<Vec<Transaction>, SourceError>,
    },
    Detail {
        id: TransactionId,
        ticket: u64,
        result: Result<TransactionDetail, SourceError>,
    },
    Updated {
        id: TransactionId,
        internal: bool,
        seq: u64,
        result: Result<(), SourceError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    DetailLoading,
    DetailReady,
}

/// What the user was doing when a remote call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Load,
    Detail(TransactionId),
    Update(TransactionId),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load => write!(f, "Loading transactions"),
            Self::Detail(id) => write!(f, "Loading transaction #{id}"),
            Self::Update(id) => write!(f, "Updating transaction #{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{action} failed: {source}")]
pub(crate) struct ViewError {
    pub(crate) action: Action,
    #[source]
    pub(crate) source: SourceError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ControllerError {
    #[error("No transaction with id {0}")]
    UnknownTransaction(TransactionId),
}

#[derive(Debug, Default)]
pub(crate) struct ViewState {
    /// Everything the service returned, in service order.
    pub(crate) all: Vec<Transaction>,
    /// `all` narrowed by the last applied filter, same relative order.
    pub(crate) visible: Vec<Transaction>,
    /// Search text as typed; only takes effect on `apply_filter`.
    pub(crate) filter_query: String,
    pub(crate) selected_id: Option<TransactionId>,
    /// Only ever holds the detail for `selected_id`.
    pub(crate) selected_detail: Option<TransactionDetail>,
}

#[derive(Debug, Default)]
pub(crate) struct Controller {
    state: ViewState,
    /// Ticket of the newest list fetch still in flight.
    pending_list: Option<u64>,
    /// Ticket of the detail fetch for the current selection.
    pending_ticket: Option<u64>,
    /// Sequence of the newest unsettled write per transaction.
    latest_writes: HashMap<TransactionId, u64>,
    next_ticket: u64,
    error: Option<ViewError>,
}

impl Controller {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn state(&self) -> &ViewState {
        &self.state
    }

    pub(crate) fn phase(&self) -> Phase {
        match (&self.state.selected_id, &self.state.selected_detail) {
            (None, _) => Phase::Idle,
            (Some(_), None) => Phase::DetailLoading,
            (Some(_), Some(_)) => Phase::DetailReady,
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.pending_list.is_some()
    }

    /// Hand the last surfaced error to the presentation layer.
    pub(crate) fn take_error(&mut self) -> Option<ViewError> {
        self.error.take()
    }

    // ── Intents ───────────────────────────────────────────────

    /// Only the newest load may replace the list; older responses are dropped.
    pub(crate) fn load(&mut self) -> Request {
        let ticket = self.issue_ticket();
        info!(ticket, "loading transactions");
        self.pending_list = Some(ticket);
        Request::List { ticket }
    }

    pub(crate) fn set_filter_query(&mut self, text: impl Into<String>) {
        self.state.filter_query = text.into();
    }

    pub(crate) fn apply_filter(&mut self) {
        let query = &self.state.filter_query;
        self.state.visible = if query.trim().is_empty() {
            self.state.all.clone()
        } else {
            filter::filter(&self.state.all, query)
        };
        debug!(
            query = %self.state.filter_query,
            visible = self.state.visible.len(),
            "filter applied"
        );
    }

    pub(crate) fn clear_filter(&mut self) {
        self.set_filter_query("");
        self.apply_filter();
    }

    /// Flip the flag locally right away and ask the service to persist it.
    /// A failed update is rolled back when its completion arrives, if it is
    /// still the newest write for that id. Rolling back is a local policy
    /// choice; see "Toggle failure" in DESIGN.md.
    pub(crate) fn toggle_internal(&mut self, id: TransactionId) -> Result<Request, ControllerError> {
        let internal = self
            .state
            .all
            .iter()
            .find(|t| t.id == id)
            .map(|t| !t.internal)
            .ok_or(ControllerError::UnknownTransaction(id))?;
        self.write_internal(id, internal);
        let seq = self.issue_ticket();
        self.latest_writes.insert(id, seq);
        debug!(id, internal, seq, "internal flag toggled");
        Ok(Request::SetInternal { id, internal, seq })
    }

    pub(crate) fn select(&mut self, id: TransactionId) -> Result<Request, ControllerError> {
        if !self.state.visible.iter().any(|t| t.id == id) {
            return Err(ControllerError::UnknownTransaction(id));
        }
        Ok(self.begin_selection(id))
    }

    /// Move the selection to the following visible row, wrapping to the first
    /// when the current one is last or no longer visible.
    pub(crate) fn select_next(&mut self) -> Option<Request> {
        let current = self.state.selected_id?;
        let visible = &self.state.visible;
        if visible.is_empty() {
            return None;
        }
        let next = match visible.iter().position(|t| t.id == current) {
            Some(i) if i + 1 < visible.len() => i + 1,
            _ => 0,
        };
        let id = visible[next].id;
        Some(self.begin_selection(id))
    }

    pub(crate) fn close_selection(&mut self) {
        self.state.selected_id = None;
        self.state.selected_detail = None;
        self.pending_ticket = None;
    }

    // ── Completions ───────────────────────────────────────────

    pub(crate) fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Listed { ticket, result } => self.list_completed(ticket, result),
            Completion::Detail { id, ticket, result } => self.detail_completed(id, ticket, result),
            Completion::Updated {
                id,
                internal,
                seq,
                result,
            } => self.update_completed(id, internal, seq, result),
        }
    }

    fn list_completed(&mut self, ticket: u64, result: Result<Vec<Transaction>, SourceError>) {
        if self.pending_list != Some(ticket) {
            debug!(ticket, "discarding superseded list response");
            return;
        }
        self.pending_list = None;
        match result {
            Ok(list) => {
                info!(count = list.len(), "transactions loaded");
                self.state.visible = list.clone();
                self.state.all = list;
            }
            Err(source) => {
                warn!(error = %source, "loading transactions failed");
                self.error = Some(ViewError {
                    action: Action::Load,
                    source,
                });
            }
        }
    }

    fn detail_completed(
        &mut self,
        id: TransactionId,
        ticket: u64,
        result: Result<TransactionDetail, SourceError>,
    ) {
        if self.pending_ticket != Some(ticket) || self.state.selected_id != Some(id) {
            debug!(id, ticket, "discarding superseded detail response");
            return;
        }
        self.pending_ticket = None;

        let result = result.and_then(|detail| {
            if detail.id() == id {
                Ok(detail)
            } else {
                Err(SourceError::Malformed(format!(
                    "asked for transaction {id}, got {}",
                    detail.id()
                )))
            }
        });

        match result {
            Ok(detail) => self.state.selected_detail = Some(detail),
            Err(source) => {
                warn!(id, error = %source, "loading transaction detail failed");
                self.close_selection();
                self.error = Some(ViewError {
                    action: Action::Detail(id),
                    source,
                });
            }
        }
    }

    fn update_completed(
        &mut self,
        id: TransactionId,
        internal: bool,
        seq: u64,
        result: Result<(), SourceError>,
    ) {
        let newest = self.latest_writes.get(&id) == Some(&seq);
        if newest {
            self.latest_writes.remove(&id);
        }
        let Err(source) = result else {
            debug!(id, internal, seq, "internal flag saved");
            return;
        };

        // A newer toggle owns the flag now; only undo the newest write.
        if newest {
            self.write_internal(id, !internal);
            warn!(id, error = %source, "saving internal flag failed, reverted");
        } else {
            warn!(id, error = %source, "saving internal flag failed after a newer toggle");
        }
        self.error = Some(ViewError {
            action: Action::Update(id),
            source,
        });
    }

    // ── Helpers ───────────────────────────────────────────────

    fn issue_ticket(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    fn begin_selection(&mut self, id: TransactionId) -> Request {
        let ticket = self.issue_ticket();
        self.state.selected_id = Some(id);
        self.state.selected_detail = None;
        self.pending_ticket = Some(ticket);
        debug!(id, ticket, "transaction selected");
        Request::Detail { id, ticket }
    }

    fn write_internal(&mut self, id: TransactionId, internal: bool) {
        let state = &mut self.state;
        for txn in state.all.iter_mut().chain(state.visible.iter_mut()) {
            if txn.id == id {
                txn.internal = internal;
            }
        }
        if let Some(detail) = state.selected_detail.as_mut().filter(|d| d.id() == id) {
            detail.summary.internal = internal;
        }
    }
}
