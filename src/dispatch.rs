use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use tracing::{debug, error};

use crate::controller::{Completion, Request};
use crate::source::{SourceError, TransactionSource};

/// Run a request to completion on the calling thread.
pub(crate) fn execute(source: &dyn TransactionSource, request: Request) -> Completion {
    match request {
        Request::List { ticket } => Completion::Listed {
            ticket,
            result: source.list(),
        },
        Request::Detail { id, ticket } => Completion::Detail {
            id,
            ticket,
            result: source.detail(id),
        },
        Request::SetInternal { id, internal, seq } => Completion::Updated {
            id,
            internal,
            seq,
            result: source.set_internal(id, internal),
        },
    }
}

/// Failure reported when a worker thread can't be started.
fn not_started(request: Request, reason: String) -> Completion {
    let err = SourceError::Network(reason);
    match request {
        Request::List { ticket } => Completion::Listed {
            ticket,
            result: Err(err),
        },
        Request::Detail { id, ticket } => Completion::Detail {
            id,
            ticket,
            result: Err(err),
        },
        Request::SetInternal { id, internal, seq } => Completion::Updated {
            id,
            internal,
            seq,
            result: Err(err),
        },
    }
}

/// Executes requests on short-lived worker threads so the UI loop never
/// blocks on the network. Completions arrive in whatever order the service
/// answers.
pub(crate) struct Dispatcher {
    source: Arc<dyn TransactionSource>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl Dispatcher {
    pub(crate) fn new(source: Arc<dyn TransactionSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { source, tx, rx }
    }

    pub(crate) fn submit(&self, request: Request) {
        debug!(?request, "dispatching");
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name("txnview-request".into())
            .spawn({
                let request = request.clone();
                move || {
                    let completion = execute(source.as_ref(), request);
                    // The receiver only goes away on shutdown.
                    let _ = tx.send(completion);
                }
            });
        if let Err(e) = spawned {
            error!(error = %e, "could not start request worker");
            let _ = self.tx.send(not_started(request, e.to_string()));
        }
    }

    /// Completions that have already arrived.
    pub(crate) fn drain(&self) -> Vec<Completion> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod dispatch_tests;
