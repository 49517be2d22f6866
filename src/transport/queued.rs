//! Manually completed transport
//!
//! Requests are parked until the host completes them, in whatever order it
//! chooses. Useful for native hosts and for exercising out-of-order
//! completions.

use super::{Completion, Request, Response, Transport, TransportError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Default)]
struct QueueState {
    pending: VecDeque<(Request, Completion)>,
    history: Vec<Request>,
}

/// Cloning shares the same queue
#[derive(Clone, Default)]
pub struct QueuedTransport {
    state: Rc<RefCell<QueueState>>,
}

impl std::fmt::Debug for QueuedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("QueuedTransport")
            .field("pending", &state.pending.len())
            .field("history", &state.history)
            .finish()
    }
}

impl QueuedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request ever started, oldest first
    pub fn requests(&self) -> Vec<Request> {
        self.state.borrow().history.clone()
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Complete the oldest pending request. Returns false if none is pending.
    pub fn complete_next(&self, response: Response) -> bool {
        let next = self.state.borrow_mut().pending.pop_front();
        Self::finish(next, response)
    }

    /// Complete the most recently started pending request
    pub fn complete_latest(&self, response: Response) -> bool {
        let next = self.state.borrow_mut().pending.pop_back();
        Self::finish(next, response)
    }

    fn finish(entry: Option<(Request, Completion)>, response: Response) -> bool {
        match entry {
            Some((request, on_complete)) => {
                log::debug!(
                    "completing {} {} with {}",
                    request.method,
                    request.url,
                    response.status
                );
                on_complete(response);
                true
            }
            None => false,
        }
    }
}

impl Transport for QueuedTransport {
    fn start(&self, request: Request, on_complete: Completion) -> Result<(), TransportError> {
        let mut state = self.state.borrow_mut();
        state.history.push(request.clone());
        state.pending.push_back((request, on_complete));
        Ok(())
    }
}
