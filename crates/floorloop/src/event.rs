//! Consumer side of the request queue.
//!
//! The thread that owns the `FloorSession` calls `execute` (or `drain`)
//! whenever it is notified that requests are pending.

use std::sync::Arc;

use crate::floor::FloorBuilder;
use crate::request::{RequestId, RequestQueue};
use crate::session::FloorSession;

pub struct RequestDispatcher {
    queue: Arc<RequestQueue<RequestId>>,
}

impl RequestDispatcher {
    pub fn new(queue: Arc<RequestQueue<RequestId>>) -> Self {
        Self { queue }
    }

    /// Handle for producers
    pub fn queue(&self) -> Arc<RequestQueue<RequestId>> {
        Arc::clone(&self.queue)
    }

    pub fn name(&self) -> &'static str {
        "Floor Loop Request Handler"
    }

    /// Take one request and run it. Returns the request handled
    /// (`RequestId::None` when nothing was pending).
    pub fn execute(&self, session: &mut FloorSession, builder: &mut dyn FloorBuilder) -> RequestId {
        let request = self.queue.take_request();
        match request {
            RequestId::None => {}
            RequestId::CheckLoop => {
                session.check_loop_closure();
            }
            RequestId::CreateFloor => {
                session.create_floor(builder);
            }
            RequestId::ClearLines => session.clear(),
        }
        if request != RequestId::None {
            tracing::debug!("{}: handled {:?} -> {}", self.name(), request, session.status_message());
        }
        request
    }

    /// Run requests until the queue is empty; returns them in handling order.
    pub fn drain(&self, session: &mut FloorSession, builder: &mut dyn FloorBuilder) -> Vec<RequestId> {
        let mut handled = Vec::new();
        loop {
            match self.execute(session, builder) {
                RequestId::None => break,
                request => handled.push(request),
            }
        }
        handled
    }
}
