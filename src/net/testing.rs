//! Test doubles for the request pipeline.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::state::notify::{Notification, Notifier};

/// Transport that replays queued results and records every request.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
    sent: Rc<RefCell<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: serde_json::Value) -> &Self {
        self.replies.borrow_mut().push_back(Ok(HttpResponse { status, body: body.to_string() }));
        self
    }

    pub fn reply_raw(&self, status: u16, body: &str) -> &Self {
        self.replies.borrow_mut().push_back(Ok(HttpResponse { status, body: body.to_owned() }));
        self
    }

    pub fn fail(&self, err: TransportError) -> &Self {
        self.replies.borrow_mut().push_back(Err(err));
        self
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no reply queued".to_owned())))
    }
}

/// Notifier that keeps every notification it receives.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    seen: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}
