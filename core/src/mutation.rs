//! Request lifecycle and the mutation controller behind the form.
//!
//! # Design
//! `RequestLifecycle` is the four-phase state of one side-effecting request.
//! The presenter only reads it through [`MutationController`], so it can be
//! driven by [`CreatePostMutation`] in production and by a hand-settled fake
//! in tests.
//!
//! `CreatePostMutation` keeps the host-does-IO split: `trigger` parks the
//! built request in an outbox, the host drains it with `take_request`,
//! executes it, and reports the outcome through `settle`.

use tracing::{debug, info, warn};

use crate::client::PostsClient;
use crate::error::ApiError;
use crate::form::FormState;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::Post;

/// Payload-free tag of a [`RequestLifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Success,
    Failed,
}

/// State of one request: exactly one phase is active at a time.
///
/// Success and Failed are resting states; only a new `begin` (or an
/// explicit `reset`) leaves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestLifecycle<T, E> {
    Idle,
    Pending,
    Success(T),
    Failed(E),
}

impl<T, E> Default for RequestLifecycle<T, E> {
    fn default() -> Self {
        RequestLifecycle::Idle
    }
}

impl<T, E> RequestLifecycle<T, E> {
    pub fn phase(&self) -> Phase {
        match self {
            RequestLifecycle::Idle => Phase::Idle,
            RequestLifecycle::Pending => Phase::Pending,
            RequestLifecycle::Success(_) => Phase::Success,
            RequestLifecycle::Failed(_) => Phase::Failed,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestLifecycle::Pending)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RequestLifecycle::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            RequestLifecycle::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Enter Pending from any non-pending phase. Returns `false` and leaves
    /// the state untouched if a request is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = RequestLifecycle::Pending;
        true
    }

    /// Pending -> Success. Ignored in any other phase.
    pub fn resolve(&mut self, data: T) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = RequestLifecycle::Success(data);
        true
    }

    /// Pending -> Failed. Ignored in any other phase.
    pub fn reject(&mut self, err: E) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = RequestLifecycle::Failed(err);
        true
    }

    /// Back to Idle, dropping any result. Ignored while Pending.
    pub fn reset(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = RequestLifecycle::Idle;
        true
    }
}

/// An asynchronous side effect whose phase the presenter can observe.
pub trait MutationController {
    type Payload;
    type Data;
    type Error;

    /// Start the side effect with `payload`. Implementations ignore the call
    /// while a previous one is still pending.
    fn trigger(&mut self, payload: Self::Payload);

    fn lifecycle(&self) -> &RequestLifecycle<Self::Data, Self::Error>;

    fn phase(&self) -> Phase {
        self.lifecycle().phase()
    }

    fn data(&self) -> Option<&Self::Data> {
        self.lifecycle().data()
    }

    fn error(&self) -> Option<&Self::Error> {
        self.lifecycle().error()
    }
}

/// Creates a post from the form payload over the posts API.
#[derive(Debug, Default)]
pub struct CreatePostMutation {
    client: PostsClient,
    lifecycle: RequestLifecycle<Post, ApiError>,
    outbox: Option<HttpRequest>,
}

impl CreatePostMutation {
    pub fn new(client: PostsClient) -> Self {
        Self {
            client,
            lifecycle: RequestLifecycle::Idle,
            outbox: None,
        }
    }

    pub fn client(&self) -> &PostsClient {
        &self.client
    }

    /// Hand the request built by the last trigger to the host. Returns `None`
    /// once taken, or when the last trigger produced nothing to send.
    pub fn take_request(&mut self) -> Option<HttpRequest> {
        self.outbox.take()
    }

    /// Report the outcome of the round-trip. `Err` is a transport failure;
    /// status and body are checked here. Ignored unless Pending.
    pub fn settle(&mut self, outcome: Result<HttpResponse, ApiError>) -> Phase {
        if !self.lifecycle.is_pending() {
            warn!(phase = ?self.lifecycle.phase(), "settle without a pending request, ignoring");
            return self.lifecycle.phase();
        }
        self.outbox = None;
        match outcome.and_then(|response| self.client.parse_create_post(response)) {
            Ok(post) => {
                info!(id = ?post.id, title = %post.title, "post created");
                self.lifecycle.resolve(post);
            }
            Err(err) => {
                warn!(error = %err, "create post failed");
                self.lifecycle.reject(err);
            }
        }
        self.lifecycle.phase()
    }

    pub fn reset(&mut self) -> bool {
        let reset = self.lifecycle.reset();
        if reset {
            self.outbox = None;
        }
        reset
    }
}

impl MutationController for CreatePostMutation {
    type Payload = FormState;
    type Data = Post;
    type Error = ApiError;

    fn trigger(&mut self, payload: FormState) {
        if !self.lifecycle.begin() {
            debug!("create post already pending, ignoring trigger");
            return;
        }
        match self.client.build_create_post(&payload) {
            Ok(request) => {
                debug!(path = %request.path, "create post pending");
                self.outbox = Some(request);
            }
            Err(err) => {
                warn!(error = %err, "could not build create post request");
                self.lifecycle.reject(err);
            }
        }
    }

    fn lifecycle(&self) -> &RequestLifecycle<Post, ApiError> {
        &self.lifecycle
    }
}
