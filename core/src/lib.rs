//! Headless core of a create-post form.
//!
//! # Overview
//! Holds the form state, drives the request lifecycle of a single
//! `POST /posts`, and renders the form as markup. The core never performs
//! I/O: submitting parks an `HttpRequest` for the host to execute, and the
//! host settles the mutation with the `HttpResponse` it got back.
//!
//! # Design
//! - `PostForm` is generic over a `MutationController`, so tests drive it
//!   with a fake and production uses `CreatePostMutation`.
//! - `PostsClient` is stateless and split into `build_*` / `parse_*`.
//! - Only one request is in flight per form; submit is ignored while
//!   pending.

pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod mutation;
pub mod presenter;
pub mod render;
pub mod types;

pub use client::{PostsClient, DEFAULT_BASE_URL};
pub use error::{ApiError, FormError};
pub use form::{FormField, FormState};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mutation::{CreatePostMutation, MutationController, Phase, RequestLifecycle};
pub use presenter::PostForm;
pub use types::Post;
