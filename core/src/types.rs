//! Response DTOs for the posts API.
//!
//! # Design
//! Only `title` and `body` are required: the endpoint echoes whatever it was
//! sent and adds an `id`, and the form only ever displays the two text
//! fields. Unknown fields (including the echoed `userId`, whose JSON type
//! depends on what the client sent) are ignored.

use serde::{Deserialize, Serialize};

/// A post as returned by `POST /posts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub body: String,
}
