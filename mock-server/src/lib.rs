use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// First id handed out, matching the public endpoint which already holds
/// posts 1 through 100.
pub const FIRST_POST_ID: u64 = 101;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    #[serde(rename = "userId")]
    pub user_id: serde_json::Value,
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
pub struct NewPost {
    #[serde(rename = "userId", default)]
    pub user_id: serde_json::Value,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug)]
pub struct Store {
    next_id: u64,
    posts: BTreeMap<u64, Post>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: FIRST_POST_ID,
            posts: BTreeMap::new(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let store = db.read().await;
    Json(store.posts.values().cloned().collect())
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<NewPost>,
) -> (StatusCode, Json<Post>) {
    let mut store = db.write().await;
    let post = Post {
        id: store.next_id,
        user_id: input.user_id,
        title: input.title,
        body: input.body,
    };
    store.next_id += 1;
    store.posts.insert(post.id, post.clone());
    tracing::info!(id = post.id, title = %post.title, "created post");
    (StatusCode::CREATED, Json(post))
}

async fn get_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, StatusCode> {
    let store = db.read().await;
    store.posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}
