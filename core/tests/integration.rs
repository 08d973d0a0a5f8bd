//! Full submit/settle cycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives a `PostForm` backed
//! by `CreatePostMutation`, executing each parked request over real HTTP
//! with ureq the way a host would.

use post_form_core::{
    ApiError, CreatePostMutation, FormField, HttpMethod, HttpRequest, HttpResponse,
    MutationController, Phase, PostForm, PostsClient,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Status codes are returned as data so the core decides what counts as
/// failure; only transport errors become `Err`.
fn execute(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (req.method, req.body) {
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(HttpResponse::new(status, body))
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// Run whatever request the form parked and settle it.
fn round_trip(form: &mut PostForm<CreatePostMutation>) -> Phase {
    let req = form.mutation_mut().take_request().expect("a parked request");
    let outcome = execute(req);
    form.mutation_mut().settle(outcome)
}

#[test]
fn submit_and_settle_against_mock_server() {
    let addr = start_server();
    let mut form = PostForm::new(CreatePostMutation::new(PostsClient::new(&format!("http://{addr}"))));

    // Step 1: fill the form.
    form.set_field(FormField::UserId, "7");
    form.set_field(FormField::Title, "Hello");
    form.set_field(FormField::Body, "World");

    // Step 2: submit — pending and disabled.
    assert!(form.submit());
    assert_eq!(form.phase(), Phase::Pending);
    assert!(form.is_submit_disabled());

    // Step 3: a second submit is swallowed.
    assert!(!form.submit());

    // Step 4: run the request.
    assert_eq!(round_trip(&mut form), Phase::Success);
    let post = form.mutation().data().unwrap().clone();
    assert_eq!(post.id, Some(mock_server::FIRST_POST_ID));
    assert_eq!(post.title, "Hello");
    assert_eq!(post.body, "World");

    let html = form.render();
    assert!(html.contains("Updated Title: Hello"));
    assert!(html.contains("Updated Body: World"));

    // Step 5: resubmit from Success with a new title.
    form.set_field(FormField::Title, "Again");
    assert!(form.submit());
    assert!(form.is_submit_disabled());
    assert_eq!(round_trip(&mut form), Phase::Success);
    let post = form.mutation().data().unwrap();
    assert_eq!(post.id, Some(mock_server::FIRST_POST_ID + 1));
    assert_eq!(post.title, "Again");
}

#[test]
fn unknown_route_settles_as_failed() {
    let addr = start_server();
    let client = PostsClient::new(&format!("http://{addr}/missing"));
    let mut form = PostForm::new(CreatePostMutation::new(client));

    form.submit();
    assert_eq!(round_trip(&mut form), Phase::Failed);
    assert!(matches!(
        form.mutation().error(),
        Some(ApiError::HttpError { status: 404, .. })
    ));
    assert!(form.render().contains("Error updating post!"));

    // Failed is a resting state; submitting again re-enters Pending.
    assert!(form.submit());
    assert_eq!(form.phase(), Phase::Pending);
}

#[test]
fn refused_connection_settles_as_failed() {
    // Bind then drop to get a port with nothing listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut form = PostForm::new(CreatePostMutation::new(PostsClient::new(&format!("http://{addr}"))));

    form.submit();
    assert_eq!(round_trip(&mut form), Phase::Failed);
    assert!(matches!(form.mutation().error(), Some(ApiError::Transport(_))));
}
