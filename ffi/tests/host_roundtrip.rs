//! Drive the C surface the way a host would: feed input, submit, run the
//! parked request over real HTTP against the mock server, settle, render.

use std::ffi::{CStr, CString};

use post_form_ffi::types::{FfiHttpMethod, FfiHttpRequest, FfiHttpResponse, FfiPhase};
use post_form_ffi::*;

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

/// Execute the request with ureq and return `(status, body)`.
fn execute(req: &FfiHttpRequest) -> (u16, String) {
    assert_eq!(req.method, FfiHttpMethod::Post);
    let path = unsafe { CStr::from_ptr(req.path) }.to_str().unwrap();
    let body = unsafe { CStr::from_ptr(req.body) }.to_str().unwrap();

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let mut response = agent
        .post(path)
        .content_type("application/json")
        .send(body.as_bytes())
        .expect("HTTP transport error");
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    (status, body)
}

#[test]
fn host_drives_full_cycle() {
    let addr = start_server();
    let url = CString::new(format!("http://{addr}")).unwrap();
    let form = post_form_new(url.as_ptr());
    assert!(!form.is_null());

    for (name, value) in [("userId", "7"), ("title", "Hello"), ("body", "World")] {
        let name = CString::new(name).unwrap();
        let value = CString::new(value).unwrap();
        post_form_set_field(form, name.as_ptr(), value.as_ptr());
    }

    let req = post_form_submit(form);
    assert!(!req.is_null());
    assert!(post_form_submit_disabled(form));

    let (status, body) = execute(unsafe { &*req });
    post_form_free_request(req);
    assert_eq!(status, 201);

    let body = CString::new(body).unwrap();
    let resp = FfiHttpResponse {
        status,
        body: body.as_ptr(),
    };
    post_form_complete(form, &resp);
    assert_eq!(post_form_phase(form), FfiPhase::Success);

    let html = post_form_render(form);
    let rendered = unsafe { CStr::from_ptr(html) }.to_str().unwrap().to_string();
    post_form_free_string(html);
    assert!(rendered.contains("Updated Title: Hello"));
    assert!(rendered.contains("Updated Body: World"));

    post_form_free(form);
}
