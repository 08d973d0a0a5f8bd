//! C-ABI wrapper around `post-form-core`.
//!
//! # Overview
//! Exposes the post form through `extern "C"` functions so a host UI in any
//! language with a C FFI can feed input events, submit, run the HTTP
//! round-trip itself, and render the result.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `post_form_submit` hands out the parked request; the host executes it
//!   and reports back with `post_form_complete` or `post_form_fail`.
//! - The C caller owns all returned pointers and must call the matching
//!   `post_form_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use post_form_core::{
    ApiError, CreatePostMutation, FormField, HttpRequest, HttpResponse, Phase, PostForm,
    PostsClient, DEFAULT_BASE_URL,
};

use types::*;

/// Borrow a caller-owned C string as `&str`.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string that
/// outlives the returned borrow.
unsafe fn borrow_str<'a>(ptr: *const c_char) -> Result<&'a str, FfiErrorCode> {
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| FfiErrorCode::InvalidUtf8)
}

fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).map_or(std::ptr::null_mut(), CString::into_raw)
}

// ---------------------------------------------------------------------------
// Form lifecycle
// ---------------------------------------------------------------------------

/// Create a post form that submits to `base_url`.
///
/// A null `base_url` selects the public endpoint. Returns null if
/// `base_url` is not valid UTF-8 or if an internal panic occurs.
/// The caller must free the returned pointer with `post_form_free`.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_new(base_url: *const c_char) -> *mut FfiPostForm {
    catch_unwind(|| {
        let url = if base_url.is_null() {
            DEFAULT_BASE_URL
        } else {
            match unsafe { borrow_str(base_url) } {
                Ok(url) => url,
                Err(_) => return std::ptr::null_mut(),
            }
        };
        let mutation = CreatePostMutation::new(PostsClient::new(url));
        Box::into_raw(Box::new(FfiPostForm {
            inner: PostForm::new(mutation),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a form created by `post_form_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_free(form: *mut FfiPostForm) {
    if !form.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(form) });
        });
    }
}

// ---------------------------------------------------------------------------
// Field input
// ---------------------------------------------------------------------------

/// Set the field named `name` (`"userId"`, `"title"` or `"body"`) to `value`.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_set_field(
    form: *mut FfiPostForm,
    name: *const c_char,
    value: *const c_char,
) -> FfiErrorCode {
    catch_unwind(|| {
        if form.is_null() || name.is_null() || value.is_null() {
            return FfiErrorCode::NullArg;
        }
        let form = unsafe { &mut *form };
        let (name, value) = match unsafe { (borrow_str(name), borrow_str(value)) } {
            (Ok(name), Ok(value)) => (name, value),
            (Err(code), _) | (_, Err(code)) => return code,
        };
        match form.inner.set_field_by_name(name, value) {
            Ok(()) => FfiErrorCode::Ok,
            Err(_) => FfiErrorCode::UnknownField,
        }
    })
    .unwrap_or(FfiErrorCode::Panic)
}

/// Current value of the field named `name`.
///
/// Returns null on a null argument or unknown field name. The caller must
/// free the returned string with `post_form_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_get_field(form: *const FfiPostForm, name: *const c_char) -> *mut c_char {
    catch_unwind(|| {
        if form.is_null() || name.is_null() {
            return std::ptr::null_mut();
        }
        let form = unsafe { &*form };
        let field: FormField = match unsafe { borrow_str(name) }.ok().and_then(|n| n.parse().ok()) {
            Some(field) => field,
            None => return std::ptr::null_mut(),
        };
        into_c_string(form.inner.form().get(field).to_string())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Submit and settle
// ---------------------------------------------------------------------------

/// Submit the form and return the request the host must execute.
///
/// Returns null when nothing needs to be sent: the form is null, a request
/// is already pending, or the request could not be built (the form is then
/// Failed). The caller must free the returned pointer with
/// `post_form_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_submit(form: *mut FfiPostForm) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if form.is_null() {
            return std::ptr::null_mut();
        }
        let form = unsafe { &mut *form };
        if !form.inner.submit() {
            return std::ptr::null_mut();
        }
        let request = form.inner.mutation_mut().take_request();
        hand_off(form, request)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Convert the parked request for the host. A request that cannot cross
/// the boundary fails the mutation so the form never sits in Pending with
/// nothing in flight.
fn hand_off(form: &mut FfiPostForm, request: Option<HttpRequest>) -> *mut FfiHttpRequest {
    let Some(request) = request else {
        return std::ptr::null_mut();
    };
    match FfiHttpRequest::from_core(request) {
        Some(ptr) => ptr,
        None => {
            settle(
                form,
                Err(ApiError::SerializationError(
                    "request contains an interior NUL byte".to_string(),
                )),
            );
            std::ptr::null_mut()
        }
    }
}

/// A body that is not UTF-8 cannot be a post; it fails like any other
/// undecodable body.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, ApiError> {
    let body = if resp.body.is_null() {
        ""
    } else {
        unsafe { CStr::from_ptr(resp.body) }
            .to_str()
            .map_err(|e| ApiError::DeserializationError(format!("response body is not UTF-8: {e}")))?
    };
    Ok(HttpResponse::new(resp.status, body))
}

fn settle(form: &mut FfiPostForm, outcome: Result<HttpResponse, ApiError>) -> FfiErrorCode {
    if form.inner.phase() != Phase::Pending {
        tracing::warn!(phase = ?form.inner.phase(), "host reported an outcome with no request pending");
        return FfiErrorCode::NotPending;
    }
    form.inner.mutation_mut().settle(outcome);
    FfiErrorCode::Ok
}

/// Report the response to the pending request.
///
/// Status and body are interpreted by the core: any 2xx carrying a post
/// moves the form to Success, anything else to Failed.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_complete(
    form: *mut FfiPostForm,
    response: *const FfiHttpResponse,
) -> FfiErrorCode {
    catch_unwind(|| {
        if form.is_null() || response.is_null() {
            return FfiErrorCode::NullArg;
        }
        let form = unsafe { &mut *form };
        let resp = unsafe { &*response };
        settle(form, ffi_response_to_core(resp))
    })
    .unwrap_or(FfiErrorCode::Panic)
}

/// Report that the pending request never produced a response.
///
/// `message` is optional and only kept for diagnostics.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_fail(form: *mut FfiPostForm, message: *const c_char) -> FfiErrorCode {
    catch_unwind(|| {
        if form.is_null() {
            return FfiErrorCode::NullArg;
        }
        let form = unsafe { &mut *form };
        let message = if message.is_null() {
            String::from("transport failure")
        } else {
            unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned()
        };
        settle(form, Err(ApiError::Transport(message)))
    })
    .unwrap_or(FfiErrorCode::Panic)
}

/// Drop the last result and return to Idle. Returns false while pending.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_reset(form: *mut FfiPostForm) -> bool {
    catch_unwind(|| {
        if form.is_null() {
            return false;
        }
        let form = unsafe { &mut *form };
        form.inner.mutation_mut().reset()
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// Current lifecycle phase. A null form reports Idle.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_phase(form: *const FfiPostForm) -> FfiPhase {
    catch_unwind(|| {
        if form.is_null() {
            return FfiPhase::Idle;
        }
        let form = unsafe { &*form };
        form.inner.phase().into()
    })
    .unwrap_or(FfiPhase::Idle)
}

/// Whether the submit control should be disabled.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_submit_disabled(form: *const FfiPostForm) -> bool {
    catch_unwind(|| {
        if form.is_null() {
            return false;
        }
        let form = unsafe { &*form };
        form.inner.is_submit_disabled()
    })
    .unwrap_or(false)
}

/// Render the form as markup.
///
/// The caller must free the returned string with `post_form_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_render(form: *const FfiPostForm) -> *mut c_char {
    catch_unwind(|| {
        if form.is_null() {
            return std::ptr::null_mut();
        }
        let form = unsafe { &*form };
        into_c_string(form.inner.render())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `post_form_submit`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for header in headers.iter() {
                if !header.key.is_null() {
                    drop(unsafe { CString::from_raw(header.key) });
                }
                if !header.value.is_null() {
                    drop(unsafe { CString::from_raw(header.value) });
                }
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn post_form_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
