//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion helpers live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use post_form_core::{CreatePostMutation, HttpMethod, HttpRequest, Phase, PostForm};

/// Opaque handle to a post form. C callers receive a pointer to this and
/// pass it back into every `post_form_*` function.
pub struct FfiPostForm {
    pub(crate) inner: PostForm<CreatePostMutation>,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Post = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// The request parked by `post_form_submit`, as C-compatible plain data.
///
/// The C caller executes it and reports back through `post_form_complete`
/// or `post_form_fail`, then releases it with `post_form_free_request`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    ///
    /// Returns `None` if any string carries an interior NUL.
    pub(crate) fn from_core(req: HttpRequest) -> Option<*mut Self> {
        let path = CString::new(req.path).ok()?;
        let body = match req.body {
            Some(b) => Some(CString::new(b).ok()?),
            None => None,
        };
        let headers = req
            .headers
            .into_iter()
            .map(|(k, v)| Some((CString::new(k).ok()?, CString::new(v).ok()?)))
            .collect::<Option<Vec<_>>>()?;

        // Nothing below can fail, so ownership is released only now.
        let headers_len = headers.len() as u32;
        let headers = if headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: k.into_raw(),
                    value: v.into_raw(),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        let ffi_req = Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: path.into_raw(),
            headers,
            headers_len,
            body: body.map_or(std::ptr::null_mut(), CString::into_raw),
        });
        Some(Box::into_raw(ffi_req))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller builds this on the stack after executing the request and
/// passes a pointer to `post_form_complete`. The FFI layer reads but does
/// not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Status types
// ---------------------------------------------------------------------------

/// Outcome codes for `post_form_*` calls that do not return data.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NullArg = 1,
    InvalidUtf8 = 2,
    UnknownField = 3,
    NotPending = 4,
    Panic = 5,
}

/// Request lifecycle phase as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiPhase {
    Idle = 0,
    Pending = 1,
    Success = 2,
    Failed = 3,
}

impl From<Phase> for FfiPhase {
    fn from(p: Phase) -> Self {
        match p {
            Phase::Idle => FfiPhase::Idle,
            Phase::Pending => FfiPhase::Pending,
            Phase::Success => FfiPhase::Success,
            Phase::Failed => FfiPhase::Failed,
        }
    }
}
