//! Markup for the post form.
//!
//! Output is a small HTML fragment. User-supplied text (input values and the
//! echoed post) is escaped; everything else is static.

use crate::form::{FormField, FormState};
use crate::mutation::Phase;
use crate::types::Post;

pub const HEADING: &str = "POST Method Example";
pub const SUBMIT_LABEL: &str = "Update Post";
pub const SUBMIT_PENDING_LABEL: &str = "Updating...";
pub const PENDING_MESSAGE: &str = "Updating post...";
pub const ERROR_MESSAGE: &str = "Error updating post!";
pub const SUCCESS_MESSAGE: &str = "Post updated successfully!";

fn label(field: FormField) -> &'static str {
    match field {
        FormField::UserId => "User ID",
        FormField::Title => "Title",
        FormField::Body => "Body",
    }
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the whole form. `data` is only consulted in the Success phase.
pub fn render_post_form(form: &FormState, phase: Phase, data: Option<&Post>) -> String {
    let pending = phase == Phase::Pending;
    let mut out = String::new();

    out.push_str("<div>\n");
    out.push_str(&format!("  <h1>{HEADING}</h1>\n"));
    out.push_str("  <div>\n    <h2>Update Post</h2>\n    <div>\n");
    for field in FormField::ALL {
        let name = field.name();
        out.push_str(&format!(
            "      <label for=\"{name}\">{}</label>\n      <input id=\"{name}\" name=\"{name}\" value=\"{}\" />\n",
            label(field),
            escape(form.get(field)),
        ));
    }
    let (disabled, button_label) = if pending {
        (" disabled", SUBMIT_PENDING_LABEL)
    } else {
        ("", SUBMIT_LABEL)
    };
    out.push_str(&format!("      <button type=\"submit\"{disabled}>{button_label}</button>\n"));
    out.push_str("    </div>\n");

    match (phase, data) {
        (Phase::Pending, _) => {
            out.push_str(&format!("    <p>{PENDING_MESSAGE}</p>\n"));
        }
        (Phase::Failed, _) => {
            out.push_str(&format!("    <p style=\"color: red\">{ERROR_MESSAGE}</p>\n"));
        }
        (Phase::Success, Some(post)) => {
            out.push_str(&format!(
                "    <div>\n      <p>{SUCCESS_MESSAGE}</p>\n      <p>Updated Title: {}</p>\n      <p>Updated Body: {}</p>\n    </div>\n",
                escape(&post.title),
                escape(&post.body),
            ));
        }
        _ => {}
    }

    out.push_str("  </div>\n</div>\n");
    out
}
