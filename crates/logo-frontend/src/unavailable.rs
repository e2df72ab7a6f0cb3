//! Static explanation for machines that cannot render at all.
//!
//! Shown instead of the app when no GPU context can be created: in a
//! native message box, or as plain HTML next to the web canvas.

use logo_core::escape_xml;

pub const TITLE: &str = "3D rendering unavailable";

pub const CAUSES: [&str; 3] = [
    "Graphics context issues",
    "Outdated or missing graphics drivers",
    "Insufficient GPU resources",
];

/// Explanation as plain text, for dialogs and logs
pub fn plain_text(reason: &str) -> String {
    let mut text = String::from("Your device could not create a GPU context. This may be due to:\n");
    for cause in CAUSES {
        text.push_str("\n  • ");
        text.push_str(cause);
    }
    text.push_str("\n\nDetails: ");
    text.push_str(reason);
    text
}

/// Explanation as a self-contained HTML fragment
pub fn html(reason: &str) -> String {
    let causes: String = CAUSES
        .iter()
        .map(|cause| format!("<li>{}</li>", escape_xml(cause)))
        .collect();
    format!(
        concat!(
            "<div role=\"alert\" style=\"font-family:sans-serif;max-width:36em;margin:4em auto;\">",
            "<h2>{title}</h2>",
            "<p>Your device could not create a GPU context. This may be due to:</p>",
            "<ul>{causes}</ul>",
            "<pre style=\"white-space:pre-wrap;opacity:0.7;\">{reason}</pre>",
            "<p>Try another browser, or enable hardware acceleration and reload.</p>",
            "</div>"
        ),
        title = TITLE,
        causes = causes,
        reason = escape_xml(reason),
    )
}

/// Hide the canvas and put the explanation in its place
#[cfg(target_arch = "wasm32")]
pub fn show_in_page(canvas: &web_sys::Element, reason: &str) {
    if let Err(e) = canvas.set_attribute("hidden", "") {
        log::warn!("Could not hide the canvas: {:?}", e);
    }
    if let Err(e) = canvas.insert_adjacent_html("afterend", &html(reason)) {
        log::error!("Could not show the fallback page: {:?}", e);
    }
}

/// Tell the user in a blocking message box
#[cfg(not(target_arch = "wasm32"))]
pub fn show_dialog(reason: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(TITLE)
        .set_description(plain_text(reason))
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_lists_causes_and_reason() {
        let text = plain_text("No suitable adapter found");
        for cause in CAUSES {
            assert!(text.contains(cause));
        }
        assert!(text.ends_with("Details: No suitable adapter found"));
    }

    #[test]
    fn test_html_escapes_reason() {
        let html = html("adapter <Mesa & co>");
        assert!(html.contains("adapter &lt;Mesa &amp; co&gt;"));
        assert!(!html.contains("<Mesa"));
        assert!(html.contains(TITLE));
        assert_eq!(html.matches("<li>").count(), CAUSES.len());
    }
}
