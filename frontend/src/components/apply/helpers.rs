//! Small DOM and formatting utilities for the apply page.

use num_format::{Locale, ToFormattedString};
use pulldown_cmark::{html, CowStr, Event, Parser, Tag};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::virtual_dom::AttrValue;

/// Displays a temporary notification at the bottom of the screen. It removes
/// itself after three seconds. `message` is inserted as HTML.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_inner_html(message);
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'` for insertion into HTML.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Evaluation text as HTML. The text is escaped first, so only markdown
/// formatting survives, never markup coming from the service. Link and
/// image targets other than http(s) and mailto are replaced by `#`.
pub fn render_evaluation(text: &str) -> AttrValue {
    let escaped = escape_html(&text.replace("\r\n", "\n"));
    let events = Parser::new(&escaped).map(|event| match event {
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        other => other,
    });
    let mut output = String::new();
    html::push_html(&mut output, events);
    AttrValue::from(output)
}

fn safe_destination(dest: CowStr<'_>) -> CowStr<'_> {
    let lower = dest.trim_start().to_ascii_lowercase();
    if ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        dest
    } else {
        CowStr::Borrowed("#")
    }
}

/// `"812 bytes"`, `"1,465 KB"`.
pub fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else {
        let kb = bytes.div_ceil(1024);
        format!("{} KB", kb.to_formatted_string(&Locale::en))
    }
}

/// Score on the 0–10 scale, one decimal.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:.1}/10", score),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_markup_is_neutralised() {
        let html = render_evaluation("**Strong** fit <script>alert(1)</script>");
        assert!(html.contains("<strong>Strong</strong>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn script_links_lose_their_target() {
        let html = render_evaluation(
            "[details](javascript:alert(1)) ![x](JavaScript:alert(2)) [site](https://example.com/a)",
        );
        assert!(!html.to_ascii_lowercase().contains("javascript:"));
        assert!(html.contains(r##"<a href="#">details</a>"##));
        assert!(html.contains(r#"href="https://example.com/a""#));
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(format_size(812), "812 bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1_500_000), "1,465 KB");
    }

    #[test]
    fn scores_show_one_decimal() {
        assert_eq!(format_score(Some(7.8)), "7.8/10");
        assert_eq!(format_score(None), "n/a");
    }
}
