//! Small browser utilities shared by the components.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub const SIGNUP_TOAST: &str = "You’re signed up to volunteer!";
pub const SIGNUP_TOAST_MS: u32 = 4000;

/// Shows a transient message at the bottom of the page for `duration_ms`.
pub fn show_toast(message: &str, duration_ms: u32) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    toast.set_attribute("role", "status").ok();
    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", "#1b5e20").ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "Arial, sans-serif").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(duration_ms).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// The viewer's current offset from UTC, in minutes east.
pub fn local_utc_offset_minutes() -> i32 {
    // getTimezoneOffset is minutes *west* of UTC.
    -(js_sys::Date::new_0().get_timezone_offset() as i32)
}
