// Accessibility helpers

/// Id of the polite live region rendered by the app shell.
pub const LIVE_REGION_ID: &str = "sr-status";

/// Focus ring and screen-reader utility CSS, injected ahead of the stylesheet.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:3px solid #f5b400;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Read `msg` out through the live region.
///
/// Used for reveal progress and round outcomes, which otherwise change
/// silently for screen-reader users.
pub fn announce(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    if let Some(node) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(LIVE_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
    #[cfg(not(target_arch = "wasm32"))]
    log::trace!("announce: {msg}");
}

/// Move focus to the element with `id`, if it can take focus.
pub fn focus_by_id(id: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
            .is_some_and(|el| el.focus().is_ok())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = id;
        false
    }
}

/// Focus the first focusable control inside the dialog `id`, falling back
/// to the dialog itself.
pub fn trap_focus_in(id: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let first = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.get_element_by_id(id))
            .and_then(|dialog| {
                dialog
                    .query_selector("input, select, button:not([disabled])")
                    .ok()
                    .flatten()
            })
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
        if first.is_none_or(|el| el.focus().is_err()) {
            focus_by_id(id);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = id;
}

/// Hand focus back to the control that opened a dialog.
pub fn restore_focus(id: &str) {
    if !focus_by_id(id) {
        log::debug!("focus target #{id} is gone");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_hides_sr_only_content() {
        assert!(visible_focus_css().contains(".sr-only"));
        assert!(visible_focus_css().contains(":focus-visible"));
    }

    #[test]
    fn helpers_are_inert_off_the_browser() {
        announce("3 of 9 cells revealed");
        assert!(!focus_by_id("login-btn"));
        trap_focus_in("auth-modal");
        restore_focus("login-btn");
    }
}
