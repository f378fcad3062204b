//! Platform glue: best-effort clipboard access and the page locale carried
//! in the address bar.

/// Write `payload` to the system clipboard. Best effort by contract: the
/// studio swallows the `Err` without surfacing it.
pub fn copy_to_clipboard(payload: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("window unavailable")?;
        let document = window.document().ok_or("document unavailable")?;
        let body = document.body().ok_or("missing body")?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| "Unable to create textarea")?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| "Textarea cast failed")?;
        textarea.set_value(payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("top", "0").ok();
        style.set_property("left", "0").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        if !document.exec_command("copy").unwrap_or(false) {
            textarea.remove();
            return Err("Clipboard copy blocked".into());
        }
        textarea.remove();
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
        clipboard
            .set_text(payload.to_string())
            .map_err(|err| err.to_string())
    }
}

/// A `locale` parameter carried in the page's own address, if any. Only the
/// web target has an address bar to read.
pub fn page_locale() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let href = web_sys::window()?.location().href().ok()?;
        let url = url::Url::parse(&href).ok()?;
        return url
            .query_pairs()
            .find(|(key, _)| key == "locale")
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty());
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}
