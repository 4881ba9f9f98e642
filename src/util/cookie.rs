//! Cookie lookup for the CSRF token.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

use percent_encoding::percent_decode_str;

/// Find `name` in a `document.cookie` style string (`a=1; b=2`) and return
/// its percent-decoded value. The first matching pair wins.
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

/// Read a cookie from the current document.
pub fn read_cookie(name: &str) -> Option<String> {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()?;
        let cookies = document.cookie().ok()?;
        find_cookie(&cookies, name)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = name;
        None
    }
}
