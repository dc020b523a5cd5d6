//! The viewer's locale, used to render application dates.

use std::sync::OnceLock;

use records::{locale_from_tag, Locale};

const FALLBACK: Locale = Locale::en_US;

/// Locale of the browser (web) or of the operating system (desktop).
/// Resolved once; unknown tags fall back to `en_US`.
pub fn viewer_locale() -> Locale {
    static LOCALE: OnceLock<Locale> = OnceLock::new();
    *LOCALE.get_or_init(|| {
        let tag = system_locale_tag();
        let locale = tag.as_deref().and_then(locale_from_tag).unwrap_or(FALLBACK);
        tracing::debug!("Viewer locale {tag:?} resolved to {locale:?}");
        locale
    })
}

#[cfg(target_arch = "wasm32")]
fn system_locale_tag() -> Option<String> {
    let format = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new());
    js_sys::Reflect::get(&format.resolved_options(), &"locale".into())
        .ok()?
        .as_string()
}

#[cfg(not(target_arch = "wasm32"))]
fn system_locale_tag() -> Option<String> {
    sys_locale::get_locale()
}
