use serde_json::Value;
use std::cell::RefCell;

pub const DEFAULT_LANG: &str = "en";

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const LANG_KEY: &str = "scratch.locale";

const BUNDLES: &[(&str, &str)] = &[("en", include_str!("../../i18n/en.json"))];

pub(super) struct Bundle {
    pub lang: &'static str,
    pub strings: Value,
}

fn parse_bundle(lang: &str) -> Option<Bundle> {
    let (code, raw) = BUNDLES.iter().find(|(code, _)| *code == lang)?;
    match serde_json::from_str(raw) {
        Ok(strings) => Some(Bundle {
            lang: *code,
            strings,
        }),
        Err(err) => {
            log::error!("translation bundle '{code}' is not valid JSON: {err}");
            None
        }
    }
}

fn empty_bundle() -> Bundle {
    Bundle {
        lang: DEFAULT_LANG,
        strings: Value::Object(serde_json::Map::new()),
    }
}

fn saved_lang() -> Option<String> {
    #[cfg(all(not(test), target_arch = "wasm32"))]
    {
        use gloo::storage::{LocalStorage, Storage};
        LocalStorage::get::<String>(LANG_KEY).ok()
    }

    #[cfg(any(test, not(target_arch = "wasm32")))]
    {
        None
    }
}

thread_local! {
    static ACTIVE: RefCell<Bundle> = RefCell::new(
        saved_lang()
            .and_then(|lang| parse_bundle(&lang))
            .or_else(|| parse_bundle(DEFAULT_LANG))
            .unwrap_or_else(empty_bundle),
    );
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&Bundle) -> R) -> R {
    ACTIVE.with(|cell| f(&cell.borrow()))
}

/// Switch the active language. Unknown codes are ignored and return `false`.
pub fn set_lang(lang: &str) -> bool {
    let Some(bundle) = parse_bundle(lang) else {
        log::warn!("no translations for '{lang}', keeping {}", current_lang());
        return false;
    };
    ACTIVE.with(|cell| cell.replace(bundle));
    #[cfg(target_arch = "wasm32")]
    {
        use gloo::storage::{LocalStorage, Storage};
        if let Err(err) = LocalStorage::set(LANG_KEY, lang) {
            log::debug!("could not persist locale: {err}");
        }
        apply_document_lang();
    }
    true
}

#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.to_string())
}

/// Mirror the active language onto `<html lang>`.
pub fn apply_document_lang() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(root) = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.document_element())
        {
            let _ = root.set_attribute("lang", &current_lang());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_bundle_is_bundled() {
        let bundle = parse_bundle("en").expect("en bundle");
        assert_eq!(bundle.lang, "en");
        assert!(bundle.strings.get("play").is_some());
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(parse_bundle("xx").is_none());
        assert!(!set_lang("xx"));
        assert_eq!(current_lang(), "en");
        assert!(set_lang("en"));
    }
}
