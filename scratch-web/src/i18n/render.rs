use crate::i18n::bundle::with_bundle;
use serde_json::Value;
use std::collections::BTreeMap;

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(root, |node, part| node.get(part))
}

fn plural_form(count: &str) -> &'static str {
    match count.trim().parse::<i64>() {
        Ok(0) => "zero",
        Ok(1) => "one",
        _ => "other",
    }
}

/// Pick the string for `value`, choosing a plural form when the entry is an
/// object and a `count` argument is present.
fn pick<'a>(value: &'a Value, args: Option<&BTreeMap<&str, &str>>) -> Option<&'a str> {
    match value {
        Value::String(text) => Some(text.as_str()),
        Value::Object(forms) => {
            let wanted = args
                .and_then(|map| map.get("count"))
                .map_or("other", |count| plural_form(count));
            forms
                .get(wanted)
                .or_else(|| forms.get("other"))
                .and_then(Value::as_str)
        }
        _ => None,
    }
}

fn interpolate(template: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    let Some(args) = args else {
        return template.to_string();
    };
    args.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}

/// Translate a key, returning the key itself when it is missing.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key and substitute `{name}` placeholders.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    with_bundle(|bundle| {
        lookup(&bundle.strings, key)
            .and_then(|value| pick(value, args))
            .map(|template| interpolate(template, args))
    })
    .unwrap_or_else(|| {
        log::debug!("missing translation key '{key}'");
        key.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_lookup_and_interpolation() {
        let strings = json!({"home": {"price": "Price: {amount}"}});
        let value = lookup(&strings, "home.price").unwrap();
        let mut args = BTreeMap::new();
        args.insert("amount", "$2.00");
        assert_eq!(interpolate(pick(value, Some(&args)).unwrap(), Some(&args)), "Price: $2.00");
        assert!(lookup(&strings, "home.missing").is_none());
    }

    #[test]
    fn plural_forms_fall_back_to_other() {
        let forms = json!({"one": "one cell", "other": "{count} cells"});
        let mut args = BTreeMap::new();
        args.insert("count", "1");
        assert_eq!(pick(&forms, Some(&args)), Some("one cell"));
        args.insert("count", "0");
        assert_eq!(pick(&forms, Some(&args)), Some("{count} cells"));
        assert_eq!(pick(&forms, None), Some("{count} cells"));
    }

    #[test]
    fn missing_keys_echo_back() {
        let missing = "nope.not.here";
        assert_eq!(t(missing), missing);
        assert_eq!(t("play.reveal_all"), "Reveal all");
    }
}
