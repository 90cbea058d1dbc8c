//! Bundle coverage: every key the views ask for must exist in every locale.

use crate::scratch::{Category, DepositMethod};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

fn locale_codes() -> Vec<String> {
    let mut locales: Vec<String> = std::fs::read_dir("i18n")
        .expect("i18n directory should exist")
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
        .collect();
    locales.sort();
    locales
}

fn load_locale(locale: &str) -> (String, Value) {
    let path = format!("i18n/{locale}.json");
    let content =
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read {path}"));
    let json: Value =
        serde_json::from_str(&content).unwrap_or_else(|_| panic!("Failed to parse JSON in {path}"));
    (content, json)
}

fn has_key(json: &Value, key: &str) -> bool {
    key.split('.')
        .try_fold(json, |node, part| node.get(part))
        .is_some_and(|node| node.is_string() || node.is_object())
}

fn collect_keys(prefix: &str, value: &Value, out: &mut BTreeSet<String>) {
    if let Value::Object(map) = value {
        for (k, v) in map {
            let next = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            if v.is_object() {
                collect_keys(&next, v, out);
            } else {
                out.insert(next);
            }
        }
    }
}

/// Literal keys passed to `t(..)`, `tr(..)` and `fmt_count(..)` under `dir`.
fn keys_used_in(dir: &Path, re: &regex::Regex, out: &mut BTreeSet<String>) {
    for entry in std::fs::read_dir(dir).expect("source directory").flatten() {
        let path = entry.path();
        if path.is_dir() {
            keys_used_in(&path, re, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let source = std::fs::read_to_string(&path).expect("readable source");
            out.extend(re.captures_iter(&source).map(|c| c[1].to_string()));
        }
    }
}

#[test]
fn locales_have_matching_keys() {
    let (_, base_json) = load_locale("en");
    let mut base_keys = BTreeSet::new();
    collect_keys("", &base_json, &mut base_keys);

    for locale in locale_codes() {
        let (_, json) = load_locale(&locale);
        let mut keys = BTreeSet::new();
        collect_keys("", &json, &mut keys);
        for key in &base_keys {
            assert!(keys.contains(key), "Missing key '{key}' in locale '{locale}'");
        }
    }
}

#[test]
fn every_key_in_source_resolves() {
    let re = regex::Regex::new(r#"\b(?:t|tr|fmt_count)\(\s*"([a-z_]+(?:\.[a-z_]+)+)""#).unwrap();
    let mut used = BTreeSet::new();
    keys_used_in(Path::new("src"), &re, &mut used);
    assert!(used.contains("play.progress"), "scan found {} keys", used.len());

    for locale in locale_codes() {
        let (_, json) = load_locale(&locale);
        for key in &used {
            assert!(has_key(&json, key), "Missing key '{key}' in locale '{locale}'");
        }
    }
}

#[test]
fn categories_and_methods_have_labels() {
    let (_, json) = load_locale("en");
    for category in Category::TIERS.iter().chain(Category::DUMMIES.iter()) {
        let key = format!("categories.{}", category.key());
        assert!(has_key(&json, &key), "Missing '{key}'");
    }
    for method in DepositMethod::ALL {
        let key = format!("wallet.methods.{}", method.key());
        assert!(has_key(&json, &key), "Missing '{key}'");
    }
}

#[test]
fn locales_have_balanced_templates() {
    for locale in locale_codes() {
        let (content, _json) = load_locale(&locale);
        let open_count = content.matches('{').count();
        let close_count = content.matches('}').count();
        assert_eq!(
            open_count, close_count,
            "Unmatched braces in {locale}: {open_count} open, {close_count} close"
        );
        assert!(!content.contains("{{"), "Found doubled brace in {locale}");
    }
}
