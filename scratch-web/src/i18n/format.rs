use crate::i18n::render::tr;
use scratch_core::format_display;
use std::collections::BTreeMap;

/// Localized money string for an amount in cents, e.g. `123456 -> "$1,234.56"`.
#[must_use]
pub fn fmt_money(cents: i64) -> String {
    let amount = format_display(cents);
    let mut args = BTreeMap::new();
    args.insert("amount", amount.as_str());
    tr("money.amount", Some(&args))
}

/// Translate a plural-aware key for `count`.
#[must_use]
pub fn fmt_count(key: &str, count: usize) -> String {
    let count = count.to_string();
    let mut args = BTreeMap::new();
    args.insert("count", count.as_str());
    tr(key, Some(&args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_uses_bundle_template() {
        assert_eq!(fmt_money(123_456), "$1,234.56");
        assert_eq!(fmt_money(5), "$0.05");
    }

    #[test]
    fn counts_select_plural_forms() {
        assert_eq!(fmt_count("play.progress", 0), "Tap a cell to scratch it");
        assert_eq!(fmt_count("play.progress", 4), "4 of 9 cells revealed");
    }
}
