//! Prize catalogs the sweeps draw boards from.
use scratch_core::{Prize, PrizeKind};

#[derive(Debug, Clone)]
pub struct Catalog {
    pub name: &'static str,
    pub prizes: Vec<Prize>,
}

impl Catalog {
    fn money(name: &'static str, values: &[&str]) -> Self {
        let prizes = values
            .iter()
            .enumerate()
            .map(|(i, value)| Prize::money(&format!("{name}-{i}"), value))
            .collect();
        Self { name, prizes }
    }

    /// At least two distinct categories, so a local reading can tell a win from a loss.
    #[must_use]
    pub fn has_distinct_categories(&self) -> bool {
        self.prizes.len() >= 2
    }
}

fn product(id: &str, name: &str, redemption: &str) -> Prize {
    Prize {
        id: id.to_string(),
        name: name.to_string(),
        kind: PrizeKind::Product,
        value: None,
        product_name: Some(name.to_string()),
        redemption_value: Some(redemption.to_string()),
        image_url: format!("https://cdn.example.com/prizes/{id}.png"),
    }
}

/// Every named catalog, smallest first.
#[must_use]
pub fn all() -> Vec<Catalog> {
    let mut mixed = Catalog::money("mixed", &["500", "50", "5"]);
    mixed.prizes.push(product("mixed-bike", "Mountain bike", "450"));
    vec![
        Catalog::money("single", &["10"]),
        Catalog::money("pair", &["100", "2"]),
        Catalog::money("classic", &["1000", "250", "50", "10", "2"]),
        mixed,
        Catalog::money(
            "full-tiers",
            &["10000", "5000", "1000", "500", "250", "100", "50", "25", "10", "5", "2"],
        ),
        Catalog::money(
            "wrapped",
            &[
                "9000", "8000", "7000", "6000", "5000", "4000", "3000", "2000", "1000", "900",
                "800", "700", "600", "500",
            ],
        ),
    ]
}

/// Catalogs whose names appear in `names`; `all` selects everything.
#[must_use]
pub fn select(names: &[String]) -> Vec<Catalog> {
    let every = all();
    if names.is_empty() || names.iter().any(|n| n == "all") {
        return every;
    }
    every
        .into_iter()
        .filter(|catalog| names.iter().any(|n| n == catalog.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_by_name() {
        assert_eq!(select(&[]).len(), all().len());
        let picked = select(&["pair".to_string(), "wrapped".to_string()]);
        let names: Vec<_> = picked.iter().map(|c| c.name).collect();
        assert_eq!(names, ["pair", "wrapped"]);
        assert!(select(&["nope".to_string()]).is_empty());
    }

    #[test]
    fn mixed_catalog_carries_a_product() {
        let mixed = all().into_iter().find(|c| c.name == "mixed").unwrap();
        assert!(mixed.prizes.iter().any(|p| p.kind == PrizeKind::Product));
        assert_eq!(mixed.prizes.last().and_then(Prize::display_cents), Some(45_000));
    }
}
