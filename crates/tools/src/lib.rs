//! Offline checks of the site data, shared by the `sitecheck` binary.

use cart::{CartConfig, CartStore, InMemoryCartStorage};
use catalog::{Catalog, compare_mirrors};
use foundation::{LatLngBounds, LocationId};
use i18n::Locale;
use map::{MapConfig, RecordingBackend, initialize_map};
use order::{OrderConfig, OrderForm, build_order_email};
use serde::Serialize;

/// Outcome of validating both locale datasets.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub counts: Vec<(String, usize)>,
    pub issues: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Per-dataset rules, then FR/EN parity when both parse.
pub fn validate_datasets(fr_json: &str, en_json: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut parsed = Vec::new();
    for (locale, raw) in [(Locale::Fr, fr_json), (Locale::En, en_json)] {
        match Catalog::from_json_str(locale, raw) {
            Ok(c) => {
                report.counts.push((locale.tag().to_string(), c.len()));
                parsed.push(c);
            }
            Err(err) => report.issues.push(format!("{}: {err}", locale.tag())),
        }
    }
    if let [fr, en] = parsed.as_slice() {
        report
            .issues
            .extend(compare_mirrors(fr, en).iter().map(|i| i.to_string()));
    }
    tracing::debug!(issues = report.issues.len(), "datasets validated");
    report
}

/// Bounds "show all locations" would fit for `catalog`.
pub fn fit_bounds(catalog: &Catalog, config: &MapConfig) -> Option<LatLngBounds> {
    let mut backend = RecordingBackend::with_container("map");
    let mut renderer = initialize_map(
        &mut backend,
        "map",
        catalog.locale(),
        catalog,
        &|_| false,
        config,
    )?;
    renderer.show_all_locations()
}

/// The `mailto:` URI an order for `ids` would open.
pub fn mailto_preview(
    catalog: &Catalog,
    ids: &[LocationId],
    form: &OrderForm,
    config: &OrderConfig,
) -> Result<String, String> {
    let mut cart = CartStore::new(InMemoryCartStorage::new(), &CartConfig::default());
    for id in ids {
        let loc = catalog
            .get(*id)
            .ok_or_else(|| format!("unknown location id {id}"))?;
        cart.add(loc);
    }
    if cart.is_empty() {
        return Err("at least one location id is required".to_string());
    }
    let email = build_order_email(catalog.locale(), form, cart.items(), config);
    Ok(email.mailto_url())
}

#[cfg(test)]
mod tests {
    use super::{fit_bounds, mailto_preview, validate_datasets};
    use catalog::Catalog;
    use foundation::LocationId;
    use i18n::Locale;
    use map::MapConfig;
    use order::{OrderConfig, OrderForm};

    const FR: &str = r#"[{"id":1,"lat":46.8,"lng":-71.2,"name":"Un","visitors":"1 000/mois","description":"","facingTo":""},
        {"id":2,"lat":46.9,"lng":-71.3,"name":"Deux","visitors":"2 000/mois","description":"","facingTo":""}]"#;
    const EN: &str = r#"[{"id":1,"lat":46.8,"lng":-71.2,"name":"One","visitors":"1,000/month","description":"","facingTo":""},
        {"id":2,"lat":46.9,"lng":-71.3,"name":"Two","visitors":"2,000/month","description":"","facingTo":""}]"#;

    #[test]
    fn matching_mirrors_validate() {
        let report = validate_datasets(FR, EN);
        assert!(report.is_ok(), "{:?}", report.issues);
        assert_eq!(report.counts, vec![("fr".to_string(), 2), ("en".to_string(), 2)]);
    }

    #[test]
    fn parity_and_parse_problems_are_reported() {
        let en_missing = r#"[{"id":1,"lat":46.8,"lng":-71.2,"name":"One","visitors":"v","description":"","facingTo":""}]"#;
        let report = validate_datasets(FR, en_missing);
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("location 2"));

        let fr_missing = r#"[{"id":1,"lat":46.8,"lng":-71.2,"name":"Un","visitors":"v","description":"","facingTo":""}]"#;
        let report = validate_datasets(fr_missing, EN);
        assert_eq!(report.issues, vec!["location 2 is missing from the fr dataset".to_string()]);

        let report = validate_datasets("[", EN);
        assert!(report.issues[0].starts_with("fr:"));
    }

    #[test]
    fn shipped_datasets_are_clean() {
        let fr = Catalog::for_locale(Locale::Fr).unwrap();
        let en = Catalog::for_locale(Locale::En).unwrap();
        assert_eq!(fr.len(), en.len());
        let b = fit_bounds(&fr, &MapConfig::default()).unwrap();
        assert!(fr.iter().all(|l| b.contains(l.position())));
    }

    #[test]
    fn mailto_preview_needs_known_ids() {
        let en = Catalog::from_json_str(Locale::En, EN).unwrap();
        let form = OrderForm {
            company: "Acme".to_string(),
            ..OrderForm::default()
        };
        let url = mailto_preview(&en, &[LocationId(2)], &form, &OrderConfig::default()).unwrap();
        assert!(url.contains("Two"));
        assert!(mailto_preview(&en, &[LocationId(9)], &form, &OrderConfig::default()).is_err());
        assert!(mailto_preview(&en, &[], &form, &OrderConfig::default()).is_err());
    }
}
