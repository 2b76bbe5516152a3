use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::aggregator;
use crate::error::CatalogError;
use crate::normalizer::{normalize, normalize_all};
use crate::record::{CanonicalProduct, ChartField, FilterState, HistogramEntry, RawProduct};
use crate::seed;

/// Parse `raw_data_text`, normalize a new record and return `existing` with it
/// appended. On malformed JSON nothing is built and `existing` is not touched.
///
/// Any syntactically valid JSON is accepted; `name` is not validated.
pub fn add_record(
    name: &str,
    raw_data_text: &str,
    existing: &[CanonicalProduct],
) -> Result<Vec<CanonicalProduct>, CatalogError> {
    let record = build_record(name, raw_data_text, existing)?;
    Ok(appended(existing, record))
}

fn build_record(
    name: &str,
    raw_data_text: &str,
    existing: &[CanonicalProduct],
) -> Result<CanonicalProduct, CatalogError> {
    let parsed: Value = serde_json::from_str(raw_data_text)?;
    let id = fresh_id(existing);
    debug!(%id, product = name, "adding record");
    Ok(normalize(RawProduct::new(id, name, parsed)))
}

fn appended(existing: &[CanonicalProduct], record: CanonicalProduct) -> Vec<CanonicalProduct> {
    let mut next = Vec::with_capacity(existing.len() + 1);
    next.extend_from_slice(existing);
    next.push(record);
    next
}

fn fresh_id(existing: &[CanonicalProduct]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !existing.iter().any(|p| p.id == id) {
            return id;
        }
    }
}

/// Everything the presentation layer renders for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub products: Vec<CanonicalProduct>,
    pub color_chart: Vec<HistogramEntry>,
    pub capacity_chart: Vec<HistogramEntry>,
    pub colors: Vec<String>,
    pub capacities: Vec<String>,
}

/// The working product collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<CanonicalProduct>,
}

impl Catalog {
    pub fn new(raws: Vec<RawProduct>) -> Self {
        Self {
            products: normalize_all(raws),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::products())
    }

    pub fn products(&self) -> &[CanonicalProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Append a record built from `name` and JSON text and return a copy of it.
    /// On error the catalog is left as it was and the rejection is logged.
    pub fn add(
        &mut self,
        name: &str,
        raw_data_text: &str,
    ) -> Result<CanonicalProduct, CatalogError> {
        let record = build_record(name, raw_data_text, &self.products).inspect_err(|err| {
            warn!(product = name, error = %err, "rejected product data");
        })?;
        self.products = appended(&self.products, record.clone());
        Ok(record)
    }

    pub fn filtered(&self, state: &FilterState) -> Vec<&CanonicalProduct> {
        aggregator::filter(&self.products, state)
    }

    pub fn chart(&self, state: &FilterState, key: ChartField) -> Vec<HistogramEntry> {
        aggregator::filter_and_group(&self.products, state, key)
    }

    pub fn distinct(&self, key: ChartField) -> Vec<String> {
        aggregator::distinct_values(&self.products, key)
    }

    pub fn snapshot(&self, state: &FilterState) -> Snapshot {
        let products: Vec<CanonicalProduct> =
            self.filtered(state).into_iter().cloned().collect();
        Snapshot {
            color_chart: aggregator::group(&products, ChartField::Color),
            capacity_chart: aggregator::group(&products, ChartField::Capacity),
            products,
            colors: self.distinct(ChartField::Color),
            capacities: self.distinct(ChartField::Capacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn add_appends_one_record_with_fresh_id() {
        let before = Catalog::seeded();
        let mut catalog = before.clone();
        let added = catalog
            .add("Nothing Phone", r#"{"Color": "Black", "capacity GB": 256}"#)
            .unwrap();
        assert_eq!(added.name, "Nothing Phone");
        assert_eq!(added.normalized_color, "Black");
        assert_eq!(added.normalized_capacity, "256 GB");

        assert_eq!(catalog.len(), before.len() + 1);
        assert_eq!(&catalog.products()[..before.len()], before.products());
        let new_id = &catalog.products()[before.len()].id;
        assert!(before.products().iter().all(|p| &p.id != new_id));
        assert_eq!(new_id, &added.id);
        assert!(Uuid::parse_str(new_id).is_ok());
    }

    #[test]
    fn malformed_json_leaves_catalog_untouched() {
        let before = Catalog::seeded();
        let mut catalog = before.clone();
        let err = catalog.add("Broken", "{color: Red").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedInputData(_)));
        assert_eq!(catalog, before);
    }

    #[test]
    fn add_record_returns_new_collection() {
        let existing = Catalog::seeded().products().to_vec();
        let next = add_record("", "null", &existing).unwrap();
        assert_eq!(existing.len(), 13);
        assert_eq!(next.len(), 14);
        let last = next.last().unwrap();
        assert_eq!(last.name, "");
        assert_eq!(last.normalized_color, "N/A");
        assert_eq!(last.normalized_capacity, "N/A");
    }

    #[test]
    fn duplicate_names_and_odd_shapes_are_accepted() {
        let mut catalog = Catalog::default();
        catalog.add("Same", "[1, 2, 3]").unwrap();
        catalog.add("Same", "\"just a string\"").unwrap();
        catalog.add("Same", "{}").unwrap();
        assert_eq!(catalog.len(), 3);
        let ids: HashSet<_> = catalog.products().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn snapshot_charts_follow_filter_but_selectors_do_not() {
        let catalog = Catalog::seeded();
        let state = FilterState::default().with_capacity("64 GB");
        let snap = catalog.snapshot(&state);

        assert_eq!(snap.products.len(), 2);
        assert!(snap.color_chart.is_empty());
        assert_eq!(
            snap.capacity_chart,
            [HistogramEntry { name: "64 GB".into(), value: 2 }]
        );
        assert_eq!(catalog.chart(&state, ChartField::Capacity), snap.capacity_chart);
        assert_eq!(snap.colors, catalog.distinct(ChartField::Color));
        assert_eq!(snap.capacities.len(), 6);
    }
}
