use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker for "no recognized value". Never counted in a histogram.
pub const NOT_AVAILABLE: &str = "N/A";

/// An unprocessed product record. `data` is whatever JSON the record came with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data: Value,
}

impl RawProduct {
    pub fn new(id: impl Into<String>, name: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data,
        }
    }
}

/// A raw product plus the two derived display fields.
///
/// Built only through [`crate::normalizer::normalize`]; the derived fields are
/// written once and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProduct {
    pub id: String,
    pub name: String,
    pub data: Value,
    pub normalized_color: String,
    pub normalized_capacity: String,
}

impl CanonicalProduct {
    pub fn field(&self, key: ChartField) -> &str {
        match key {
            ChartField::Color => &self.normalized_color,
            ChartField::Capacity => &self.normalized_capacity,
        }
    }
}

/// Which derived field a chart or selector is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartField {
    Color,
    Capacity,
}

/// Equality selectors over the derived fields. `None` or `""` means no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub color: Option<String>,
    pub capacity: Option<String>,
}

impl FilterState {
    pub fn new(color: Option<String>, capacity: Option<String>) -> Self {
        Self {
            color: color.filter(|c| !c.is_empty()),
            capacity: capacity.filter(|c| !c.is_empty()),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into()).filter(|c| !c.is_empty());
        self
    }

    pub fn with_capacity(mut self, capacity: impl Into<String>) -> Self {
        self.capacity = Some(capacity.into()).filter(|c| !c.is_empty());
        self
    }

    pub fn matches(&self, product: &CanonicalProduct) -> bool {
        selector_matches(self.color.as_deref(), &product.normalized_color)
            && selector_matches(self.capacity.as_deref(), &product.normalized_capacity)
    }
}

fn selector_matches(selector: Option<&str>, value: &str) -> bool {
    match selector {
        None | Some("") => true,
        Some(wanted) => wanted == value,
    }
}

/// One bar or pie slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramEntry {
    pub name: String,
    pub value: u64,
}
