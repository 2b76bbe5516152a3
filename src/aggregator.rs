use std::collections::{HashMap, HashSet};

use crate::record::{CanonicalProduct, ChartField, FilterState, HistogramEntry, NOT_AVAILABLE};

/// Records passing both selectors, in collection order.
pub fn filter<'a>(
    records: &'a [CanonicalProduct],
    state: &FilterState,
) -> Vec<&'a CanonicalProduct> {
    records.iter().filter(|p| state.matches(p)).collect()
}

/// Count values of `key` in first-encounter order. `"N/A"` is never counted.
pub fn group<'a, I>(records: I, key: ChartField) -> Vec<HistogramEntry>
where
    I: IntoIterator<Item = &'a CanonicalProduct>,
{
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut out: Vec<HistogramEntry> = Vec::new();

    for product in records {
        let value = product.field(key);
        if value.is_empty() || value == NOT_AVAILABLE {
            continue;
        }
        match slots.get(value) {
            Some(&idx) => out[idx].value += 1,
            None => {
                slots.insert(value, out.len());
                out.push(HistogramEntry {
                    name: value.to_string(),
                    value: 1,
                });
            }
        }
    }
    out
}

/// Filter globally, then build the histogram for one field.
pub fn filter_and_group(
    records: &[CanonicalProduct],
    state: &FilterState,
    key: ChartField,
) -> Vec<HistogramEntry> {
    group(records.iter().filter(|p| state.matches(p)), key)
}

/// Distinct values of `key` over the whole collection, first-seen order.
/// Includes `"N/A"`; this feeds the filter selectors, not the charts.
pub fn distinct_values(records: &[CanonicalProduct], key: ChartField) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|p| p.field(key))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
