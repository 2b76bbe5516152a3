use serde_json::{Map, Value};
use tracing::debug;

use crate::record::{CanonicalProduct, NOT_AVAILABLE, RawProduct};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Batches smaller than this are normalized on the calling thread.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_RECORDS: usize = 4096;

/// One entry of a fallback chain: look up `key` in the record's data and,
/// if the value is present, turn it into the display string.
#[derive(Clone, Copy)]
pub struct Rule {
    pub key: &'static str,
    pub transform: fn(&Value) -> String,
}

/// Color lookup order. First present value wins.
pub const COLOR_RULES: &[Rule] = &[
    Rule { key: "color", transform: render },
    Rule { key: "Color", transform: render },
    Rule { key: "Strap Colour", transform: render },
];

/// Capacity lookup order. First present value wins.
pub const CAPACITY_RULES: &[Rule] = &[
    Rule { key: "capacity", transform: render },
    Rule { key: "Capacity", transform: render },
    Rule { key: "capacity GB", transform: with_gb_suffix },
];

/// Derive the canonical record. Never fails: every chain ends in `"N/A"`.
pub fn normalize(raw: RawProduct) -> CanonicalProduct {
    let (normalized_color, normalized_capacity) = match raw.data.as_object() {
        Some(map) => (derive(map, COLOR_RULES), derive(map, CAPACITY_RULES)),
        None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    };

    CanonicalProduct {
        id: raw.id,
        name: raw.name,
        data: raw.data,
        normalized_color,
        normalized_capacity,
    }
}

/// Normalize a batch, keeping input order.
pub fn normalize_all(raws: Vec<RawProduct>) -> Vec<CanonicalProduct> {
    debug!(records = raws.len(), "normalizing batch");

    #[cfg(feature = "parallel")]
    {
        if raws.len() >= PARALLEL_MIN_RECORDS {
            return raws.into_par_iter().map(normalize).collect();
        }
    }

    raws.into_iter().map(normalize).collect()
}

/// Walk `rules` in order and return the first present value, transformed.
pub fn derive(data: &Map<String, Value>, rules: &[Rule]) -> String {
    rules
        .iter()
        .find_map(|rule| {
            data.get(rule.key)
                .filter(|v| is_present(v))
                .map(rule.transform)
        })
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Short-circuit truthiness: null, false, 0, NaN and "" count as missing.
///
/// A real capacity of numeric zero is therefore skipped. Tests pin this.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Display form of a metadata value.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                match n.as_f64() {
                    Some(f) => render_float(f),
                    None => n.to_string(),
                }
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Shortest decimal form, switching to exponent form outside
/// `1e-6 <= |f| < 1e21` with an explicit `+` on positive exponents.
fn render_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let abs = f.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let exp = format!("{f:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{mantissa}e+{power}")
            }
            _ => exp,
        };
    }
    if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

fn with_gb_suffix(value: &Value) -> String {
    let mut out = render(value);
    out.push_str(" GB");
    out
}
