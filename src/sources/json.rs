use anyhow::{Context, Result};
use prodnorm::RawProduct;

/// A whole-document JSON array of products.
pub fn parse_json(input: &str) -> Result<Vec<RawProduct>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(input).context("expected a JSON array of products")
}
