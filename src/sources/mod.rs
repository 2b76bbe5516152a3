pub mod json;
pub mod jsonl;

use anyhow::{Context, Result, anyhow};
use memmap2::Mmap;
use prodnorm::RawProduct;
use std::fs::File;
use std::path::Path;

pub fn load(format: &str, input: &str) -> Result<Vec<RawProduct>> {
    match format {
        "json" => json::parse_json(input),
        "jsonl" | "ndjson" => jsonl::parse_jsonl(input),
        _ => Err(anyhow!("Unknown input format: {}", format)),
    }
}

/// Guess the input format from a file extension.
pub fn format_for_path(path: &str) -> Option<&'static str> {
    match Path::new(path).extension()?.to_str()? {
        "json" => Some("json"),
        "jsonl" | "ndjson" => Some("jsonl"),
        _ => None,
    }
}

/// Read products from a file. `format` overrides the extension guess.
pub fn load_path(path: &str, format: Option<&str>) -> Result<Vec<RawProduct>> {
    let format = format
        .or_else(|| format_for_path(path))
        .ok_or_else(|| anyhow!("Cannot infer input format for {}; pass --format", path))?;

    let file = File::open(path).with_context(|| format!("opening {}", path))?;
    if file.metadata()?.len() == 0 {
        return load(format, "");
    }

    // mmap the file
    let mmap = unsafe { Mmap::map(&file)? };
    let text = std::str::from_utf8(&mmap).with_context(|| format!("{} is not UTF-8", path))?;
    load(format, text).with_context(|| format!("loading {}", path))
}
