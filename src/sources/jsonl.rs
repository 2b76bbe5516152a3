use anyhow::{Context, Result};
use memchr::memchr_iter;
use prodnorm::RawProduct;

/// One product per line. Blank lines are skipped; a bad line fails the load.
pub fn parse_jsonl(input: &str) -> Result<Vec<RawProduct>> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut line_no = 1usize;

    for nl in memchr_iter(b'\n', bytes) {
        parse_line_into(&bytes[start..nl], line_no, &mut out)?;
        start = nl + 1;
        line_no += 1;
    }
    if start < bytes.len() {
        parse_line_into(&bytes[start..], line_no, &mut out)?;
    }
    Ok(out)
}

fn parse_line_into(line: &[u8], line_no: usize, out: &mut Vec<RawProduct>) -> Result<()> {
    if line.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    let product = serde_json::from_slice(line).with_context(|| format!("line {}", line_no))?;
    out.push(product);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"id":"8","name":"Apple Watch Series 8","data":{"Strap Colour":"Elderberry","Case Size":"41mm"}}

{"id":"10","name":"Apple iPad Mini 5th Gen","data":{"Capacity":"64 GB","Screen size":7.9}}
"#;

    #[test]
    fn parse_sample() {
        let v = parse_jsonl(SAMPLE).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].id, "8");
        assert_eq!(v[1].data["Capacity"], "64 GB");
    }

    #[test]
    fn last_line_without_newline() {
        let v = parse_jsonl(r#"{"id":"1","name":"a"}"#).unwrap();
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn bad_line_is_reported_by_number() {
        let input = "{\"id\":\"1\",\"name\":\"a\"}\n{not json}\n";
        let err = parse_jsonl(input).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }
}
