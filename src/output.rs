use anyhow::{Result, anyhow};
use prodnorm::{HistogramEntry, Snapshot};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const BAR_WIDTH: u64 = 30;

pub enum Writer {
    Text(Box<dyn Write>),
    JsonStdout(Box<dyn Write>),
    JsonFile(BufWriter<File>),
    JsonlFile(BufWriter<File>),
    CsvFile(BufWriter<File>),
    TsvFile(BufWriter<File>),
}

impl Writer {
    pub fn write_snapshot(&mut self, snap: &Snapshot) -> Result<()> {
        match self {
            Writer::Text(writer) => render_text(snap, writer)?,
            Writer::JsonStdout(writer) => {
                serde_json::to_writer_pretty(&mut *writer, snap)?;
                writeln!(writer)?;
            }
            Writer::JsonFile(writer) => {
                serde_json::to_writer_pretty(&mut *writer, snap)?;
                writeln!(writer)?;
            }
            Writer::JsonlFile(writer) => {
                for product in &snap.products {
                    let serialized = serde_json::to_string(product)?;
                    writeln!(writer, "{}", serialized)?;
                }
            }
            Writer::CsvFile(writer) => {
                writeln!(writer, "id,name,color,capacity")?;
                for p in &snap.products {
                    writeln!(
                        writer,
                        "{},{},{},{}",
                        escape_csv_field(&p.id),
                        escape_csv_field(&p.name),
                        escape_csv_field(&p.normalized_color),
                        escape_csv_field(&p.normalized_capacity)
                    )?;
                }
            }
            Writer::TsvFile(writer) => {
                writeln!(writer, "id\tname\tcolor\tcapacity")?;
                for p in &snap.products {
                    writeln!(
                        writer,
                        "{}\t{}\t{}\t{}",
                        escape_tsv_field(&p.id),
                        escape_tsv_field(&p.name),
                        escape_tsv_field(&p.normalized_color),
                        escape_tsv_field(&p.normalized_capacity)
                    )?;
                }
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        match self {
            Writer::Text(ref mut writer) | Writer::JsonStdout(ref mut writer) => {
                writer.flush()?;
            }
            Writer::JsonFile(ref mut writer)
            | Writer::JsonlFile(ref mut writer)
            | Writer::CsvFile(ref mut writer)
            | Writer::TsvFile(ref mut writer) => {
                writer.flush()?;
            }
        }
        Ok(())
    }
}

pub fn create_writer(output_arg: &str) -> Result<Writer> {
    match output_arg {
        "stdout" => Ok(Writer::Text(Box::new(io::stdout()))),
        "json" => Ok(Writer::JsonStdout(Box::new(io::stdout()))),
        path if path.ends_with(".json") => Ok(Writer::JsonFile(open(path)?)),
        path if path.ends_with(".jsonl") || path.ends_with(".ndjson") => {
            Ok(Writer::JsonlFile(open(path)?))
        }
        path if path.ends_with(".csv") => Ok(Writer::CsvFile(open(path)?)),
        path if path.ends_with(".tsv") => Ok(Writer::TsvFile(open(path)?)),
        path => {
            // Default to JSON file if it looks like a path
            if path.contains('/') || path.contains('\\') || path.contains('.') {
                Ok(Writer::JsonFile(open(path)?))
            } else {
                Err(anyhow!(
                    "Unknown output format: {}. Use 'stdout', 'json', or a file path",
                    output_arg
                ))
            }
        }
    }
}

fn open(path: &str) -> Result<BufWriter<File>> {
    create_parent_dirs(path)?;
    Ok(BufWriter::new(File::create(path)?))
}

/// Listing, both charts as text bars, then the selector values.
pub fn render_text(snap: &Snapshot, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Products ({})", snap.products.len())?;
    for p in &snap.products {
        writeln!(out, "  {}", p.name)?;
        writeln!(out, "    Color: {}", p.normalized_color)?;
        writeln!(out, "    Capacity: {}", p.normalized_capacity)?;
    }

    writeln!(out)?;
    render_chart("Product Distribution by Color", &snap.color_chart, out)?;
    writeln!(out)?;
    render_chart("Product Distribution by Capacity", &snap.capacity_chart, out)?;

    writeln!(out)?;
    writeln!(out, "Colors: {}", snap.colors.join(", "))?;
    writeln!(out, "Capacities: {}", snap.capacities.join(", "))?;
    Ok(())
}

fn render_chart(title: &str, entries: &[HistogramEntry], out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", title)?;
    if entries.is_empty() {
        writeln!(out, "  (no data)")?;
        return Ok(());
    }

    let label_width = entries.iter().map(|e| e.name.chars().count()).max().unwrap_or(0);
    let max = entries.iter().map(|e| e.value).max().unwrap_or(1).max(1);
    for e in entries {
        let len = (e.value * BAR_WIDTH).div_ceil(max) as usize;
        writeln!(
            out,
            "  {:<width$}  {} {}",
            e.name,
            "#".repeat(len),
            e.value,
            width = label_width
        )?;
    }
    Ok(())
}

fn create_parent_dirs(file_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(file_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn escape_tsv_field(field: &str) -> String {
    field
        .replace('\t', " ")
        .replace('\n', " ")
        .replace('\r', " ")
}
