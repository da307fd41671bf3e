//! Output writers for kept chunks.
//!
//! Two dataset formats (JSON Lines and Alpaca-style instruction records)
//! plus a plain-text debug dump for eyeballing chunk boundaries.

use chonker_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::measure::SizeMode;
use crate::postprocess::Chunk;

/// Separator written between chunks in the debug dump.
pub const DEBUG_SEPARATOR: &str = "\n\n#####\n\n";

/// Dataset output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `{"text": ...}` object per line
    #[default]
    Jsonl,

    /// A JSON array of instruction/input/output records
    Alpaca,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Alpaca => "alpaca",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "alpaca" => Ok(OutputFormat::Alpaca),
            other => Err(AppError::Config(format!(
                "Unknown output format: {}. Supported: jsonl, alpaca",
                other
            ))),
        }
    }
}

#[derive(Serialize)]
struct JsonlRecord<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct AlpacaRecord<'a> {
    instruction: &'a str,
    input: &'a str,
    output: &'a str,
}

/// Write one JSON object per chunk, newline-terminated.
pub fn write_jsonl<W: Write>(mut writer: W, texts: &[&str]) -> AppResult<()> {
    for &text in texts {
        serde_json::to_writer(&mut writer, &JsonlRecord { text })?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write all chunks as one pretty-printed JSON array of Alpaca records.
pub fn write_alpaca<W: Write>(mut writer: W, texts: &[&str]) -> AppResult<()> {
    let records: Vec<AlpacaRecord> = texts
        .iter()
        .map(|&text| AlpacaRecord {
            instruction: "",
            input: "",
            output: text,
        })
        .collect();

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}

/// Write the human-readable listing of `chunks`.
///
/// Each chunk gets a `--- CHUNK i / N | SIZE: <size> <unit> ---` header;
/// chunks are separated by a `#####` line.
pub fn write_debug<W: Write>(mut writer: W, chunks: &[&Chunk], mode: SizeMode) -> AppResult<()> {
    let total = chunks.len();

    for (i, chunk) in chunks.iter().enumerate() {
        writeln!(
            writer,
            "--- CHUNK {} / {} | SIZE: {} {} ---",
            i + 1,
            total,
            chunk.size,
            mode.unit_label()
        )?;
        writer.write_all(chunk.text.as_bytes())?;
        if i + 1 < total {
            writer.write_all(DEBUG_SEPARATOR.as_bytes())?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write kept chunk texts to `path` in `format`.
pub fn write_dataset(path: &Path, format: OutputFormat, texts: &[&str]) -> AppResult<()> {
    let writer = BufWriter::new(create(path)?);
    match format {
        OutputFormat::Jsonl => write_jsonl(writer, texts),
        OutputFormat::Alpaca => write_alpaca(writer, texts),
    }
}

/// Write the debug listing of `chunks` to `path`.
pub fn write_debug_file(path: &Path, chunks: &[&Chunk], mode: SizeMode) -> AppResult<()> {
    write_debug(BufWriter::new(create(path)?), chunks, mode)
}

fn create(path: &Path) -> AppResult<File> {
    File::create(path).map_err(|e| {
        AppError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to create {:?}: {}", path, e),
        ))
    })
}

/// Resolve the dataset path.
///
/// An explicit output path keeps its stem and gets the format's extension;
/// otherwise the input path's extension is replaced.
pub fn output_path(input: &Path, output: Option<&Path>, format: OutputFormat) -> PathBuf {
    match (output, format) {
        (Some(path), OutputFormat::Jsonl) => path.with_extension("jsonl"),
        (Some(path), OutputFormat::Alpaca) => path.with_extension("json"),
        (None, OutputFormat::Jsonl) => input.with_extension("jsonl"),
        (None, OutputFormat::Alpaca) => input.with_extension("alpaca.json"),
    }
}

/// Path of the debug dump next to the input.
pub fn debug_path(input: &Path) -> PathBuf {
    input.with_extension("debug.txt")
}
