// src/io/fasta.rs
use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, warn};

use crate::assembly::Assembly;
use crate::error::{Result, StatsError};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Sequence file extensions recognised without a warning (before any `.gz`).
pub const SEQ_EXTENSIONS: &[&str] = &[".fa", ".fasta", ".fna", ".fq", ".fastq", ".pep"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Plain,
    Gzip,
}

/// Decide how to read `path`: gzip when it carries the gzip magic and a byte
/// can actually be inflated, plain text otherwise.
pub fn detect_input_kind(path: &Path) -> Result<InputKind> {
    let mut file = File::open(path)?;
    let mut magic = Vec::with_capacity(2);
    (&mut file).take(2).read_to_end(&mut magic)?;
    if magic != GZIP_MAGIC {
        return Ok(InputKind::Plain);
    }

    file.seek(SeekFrom::Start(0))?;
    let mut first = [0u8; 1];
    match MultiGzDecoder::new(file).read(&mut first) {
        Ok(_) => Ok(InputKind::Gzip),
        Err(e) => {
            debug!("{}: gzip header did not inflate ({}), reading as plain text", path.display(), e);
            Ok(InputKind::Plain)
        }
    }
}

/// Open a FASTA file for reading, handles gzipped files automatically
pub fn open_fasta(path: &Path) -> Result<Box<dyn Read>> {
    let kind = detect_input_kind(path)?;
    let file = File::open(path)?;
    debug!("Opening {} as {:?}", path.display(), kind);
    Ok(match kind {
        InputKind::Gzip => Box::new(MultiGzDecoder::new(file)),
        InputKind::Plain => Box::new(file),
    })
}

/// True when the file name ends in a known sequence extension, optionally gzipped.
pub fn has_sequence_extension(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n.to_ascii_lowercase(),
        None => return false,
    };
    let stem = name.strip_suffix(".gz").unwrap_or(&name);
    SEQ_EXTENSIONS.iter().any(|ext| stem.ends_with(ext))
}

/// Read every record of a FASTA[.gz] file into an [`Assembly`].
///
/// Identifiers are the header text up to the first whitespace; wrapped
/// sequence lines are joined. A file without any record is rejected.
pub fn load_assembly(path: &Path) -> Result<Assembly> {
    if !path.is_file() {
        return Err(StatsError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    if !has_sequence_extension(path) {
        warn!(
            "{} does not look like a FASTA file (expected one of {:?}, optionally .gz)",
            path.display(),
            SEQ_EXTENSIONS
        );
    }

    let reader = fasta::Reader::new(open_fasta(path)?);
    let mut assembly = Assembly::new();

    for result in reader.records() {
        let record = result.map_err(|e| StatsError::MalformedInput {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let id = record.id().to_string();
        if assembly.insert(id, record.seq().to_vec()).is_some() {
            warn!(
                "Duplicate sequence id '{}' in {}, keeping the last occurrence",
                record.id(),
                path.display()
            );
        }
    }

    if assembly.is_empty() {
        return Err(StatsError::MalformedInput {
            path: path.to_path_buf(),
            reason: "no FASTA records found".to_string(),
        });
    }

    let empty = assembly.iter().filter(|r| r.is_empty()).count();
    if empty > 0 {
        warn!(
            "{} of {} records in {} have no sequence",
            empty,
            assembly.len(),
            path.display()
        );
    }

    debug!("Loaded {} contigs from {}", assembly.len(), path.display());
    Ok(assembly)
}

pub enum FastaWriter {
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
    Stdout(BufWriter<io::Stdout>),
}

impl FastaWriter {
    /// Write to `path` (gzip when it ends in `.gz`), or to stdout when `None`.
    pub fn create(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => return Ok(FastaWriter::Stdout(BufWriter::new(io::stdout()))),
        };
        let file = File::create(path)?;
        if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            let encoder = GzEncoder::new(file, Compression::default());
            Ok(FastaWriter::Compressed(BufWriter::new(encoder)))
        } else {
            Ok(FastaWriter::Plain(BufWriter::new(file)))
        }
    }

    /// Write one record, wrapping the sequence every `width` bases (0 = no wrap).
    pub fn write_record(&mut self, header: &str, sequence: &[u8], width: usize) -> io::Result<()> {
        let writer: &mut dyn Write = match self {
            FastaWriter::Plain(w) => w,
            FastaWriter::Compressed(w) => w,
            FastaWriter::Stdout(w) => w,
        };
        writeln!(writer, ">{}", header)?;
        if width == 0 {
            writer.write_all(sequence)?;
            writer.write_all(b"\n")?;
        } else {
            for line in sequence.chunks(width) {
                writer.write_all(line)?;
                writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    /// Flush buffers and terminate the gzip stream if there is one.
    pub fn finish(self) -> io::Result<()> {
        match self {
            FastaWriter::Plain(mut w) => w.flush(),
            FastaWriter::Stdout(mut w) => w.flush(),
            FastaWriter::Compressed(w) => {
                let encoder = w.into_inner().map_err(|e| e.into_error())?;
                encoder.finish()?;
                Ok(())
            }
        }
    }
}
