use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::info;

use crate::error::{Result, StatsError};
use crate::io::fasta::{load_assembly, SEQ_EXTENSIONS};
use crate::report::Report;
use crate::stats::{compute_report, MetricSelection};

pub const DEFAULT_NAME: &str = "assembly";

/// Everything a statistics run needs, already validated by the CLI layer.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub inputs: Vec<PathBuf>,
    pub name: Option<String>,
    pub selection: MetricSelection,
    pub threads: usize,
}

/// Load and summarise a single assembly file.
pub fn summarize_assembly(path: &Path, name: &str, selection: &MetricSelection) -> Result<Report> {
    info!("Calculating assembly statistics for: {}", path.display());
    let start = Instant::now();

    let assembly = load_assembly(path)?;
    let report = compute_report(name, &assembly, selection)?;

    info!(
        "{}: {} contigs summarised in {:.2}s",
        name,
        assembly.len(),
        start.elapsed().as_secs_f32()
    );
    Ok(report)
}

/// Row label for a file when several assemblies are summarised together:
/// the file name without `.gz` and without a known sequence extension.
pub fn assembly_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let name = strip_suffix_ignore_case(&name, ".gz");
    SEQ_EXTENSIONS
        .iter()
        .find_map(|ext| {
            let stripped = strip_suffix_ignore_case(name, ext);
            (stripped.len() < name.len()).then_some(stripped)
        })
        .unwrap_or(name)
        .to_string()
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> &'a str {
    if s.len() > suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    {
        &s[..s.len() - suffix.len()]
    } else {
        s
    }
}

/// Summarise every input, in parallel when there are several. Reports come
/// back in input order; the first failure aborts the whole run.
pub fn run(cfg: &StatsConfig) -> Result<Vec<Report>> {
    if cfg.inputs.is_empty() {
        return Err(StatsError::Argument("no assembly file given".to_string()));
    }
    if cfg.threads == 0 {
        return Err(StatsError::Argument("--threads must be >= 1".to_string()));
    }

    if let [path] = cfg.inputs.as_slice() {
        let name = cfg.name.as_deref().unwrap_or(DEFAULT_NAME);
        return Ok(vec![summarize_assembly(path, name, &cfg.selection)?]);
    }

    if cfg.name.is_some() {
        return Err(StatsError::Argument(
            "--name can only be used with a single assembly".to_string(),
        ));
    }

    info!(
        "Summarising {} assemblies with {} threads",
        cfg.inputs.len(),
        cfg.threads
    );
    let pool = ThreadPoolBuilder::new().num_threads(cfg.threads).build()?;
    pool.install(|| {
        cfg.inputs
            .par_iter()
            .map(|path| summarize_assembly(path, &assembly_label(path), &cfg.selection))
            .collect()
    })
}
