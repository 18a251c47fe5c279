use tracing::debug;

use crate::assembly::{Assembly, SequenceRecord};
use crate::error::{Result, StatsError};
use crate::report::Report;

/// Which metrics to compute for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSelection {
    pub length: bool,
    pub n50: bool,
    pub gc: bool,
    pub extreme_contigs: bool,
}

impl MetricSelection {
    pub fn all() -> Self {
        Self {
            length: true,
            n50: true,
            gc: true,
            extreme_contigs: true,
        }
    }

    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            length: false,
            n50: false,
            gc: false,
            extreme_contigs: false,
        }
    }
}

impl Default for MetricSelection {
    fn default() -> Self {
        Self::all()
    }
}

pub fn total_length(assembly: &Assembly) -> usize {
    assembly.iter().map(SequenceRecord::len).sum()
}

/// Per-contig lengths, in insertion order.
pub fn contig_lengths(assembly: &Assembly) -> Vec<usize> {
    assembly.iter().map(SequenceRecord::len).collect()
}

/// Length of the longest and of the smallest contig.
pub fn extreme_contigs(assembly: &Assembly) -> Result<(usize, usize)> {
    let lengths = contig_lengths(assembly);
    let longest = lengths.iter().max().copied().ok_or(StatsError::EmptyAssembly)?;
    let smallest = lengths.iter().min().copied().ok_or(StatsError::EmptyAssembly)?;
    Ok((longest, smallest))
}

/// N50 and L50 of a length multiset, `None` when it is empty.
///
/// Lengths are walked longest first; the first contig that brings the running
/// sum to at least half of the total gives N50 (its length) and L50 (its rank).
pub fn n50_l50_from_lengths(lengths: &[usize]) -> Option<(usize, usize)> {
    let mut sorted = lengths.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let total: usize = sorted.iter().sum();

    // cumulative >= total / 2, without the float
    let mut acc = 0;
    sorted.iter().enumerate().find_map(|(i, &len)| {
        acc += len;
        (2 * acc >= total).then_some((len, i + 1))
    })
}

pub fn n50_l50(assembly: &Assembly) -> Result<(usize, usize)> {
    n50_l50_from_lengths(&contig_lengths(assembly)).ok_or(StatsError::EmptyAssembly)
}

/// G+C percentage over all bases, rounded to two decimals.
///
/// Case is ignored. Ambiguity codes and gaps count toward the total only.
pub fn gc_content(assembly: &Assembly) -> Result<f64> {
    let mut gc = 0usize;
    let mut total = 0usize;
    for seq in assembly.sequences() {
        total += seq.len();
        gc += seq
            .iter()
            .filter(|b| matches!(b.to_ascii_uppercase(), b'G' | b'C'))
            .count();
    }
    if total == 0 {
        return Err(StatsError::EmptyAssembly);
    }
    Ok(round2(gc as f64 / total as f64 * 100.0))
}

// Same rounding as the `{:.2}` rendering: exact ties go to the even digit.
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Compute the selected metrics for one assembly.
pub fn compute_report(name: &str, assembly: &Assembly, selection: &MetricSelection) -> Result<Report> {
    if assembly.is_empty() {
        return Err(StatsError::EmptyAssembly);
    }

    let mut report = Report::new(name);
    if selection.length {
        report.total_length = Some(total_length(assembly));
    }
    if selection.n50 {
        let (n50, l50) = n50_l50(assembly)?;
        report.n50 = Some(n50);
        report.l50 = Some(l50);
    }
    if selection.gc {
        report.gc_content = Some(gc_content(assembly)?);
    }
    if selection.extreme_contigs {
        let (longest, smallest) = extreme_contigs(assembly)?;
        report.longest_contig = Some(longest);
        report.smallest_contig = Some(smallest);
    }

    debug!("{}: {:?}", name, report);
    Ok(report)
}
