use std::io::Write;

use serde::Serialize;

use crate::error::Result;

/// Statistics of one assembly. Metrics that were not requested stay `None`
/// and are left out of every rendering.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Report {
    #[serde(rename = "assembly")]
    pub name: String,
    #[serde(rename = "length", skip_serializing_if = "Option::is_none")]
    pub total_length: Option<usize>,
    #[serde(rename = "N50", skip_serializing_if = "Option::is_none")]
    pub n50: Option<usize>,
    #[serde(rename = "L50", skip_serializing_if = "Option::is_none")]
    pub l50: Option<usize>,
    #[serde(rename = "GC_content", skip_serializing_if = "Option::is_none")]
    pub gc_content: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longest_contig: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smallest_contig: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Json,
}

impl Report {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            total_length: None,
            n50: None,
            l50: None,
            gc_content: None,
            longest_contig: None,
            smallest_contig: None,
        }
    }

    /// Present metrics as (column, value), in report column order.
    pub fn columns(&self) -> Vec<(&'static str, String)> {
        let fmt = |v: Option<usize>| v.map(|v| v.to_string());
        [
            ("length", fmt(self.total_length)),
            ("N50", fmt(self.n50)),
            ("L50", fmt(self.l50)),
            ("GC_content", self.gc_content.map(|gc| format!("{:.2}", gc))),
            ("longest_contig", fmt(self.longest_contig)),
            ("smallest_contig", fmt(self.smallest_contig)),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    /// Header line and values line, tab separated.
    pub fn write_tsv<W: Write>(&self, out: W) -> Result<()> {
        write_tsv(std::slice::from_ref(self), out)
    }
}

/// One header line, then one row per report. The header follows the first
/// report; all reports of a run share the same metric selection.
pub fn write_tsv<W: Write>(reports: &[Report], mut out: W) -> Result<()> {
    let first = match reports.first() {
        Some(r) => r,
        None => return Ok(()),
    };

    let mut header = vec!["assembly"];
    header.extend(first.columns().into_iter().map(|(name, _)| name));
    writeln!(out, "{}", header.join("\t"))?;

    for report in reports {
        let mut row = vec![report.name.clone()];
        row.extend(report.columns().into_iter().map(|(_, value)| value));
        writeln!(out, "{}", row.join("\t"))?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(reports: &[Report], mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, reports)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

pub fn write_reports<W: Write>(reports: &[Report], format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Tsv => write_tsv(reports, out),
        OutputFormat::Json => write_json(reports, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_report() -> Report {
        Report {
            name: "ecoli".to_string(),
            total_length: Some(400),
            n50: Some(80),
            l50: Some(3),
            gc_content: Some(50.0),
            longest_contig: Some(100),
            smallest_contig: Some(60),
        }
    }

    #[test]
    fn test_tsv_all_columns() {
        let mut out = Vec::new();
        full_report().write_tsv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "assembly\tlength\tN50\tL50\tGC_content\tlongest_contig\tsmallest_contig\n\
             ecoli\t400\t80\t3\t50.00\t100\t60\n"
        );
    }

    #[test]
    fn test_tsv_subset_keeps_order() {
        let mut report = Report::new("assembly");
        report.gc_content = Some(28.57);
        report.n50 = Some(0);
        report.l50 = Some(1);

        let mut out = Vec::new();
        report.write_tsv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "assembly\tN50\tL50\tGC_content\nassembly\t0\t1\t28.57\n"
        );
    }

    #[test]
    fn test_tsv_name_only() {
        let mut out = Vec::new();
        Report::new("bare").write_tsv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "assembly\nbare\n");
    }

    #[test]
    fn test_tsv_multiple_rows() {
        let mut second = full_report();
        second.name = "bsub".to_string();
        let mut out = Vec::new();
        write_tsv(&[full_report(), second], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("ecoli\t"));
        assert!(lines[2].starts_with("bsub\t"));
    }

    #[test]
    fn test_json_skips_absent_metrics() {
        let mut report = Report::new("asm");
        report.total_length = Some(12);
        let mut out = Vec::new();
        write_json(&[report], &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["assembly"], "asm");
        assert_eq!(value[0]["length"], 12);
        assert!(value[0].get("N50").is_none());
        assert!(value[0].get("GC_content").is_none());
    }
}
