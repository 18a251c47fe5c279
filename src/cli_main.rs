use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use asmstats::pipeline::summarize::StatsConfig;
use asmstats::report::OutputFormat;
use asmstats::stats::MetricSelection;

#[derive(Parser, Debug)]
#[command(name = "asmstats", version, about = "Genome assembly statistics: length, N50/L50, G+C content, extreme contigs", long_about = None)]
pub struct Cli {
    /// Genome assembly in FASTA[.gz] (several files give one row each)
    #[arg(required = true, value_name = "ASSEMBLY")]
    pub assemblies: Vec<PathBuf>,

    /// A name to recognize the assembly [default: "assembly"]
    #[arg(long)]
    pub name: Option<String>,

    /// Turn ON the choice of statistic to return
    #[arg(long)]
    pub only: bool,

    /// Total length
    #[arg(long)]
    pub length: bool,

    /// Get the N50 and the L50
    #[arg(long)]
    pub n50: bool,

    /// Get the G+C content
    #[arg(long)]
    pub gc: bool,

    /// Return the size of the longest and smallest contigs
    #[arg(long = "extreme_contigs", visible_alias = "extreme-contigs")]
    pub extreme_contigs: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Tsv)]
    pub format: FormatArg,

    /// Threads used when several assemblies are given
    #[arg(long, default_value_t = num_cpus::get())]
    pub threads: usize,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    #[value(name = "tsv")]
    Tsv,
    #[value(name = "json")]
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Tsv => OutputFormat::Tsv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Metric flags only count together with `--only`.
    pub fn selection(&self) -> MetricSelection {
        if !self.only {
            return MetricSelection::all();
        }
        MetricSelection {
            length: self.length,
            n50: self.n50,
            gc: self.gc,
            extreme_contigs: self.extreme_contigs,
        }
    }

    pub fn has_metric_flags(&self) -> bool {
        self.length || self.n50 || self.gc || self.extreme_contigs
    }

    pub fn into_config(self) -> StatsConfig {
        StatsConfig {
            selection: self.selection(),
            inputs: self.assemblies,
            name: self.name,
            threads: self.threads,
        }
    }
}
