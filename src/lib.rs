//! Genome assembly statistics: total length, N50/L50, G+C content and
//! extreme contig sizes from a FASTA[.gz] file.

pub mod assembly;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use assembly::{Assembly, SequenceRecord};
pub use error::StatsError;
pub use report::Report;
