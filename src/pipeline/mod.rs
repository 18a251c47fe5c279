//! Pipeline module - end-to-end statistics runs over one or more assemblies

pub mod summarize;
