use asmstats::io::fasta::load_assembly;
use asmstats::pipeline::summarize::{run, StatsConfig};
use asmstats::stats::{compute_report, gc_content, n50_l50, MetricSelection};
use asmstats::StatsError;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use tempfile::NamedTempFile;

fn fasta_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".fa").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn gz_fasta_file(content: &str) -> NamedTempFile {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    let mut file = tempfile::Builder::new().suffix(".fa.gz").tempfile().unwrap();
    file.write_all(&encoder.finish().unwrap()).unwrap();
    file
}

#[test]
fn test_multiline_records_and_ids() {
    let file = fasta_file(">ctg1 some description\nACGT\nACGT\n>ctg2\nGG\n");
    let asm = load_assembly(file.path()).unwrap();

    assert_eq!(asm.len(), 2);
    assert_eq!(asm.get("ctg1"), Some(&b"ACGTACGT"[..]));
    assert_eq!(asm.get("ctg2"), Some(&b"GG"[..]));
    assert!(asm.get("ctg1 some description").is_none());
}

#[test]
fn test_gzip_matches_plain() {
    let content = ">a\nGATTACA\n>b\nCCCCGGGG\nAT\n>c\nA\n";
    let plain = load_assembly(fasta_file(content).path()).unwrap();
    let gz = load_assembly(gz_fasta_file(content).path()).unwrap();

    let selection = MetricSelection::all();
    assert_eq!(
        compute_report("x", &plain, &selection).unwrap(),
        compute_report("x", &gz, &selection).unwrap()
    );
}

#[test]
fn test_gzip_without_gz_suffix_is_detected() {
    let gz = gz_fasta_file(">a\nGCGC\n");
    let renamed = tempfile::Builder::new().suffix(".fasta").tempfile().unwrap();
    std::fs::copy(gz.path(), renamed.path()).unwrap();

    let asm = load_assembly(renamed.path()).unwrap();
    assert_eq!(gc_content(&asm).unwrap(), 100.0);
}

#[test]
fn test_worked_example_from_file() {
    let mut content = String::new();
    for (i, len) in [100, 90, 80, 70, 60].iter().enumerate() {
        content.push_str(&format!(">c{}\n{}\n", i, "A".repeat(*len)));
    }
    let asm = load_assembly(fasta_file(&content).path()).unwrap();
    assert_eq!(n50_l50(&asm).unwrap(), (80, 3));
}

#[test]
fn test_missing_file() {
    let err = load_assembly(std::path::Path::new("/no/such/assembly.fa")).unwrap_err();
    assert!(matches!(err, StatsError::InputNotFound { .. }));
    assert!(err.to_string().contains("/no/such/assembly.fa"));
}

#[test]
fn test_empty_file_is_malformed() {
    let file = fasta_file("");
    assert!(matches!(
        load_assembly(file.path()),
        Err(StatsError::MalformedInput { .. })
    ));
}

#[test]
fn test_text_without_header_is_malformed() {
    let file = fasta_file("ACGTACGT\n");
    assert!(matches!(
        load_assembly(file.path()),
        Err(StatsError::MalformedInput { .. })
    ));
}

#[test]
fn test_headers_only_is_empty_assembly() {
    let file = fasta_file(">a\n>b\n");
    let asm = load_assembly(file.path()).unwrap();
    assert!(matches!(
        compute_report("x", &asm, &MetricSelection::all()),
        Err(StatsError::EmptyAssembly)
    ));
}

#[test]
fn test_run_multiple_assemblies_in_order() {
    let first = fasta_file(">a\nAAAA\n");
    let second = gz_fasta_file(">b\nGG\n>c\nG\n");
    let cfg = StatsConfig {
        inputs: vec![first.path().to_path_buf(), second.path().to_path_buf()],
        name: None,
        selection: MetricSelection::all(),
        threads: 2,
    };

    let reports = run(&cfg).unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].total_length, Some(4));
    assert_eq!(reports[0].gc_content, Some(0.0));
    assert_eq!(reports[1].total_length, Some(3));
    assert_eq!(reports[1].l50, Some(1));
    assert_eq!(reports[1].smallest_contig, Some(1));
    assert!(!reports[0].name.ends_with(".fa"));
}

#[test]
fn test_run_fails_if_any_assembly_fails() {
    let good = fasta_file(">a\nAAAA\n");
    let cfg = StatsConfig {
        inputs: vec![good.path().to_path_buf(), "/no/such/file.fa".into()],
        name: None,
        selection: MetricSelection::all(),
        threads: 2,
    };
    assert!(run(&cfg).is_err());
}
