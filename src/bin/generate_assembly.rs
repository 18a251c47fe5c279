use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use asmstats::error::{Result, StatsError};
use asmstats::io::fasta::FastaWriter;

const LINE_WIDTH: usize = 60;

/// Generate random DNA contigs as FASTA, e.g. to exercise `asmstats`
///
/// Records are named `random_<index>_<length>` rather than after a hash of
/// their sequence, so seeded runs are easy to compare by eye.
#[derive(Parser, Debug)]
#[command(name = "generate_assembly", version)]
struct Args {
    /// Length of each contig
    #[arg(short, long, default_value_t = 1000)]
    length: usize,

    /// Number of contigs
    #[arg(short = 'n', long, default_value_t = 1)]
    contigs: usize,

    /// Expected G+C fraction, between 0 and 1
    #[arg(long, default_value_t = 0.5)]
    gc: f64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output FASTA(.gz) file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };
    match generate(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn generate(args: &Args) -> Result<()> {
    if args.length == 0 {
        return Err(StatsError::Argument("--length must be >= 1".to_string()));
    }
    if !(0.0..=1.0).contains(&args.gc) {
        return Err(StatsError::Argument(format!(
            "--gc must be between 0 and 1, got {}",
            args.gc
        )));
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut writer = FastaWriter::create(args.output.as_deref())?;
    for i in 0..args.contigs {
        let sequence = random_sequence(&mut rng, args.length, args.gc);
        let header = format!("random_{}_{}", i + 1, args.length);
        writer.write_record(&header, &sequence, LINE_WIDTH)?;
    }
    writer.finish()?;
    Ok(())
}

// Helper function to generate a random base with the requested G+C bias
fn random_base(rng: &mut impl Rng, gc: f64) -> u8 {
    let strong = rng.gen_bool(gc);
    match (strong, rng.gen_bool(0.5)) {
        (true, true) => b'G',
        (true, false) => b'C',
        (false, true) => b'A',
        (false, false) => b'T',
    }
}

fn random_sequence(rng: &mut impl Rng, length: usize, gc: f64) -> Vec<u8> {
    (0..length).map(|_| random_base(rng, gc)).collect()
}
