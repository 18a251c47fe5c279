mod cli_main;

use std::io;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use asmstats::error::Result;
use asmstats::pipeline::summarize;
use asmstats::report::write_reports;
use cli_main::Cli;

fn main() -> ExitCode {
    // Nothing provided at all
    if std::env::args_os().len() <= 1 {
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::from(1);
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return ExitCode::SUCCESS;
            }
            _ => {
                eprintln!("{}", clap_error_line(&e));
                return ExitCode::from(1);
            }
        },
    };

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// First line of a clap error, without the usage block and help tip.
fn clap_error_line(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let line = rendered.lines().next().unwrap_or("").trim();
    if line.starts_with("error:") {
        line.to_string()
    } else {
        format!("error: {}", line)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install logger: {}", e);
    }
}

fn run(cli: Cli) -> Result<()> {
    if !cli.only && cli.has_metric_flags() {
        warn!("Metric flags are ignored without --only; computing every statistic");
    }

    let format = cli.format.into();
    let cfg = cli.into_config();
    let reports = summarize::run(&cfg)?;

    // Reports are complete before anything reaches stdout
    write_reports(&reports, format, io::stdout().lock())
}
