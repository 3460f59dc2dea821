use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, ArgAction, Command};
use msggen::{GenerateConfig, OutputFormat, generate};
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    Command::new("msggen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate Go translation files from .yml message definitions")
        .after_help(
            "To generate Go translation files in the current working directory:\n\
             \n    # Inside myproject/translations\n    $ msggen --pkg translations\n\
             \nFiles are never removed automatically; remove stale generated files before regenerating.",
        )
        .arg(
            Arg::new("pkg")
                .long("pkg")
                .short('p')
                .help("Package name for the generated code (required for Go output)"),
        )
        .arg(
            Arg::new("src")
                .long("src")
                .short('s')
                .help("Directory containing the .yml message files (default: current directory)"),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .short('t')
                .help("Directory the generated files are written to (default: current directory)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: go or json")
                .default_value("go"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every parsed file")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let matches = command().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let cwd = env::current_dir()?;
    let src = matches
        .get_one::<String>("src")
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd.clone());
    let target = matches
        .get_one::<String>("target")
        .map(PathBuf::from)
        .unwrap_or(cwd);
    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("go")
        .parse()?;

    let mut config = GenerateConfig::new(src, target);
    config.with_format(format);
    if let Some(pkg) = matches.get_one::<String>("pkg") {
        config.with_package(pkg);
    }

    for path in generate(&config)? {
        println!("Generated {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
