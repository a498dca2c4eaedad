mod report;

use popgram::config::DEFAULT_DATA_DIR;
use popgram::{GrammarConfig, generate_verbose};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "POPGRAM_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing();

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &CliConfig) -> popgram::Result<()> {
    let config = GrammarConfig::popfile(&cli.data_dir);
    let res = generate_verbose(&config)?;

    match &cli.output {
        Some(path) => res.grammar.write_to(path)?,
        None => {
            let json = res.grammar.to_json()?;
            io::stdout()
                .write_all(json.as_bytes())
                .map_err(|source| popgram::GrammarError::Io { path: PathBuf::from("<stdout>"), source })?;
        }
    }

    if cli.report {
        report::print_run(&config, &res.details, cli.color);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

struct CliConfig {
    data_dir: PathBuf,
    output: Option<PathBuf>,
    report: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut data_dir = PathBuf::from(DEFAULT_DATA_DIR);
    let mut output: Option<PathBuf> = None;
    let mut report = false;
    let mut color = io::stderr().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("popgram {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--report" => report = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--data" | "-d" => {
                let value = args.next().ok_or_else(|| "error: --data expects a value".to_string())?;
                data_dir = PathBuf::from(value);
            }
            "--output" | "-o" => {
                let value = args.next().ok_or_else(|| "error: --output expects a value".to_string())?;
                if output.is_some() {
                    return Err("error: output provided multiple times".to_string());
                }
                output = Some(PathBuf::from(value));
            }
            _ if arg.starts_with("--data=") => {
                data_dir = PathBuf::from(arg.trim_start_matches("--data="));
            }
            _ if arg.starts_with("--output=") => {
                if output.is_some() {
                    return Err("error: output provided multiple times".to_string());
                }
                output = Some(PathBuf::from(arg.trim_start_matches("--output=")));
            }
            _ => {
                return Err(format!("error: unknown argument '{arg}'\n\n{}", help_text()));
            }
        }
    }

    Ok(CliConfig { data_dir, output, report, color })
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "popgram {version}

Generates the Popfile syntax-highlighting grammar (tmLanguage JSON).

Usage:
  popgram [OPTIONS]

Options:
  -d, --data <dir>      Directory holding keyword.control.txt, values.json
                        and keys.json.
                        Default: {default_data}
  -o, --output <file>   Write the grammar to <file> instead of stdout.
  --report              Print a per-category summary to stderr.
  --color               Force ANSI color in the report.
  --no-color            Disable ANSI color in the report.
  -h, --help            Show this help message.
  -V, --version         Print version information.

Environment:
  {log_env}           Log filter (for example `debug`). Default: warn.

Exit codes:
  0  Success.
  1  Generation failed (missing source, unranked category, ...).
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        default_data = DEFAULT_DATA_DIR,
        log_env = LOG_ENV,
    )
}
