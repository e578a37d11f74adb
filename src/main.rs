//! csvgrid - evaluate the formulas of a labelled CSV grid

mod config;

use anyhow::Context;
use csvgrid_core::Workbook;
use csvgrid_core::storage::{write_csv, write_to};
use csvgrid_engine::engine::{CyclePolicy, stack_size_for_depth, validate_max_depth};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage: csvgrid [OPTIONS] <FILE>");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <FILE>                    CSV grid to evaluate");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <FILE>       Write the evaluated grid to FILE instead of stdout");
    eprintln!("  --max-depth <N>           Maximum formula nesting depth (default 512, max 4096)");
    eprintln!("  --cycles <MODE>           Cycle detection: self (default) or full");
    eprintln!("  --memoize                 Cache computed formula values during the pass");
    eprintln!("  --config <FILE>           Load settings from FILE");
    eprintln!("  --no-config               Ignore configuration files");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Set CSVGRID_LOG (e.g. CSVGRID_LOG=debug) to control logging on stderr.");
}

#[derive(Debug, Default)]
struct Args {
    file_path: Option<PathBuf>,
    output_file: Option<PathBuf>,
    max_depth: Option<usize>,
    cycles: Option<CyclePolicy>,
    memoize: bool,
    config_file: Option<PathBuf>,
    no_config: bool,
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    print_usage();
    std::process::exit(1);
}

fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    fail("--output requires a file path");
                }
                parsed.output_file = Some(PathBuf::from(&args[i]));
            }
            "--max-depth" => {
                i += 1;
                if i >= args.len() {
                    fail("--max-depth requires a value");
                }
                match args[i].parse::<usize>() {
                    Ok(depth) => match validate_max_depth(depth) {
                        Ok(depth) => parsed.max_depth = Some(depth),
                        Err(e) => fail(&format!("Invalid --max-depth: {}", e)),
                    },
                    Err(_) => fail(&format!("Invalid --max-depth: {}", args[i])),
                }
            }
            "--cycles" => {
                i += 1;
                if i >= args.len() {
                    fail("--cycles requires a value");
                }
                match args[i].parse::<CyclePolicy>() {
                    Ok(policy) => parsed.cycles = Some(policy),
                    Err(e) => fail(&e),
                }
            }
            "--memoize" => parsed.memoize = true,
            "--config" => {
                i += 1;
                if i >= args.len() {
                    fail("--config requires a file path");
                }
                parsed.config_file = Some(PathBuf::from(&args[i]));
            }
            "--no-config" => parsed.no_config = true,
            arg if arg.starts_with('-') => fail(&format!("Unknown option: {}", arg)),
            _ => {
                if parsed.file_path.is_none() {
                    parsed.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    fail(&format!("Unexpected argument: {}", args[i]));
                }
            }
        }
        i += 1;
    }

    parsed
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CSVGRID_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let Some(file_path) = args.file_path else {
        anyhow::bail!("filename not provided");
    };

    let mut options = config::load_options(args.config_file.as_deref(), args.no_config)?;
    if let Some(depth) = args.max_depth {
        options.max_depth = depth;
    }
    if let Some(policy) = args.cycles {
        options.cycle_policy = policy;
    }
    if args.memoize {
        options.memoize = true;
    }
    debug!(?options, "evaluation options");

    let workbook = Workbook::load_file(&file_path, options)
        .with_context(|| format!("Failed to load {}", file_path.display()))?;

    // Formula resolution recurses once per nested reference; size the stack
    // for the configured depth rather than relying on the main thread's.
    let handle = std::thread::Builder::new()
        .name("csvgrid-eval".to_string())
        .stack_size(stack_size_for_depth(options.max_depth))
        .spawn(move || {
            let mut workbook = workbook;
            let summary = workbook.process_cells()?;
            Ok::<_, csvgrid_core::CsvGridError>((workbook, summary))
        })
        .context("Failed to start evaluation thread")?;
    let (workbook, summary) = handle
        .join()
        .map_err(|_| anyhow::anyhow!("evaluation thread panicked"))??;
    debug!(
        literals = summary.literals,
        formulas = summary.formulas,
        "processed {}",
        file_path.display()
    );

    match args.output_file {
        Some(output_path) => write_csv(&output_path, &workbook.sheet)
            .with_context(|| format!("Failed to write {}", output_path.display()))?,
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_to(&mut out, &workbook.sheet)?;
        }
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args);
    init_logging();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
