use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use eva::{Expr, Interpreter};

/// Evaluate an eva program given as a JSON syntax tree, e.g. `["+", 1, ["*", 2, 3]]`.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Program file holding one JSON syntax tree. Reads stdin when neither FILE nor --expr is given.
    file: Option<PathBuf>,

    /// Inline JSON syntax tree
    #[arg(short, long, conflicts_with = "file")]
    expr: Option<String>,

    /// Print the result as JSON instead of its display form
    #[arg(long)]
    json: bool,

    /// Log filter directives, e.g. `debug` or `eva=trace`; RUST_LOG is used when unset
    #[arg(long, env = "EVA_LOG")]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(cli: &Cli) -> Result<Option<WorkerGuard>, String> {
    let filter = match cli.log_level {
        Some(ref directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let (writer, guard, ansi) = match cli.log_file {
        Some(ref path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
            let name = path.file_name().ok_or_else(|| format!("Not a log file path: {}", path.display()))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), None, true),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_writer(writer)
        .with_ansi(ansi)
        .init();
    Ok(guard)
}

fn read_program(cli: &Cli) -> Result<String, String> {
    match (&cli.expr, &cli.file) {
        (Some(src), _) => Ok(src.clone()),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| format!("Cannot read {}: {}", path.display(), e)),
        (None, None) => {
            let mut src = String::new();
            std::io::stdin().read_to_string(&mut src).map_err(|e| format!("Cannot read stdin: {}", e))?;
            Ok(src)
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let src = read_program(cli)?;
    let program = Expr::from_json(&src).map_err(|e| format!("Invalid syntax tree: {}", e))?;
    info!("program / {}", program);

    let interpreter = Interpreter::new();
    let result = interpreter.eval_global(&program).map_err(|e| e.to_string())?;
    if cli.json {
        println!("{}", result.to_json());
    } else {
        println!("{:?}", result);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = match init_tracing(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
