use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::{ArgAction, Parser};
use psi::{
    compile,
    errors::errors::{Error, ErrorTip},
    format_error, parse_source,
    printer::{pretty::PrettyPrinter, xml::XmlWriter},
};
use tracing::Level;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Parser and type checker for a small Pascal subset",
    long_about = "Parser and type checker for a small Pascal subset.\n\
                 Each source file is parsed and type checked on its own; a failing file\n\
                 is reported and the remaining files are still processed.\n\
                 \n\
                 Example usage:\n\
                 psi demo.pas                 # Check one file\n\
                 psi samples/                 # Check every .pas file in a directory\n\
                 psi demo.pas --print         # Print the checked program as Pascal\n\
                 psi demo.pas --xml           # Print the checked program as XML\n\
                 psi demo.pas --parse-only    # Stop after parsing\n\
                 psi demo.pas -vv             # Trace parsing and type checking"
)]
struct Cli {
    /// Source files, or directories to scan for `.pas` files
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Print each program as Pascal source
    #[arg(long)]
    print: bool,

    /// Print each program as XML
    #[arg(long)]
    xml: bool,

    /// Skip type checking
    #[arg(long)]
    parse_only: bool,

    /// Log more detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let files = match collect_sources(&cli.paths) {
        Ok(files) => files,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let failed = files.iter().filter(|file| !process_file(&cli, file)).count();
    tracing::info!("processed {} file(s) in {:?}", files.len(), start.elapsed());

    if failed > 0 {
        tracing::warn!("{} of {} file(s) failed", failed, files.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Expands directories into their `.pas` files, sorted by name. Other paths are kept as given.
fn collect_sources(paths: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = fs::read_dir(path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "pas"))
            .collect();
        found.sort();
        files.extend(found);
    }

    Ok(files)
}

/// Checks one file and prints what was asked for. Returns false if the file failed.
fn process_file(cli: &Cli, path: &Path) -> bool {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Error: cannot read {}: {}", path.display(), err);
            return false;
        }
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let start = Instant::now();
    let result = if cli.parse_only {
        parse_source(&text, &file_name)
    } else {
        compile(&text, &file_name)
    };
    tracing::debug!("{} done in {:?}", file_name, start.elapsed());

    match result {
        Ok(program) => {
            if cli.print {
                print!("{}", PrettyPrinter::print(&program));
            }
            if cli.xml {
                print!("{}", XmlWriter::write(&program));
            }
            if !cli.print && !cli.xml {
                println!("{}: ok", file_name);
            }
            true
        }
        Err(error) => {
            display_error(&error);
            false
        }
    }
}

fn display_error(error: &Error) {
    eprintln!("{}", format_error(error));
    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        eprintln!("Tip: {}", tip);
    }
}
