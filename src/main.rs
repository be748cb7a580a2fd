use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use log::info;

mod arithmetic;
mod block_iterator;
mod config;
mod digits;
mod driver;
mod error;
mod logger;
mod presenter;
mod scanner;

use config::{Config, Overrides, SearchConfig};
use digits::PiDigits;
use driver::SearchState;
use presenter::{Artifacts, ColorMap};

const RULE: &str = "============================================================";

#[derive(Parser, Debug)]
#[command(version, about = "Search the digits of pi for long runs of 9s and 0s")]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    search: SearchArgs,
}

#[derive(ClapArgs, Debug)]
struct SearchArgs {
    /// Run length of blanked digits to search for
    #[arg(short, long)]
    target: Option<usize>,

    /// Digits added between scans
    #[arg(short, long)]
    chunk_size: Option<usize>,

    /// Largest number of digits to compute
    #[arg(short, long)]
    max_digits: Option<usize>,

    /// Directory for the output files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Characters shown in the colorized preview
    #[arg(long)]
    preview_chars: Option<usize>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a saved digits or replaced file without recomputing pi
    Rescan {
        file: PathBuf,

        /// Run length of blanked digits to search for
        #[arg(short, long)]
        target: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.log_level.as_deref());

    match args.command {
        Some(Command::Rescan { file, target }) => rescan(file, target),
        None => run_search(args.search),
    }
}

fn run_search(args: SearchArgs) -> anyhow::Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    config.apply(Overrides {
        target_run: args.target,
        chunk_size: args.chunk_size,
        max_digits: args.max_digits,
        output_dir: args.output_dir,
        preview_chars: args.preview_chars,
    });
    config.validate()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.print_config {
        write!(out, "{}", config.to_toml()?)?;
        return Ok(());
    }

    let SearchConfig {
        target_run,
        chunk_size,
        max_digits,
    } = config.search;

    writeln!(out, "{RULE}")?;
    writeln!(out, "PI DIGITS PROCESSOR - SEARCH FOR {target_run} CONSECUTIVE SPACES")?;
    writeln!(out, "{RULE}\n")?;
    writeln!(out, "Searching for {target_run} consecutive spaces (9s or 0s)...")?;
    writeln!(out, "Processing in chunks of {chunk_size} digits...\n")?;
    out.flush()?;

    let mut source = PiDigits::with_ceiling(max_digits);
    let outcome = driver::search(&mut source, &config.search, |progress| {
        // Best effort; a broken stdout surfaces at the next report write.
        let _ = writeln!(
            out,
            "  Processed {} digits... max consecutive spaces so far: {}",
            progress.digits,
            progress.longest_run
        );
    })
    .context("search failed")?;

    match outcome.state {
        SearchState::Found => {
            writeln!(
                out,
                "\n✓ Found {target_run}+ consecutive spaces at position {}!",
                outcome.position()
            )?;
            writeln!(out, "  Total digits processed: {}", outcome.digits_processed)?;
        }
        SearchState::Exhausted => {
            writeln!(
                out,
                "\n✗ Did not find {target_run} consecutive spaces in first {max_digits} digits"
            )?;
        }
    }
    writeln!(out, "  Maximum consecutive spaces found: {}", outcome.longest_run)?;

    let artifacts = Artifacts::in_dir(&config.output.dir);
    presenter::present(
        &outcome,
        &artifacts,
        &ColorMap::rainbow(),
        config.output.preview_chars,
        &mut out,
    )
    .context("failed to save results")?;

    writeln!(out, "\n{RULE}")?;
    writeln!(out, "Processing complete!")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "\nFiles created:")?;
    writeln!(
        out,
        "- {} (original {} PI digits)",
        artifacts.digits.display(),
        outcome.digits_processed
    )?;
    writeln!(out, "- {} (with 9 and 0 replaced by spaces)", artifacts.replaced.display())?;
    writeln!(out, "- {} (colored digits with spaces)", artifacts.colored.display())?;

    if outcome.hit.is_some() {
        writeln!(
            out,
            "\n★ {target_run} consecutive spaces found at position {}!",
            outcome.position()
        )?;
    }
    info!("search finished in state {:?}", outcome.state);
    Ok(())
}

fn rescan(file: PathBuf, target: Option<usize>) -> anyhow::Result<()> {
    let target = target.unwrap_or(SearchConfig::default().target_run);
    SearchConfig {
        target_run: target,
        ..SearchConfig::default()
    }
    .validate()?;

    let read_error = |source| error::Error::Read {
        path: file.clone(),
        source,
    };
    let blocks = block_iterator::iter_file_blocks(&file).map_err(read_error)?;
    let outcome = scanner::scan_blocks(blocks, target).map_err(read_error)?;

    match outcome.hit {
        Some(hit) => println!(
            "✓ Found {}+ consecutive spaces at position {} in {}",
            target,
            hit.start,
            file.display()
        ),
        None => println!(
            "✗ Did not find {} consecutive spaces in {}",
            target,
            file.display()
        ),
    }
    println!("  Maximum consecutive spaces found: {}", outcome.longest);
    Ok(())
}
