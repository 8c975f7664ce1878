//! morphgen: Regenerates the structure factory methods of a TypeScript
//! project.
//!
//! Usage:
//!   morphgen [--project DIR] [--config FILE] [--check] [--dry-run] [--verbose]
//!
//! Exit codes: 0 when the file was written or is already up to date, 1 when
//! `--check` finds it out of date, 2 on any error.

mod tracing_config;

use clap::Parser as ClapParser;
use morph_codegen::{generate_structure_creators, GenerationError, GenerationOutcome, GeneratorConfig};
use morph_project::Project;
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tracing::debug;

const EXIT_OUT_OF_DATE: i32 = 1;
const EXIT_ERROR: i32 = 2;

#[derive(ClapParser, Debug)]
#[command(name = "morphgen", version, about = "Regenerate structure factory methods")]
struct Cli {
    /// Project root to scan for TypeScript files.
    #[arg(short = 'p', long = "project", value_name = "DIR", default_value = ".")]
    project: PathBuf,

    /// Path to the config file. Defaults to morphgen.json in the project root.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write nothing; exit with 1 if the file is out of date.
    #[arg(long, conflicts_with = "dry_run")]
    check: bool,

    /// Print the regenerated file to stdout instead of writing it.
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Log at debug level.
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    tracing_config::init_tracing(cli.verbose);

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{:?}", miette::Report::new(error));
            EXIT_ERROR
        }
    };
    process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32, GenerationError> {
    let start = Instant::now();
    let config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::load_from_root(&cli.project)?,
    };
    let mut project = Project::discover(&cli.project, &config.discovery_options())?;
    let outcome = generate_structure_creators(&project, &config)?;
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "generation finished");

    if cli.check {
        if outcome.is_up_to_date() {
            eprintln!("{} is up to date.", outcome.path);
            return Ok(0);
        }
        eprintln!("{} is out of date. Run morphgen to regenerate it.", outcome.path);
        return Ok(EXIT_OUT_OF_DATE);
    }

    if cli.dry_run {
        print!("{}", outcome.new_text);
        return Ok(0);
    }

    match outcome.write(&mut project)? {
        Some(path) => eprintln!("Wrote {} ({}).", path.display(), summary(&outcome)),
        None => eprintln!("{} is up to date.", outcome.path),
    }
    Ok(0)
}

fn summary(outcome: &GenerationOutcome) -> String {
    let plural = |count: usize, noun: &str| format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" });
    format!(
        "{}, {} added, {} removed",
        plural(outcome.created.len(), "factory method"),
        plural(outcome.imports_added.len(), "import"),
        plural(outcome.imports_removed.len(), "import"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_conflicts_with_dry_run() {
        assert!(Cli::try_parse_from(["morphgen", "--check", "--dry-run"]).is_err());
        let cli = Cli::try_parse_from(["morphgen", "-p", "pkg", "--check"]).unwrap();
        assert_eq!(cli.project, PathBuf::from("pkg"));
        assert!(cli.check && !cli.dry_run && cli.config.is_none());
    }
}
