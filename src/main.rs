//! PDF unlocking CLI application.
//!
//! This binary stands in for the mailbox collaborator: it reads documents
//! from disk, runs them through the password resolver, and writes readable
//! copies out.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pdfunlock::{
    process_group, BatchItem, LopdfBackend, OutputMode, PasswordResolver, ResolveOutcome,
    ResolverConfig,
};

/// PDF Password Resolver
///
/// Find the password of protected PDFs from a list of candidates and
/// format hints, and write unlocked copies.
#[derive(Parser)]
#[command(name = "pdfunlock")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Unlock a single PDF
    Unlock {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Group key for password reuse (defaults to the input's directory)
        #[arg(short, long, value_name = "KEY")]
        group: Option<String>,

        #[command(flatten)]
        passwords: PasswordArgs,
    },

    /// Print the first candidate password that opens a PDF
    Find {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        passwords: PasswordArgs,
    },

    /// Unlock every PDF in a directory as one password group
    Batch {
        /// Directory containing the PDFs
        #[arg(short, long, value_name = "DIR")]
        dir: PathBuf,

        /// Directory to write unlocked copies into
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Group key for password reuse (defaults to the directory name)
        #[arg(short, long, value_name = "KEY")]
        group: Option<String>,

        #[command(flatten)]
        passwords: PasswordArgs,
    },
}

#[derive(Args)]
struct PasswordArgs {
    /// Candidate password (can be specified multiple times)
    #[arg(short, long, value_name = "PASSWORD")]
    password: Vec<String>,

    /// File with one candidate password per line
    #[arg(long, value_name = "FILE")]
    passwords_file: Option<PathBuf>,

    /// Text describing the password format, e.g. an email body
    #[arg(long, value_name = "TEXT", conflicts_with = "hint_file")]
    hint: Option<String>,

    /// File containing text that describes the password format
    #[arg(long, value_name = "FILE")]
    hint_file: Option<PathBuf>,

    /// Write decrypted PDFs instead of the original protected bytes
    #[arg(long)]
    decrypted: bool,

    /// Delay between candidate passwords in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 0)]
    delay_ms: u64,
}

impl PasswordArgs {
    fn pool(&self) -> Result<Vec<String>> {
        let file_contents = match &self.passwords_file {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
            ),
            None => None,
        };
        Ok(build_pool(&self.password, file_contents.as_deref()))
    }

    fn hint_text(&self) -> Result<Option<String>> {
        match (&self.hint, &self.hint_file) {
            (Some(text), _) => Ok(Some(text.clone())),
            (None, Some(path)) => fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("Failed to read {}", path.display())),
            (None, None) => Ok(None),
        }
    }

    fn resolver(&self) -> PasswordResolver {
        let output = if self.decrypted {
            OutputMode::Decrypted
        } else {
            OutputMode::Original
        };
        let config =
            ResolverConfig::new().with_attempt_delay(Duration::from_millis(self.delay_ms));
        PasswordResolver::new(Box::new(LopdfBackend::new().with_output(output))).with_config(config)
    }
}

/// Merges command-line passwords with a passwords file, dropping blank lines.
///
/// Candidates are kept verbatim, surrounding whitespace included.
fn build_pool(passwords: &[String], file_contents: Option<&str>) -> Vec<String> {
    passwords
        .iter()
        .map(String::as_str)
        .chain(file_contents.into_iter().flat_map(str::lines))
        .filter(|p| !p.trim().is_empty())
        .map(String::from)
        .collect()
}

fn default_group(path: &Path) -> String {
    path.file_name()
        .or_else(|| path.parent().and_then(Path::file_name))
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "default".to_string())
}

/// Command handlers.
struct UnlockHandler {
    verbose: bool,
}

impl UnlockHandler {
    fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn unlock(
        &self,
        input: &Path,
        output: &Path,
        group: Option<&str>,
        args: &PasswordArgs,
    ) -> Result<()> {
        let bytes = read_pdf(input)?;
        let pool = args.pool()?;
        let hint = args.hint_text()?;
        let group = group
            .map(String::from)
            .unwrap_or_else(|| default_group(input.parent().unwrap_or(Path::new("."))));

        let mut resolver = args.resolver();
        let outcome = resolver.resolve(&bytes, &group, &pool, hint.as_deref());

        if self.verbose {
            println!("Input:  {}", input.display());
            println!("Group:  {}", group);
            println!("Candidates: {}", pool.len());
        }

        match outcome {
            ResolveOutcome::Unencrypted(bytes) => {
                write_pdf(output, &bytes)?;
                println!("✓ Not password protected → {}", output.display());
            }
            ResolveOutcome::Unlocked { bytes, source, .. } => {
                write_pdf(output, &bytes)?;
                println!("✓ Unlocked ({:?} password) → {}", source, output.display());
            }
            ResolveOutcome::NeedsPassword { message } => {
                anyhow::bail!("{}: {}", input.display(), message);
            }
            ResolveOutcome::Failed { message } => {
                anyhow::bail!("{}: {}", input.display(), message);
            }
        }

        Ok(())
    }

    fn find(&self, input: &Path, args: &PasswordArgs) -> Result<()> {
        let bytes = read_pdf(input)?;
        let pool = args.pool()?;
        let hint = args.hint_text()?;

        let resolver = args.resolver();
        match resolver.find_first_working_password(&bytes, &pool, hint.as_deref()) {
            Some(password) => {
                println!("{}", password);
                Ok(())
            }
            None => anyhow::bail!("No working password found for {}", input.display()),
        }
    }

    fn batch(
        &self,
        dir: &Path,
        output: &Path,
        group: Option<&str>,
        args: &PasswordArgs,
    ) -> Result<()> {
        let items = collect_items(dir)?;
        let pool = args.pool()?;
        let hint = args.hint_text()?;
        let group = group.map(String::from).unwrap_or_else(|| default_group(dir));

        let items: Vec<BatchItem> = match hint {
            Some(text) => items
                .into_iter()
                .map(|item| item.with_body_text(text.clone()))
                .collect(),
            None => items,
        };

        fs::create_dir_all(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;

        let mut resolver = args.resolver();
        let mut processed = HashSet::new();
        let summary = process_group(&mut resolver, &group, &items, &pool, &mut processed);

        for item in &summary.completed {
            write_pdf(&output.join(&item.name), &item.bytes)?;
        }

        if self.verbose {
            println!("\nBatch Summary ({}):", group);
            println!("  Documents:         {}", items.len());
            println!("  Unlocked/copied:   {}", summary.success_count());
            println!("  Password required: {}", summary.password_required.len());
            println!("  Errors:            {}", summary.errors.len());
        }

        for pending in &summary.password_required {
            println!("⚠ {}: {}", pending.name, pending.message);
        }
        for failed in &summary.errors {
            println!("✗ {}: {}", failed.name, failed.message);
        }
        println!(
            "✓ Wrote {} document(s) → {}",
            summary.success_count(),
            output.display()
        );

        Ok(())
    }
}

fn collect_items(dir: &Path) -> Result<Vec<BatchItem>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    paths.sort();

    paths
        .iter()
        .map(|path| {
            let name = default_group(path);
            Ok::<_, anyhow::Error>(BatchItem::new(
                path.display().to_string(),
                name,
                read_pdf(path)?,
            ))
        })
        .collect()
}

fn read_pdf(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        anyhow::bail!("Input file does not exist: {}", path.display());
    }
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_pdf(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write to {}", path.display()))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let handler = UnlockHandler::new(cli.verbose);

    match &cli.command {
        Commands::Unlock {
            input,
            output,
            group,
            passwords,
        } => handler.unlock(input, output, group.as_deref(), passwords)?,
        Commands::Find { input, passwords } => handler.find(input, passwords)?,
        Commands::Batch {
            dir,
            output,
            group,
            passwords,
        } => handler.batch(dir, output, group.as_deref(), passwords)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_building() {
        let pool = build_pool(
            &["  first ".to_string(), String::new()],
            Some("second\n\n   \n third\r\n"),
        );
        assert_eq!(pool, vec!["  first ", "second", " third"]);

        assert!(build_pool(&[], None).is_empty());
    }

    #[test]
    fn test_default_group() {
        assert_eq!(default_group(Path::new("/mail/alerts@bank.example")), "alerts@bank.example");
        assert_eq!(default_group(Path::new("/statements/jan.pdf")), "jan.pdf");
    }

    #[test]
    fn test_cli_parses_flattened_password_args() {
        let cli = Cli::try_parse_from([
            "pdfunlock", "find", "-i", "a.pdf", "-p", "one", "-p", "two", "--hint", "last 4 digits",
        ])
        .unwrap();
        match cli.command {
            Commands::Find { passwords, .. } => {
                assert_eq!(passwords.password, vec!["one", "two"]);
                assert_eq!(passwords.hint.as_deref(), Some("last 4 digits"));
                assert_eq!(passwords.delay_ms, 0);
            }
            _ => panic!("expected find subcommand"),
        }
    }
}
