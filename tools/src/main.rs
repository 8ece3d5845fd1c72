mod sanitize;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use quicktrans_core::{
    Config, Dictionary, DictionaryLoader, DictionarySource, DirectorySource, HttpSource,
};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "quicktrans", about = "Dictionary-based Chinese to Vietnamese translation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean a raw key=value dictionary file
    Sanitize {
        input: PathBuf,
        /// Accepted entries (default: <input stem>Fix.txt next to the input)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Entries with empty values (default: Rac.txt next to the input)
        #[arg(long)]
        rejects: Option<PathBuf>,
    },
    /// Translate a file, or stdin when no file is given
    Translate(TranslateArgs),
}

#[derive(Args)]
struct TranslateArgs {
    /// Text to translate; reads stdin if omitted
    input: Option<PathBuf>,

    /// Directory holding the dictionary files
    #[arg(long, conflicts_with_all = ["url", "snapshot"])]
    dir: Option<PathBuf>,

    /// Base URL the dictionary files are served under
    #[arg(long, conflicts_with = "snapshot")]
    url: Option<String>,

    /// Load prebuilt tables written by --save-snapshot
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Write the loaded tables to this file
    #[arg(long)]
    save_snapshot: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Print one token per line instead of translating
    #[arg(long)]
    tokens: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Sanitize {
            input,
            output,
            rejects,
        } => run_sanitize(&input, output, rejects),
        Command::Translate(args) => run_translate(args),
    }
}

fn run_sanitize(input: &Path, output: Option<PathBuf>, rejects: Option<PathBuf>) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let result = sanitize::sanitize(&content);

    for r in &result.rejected {
        warn!(line = r.line_no, problem = %r.problem, "skipped: {}", r.line);
    }

    let dir = input.parent().unwrap_or_else(|| Path::new("."));
    let output = output.unwrap_or_else(|| {
        let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("dict");
        dir.join(format!("{}Fix.txt", stem))
    });
    let rejects = rejects.unwrap_or_else(|| dir.join("Rac.txt"));

    std::fs::write(&output, result.accepted_text())
        .with_context(|| format!("writing {}", output.display()))?;
    std::fs::write(&rejects, result.empty_values_text())
        .with_context(|| format!("writing {}", rejects.display()))?;

    info!(
        accepted = result.accepted.len(),
        empty_values = result.empty_values.len(),
        rejected = result.rejected.len(),
        duplicates = result.duplicates,
        "wrote {} and {}",
        output.display(),
        rejects.display()
    );
    Ok(())
}

fn load_with<S: DictionarySource>(source: S, config: Config) -> Dictionary {
    let dict = DictionaryLoader::new(source, config).load_all();
    for err in dict.report().failures() {
        warn!("{}", err);
    }
    dict
}

fn run_translate(args: TranslateArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load_toml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    let dict = if let Some(path) = &args.snapshot {
        Dictionary::load_bincode(path, config)
            .with_context(|| format!("loading snapshot {}", path.display()))?
    } else if let Some(url) = &args.url {
        let source = HttpSource::with_timeout(url, Duration::from_secs(args.timeout))?;
        load_with(source, config)
    } else if let Some(dir) = &args.dir {
        load_with(DirectorySource::new(dir), config)
    } else {
        bail!("one of --dir, --url or --snapshot is required");
    };

    if let Some(path) = &args.save_snapshot {
        dict.save_bincode(path)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        info!("saved tables to {}", path.display());
    }

    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.tokens {
        for token in dict.tokenize(&text) {
            writeln!(out, "{:?}\t{:?}", token.kind, token.text)?;
        }
    } else {
        writeln!(out, "{}", dict.translate(&text))?;
    }
    Ok(())
}
