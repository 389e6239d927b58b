use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use indexator::{Config, Dispatcher, IndexKind};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Kind of index to load, one of: char-string, int-string, int-int.
    /// Defaults to the configured kind.
    #[arg(long)]
    kind: Option<String>,
    /// Path to a configuration file to use instead of the default one.
    #[arg(long)]
    config: Option<PathBuf>,
    /// List available index kinds and exit.
    #[arg(long)]
    list_kinds: bool,
    /// Print the number of records instead of the index.
    #[arg(long)]
    count: bool,
    /// Only print records stored under the given keys.
    #[arg(long = "key", name = "key")]
    keys: Vec<String>,
    /// File of `key ; value` lines to load. Files ending in `.gz` are
    /// decompressed.
    #[arg(name = "path", required_unless_present = "list_kinds")]
    path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::builder().from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .finish()
        .try_init()?;

    let args = Args::try_parse()?;

    if args.list_kinds {
        println!("Available `--kind` arguments:");

        for kind in IndexKind::ALL {
            println!("{} - {}", kind.name(), kind.description());
        }

        return Ok(());
    }

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    let config = Config::load(&config_path)?;

    let kind = match &args.kind {
        Some(kind) => IndexKind::parse_keyword(kind)
            .with_context(|| anyhow!("Invalid index kind `{kind}`"))?,
        None => config.kind,
    };

    let path = args.path.context("Missing path to load")?;

    let mut dispatcher = Dispatcher::new().with_separator(config.separator);

    let report = dispatcher
        .load(kind, &path)
        .with_context(|| anyhow!("{}", path.display()))?;

    tracing::info!(?report, %kind, "Loaded index");

    if args.count {
        println!("{} record(s)", dispatcher.len()?);
        return Ok(());
    }

    if args.keys.is_empty() {
        println!("{}", dispatcher.render()?);
        return Ok(());
    }

    for key in &args.keys {
        let values = dispatcher.get(key)?;

        if values.is_empty() {
            println!("nothing for `{key}`");
            continue;
        }

        println!("{key} ({}):", values.len());

        for (index, value) in values.iter().enumerate() {
            println!("  #{index} {value}");
        }
    }

    Ok(())
}
