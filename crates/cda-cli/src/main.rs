//! cda-resolve CLI tool
//!
//! Resolves links in a content delivery batch (a sync feed page or a query
//! response) and prints the resolved batch as JSON.
//!
//! Usage:
//!   cda-resolve <batch.json|-> [--locales en-US,de-DE] [--default-locale en-US]
//!               [--nullify] [--stats]

use cda_model::Batch;
use cda_resolver::config::parse_locale_list;
use cda_resolver::{resolve, ResolverConfig};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_usage() {
    eprintln!("cda-resolve - Resolve links in a content delivery batch");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cda-resolve <batch.json|-> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --locales <codes>         Comma-separated locale codes");
    eprintln!("  --default-locale <code>   Locale for query responses without sys.locale");
    eprintln!("  --nullify                 Drop unresolvable links");
    eprintln!("  --stats                   Print link counts to stderr as JSON");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CDA_LOCALES               Default for --locales (default: en-US)");
    eprintln!("  CDA_DEFAULT_LOCALE        Default for --default-locale");
    eprintln!("  CDA_NULLIFY_UNRESOLVED    Default for --nullify (default: false)");
    eprintln!("  RUST_LOG                  Log filter");
}

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    input: Option<PathBuf>,
    locales: Option<String>,
    default_locale: Option<String>,
    nullify: bool,
    stats: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--locales" => {
                let value = iter.next().ok_or("--locales requires a value")?;
                parsed.locales = Some(value.clone());
            }
            "--default-locale" => {
                let value = iter.next().ok_or("--default-locale requires a value")?;
                parsed.default_locale = Some(value.clone());
            }
            "--nullify" => parsed.nullify = true,
            "--stats" => parsed.stats = true,
            "-h" | "--help" => return Err(String::new()),
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            path => {
                if parsed.input.is_some() {
                    return Err(format!("unexpected argument {path}"));
                }
                parsed.input = Some(PathBuf::from(path));
            }
        }
    }

    if parsed.input.is_none() {
        return Err("missing batch file".to_string());
    }
    Ok(parsed)
}

fn build_config(args: &Args) -> cda_resolver::Result<ResolverConfig> {
    let mut config = ResolverConfig::from_env();
    if let Some(raw) = &args.locales {
        config = config.with_locales(parse_locale_list(raw)?)?;
    }
    if let Some(code) = &args.default_locale {
        config = config.with_default_locale(code.clone())?;
    }
    if args.nullify {
        config = config.with_nullify_unresolved(true);
    }
    Ok(config)
}

fn read_input(path: &Path) -> cda_resolver::Result<serde_json::Value> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

async fn run(args: Args) -> cda_resolver::Result<()> {
    let config = build_config(&args)?;
    let input = args.input.as_ref().ok_or_else(|| {
        cda_resolver::Error::InvalidInput("missing batch file".to_string())
    })?;

    let document = read_input(input)?;
    let batch = Batch::from_json(document, &config.default_locale)?;
    tracing::info!(
        synced = batch.is_synced(),
        items = batch.items().len(),
        locales = config.locales.len(),
        nullify = config.nullify_unresolved,
        "resolving batch"
    );

    let resolved = resolve(batch, config.context()).await?;

    if args.stats {
        eprintln!("{}", serde_json::to_string(&resolved.stats)?);
    }
    println!("{}", serde_json::to_string_pretty(&resolved.batch)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cda_resolve=info,cda_resolver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("Error: {message}");
                eprintln!();
            }
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "resolution failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
