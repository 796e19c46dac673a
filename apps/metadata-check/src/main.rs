use std::path::PathBuf;

use {
    anyhow::{Context, Result},
    clap::Parser,
    peerlink_pairing::{AppMetadata, OptionalFields},
    tracing::info,
    tracing_subscriber::EnvFilter,
};

/// Validate a pairing metadata file and print its wire encoding.
///
/// Reads the app metadata a peer would present during pairing (TOML, YAML or
/// JSON), checks it the same way a receiving peer would, and writes the
/// canonical JSON record to stdout.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Metadata file. Defaults to `$PEERLINK_METADATA` or the platform config dir.
    path: Option<PathBuf>,

    /// Write absent optional fields as `null` instead of omitting them.
    #[arg(long)]
    explicit_null: bool,

    /// Emit logs as JSON lines.
    #[arg(long, env = "PEERLINK_LOG_JSON")]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn render(metadata: &AppMetadata, explicit_null: bool) -> Result<String> {
    let fields = if explicit_null {
        OptionalFields::ExplicitNull
    } else {
        OptionalFields::Omit
    };
    serde_json::to_string_pretty(&metadata.encode_with(fields)).context("failed to render metadata")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let path = match args.path {
        Some(path) => path,
        None => peerlink_config::config_path().context("failed to resolve metadata path")?,
    };
    let metadata = peerlink_config::load_metadata(&path)
        .with_context(|| format!("invalid app metadata in {}", path.display()))?;

    info!(
        name = metadata.name(),
        icons = metadata.icons().len(),
        redirect = metadata.redirect_target().unwrap_or("-"),
        "app metadata is valid"
    );
    println!("{}", render(&metadata, args.explicit_null)?);
    Ok(())
}
