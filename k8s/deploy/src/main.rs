use crate::{
    common::{constants::CHART_NAME, error::Result},
    config::DeployConfig,
    deploy::{deploy, DeploySummary},
    opts::{CliArgs, FmtStyle},
};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod deploy;
mod helm;
mod opts;

#[tokio::main]
async fn main() -> Result<()> {
    let opts = CliArgs::parse();
    init_logging(&opts);

    let config = DeployConfig::from_env(&opts).map_err(|error| {
        error!(%error, "Failed to deploy {}", CHART_NAME);
        error
    })?;

    let summary = deploy(&config, opts.preview()).await.map_err(|error| {
        error!(%error, "Failed to deploy {}", CHART_NAME);
        error
    })?;

    print_summary(&summary)
}

/// Initialize logging components -- tracing.
fn init_logging(opts: &CliArgs) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(opts.ansi_colours());

    match opts.fmt_style() {
        FmtStyle::Pretty => builder.pretty().init(),
        FmtStyle::Compact => builder.compact().init(),
        FmtStyle::Json => builder.json().init(),
    }
}

/// Prints the outcome for the user, apart from the logs.
fn print_summary(summary: &DeploySummary) -> Result<()> {
    let declaration = summary.declaration();

    if summary.preview() {
        let yaml = declaration.to_yaml()?;
        let lines: Vec<String> = yaml.lines().map(ToString::to_string).collect();
        console_logger::list("Declared chart resource:", lines.as_slice());
        console_logger::warn(
            "Preview only, nothing was persisted.",
            format!(
                "{} objects were accepted by the API server in a dry run",
                summary.applied().len()
            )
            .as_str(),
        );
    } else {
        console_logger::success(
            format!(
                "Deployed {} {} into Namespace '{}' through provider '{}'",
                declaration.chart(),
                declaration.version(),
                declaration.namespace(),
                declaration.provider()
            )
            .as_str(),
        );
    }

    console_logger::list("Objects:", summary.applied());
    Ok(())
}
