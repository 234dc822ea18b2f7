use crate::common::constants::{CHART_NAME, CHART_VERSION, NAMESPACE_ENV};
use clap::{ArgAction, Parser, ValueEnum};

/// Validate inputs which can only be checked against the filesystem, the helm binary or the
/// cluster.
pub(crate) mod validators;

/// These are the supported cli configuration options for the deployment.
#[derive(Parser, Debug)]
#[command(name = "jobconnect-deploy", version)]
#[command(about = format!("Deploys the {CHART_NAME} Helm chart, version {CHART_VERSION}"), long_about = None)]
pub(crate) struct CliArgs {
    /// This is the Kubernetes Namespace to deploy into. Falls back to 'default' when unset or
    /// empty.
    #[arg(short, long, env = NAMESPACE_ENV)]
    namespace: Option<String>,

    /// Render the chart and send the objects with a server-side dry run, without persisting
    /// anything.
    #[arg(long, default_value_t = false)]
    preview: bool,

    /// Formatting style to be used while logging.
    #[arg(value_enum, default_value_t = FmtStyle::Pretty, short, long)]
    fmt_style: FmtStyle,

    /// Use ANSI colors for the logs.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    ansi_colors: bool,
}

impl CliArgs {
    /// This returns the Namespace override, if any.
    pub(crate) fn namespace(&self) -> Option<String> {
        self.namespace.clone()
    }

    /// This is a predicate to decide if the deployment is only previewed.
    pub(crate) fn preview(&self) -> bool {
        self.preview
    }

    /// This returns formatting style to be used.
    pub(crate) fn fmt_style(&self) -> FmtStyle {
        self.fmt_style
    }

    /// This returns ansi_colours arg.
    pub(crate) fn ansi_colours(&self) -> bool {
        self.ansi_colors
    }
}

/// Log line formats supported by the tracing subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum FmtStyle {
    Pretty,
    Compact,
    Json,
}
