use crate::common::constants::{CHART_NAME, HOME_ENV};
use snafu::Snafu;
use std::path::PathBuf;

/// For use with multiple fallible operations which may fail for different reasons, but are
/// defined withing the same scope and must return to the outer scope (calling scope) using
/// the try operator -- '?'.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))]
pub(crate) enum Error {
    /// Error for when the home directory ENV is not set.
    #[snafu(display("{} is not set, cannot locate the kubeconfig file", HOME_ENV))]
    HomeNotSet,

    /// Error for when the current working directory cannot be determined.
    #[snafu(display("Failed to determine the current working directory: {}", source))]
    WorkingDirectory { source: std::io::Error },

    /// Error for when the kubeconfig file cannot be read.
    #[snafu(display("Failed to read kubeconfig file {}: {}", filepath.display(), source))]
    ReadingKubeconfig {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error for when the kubeconfig text is not a valid kubeconfig.
    #[snafu(display("Failed to parse kubeconfig for provider {}: {}", provider, source))]
    KubeconfigParse {
        source: kube::config::KubeconfigError,
        provider: String,
    },

    /// Error for when a kube::Config cannot be built from the kubeconfig.
    #[snafu(display(
        "Failed to configure Kubernetes client for provider {}: {}",
        provider,
        source
    ))]
    K8sClientConfig {
        source: kube::config::KubeconfigError,
        provider: String,
    },

    /// Error for when Kubernetes API client generation fails.
    #[snafu(display("Failed to generate kubernetes client: {}", source))]
    K8sClientGeneration { source: kube::Error },

    /// Error for a Kubernetes API GET request for a namespace resource fails.
    #[snafu(display("Failed to GET Kubernetes namespace {}: {}", namespace, source))]
    GetNamespace {
        source: kube::Error,
        namespace: String,
    },

    /// Error for when the Kubernetes API server version cannot be fetched.
    #[snafu(display("Failed to GET Kubernetes API server version: {}", source))]
    ServerVersion { source: kube::Error },

    /// Error for when a Helm command fails.
    #[snafu(display(
        "Failed to run Helm command,\ncommand: {},\nargs: {:?},\ncommand_error: {}",
        command,
        args,
        source
    ))]
    HelmCommand {
        source: std::io::Error,
        command: String,
        args: Vec<String>,
    },

    /// Error for when the detailed console output for a command contains non-utf8 bytes.
    #[snafu(display("Failed to convert &[u8] to &str: {}", source))]
    U8VectorToString { source: std::str::Utf8Error },

    /// Error for when the `helm version` command exits with an error.
    #[snafu(display(
        "Helm version command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmVersionCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when regular expression parsing or compilation fails.
    #[snafu(display("Failed to compile regex {}: {}", expression, source))]
    RegexCompile {
        source: regex::Error,
        expression: String,
    },

    /// Error for when Helm v3.x.y is not present in $PATH.
    #[snafu(display("Helm version {} does not start with 'v3.x.y'", version))]
    HelmVersion { version: String },

    /// Error for when the `helm template` command exits with an error.
    #[snafu(display(
        "Helm template command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmTemplateCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when the path to a directory cannot be validated.
    #[snafu(display("Failed to validate directory path {}: {}", path.display(), source))]
    ValidateDirPath {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when the path to a file cannot be validated.
    #[snafu(display("Failed to validate filepath {}: {}", path.display(), source))]
    ValidateFilePath {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when the path is not that of a directory.
    #[snafu(display("{} is not a directory", path.display()))]
    NotADirectory { path: PathBuf },

    /// Error for when the path is not that of a file.
    #[snafu(display("{} is not a file", path.display()))]
    NotAFile { path: PathBuf },

    /// Error for when reading a file fails.
    #[snafu(display("Failed to read file {}: {}", filepath.display(), source))]
    ReadingFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error for when yaml could not be parsed from a file.
    #[snafu(display("Failed to parse YAML at {}: {}", filepath.display(), source))]
    YamlParseFromFile {
        source: serde_yaml::Error,
        filepath: PathBuf,
    },

    /// Error for when a values overlay is valid YAML but not a mapping.
    #[snafu(display("Values file {} does not contain a YAML mapping", filepath.display()))]
    ValuesNotAMapping { filepath: PathBuf },

    /// Error for when the Chart.yaml found in a path names a different chart.
    #[snafu(display(
        "Helm chart in path {} is named '{}', expected '{}'",
        path.display(),
        name,
        CHART_NAME
    ))]
    FindingHelmChart { path: PathBuf, name: String },

    /// Error for when the declaration cannot be serialized for display.
    #[snafu(display("Failed to serialize chart declaration to YAML: {}", source))]
    SerializeDeclaration { source: serde_yaml::Error },

    /// Error for when a rendered manifest document is not valid YAML.
    #[snafu(display("Failed to parse rendered manifest document {}: {}", index, source))]
    ManifestParse {
        source: serde_yaml::Error,
        index: usize,
    },

    /// Error for when a rendered manifest lacks apiVersion or kind.
    #[snafu(display("Rendered manifest document {} has no apiVersion or kind", index))]
    ManifestMissingTypeMeta { index: usize },

    /// Error for when a rendered manifest lacks .metadata.name.
    #[snafu(display("Rendered {} manifest (document {}) has no .metadata.name", kind, index))]
    ManifestMissingName { kind: String, index: usize },

    /// Error for when the API server does not serve a resource kind.
    #[snafu(display("Failed to discover API resource {}/{}: {}", api_version, kind, source))]
    DiscoverKind {
        source: kube::Error,
        api_version: String,
        kind: String,
    },

    /// Error for when a server-side apply request fails.
    #[snafu(display("Failed to apply {} '{}': {}", kind, name, source))]
    ApplyResource {
        source: kube::Error,
        kind: String,
        name: String,
    },
}

/// A wrapper type to remove repeated Result<T, Error> returns.
pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
