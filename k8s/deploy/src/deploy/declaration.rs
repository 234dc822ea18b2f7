use crate::{
    common::{
        constants::{CHART_NAME, CHART_VERSION},
        error::{Result, SerializeDeclaration},
    },
    config::DeployConfig,
    helm::values::ValuesFile,
};
use serde::Serialize;
use snafu::ResultExt;
use std::path::{Path, PathBuf};

/// The desired state of the chart resource: which chart, at which version, with which values,
/// in which Namespace, through which provider. Building it has no side effects, so identical
/// inputs always yield an identical declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChartDeclaration {
    resource_name: String,
    chart: String,
    path: PathBuf,
    version: String,
    namespace: String,
    value_yaml_files: Vec<ValuesFile>,
    provider: String,
}

impl ChartDeclaration {
    /// Declares the jobconnect chart for the given configuration, bound to the named provider.
    pub(crate) fn new<P>(config: &DeployConfig, provider: P) -> Self
    where
        P: ToString,
    {
        Self {
            resource_name: CHART_NAME.to_string(),
            chart: CHART_NAME.to_string(),
            path: config.chart_path().to_path_buf(),
            version: CHART_VERSION.to_string(),
            namespace: config.namespace().to_string(),
            value_yaml_files: vec![ValuesFile::new(config.values_file())],
            provider: provider.to_string(),
        }
    }

    /// This is the name of the declared resource, used as the Helm release name.
    pub(crate) fn resource_name(&self) -> &str {
        self.resource_name.as_str()
    }

    /// This is a getter for the chart name.
    pub(crate) fn chart(&self) -> &str {
        self.chart.as_str()
    }

    /// This is a getter for the chart directory.
    pub(crate) fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// This is a getter for the chart version.
    pub(crate) fn version(&self) -> &str {
        self.version.as_str()
    }

    /// This is a getter for the target Namespace.
    pub(crate) fn namespace(&self) -> &str {
        self.namespace.as_str()
    }

    /// This is a getter for the values overlays, in the order helm merges them.
    pub(crate) fn value_yaml_files(&self) -> &[ValuesFile] {
        self.value_yaml_files.as_slice()
    }

    /// This is a getter for the provider name.
    pub(crate) fn provider(&self) -> &str {
        self.provider.as_str()
    }

    /// Renders the declaration as YAML, for preview output.
    pub(crate) fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context(SerializeDeclaration)
    }
}
