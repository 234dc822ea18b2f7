use crate::{
    common::{
        constants::HELM_COMMAND,
        error::{
            HelmCommand, HelmTemplateCommand, HelmVersion, HelmVersionCommand, RegexCompile,
            Result, U8VectorToString,
        },
    },
    deploy::declaration::ChartDeclaration,
    vec_to_strings,
};
use regex::Regex;
use snafu::{ensure, ResultExt};
use std::{process::Command, str};
use tracing::debug;

/// This is a builder for HelmClient.
#[derive(Default)]
pub(crate) struct HelmClientBuilder {
    kube_version: Option<String>,
}

impl HelmClientBuilder {
    /// This is a builder option to render against a specific Kubernetes version. Without it,
    /// helm falls back to its own built-in default for .Capabilities.KubeVersion.
    #[must_use]
    pub(crate) fn with_kube_version<J>(mut self, version: J) -> Self
    where
        J: ToString,
    {
        self.kube_version = Some(version.to_string());
        self
    }

    /// Build the HelmClient.
    pub(crate) fn build(self) -> HelmClient {
        HelmClient {
            kube_version: self.kube_version,
        }
    }
}

/// This type runs the helm binary. It only ever renders charts, applying the rendered objects
/// is left to the caller.
#[derive(Clone, Debug)]
pub(crate) struct HelmClient {
    kube_version: Option<String>,
}

impl HelmClient {
    /// This creates an empty builder.
    pub(crate) fn builder() -> HelmClientBuilder {
        HelmClientBuilder::default()
    }

    /// Runs command `helm version --short` and checks that it is a v3 binary. Returns the
    /// version string.
    pub(crate) fn version(&self) -> Result<String> {
        let command: &str = HELM_COMMAND;
        let args: Vec<String> = vec_to_strings!["version", "--short"];

        debug!(%command, ?args, "Helm version command");

        let output = Command::new(command)
            .args(args.clone())
            .output()
            .context(HelmCommand {
                command: command.to_string(),
                args: args.clone(),
            })?;

        let stdout_str = str::from_utf8(output.stdout.as_slice()).context(U8VectorToString)?;
        debug!(stdout=%stdout_str, "Helm version command standard output");
        ensure!(
            output.status.success(),
            HelmVersionCommand {
                command: command.to_string(),
                args,
                std_err: str::from_utf8(output.stderr.as_slice())
                    .context(U8VectorToString)?
                    .to_string()
            }
        );

        let version = stdout_str.trim().to_string();
        ensure!(is_helm_v3(version.as_str())?, HelmVersion { version });

        Ok(version)
    }

    /// The arguments for `helm template` which render the declared chart.
    /// CRDs from the chart's crds/ directory are rendered too, they are applied like any other
    /// object.
    pub(crate) fn template_args(&self, declaration: &ChartDeclaration) -> Vec<String> {
        let mut args: Vec<String> = vec_to_strings![
            "template",
            declaration.resource_name(),
            declaration.path().to_string_lossy(),
            "--namespace",
            declaration.namespace(),
            "--version",
            declaration.version(),
            "--include-crds"
        ];

        if let Some(ref kube_version) = self.kube_version {
            args.extend(vec_to_strings!["--kube-version", kube_version]);
        }

        // Later files take precedence, helm merges them in order.
        for values in declaration.value_yaml_files() {
            args.extend(vec_to_strings!["-f", values.path().to_string_lossy()]);
        }

        args
    }

    /// Runs command `helm template <release_name> <chart_dir> ...` and returns the rendered
    /// multi-document YAML.
    pub(crate) fn template(&self, declaration: &ChartDeclaration) -> Result<String> {
        let command: &str = HELM_COMMAND;
        let args = self.template_args(declaration);

        debug!(%command, ?args, "Helm template command");

        let output = Command::new(command)
            .args(args.clone())
            .output()
            .context(HelmCommand {
                command: command.to_string(),
                args: args.clone(),
            })?;

        ensure!(
            output.status.success(),
            HelmTemplateCommand {
                command: command.to_string(),
                args,
                std_err: str::from_utf8(output.stderr.as_slice())
                    .context(U8VectorToString)?
                    .to_string()
            }
        );

        let stdout_str = str::from_utf8(output.stdout.as_slice()).context(U8VectorToString)?;
        debug!(bytes = stdout_str.len(), "Helm template command standard output");

        Ok(stdout_str.to_string())
    }
}

/// Parse based on regex, to validate if the version string (semver) is v3.x.
fn is_helm_v3(version: &str) -> Result<bool> {
    let regex: &str = r"^v3\.[0-9]+\.[0-9]+";
    Ok(Regex::new(regex)
        .context(RegexCompile {
            expression: regex.to_string(),
        })?
        .is_match(version))
}

#[cfg(test)]
mod tests {
    use super::{is_helm_v3, HelmClient};
    use crate::{config::DeployConfig, deploy::declaration::ChartDeclaration};

    fn declaration() -> ChartDeclaration {
        let config = DeployConfig::new(
            Some("jobs".to_string()),
            Some("/home/alice".into()),
            "/work/pulumi".into(),
        )
        .unwrap();
        ChartDeclaration::new(&config, "docker-desktop")
    }

    #[test]
    fn helm_version_detection() {
        assert!(is_helm_v3("v3.14.2+gc309b6f").unwrap());
        assert!(is_helm_v3("v3.9.0").unwrap());
        assert!(!is_helm_v3("v2.17.0+ga690bad").unwrap());
        assert!(!is_helm_v3("version.BuildInfo{Version:\"v3.14.2\"}").unwrap());
    }

    #[test]
    fn template_args_without_kube_version() {
        let args = HelmClient::builder().build().template_args(&declaration());

        assert_eq!(
            args,
            vec![
                "template",
                "jobconnect",
                "/work/helm/jobconnect",
                "--namespace",
                "jobs",
                "--version",
                "2025.10.1",
                "--include-crds",
                "-f",
                "/work/pulumi/dev/jobconnect.yaml",
            ]
        );
    }

    #[test]
    fn template_args_with_kube_version() {
        let args = HelmClient::builder()
            .with_kube_version("v1.29.2")
            .build()
            .template_args(&declaration());

        assert!(args.iter().any(|a| a == "--include-crds"));
        let at = args.iter().position(|a| a == "--kube-version").unwrap();
        assert_eq!(args[at + 1], "v1.29.2");
        assert_eq!(args.last().map(String::as_str), Some("/work/pulumi/dev/jobconnect.yaml"));
    }
}
