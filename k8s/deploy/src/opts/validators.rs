use crate::{
    common::{
        error::{
            FindingHelmChart, GetNamespace, NotADirectory, NotAFile, Result, ValidateDirPath,
            ValidateFilePath,
        },
        kube_client::ClusterProvider,
    },
    deploy::declaration::ChartDeclaration,
    helm::{chart::Chart, client::HelmClient},
};
use snafu::{ensure, ResultExt};
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

/// Validate that the helm v3 binary is present in the shell's $PATH.
pub(crate) fn validate_helmv3_in_path(helm: &HelmClient) -> Result<()> {
    let version = helm.version()?;
    debug!(%version, "Found helm binary");
    Ok(())
}

/// Validate the declared helm chart directory path:
/// - validate if the path exists.
/// - validate if the Chart.yaml file and the templates directory are present.
/// - validate if the chart name in the Chart.yaml file is the declared chart name.
///
/// A chart version which differs from the declared version is only logged, helm decides.
pub(crate) fn validate_helm_chart_dir(declaration: &ChartDeclaration) -> Result<()> {
    let dir_path = declaration.path().to_path_buf();

    let path_exists_and_is_dir = |path: PathBuf| -> Result<bool> {
        fs::metadata(path.as_path())
            .map(|m| m.is_dir())
            .context(ValidateDirPath { path })
    };

    let path_exists_and_is_file = |path: PathBuf| -> Result<bool> {
        fs::metadata(path.as_path())
            .map(|m| m.is_file())
            .context(ValidateFilePath { path })
    };

    ensure!(
        path_exists_and_is_dir(dir_path.clone())?,
        NotADirectory { path: dir_path }
    );

    // Validate Chart.yaml file.
    let chart_yaml_path = dir_path.join("Chart.yaml");
    ensure!(
        path_exists_and_is_file(chart_yaml_path.clone())?,
        NotAFile {
            path: chart_yaml_path.clone()
        }
    );

    let chart = Chart::try_from(chart_yaml_path.as_path())?;
    ensure!(
        chart.name().eq(declaration.chart()),
        FindingHelmChart {
            path: dir_path.clone(),
            name: chart.name().to_string(),
        }
    );

    if chart.version().to_string().ne(declaration.version()) {
        warn!(
            chart_version = %chart.version(),
            declared_version = declaration.version(),
            "Helm chart version differs from the declared version"
        );
    }

    // Validate templates directory.
    let templates_dir_path = dir_path.join("templates");
    ensure!(
        path_exists_and_is_dir(templates_dir_path.clone())?,
        NotADirectory {
            path: templates_dir_path
        }
    );

    Ok(())
}

/// Validate that every values overlay exists and holds a YAML mapping.
pub(crate) fn validate_values_files(declaration: &ChartDeclaration) -> Result<()> {
    for values in declaration.value_yaml_files() {
        values.load()?;
    }
    Ok(())
}

/// This checks for 2 things:
/// - if the kubernetes API is reachable.
/// - if the input namespace exists.
pub(crate) async fn validate_namespace(provider: &ClusterProvider, ns: &str) -> Result<()> {
    provider
        .namespaces_api()
        .get(ns)
        .await
        .context(GetNamespace {
            namespace: ns.to_string(),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_helm_chart_dir, validate_values_files};
    use crate::{
        common::error::Error, config::DeployConfig, deploy::declaration::ChartDeclaration,
    };
    use std::{fs, path::Path};

    /// Lays out <root>/helm/jobconnect and <root>/pulumi/dev/jobconnect.yaml, and declares the
    /// chart from <root>/pulumi.
    fn fixture(root: &Path, chart_yaml: &str) -> ChartDeclaration {
        let chart_dir = root.join("helm").join("jobconnect");
        fs::create_dir_all(chart_dir.join("templates")).unwrap();
        fs::write(chart_dir.join("Chart.yaml"), chart_yaml).unwrap();

        let workdir = root.join("pulumi");
        fs::create_dir_all(workdir.join("dev")).unwrap();
        fs::write(workdir.join("dev").join("jobconnect.yaml"), "replicaCount: 1\n").unwrap();

        let config = DeployConfig::new(None, Some("/home/alice".into()), workdir).unwrap();
        ChartDeclaration::new(&config, "docker-desktop")
    }

    #[test]
    fn valid_chart_dir() {
        let root = tempfile::tempdir().unwrap();
        let decl = fixture(root.path(), "name: jobconnect\nversion: 2025.10.1\n");

        validate_helm_chart_dir(&decl).unwrap();
        validate_values_files(&decl).unwrap();
    }

    #[test]
    fn version_mismatch_is_not_fatal() {
        let root = tempfile::tempdir().unwrap();
        let decl = fixture(root.path(), "name: jobconnect\nversion: 2025.9.0\n");

        validate_helm_chart_dir(&decl).unwrap();
    }

    #[test]
    fn wrong_chart_name() {
        let root = tempfile::tempdir().unwrap();
        let decl = fixture(root.path(), "name: other\nversion: 2025.10.1\n");

        match validate_helm_chart_dir(&decl) {
            Err(Error::FindingHelmChart { name, .. }) => assert_eq!(name, "other"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_templates_dir() {
        let root = tempfile::tempdir().unwrap();
        let decl = fixture(root.path(), "name: jobconnect\nversion: 2025.10.1\n");
        fs::remove_dir(decl.path().join("templates")).unwrap();

        assert!(matches!(
            validate_helm_chart_dir(&decl),
            Err(Error::ValidateDirPath { .. })
        ));
    }

    #[test]
    fn missing_chart_dir() {
        let root = tempfile::tempdir().unwrap();
        let config =
            DeployConfig::new(None, Some("/home/alice".into()), root.path().join("pulumi"))
                .unwrap();
        let decl = ChartDeclaration::new(&config, "docker-desktop");

        assert!(matches!(
            validate_helm_chart_dir(&decl),
            Err(Error::ValidateDirPath { .. })
        ));
        assert!(matches!(
            validate_values_files(&decl),
            Err(Error::ReadingFile { .. })
        ));
    }
}
