use crate::common::error::{ReadingFile, Result, YamlParseFromFile};
use semver::Version;
use serde::Deserialize;
use snafu::ResultExt;
use std::{fs::read, path::Path};

/// This struct is used to deserialize helm charts' Chart.yaml file.
#[derive(Debug, Deserialize)]
pub(crate) struct Chart {
    /// This is the name of the helm chart.
    name: String,
    /// This is the version of the helm chart.
    version: Version,
}

impl Chart {
    /// This is a getter for the helm chart name.
    pub(crate) fn name(&self) -> &str {
        self.name.as_str()
    }

    /// This is a getter for the helm chart version.
    pub(crate) fn version(&self) -> &Version {
        &self.version
    }
}

impl TryFrom<&Path> for Chart {
    type Error = crate::common::error::Error;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let buf = read(path).context(ReadingFile {
            filepath: path.to_path_buf(),
        })?;

        serde_yaml::from_slice(buf.as_slice()).context(YamlParseFromFile {
            filepath: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Chart;
    use crate::common::error::Error;
    use semver::Version;
    use std::fs;

    #[test]
    fn chart_yaml_is_deserialized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Chart.yaml");
        fs::write(
            &path,
            "apiVersion: v2\nname: jobconnect\nversion: 2025.10.1\nappVersion: \"1.0\"\n",
        )
        .unwrap();

        let chart = Chart::try_from(path.as_path()).unwrap();
        assert_eq!(chart.name(), "jobconnect");
        assert_eq!(chart.version(), &Version::new(2025, 10, 1));
    }

    #[test]
    fn non_semver_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Chart.yaml");
        fs::write(&path, "name: jobconnect\nversion: latest\n").unwrap();

        assert!(matches!(
            Chart::try_from(path.as_path()),
            Err(Error::YamlParseFromFile { .. })
        ));
    }
}
