use crate::common::error::{ReadingKubeconfig, Result};
use snafu::ResultExt;
use std::path::Path;

/// Reads the kubeconfig file as text. This is the only filesystem read which has to complete
/// before the cluster provider can be built.
pub(crate) async fn read_kubeconfig(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .context(ReadingKubeconfig {
            filepath: path.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::read_kubeconfig;
    use crate::common::error::Error;
    use std::fs;

    #[tokio::test]
    async fn kubeconfig_is_read_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, "kind: Config\n").unwrap();

        assert_eq!(read_kubeconfig(&path).await.unwrap(), "kind: Config\n");
    }

    #[tokio::test]
    async fn missing_kubeconfig_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");

        match read_kubeconfig(&path).await {
            Err(Error::ReadingKubeconfig { filepath, .. }) => assert_eq!(filepath, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
