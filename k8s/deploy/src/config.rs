use crate::{
    common::{
        constants::{
            CHART_SUBPATH, DEFAULT_NAMESPACE, HOME_ENV, KUBECONFIG_SUBPATH, VALUES_DIR,
            VALUES_FILE,
        },
        error::{HomeNotSet, Result, WorkingDirectory},
    },
    opts::CliArgs,
};
use snafu::{ensure, OptionExt, ResultExt};
use std::{
    env,
    path::{Component, Path, PathBuf},
};

/// Inputs of a deployment, resolved once at startup and passed down by reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DeployConfig {
    namespace: String,
    kubeconfig_path: PathBuf,
    chart_path: PathBuf,
    values_file: PathBuf,
}

impl DeployConfig {
    /// Builds the configuration from explicit inputs. This does no I/O, so a missing home
    /// directory fails here, before the kubeconfig is ever touched.
    pub(crate) fn new(
        namespace: Option<String>,
        home: Option<PathBuf>,
        workdir: PathBuf,
    ) -> Result<Self> {
        let home = home.context(HomeNotSet)?;
        ensure!(!home.as_os_str().is_empty(), HomeNotSet);

        Ok(Self {
            namespace: resolve_namespace(namespace),
            kubeconfig_path: kubeconfig_path(home.as_path()),
            chart_path: chart_path(workdir.as_path()),
            values_file: values_file_path(workdir.as_path()),
        })
    }

    /// Reads $HOME and the current working directory, the only process state this tool uses.
    pub(crate) fn from_env(opts: &CliArgs) -> Result<Self> {
        let home = env::var_os(HOME_ENV).map(PathBuf::from).context(HomeNotSet)?;
        let workdir = env::current_dir().context(WorkingDirectory)?;
        Self::new(opts.namespace(), Some(home), workdir)
    }

    /// This is a getter for the target Kubernetes Namespace.
    pub(crate) fn namespace(&self) -> &str {
        self.namespace.as_str()
    }

    /// This is a getter for the kubeconfig filepath.
    pub(crate) fn kubeconfig_path(&self) -> &Path {
        self.kubeconfig_path.as_path()
    }

    /// This is a getter for the Helm chart directory.
    pub(crate) fn chart_path(&self) -> &Path {
        self.chart_path.as_path()
    }

    /// This is a getter for the values overlay filepath.
    pub(crate) fn values_file(&self) -> &Path {
        self.values_file.as_path()
    }
}

/// Returns the Namespace override if it is set to something, else the default Namespace.
pub(crate) fn resolve_namespace(namespace: Option<String>) -> String {
    namespace
        .filter(|ns| !ns.is_empty())
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
}

/// <home>/.kube/config
pub(crate) fn kubeconfig_path(home: &Path) -> PathBuf {
    KUBECONFIG_SUBPATH
        .iter()
        .fold(home.to_path_buf(), |path, component| path.join(component))
}

/// <workdir>/dev/jobconnect.yaml
pub(crate) fn values_file_path(workdir: &Path) -> PathBuf {
    workdir.join(VALUES_DIR).join(VALUES_FILE)
}

/// <workdir>/../helm/jobconnect, with the parent directory folded in.
pub(crate) fn chart_path(workdir: &Path) -> PathBuf {
    normalize(
        CHART_SUBPATH
            .iter()
            .fold(workdir.to_path_buf(), |path, component| path.join(component))
            .as_path(),
    )
}

/// Lexically removes '.' and '..' components. Symlinks are not followed.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match normalized.components().next_back() {
                    Some(Component::Normal(_)) => normalized.pop(),
                    Some(Component::RootDir | Component::Prefix(_)) => true,
                    _ => false,
                };
                if !popped {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
