/// This is the name of the Helm chart, which is also used as the release name.
pub(crate) const CHART_NAME: &str = "jobconnect";

/// This is the version of the Helm chart which is deployed.
pub(crate) const CHART_VERSION: &str = "2025.10.1";

/// This is the Kubernetes Namespace used when no override is configured.
pub(crate) const DEFAULT_NAMESPACE: &str = "default";

/// This is the ENV which carries the Namespace override.
pub(crate) const NAMESPACE_ENV: &str = "K8S_NAMESPACE";

/// This is the ENV which points to the user's home directory.
pub(crate) const HOME_ENV: &str = "HOME";

/// This is the name of the cluster provider built from the kubeconfig.
pub(crate) const PROVIDER_NAME: &str = "docker-desktop";

/// Path components of the kubeconfig file, relative to the home directory.
pub(crate) const KUBECONFIG_SUBPATH: [&str; 2] = [".kube", "config"];

/// Path components of the Helm chart directory, relative to the working directory.
pub(crate) const CHART_SUBPATH: [&str; 3] = ["..", "helm", CHART_NAME];

/// This is the directory which holds the values overlay, relative to the working directory.
pub(crate) const VALUES_DIR: &str = "dev";

/// This is the file name of the values overlay.
pub(crate) const VALUES_FILE: &str = "jobconnect.yaml";

/// This is the helm binary which is expected in $PATH.
pub(crate) const HELM_COMMAND: &str = "helm";

/// This is the field manager for server-side apply requests.
pub(crate) const FIELD_MANAGER: &str = "jobconnect-deploy";
