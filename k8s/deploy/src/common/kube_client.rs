use crate::common::error::{
    K8sClientConfig, K8sClientGeneration, KubeconfigParse, Result, ServerVersion,
};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::Api,
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config,
};
use snafu::ResultExt;
use tracing::debug;

/// A connection binding to one Kubernetes cluster. The kube::Client is configured from the
/// given kubeconfig text, never from the ambient KUBECONFIG.
#[derive(Clone)]
pub(crate) struct ClusterProvider {
    name: String,
    client: Client,
}

impl ClusterProvider {
    /// Builds the provider from the contents of a kubeconfig file.
    pub(crate) async fn new<N>(name: N, kubeconfig: &str) -> Result<Self>
    where
        N: ToString,
    {
        let name = name.to_string();

        let parsed = Kubeconfig::from_yaml(kubeconfig).context(KubeconfigParse {
            provider: name.clone(),
        })?;
        let config = Config::from_custom_kubeconfig(parsed, &KubeConfigOptions::default())
            .await
            .context(K8sClientConfig {
                provider: name.clone(),
            })?;
        debug!(provider = %name, cluster_url = %config.cluster_url, "Kubernetes client configuration");

        let client = Client::try_from(config).context(K8sClientGeneration)?;

        Ok(Self { name, client })
    }

    /// This is a getter for the provider name.
    pub(crate) fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns a handle to the kube::Client for this cluster.
    pub(crate) fn client(&self) -> Client {
        self.client.clone()
    }

    /// Generate the Namespace api client.
    pub(crate) fn namespaces_api(&self) -> Api<Namespace> {
        Api::all(self.client())
    }

    /// Returns the git version of the API server, e.g. 'v1.29.2'. This is what helm uses as
    /// .Capabilities.KubeVersion.
    pub(crate) async fn server_version(&self) -> Result<String> {
        let info = self
            .client
            .apiserver_version()
            .await
            .context(ServerVersion)?;
        Ok(info.git_version)
    }
}

#[cfg(test)]
mod tests {
    use super::ClusterProvider;
    use crate::common::error::Error;

    const KUBECONFIG: &str = r#"apiVersion: v1
kind: Config
clusters:
- name: docker-desktop
  cluster:
    server: https://127.0.0.1:6443
    insecure-skip-tls-verify: true
contexts:
- name: docker-desktop
  context:
    cluster: docker-desktop
    user: docker-desktop
    namespace: jobs
current-context: docker-desktop
users:
- name: docker-desktop
  user:
    token: not-a-real-token
"#;

    #[tokio::test]
    async fn provider_from_kubeconfig_text() {
        let provider = ClusterProvider::new("docker-desktop", KUBECONFIG)
            .await
            .unwrap();

        assert_eq!(provider.name(), "docker-desktop");
        assert_eq!(provider.client().default_namespace(), "jobs");
    }

    #[tokio::test]
    async fn malformed_kubeconfig_is_rejected() {
        let result = ClusterProvider::new("docker-desktop", "clusters: [").await;
        assert!(matches!(result, Err(Error::KubeconfigParse { .. })));
    }

    #[tokio::test]
    async fn unknown_current_context_is_rejected() {
        let kubeconfig = KUBECONFIG.replace(
            "current-context: docker-desktop",
            "current-context: kind-kind",
        );
        let result = ClusterProvider::new("docker-desktop", kubeconfig.as_str()).await;
        assert!(matches!(result, Err(Error::K8sClientConfig { .. })));
    }
}
