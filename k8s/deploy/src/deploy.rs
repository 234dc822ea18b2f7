use crate::{
    common::{
        constants::PROVIDER_NAME, error::Result, file::read_kubeconfig,
        kube_client::ClusterProvider,
    },
    config::DeployConfig,
    helm::client::HelmClient,
    opts::validators::{
        validate_helm_chart_dir, validate_helmv3_in_path, validate_namespace,
        validate_values_files,
    },
};
use apply::ManifestApplier;
use declaration::ChartDeclaration;
use manifest::{parse_manifests, sort_for_apply};
use tracing::info;

/// Contains the server-side apply of rendered objects.
pub(crate) mod apply;

/// Contains the declared chart resource.
pub(crate) mod declaration;

/// Contains tools to split and order rendered manifests.
pub(crate) mod manifest;

/// The outcome of one deployment.
#[derive(Debug)]
pub(crate) struct DeploySummary {
    declaration: ChartDeclaration,
    applied: Vec<String>,
    preview: bool,
}

impl DeploySummary {
    /// This is a getter for the chart declaration which was deployed.
    pub(crate) fn declaration(&self) -> &ChartDeclaration {
        &self.declaration
    }

    /// 'Kind/name' of every applied object, in apply order.
    pub(crate) fn applied(&self) -> &[String] {
        self.applied.as_slice()
    }

    /// Whether the objects were only sent as a dry run.
    pub(crate) fn preview(&self) -> bool {
        self.preview
    }
}

/// Deploys the chart: reads the kubeconfig, builds the cluster provider, declares the chart,
/// renders it with helm and applies every rendered object. Any failure ends the deployment.
pub(crate) async fn deploy(config: &DeployConfig, preview: bool) -> Result<DeploySummary> {
    let kubeconfig = read_kubeconfig(config.kubeconfig_path()).await?;
    let provider = ClusterProvider::new(PROVIDER_NAME, kubeconfig.as_str()).await?;

    let declaration = ChartDeclaration::new(config, provider.name());
    info!(
        chart = declaration.chart(),
        version = declaration.version(),
        namespace = declaration.namespace(),
        provider = declaration.provider(),
        "Declared chart resource"
    );

    let helm = HelmClient::builder()
        .with_kube_version(provider.server_version().await?)
        .build();

    validate_helmv3_in_path(&helm)?;
    validate_helm_chart_dir(&declaration)?;
    validate_values_files(&declaration)?;
    validate_namespace(&provider, declaration.namespace()).await?;
    info!("Validated all inputs");

    let rendered = helm.template(&declaration)?;
    let mut objects = parse_manifests(rendered.as_str())?;
    sort_for_apply(&mut objects);
    info!(objects = objects.len(), "Rendered Helm chart");

    let applied = ManifestApplier::new(provider.client(), declaration.namespace(), preview)
        .apply_all(objects.as_slice())
        .await?;

    Ok(DeploySummary {
        declaration,
        applied,
        preview,
    })
}
