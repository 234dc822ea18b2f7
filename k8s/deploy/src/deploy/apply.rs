use crate::{
    common::{
        constants::FIELD_MANAGER,
        error::{ApplyResource, DiscoverKind, Result},
    },
    deploy::manifest::{display_name, gvk, target_namespace},
};
use kube::{
    api::{Api, DynamicObject, Patch, PatchParams},
    discovery::{pinned_kind, ApiCapabilities, ApiResource, Scope},
    Client, ResourceExt,
};
use snafu::ResultExt;
use std::collections::HashMap;
use tracing::{debug, info};

/// Applies rendered objects with server-side apply. Discovery results are cached per
/// apiVersion and kind for the lifetime of the applier.
pub(crate) struct ManifestApplier {
    client: Client,
    namespace: String,
    dry_run: bool,
    discovered: HashMap<String, (ApiResource, ApiCapabilities)>,
}

impl ManifestApplier {
    /// Namespaced objects which don't name a Namespace are applied to `namespace`. With
    /// `dry_run` the API server validates and admits the objects without persisting them.
    pub(crate) fn new<N>(client: Client, namespace: N, dry_run: bool) -> Self
    where
        N: ToString,
    {
        Self {
            client,
            namespace: namespace.to_string(),
            dry_run,
            discovered: HashMap::new(),
        }
    }

    /// Applies the objects in the given order, stopping at the first failure. Returns the
    /// 'Kind/name' of every applied object.
    pub(crate) async fn apply_all(&mut self, objects: &[DynamicObject]) -> Result<Vec<String>> {
        let mut applied = Vec::with_capacity(objects.len());
        for obj in objects {
            self.apply(obj).await?;
            applied.push(display_name(obj));
        }
        Ok(applied)
    }

    /// Server-side applies one object.
    pub(crate) async fn apply(&mut self, obj: &DynamicObject) -> Result<()> {
        let (resource, capabilities) = self.resolve(obj).await?;
        let namespace = target_namespace(
            obj,
            matches!(capabilities.scope, Scope::Namespaced),
            self.namespace.as_str(),
        );

        let api: Api<DynamicObject> = match namespace {
            Some(ref ns) => Api::namespaced_with(self.client.clone(), ns, &resource),
            None => Api::all_with(self.client.clone(), &resource),
        };

        let mut desired = obj.clone();
        desired.metadata.namespace = namespace.clone();
        let name = desired.name_any();

        debug!(object = %display_name(obj), ?namespace, dry_run = self.dry_run, "Applying");
        api.patch(
            name.as_str(),
            &apply_params(self.dry_run),
            &Patch::Apply(&desired),
        )
        .await
        .context(ApplyResource {
            kind: resource.kind.clone(),
            name: name.clone(),
        })?;

        info!(object = %display_name(obj), ?namespace, "Applied");
        Ok(())
    }

    async fn resolve(&mut self, obj: &DynamicObject) -> Result<(ApiResource, ApiCapabilities)> {
        let gvk = gvk(obj);
        let api_version = if gvk.group.is_empty() {
            gvk.version.clone()
        } else {
            format!("{}/{}", gvk.group, gvk.version)
        };
        let key = format!("{}/{}", api_version, gvk.kind);

        if let Some(found) = self.discovered.get(&key) {
            return Ok(found.clone());
        }

        let found = pinned_kind(&self.client, &gvk)
            .await
            .context(DiscoverKind {
                api_version,
                kind: gvk.kind.clone(),
            })?;
        self.discovered.insert(key, found.clone());
        Ok(found)
    }
}

/// Server-side apply parameters. The field manager takes ownership of conflicting fields, the
/// same way a repeated `kubectl apply --server-side --force-conflicts` would.
pub(crate) fn apply_params(dry_run: bool) -> PatchParams {
    let params = PatchParams::apply(FIELD_MANAGER).force();
    if dry_run {
        params.dry_run()
    } else {
        params
    }
}
