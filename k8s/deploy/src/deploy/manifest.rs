use crate::common::error::{
    ManifestMissingName, ManifestMissingTypeMeta, ManifestParse, RegexCompile, Result,
};
use kube::{api::DynamicObject, core::GroupVersionKind, ResourceExt};
use regex::Regex;
use serde_yaml::Value;
use snafu::{ensure, OptionExt, ResultExt};

/// The order in which helm installs kinds. Kinds which are not listed go last.
const INSTALL_ORDER: &[&str] = &[
    "PriorityClass",
    "Namespace",
    "NetworkPolicy",
    "ResourceQuota",
    "LimitRange",
    "PodSecurityPolicy",
    "PodDisruptionBudget",
    "ServiceAccount",
    "Secret",
    "SecretList",
    "ConfigMap",
    "StorageClass",
    "PersistentVolume",
    "PersistentVolumeClaim",
    "CustomResourceDefinition",
    "ClusterRole",
    "ClusterRoleList",
    "ClusterRoleBinding",
    "ClusterRoleBindingList",
    "Role",
    "RoleList",
    "RoleBinding",
    "RoleBindingList",
    "Service",
    "DaemonSet",
    "Pod",
    "ReplicationController",
    "ReplicaSet",
    "Deployment",
    "HorizontalPodAutoscaler",
    "StatefulSet",
    "Job",
    "CronJob",
    "IngressClass",
    "Ingress",
    "APIService",
];

/// Splits the multi-document YAML output of `helm template` into objects. Documents which hold
/// nothing but comments (helm emits those for templates which render empty) are skipped.
pub(crate) fn parse_manifests(rendered: &str) -> Result<Vec<DynamicObject>> {
    let separator: &str = r"(?m)^---[ \t]*$";
    let regex = Regex::new(separator).context(RegexCompile {
        expression: separator.to_string(),
    })?;

    let mut objects = Vec::new();
    for (index, document) in regex.split(rendered).enumerate() {
        if is_blank(document) {
            continue;
        }

        let value: Value = serde_yaml::from_str(document).context(ManifestParse { index })?;
        if value.is_null() {
            continue;
        }

        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        let has_api_version = value.get("apiVersion").and_then(Value::as_str).is_some();
        let kind = kind.context(ManifestMissingTypeMeta { index })?;
        ensure!(has_api_version, ManifestMissingTypeMeta { index });

        let has_name = value
            .get("metadata")
            .and_then(|metadata| metadata.get("name"))
            .and_then(Value::as_str)
            .is_some();
        ensure!(has_name, ManifestMissingName { kind, index });

        objects.push(serde_yaml::from_value(value).context(ManifestParse { index })?);
    }

    Ok(objects)
}

fn is_blank(document: &str) -> bool {
    document
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
}

/// Stable sort into helm's install order.
pub(crate) fn sort_for_apply(objects: &mut [DynamicObject]) {
    objects.sort_by_key(|obj| {
        let kind = obj.types.as_ref().map(|t| t.kind.as_str()).unwrap_or_default();
        INSTALL_ORDER
            .iter()
            .position(|ordered| *ordered == kind)
            .unwrap_or(INSTALL_ORDER.len())
    });
}

/// The GroupVersionKind of a parsed object.
pub(crate) fn gvk(obj: &DynamicObject) -> GroupVersionKind {
    let (api_version, kind) = obj
        .types
        .as_ref()
        .map(|t| (t.api_version.as_str(), t.kind.as_str()))
        .unwrap_or_default();
    let (group, version) = api_version.split_once('/').unwrap_or(("", api_version));
    GroupVersionKind::gvk(group, version, kind)
}

/// The Namespace an object is applied to. Namespaced objects without one get the declared
/// Namespace, cluster-scoped objects get none.
pub(crate) fn target_namespace(
    obj: &DynamicObject,
    namespaced: bool,
    default: &str,
) -> Option<String> {
    namespaced.then(|| obj.namespace().unwrap_or_else(|| default.to_string()))
}

/// 'Kind/name' of an object, for log messages and summaries.
pub(crate) fn display_name(obj: &DynamicObject) -> String {
    let kind = obj.types.as_ref().map(|t| t.kind.as_str()).unwrap_or_default();
    format!("{}/{}", kind, obj.name_any())
}

#[cfg(test)]
mod tests {
    use super::{display_name, gvk, parse_manifests, sort_for_apply, target_namespace};
    use crate::common::error::Error;
    use kube::ResourceExt;

    const RENDERED: &str = r#"---
# Source: jobconnect/templates/service.yaml
apiVersion: v1
kind: Service
metadata:
  name: jobconnect
spec:
  ports:
  - port: 8080
---
# Source: jobconnect/templates/hpa.yaml
# disabled in dev
---
# Source: jobconnect/templates/deployment.yaml
apiVersion: apps/v1
kind: Deployment
metadata:
  name: jobconnect
  namespace: jobs
spec:
  replicas: 1
---
# Source: jobconnect/templates/configmap.yaml
apiVersion: v1
kind: ConfigMap
metadata:
  name: jobconnect-env
data:
  TZ: Europe/Berlin
"#;

    #[test]
    fn documents_are_split_and_blank_ones_skipped() {
        let objects = parse_manifests(RENDERED).unwrap();

        let names: Vec<String> = objects.iter().map(display_name).collect();
        assert_eq!(
            names,
            vec![
                "Service/jobconnect",
                "Deployment/jobconnect",
                "ConfigMap/jobconnect-env"
            ]
        );
        assert_eq!(objects[1].data["spec"]["replicas"], 1);
    }

    #[test]
    fn objects_are_sorted_in_install_order() {
        let mut objects = parse_manifests(RENDERED).unwrap();
        sort_for_apply(&mut objects);

        let kinds: Vec<String> = objects
            .iter()
            .map(|o| o.types.as_ref().unwrap().kind.clone())
            .collect();
        assert_eq!(kinds, vec!["ConfigMap", "Service", "Deployment"]);
    }

    #[test]
    fn unknown_kinds_go_last() {
        let rendered = "apiVersion: example.com/v1\nkind: Widget\nmetadata:\n  name: w\n---\napiVersion: v1\nkind: Namespace\nmetadata:\n  name: jobs\n";
        let mut objects = parse_manifests(rendered).unwrap();
        sort_for_apply(&mut objects);

        assert_eq!(objects[0].name_any(), "jobs");
        assert_eq!(objects[1].name_any(), "w");
    }

    #[test]
    fn priority_class_goes_first() {
        let rendered = "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: jobconnect\n---\napiVersion: v1\nkind: Namespace\nmetadata:\n  name: jobs\n---\napiVersion: scheduling.k8s.io/v1\nkind: PriorityClass\nmetadata:\n  name: jobconnect-high\nvalue: 1000\n";
        let mut objects = parse_manifests(rendered).unwrap();
        sort_for_apply(&mut objects);

        let names: Vec<String> = objects.iter().map(display_name).collect();
        assert_eq!(
            names,
            vec![
                "PriorityClass/jobconnect-high",
                "Namespace/jobs",
                "Deployment/jobconnect"
            ]
        );
    }

    #[test]
    fn group_version_kind() {
        let objects = parse_manifests(RENDERED).unwrap();

        let core = gvk(&objects[0]);
        assert_eq!((core.group.as_str(), core.version.as_str()), ("", "v1"));
        let apps = gvk(&objects[1]);
        assert_eq!(
            (apps.group.as_str(), apps.version.as_str(), apps.kind.as_str()),
            ("apps", "v1", "Deployment")
        );
    }

    #[test]
    fn namespace_defaulting() {
        let objects = parse_manifests(RENDERED).unwrap();

        assert_eq!(
            target_namespace(&objects[0], true, "default").as_deref(),
            Some("default")
        );
        assert_eq!(
            target_namespace(&objects[1], true, "default").as_deref(),
            Some("jobs")
        );
        assert_eq!(target_namespace(&objects[0], false, "default"), None);
    }

    #[test]
    fn missing_kind_is_rejected() {
        let rendered = "apiVersion: v1\nmetadata:\n  name: x\n";
        assert!(matches!(
            parse_manifests(rendered),
            Err(Error::ManifestMissingTypeMeta { index: 0 })
        ));
    }

    #[test]
    fn missing_name_is_rejected() {
        let rendered = "---\napiVersion: v1\nkind: ConfigMap\nmetadata: {}\n";
        match parse_manifests(rendered) {
            Err(Error::ManifestMissingName { kind, index }) => {
                assert_eq!(kind, "ConfigMap");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
