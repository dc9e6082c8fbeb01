//! Type registry mapping kinds to decoding strategies
//!
//! The registry is a plain value built by the caller and handed to the
//! decoder. Dispatch is a lookup from [`GroupVersionKind`] to a
//! [`KindDecoder`] trait object.

use crate::errors::ExError;
use crate::model::{GroupVersionKind, StructuredObject};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// Fields every kind keeps regardless of its shape
const IDENTIFYING_FIELDS: &[&str] = &["apiVersion", "kind", "metadata"];

/// Decoding strategy for one registered kind
pub trait KindDecoder: Send + Sync {
    /// Turn a parsed document of kind `gvk` into a structured object
    fn decode(&self, gvk: &GroupVersionKind, document: Value) -> Result<StructuredObject, ExError>;
}

/// Structural shape of a kind: the top-level fields it understands
///
/// Decoding through a closed shape drops top-level fields the kind does not
/// declare, the way a typed decode would. An open shape keeps everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindShape {
    fields: Option<BTreeSet<String>>,
}

impl KindShape {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: Some(fields.into_iter().map(Into::into).collect()),
        }
    }

    /// Shape that keeps every field, for custom resources
    pub fn open() -> Self {
        Self { fields: None }
    }

    pub fn is_open(&self) -> bool {
        self.fields.is_none()
    }

    fn keeps(&self, field: &str) -> bool {
        IDENTIFYING_FIELDS.contains(&field)
            || self.fields.as_ref().map_or(true, |f| f.contains(field))
    }
}

impl KindDecoder for KindShape {
    fn decode(&self, _gvk: &GroupVersionKind, mut document: Value) -> Result<StructuredObject, ExError> {
        if let Value::Object(map) = &mut document {
            map.retain(|field, _| self.keeps(field));
        }
        StructuredObject::from_value(document)
    }
}

/// Registry of known kinds
#[derive(Clone, Default)]
pub struct TypeRegistry {
    kinds: HashMap<GroupVersionKind, Arc<dyn KindDecoder>>,
}

impl TypeRegistry {
    /// Empty registry; every kind is unknown until registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with common workload, config, RBAC and
    /// networking kinds
    pub fn with_core_kinds() -> Self {
        let mut registry = Self::new();
        for entry in CORE_KINDS {
            for kind in entry.kinds {
                registry.register_shape(
                    GroupVersionKind::new(entry.group, entry.version, *kind),
                    KindShape::new(entry.fields.iter().copied()),
                );
            }
        }
        registry
    }

    /// Register a custom decoder, replacing any previous one for `gvk`
    pub fn register(&mut self, gvk: GroupVersionKind, decoder: Arc<dyn KindDecoder>) -> &mut Self {
        self.kinds.insert(gvk, decoder);
        self
    }

    pub fn register_shape(&mut self, gvk: GroupVersionKind, shape: KindShape) -> &mut Self {
        self.register(gvk, Arc::new(shape))
    }

    pub fn resolve(&self, gvk: &GroupVersionKind) -> Option<Arc<dyn KindDecoder>> {
        self.kinds.get(gvk).cloned()
    }

    pub fn is_known(&self, gvk: &GroupVersionKind) -> bool {
        self.kinds.contains_key(gvk)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: BTreeSet<String> = self.kinds.keys().map(ToString::to_string).collect();
        f.debug_struct("TypeRegistry").field("kinds", &kinds).finish()
    }
}

struct CoreKind {
    group: &'static str,
    version: &'static str,
    kinds: &'static [&'static str],
    fields: &'static [&'static str],
}

const WORKLOAD_FIELDS: &[&str] = &["spec", "status"];

const CORE_KINDS: &[CoreKind] = &[
    CoreKind {
        group: "",
        version: "v1",
        kinds: &["ConfigMap"],
        fields: &["data", "binaryData", "immutable"],
    },
    CoreKind {
        group: "",
        version: "v1",
        kinds: &["Secret"],
        fields: &["data", "stringData", "type", "immutable"],
    },
    CoreKind {
        group: "",
        version: "v1",
        kinds: &["ServiceAccount"],
        fields: &["secrets", "imagePullSecrets", "automountServiceAccountToken"],
    },
    CoreKind {
        group: "",
        version: "v1",
        kinds: &["Endpoints"],
        fields: &["subsets"],
    },
    CoreKind {
        group: "",
        version: "v1",
        kinds: &["Service", "Namespace", "Pod", "PersistentVolumeClaim"],
        fields: WORKLOAD_FIELDS,
    },
    CoreKind {
        group: "apps",
        version: "v1",
        kinds: &["Deployment", "StatefulSet", "DaemonSet", "ReplicaSet"],
        fields: WORKLOAD_FIELDS,
    },
    CoreKind {
        group: "batch",
        version: "v1",
        kinds: &["Job", "CronJob"],
        fields: WORKLOAD_FIELDS,
    },
    CoreKind {
        group: "rbac.authorization.k8s.io",
        version: "v1",
        kinds: &["Role", "ClusterRole"],
        fields: &["rules", "aggregationRule"],
    },
    CoreKind {
        group: "rbac.authorization.k8s.io",
        version: "v1",
        kinds: &["RoleBinding", "ClusterRoleBinding"],
        fields: &["subjects", "roleRef"],
    },
    CoreKind {
        group: "networking.k8s.io",
        version: "v1",
        kinds: &["NetworkPolicy", "Ingress"],
        fields: WORKLOAD_FIELDS,
    },
    CoreKind {
        group: "policy",
        version: "v1",
        kinds: &["PodDisruptionBudget"],
        fields: WORKLOAD_FIELDS,
    },
    CoreKind {
        group: "autoscaling",
        version: "v2",
        kinds: &["HorizontalPodAutoscaler"],
        fields: WORKLOAD_FIELDS,
    },
    CoreKind {
        group: "admissionregistration.k8s.io",
        version: "v1",
        kinds: &["ValidatingWebhookConfiguration", "MutatingWebhookConfiguration"],
        fields: &["webhooks"],
    },
    CoreKind {
        group: "apiextensions.k8s.io",
        version: "v1",
        kinds: &["CustomResourceDefinition"],
        fields: WORKLOAD_FIELDS,
    },
];
