//! Typed helpers for `core/v1` resources.
//!
//! Each resource gets `create_or_patch_*`, `patch_*` and `patch_*_object`,
//! which build the namespaced [`Api`] from the object's metadata and defer to
//! [`crate::patch`]. Objects without a namespace go to the client's default
//! namespace.

use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::api::core::v1::Endpoints;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::NamespaceResourceScope;
use kube::api::ObjectMeta;
use kube::Api;
use kube::Client;
use kube::Resource;

use crate::error::KutilResult;
use crate::verb::Verb;

fn namespaced_api<K>(client: &Client, namespace: Option<&str>) -> Api<K>
where
    K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>,
{
    match namespace {
        Some(ns) => Api::namespaced(client.clone(), ns),
        None => Api::default_namespaced(client.clone()),
    }
}

macro_rules! core_v1_helpers {
    ($kind:ident, $create_or_patch:ident, $patch:ident, $patch_object:ident) => {
        #[doc = concat!("Create the `", stringify!($kind), "` described by `meta`, or patch the live one with `transform`.")]
        pub async fn $create_or_patch<F>(
            client: &Client,
            meta: ObjectMeta,
            transform: F,
        ) -> KutilResult<($kind, Verb)>
        where
            F: FnOnce($kind) -> $kind,
        {
            let api = namespaced_api::<$kind>(client, meta.namespace.as_deref());
            crate::patch::create_or_patch(&api, meta, transform).await
        }

        #[doc = concat!("Patch a fetched `", stringify!($kind), "` with `transform`.")]
        pub async fn $patch<F>(
            client: &Client,
            current: $kind,
            transform: F,
        ) -> KutilResult<($kind, Verb)>
        where
            F: FnOnce($kind) -> $kind,
        {
            let api = namespaced_api::<$kind>(client, current.metadata.namespace.as_deref());
            crate::patch::patch(&api, current, transform).await
        }

        #[doc = concat!("Send the difference between two states of a `", stringify!($kind), "`.")]
        pub async fn $patch_object(
            client: &Client,
            current: $kind,
            modified: $kind,
        ) -> KutilResult<($kind, Verb)> {
            let api = namespaced_api::<$kind>(client, current.metadata.namespace.as_deref());
            crate::patch::patch_object(&api, current, modified).await
        }
    };
}

core_v1_helpers!(
    Endpoints,
    create_or_patch_endpoints,
    patch_endpoints,
    patch_endpoints_object
);
core_v1_helpers!(
    ConfigMap,
    create_or_patch_config_map,
    patch_config_map,
    patch_config_map_object
);
core_v1_helpers!(
    Secret,
    create_or_patch_secret,
    patch_secret,
    patch_secret_object
);
core_v1_helpers!(
    Service,
    create_or_patch_service,
    patch_service,
    patch_service_object
);
