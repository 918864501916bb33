//! Create-or-patch for any resource type.
//!
//! The transform passed to these helpers receives the object (a fresh one
//! stamped with the requested metadata, or a copy of the live object) and
//! returns the desired state. Only the difference between the live and the
//! desired state is sent to the API server.

use error_stack::Report;
use error_stack::ResultExt;
use kube::api::ObjectMeta;
use kube::Resource;
use serde::Serialize;
use tracing::debug;
use tracing::trace;

use crate::client::ResourceClient;
use crate::error::is_not_found;
use crate::error::object_key;
use crate::error::KutilError;
use crate::error::KutilResult;
use crate::verb::Verb;

/// Create the object identified by `meta` if it does not exist, otherwise
/// patch it so that it matches `transform(current)`.
///
/// # Errors
///
/// - [`KutilError::Fetch`] if the lookup fails for any reason other than `404 Not Found`
/// - [`KutilError::Create`] if the create request fails
/// - [`KutilError::Serialize`] or [`KutilError::Patch`] from [`patch_object`]
#[tracing::instrument(skip_all, fields(kind = %K::kind(&()), namespace = ?meta.namespace, name = ?meta.name))]
pub async fn create_or_patch<K, A, F>(
    api: &A,
    meta: ObjectMeta,
    transform: F,
) -> KutilResult<(K, Verb)>
where
    K: Resource<DynamicType = ()> + Clone + Default + Serialize + Send + Sync,
    A: ResourceClient<K> + ?Sized,
    F: FnOnce(K) -> K,
{
    let kind = K::kind(&()).to_string();
    let name = meta.name.clone().unwrap_or_default();
    let key = object_key(meta.namespace.as_deref(), &name);

    match api.get(&name).await {
        Ok(current) => patch(api, current, transform).await,
        Err(e) if is_not_found(&e) => {
            debug!("Creating {kind} {key}.");
            let mut fresh = K::default();
            *fresh.meta_mut() = meta;
            let created = api
                .create(&transform(fresh))
                .await
                .change_context_lazy(|| KutilError::Create {
                    kind: kind.clone(),
                    key: key.clone(),
                })?;
            Ok((created, Verb::Created))
        }
        Err(e) => Err(Report::new(e).change_context(KutilError::Fetch { kind, key })),
    }
}

/// Patch an already fetched object so that it matches `transform(current)`.
///
/// The transform works on a copy; `current` is returned untouched when the
/// transform changes nothing.
pub async fn patch<K, A, F>(api: &A, current: K, transform: F) -> KutilResult<(K, Verb)>
where
    K: Resource<DynamicType = ()> + Clone + Serialize + Send + Sync,
    A: ResourceClient<K> + ?Sized,
    F: FnOnce(K) -> K,
{
    let modified = transform(current.clone());
    patch_object(api, current, modified).await
}

/// Send the difference between `current` and `modified`, if there is any.
///
/// The difference is a JSON patch whose list operations address elements by
/// index (`/subsets/1`). If another writer reorders, inserts into or removes
/// from such a list between the read of `current` and this patch, the
/// operations can land on the wrong element. Unlike a strategic merge patch
/// there is no merge key to match list items, so concurrent writers to the
/// same list race at element granularity.
///
/// # Errors
///
/// - [`KutilError::Serialize`] if either object cannot be serialized
/// - [`KutilError::Patch`] if the patch request fails
pub async fn patch_object<K, A>(api: &A, current: K, modified: K) -> KutilResult<(K, Verb)>
where
    K: Resource<DynamicType = ()> + Serialize + Send + Sync,
    A: ResourceClient<K> + ?Sized,
{
    let kind = K::kind(&()).to_string();
    let name = current.meta().name.clone().unwrap_or_default();
    let key = object_key(current.meta().namespace.as_deref(), &name);

    let current_json = serde_json::to_value(&current).change_context_lazy(|| {
        KutilError::Serialize {
            kind: kind.clone(),
            key: key.clone(),
        }
    })?;
    let modified_json = serde_json::to_value(&modified).change_context_lazy(|| {
        KutilError::Serialize {
            kind: kind.clone(),
            key: key.clone(),
        }
    })?;

    let patch = json_patch::diff(&current_json, &modified_json);
    if patch.0.is_empty() {
        trace!("{kind} {key} is up to date.");
        return Ok((current, Verb::Unchanged));
    }

    debug!(?patch, "Patching {kind} {key}.");
    let patched = api
        .patch(&name, &patch)
        .await
        .change_context(KutilError::Patch { kind, key })?;
    Ok((patched, Verb::Patched))
}
