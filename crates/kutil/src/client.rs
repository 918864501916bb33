//! The slice of the API client used by the create-or-patch helpers.

use std::fmt::Debug;

use async_trait::async_trait;
use kube::api::Patch;
use kube::api::PatchParams;
use kube::api::PostParams;
use kube::Api;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Get, create and patch for one resource type in one namespace.
///
/// Implemented for [`kube::Api`]; tests provide in-memory implementations.
#[async_trait]
pub trait ResourceClient<K>: Send + Sync {
    async fn get(&self, name: &str) -> Result<K, kube::Error>;

    async fn create(&self, obj: &K) -> Result<K, kube::Error>;

    async fn patch(&self, name: &str, patch: &json_patch::Patch) -> Result<K, kube::Error>;
}

#[async_trait]
impl<K> ResourceClient<K> for Api<K>
where
    K: Clone + DeserializeOwned + Serialize + Debug + Send + Sync + 'static,
{
    async fn get(&self, name: &str) -> Result<K, kube::Error> {
        Api::get(self, name).await
    }

    async fn create(&self, obj: &K) -> Result<K, kube::Error> {
        Api::create(self, &PostParams::default(), obj).await
    }

    async fn patch(&self, name: &str, patch: &json_patch::Patch) -> Result<K, kube::Error> {
        Api::patch(
            self,
            name,
            &PatchParams::default(),
            &Patch::<()>::Json(patch.clone()),
        )
        .await
    }
}
