//! In-memory stand-in for the API server.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Mutex;

use async_trait::async_trait;
use kube::error::ErrorResponse;
use kube::Resource;
use kutil::ResourceClient;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn api_error(code: u16, reason: &str) -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: format!("{reason} (fake)"),
        reason: reason.to_string(),
        code,
    })
}

/// Stores objects as JSON and applies JSON patches the way the API server would.
pub struct FakeApi<K> {
    objects: Mutex<HashMap<String, serde_json::Value>>,
    calls: Mutex<Vec<String>>,
    patches: Mutex<Vec<serde_json::Value>>,
    get_failure: Mutex<Option<u16>>,
    create_failure: Mutex<Option<u16>>,
    patch_failure: Mutex<Option<u16>>,
    _kind: PhantomData<fn() -> K>,
}

impl<K> FakeApi<K>
where
    K: Resource + Serialize + DeserializeOwned,
{
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            patches: Mutex::new(Vec::new()),
            get_failure: Mutex::new(None),
            create_failure: Mutex::new(None),
            patch_failure: Mutex::new(None),
            _kind: PhantomData,
        }
    }

    pub fn with_object(self, obj: &K) -> Self {
        let name = obj.meta().name.clone().unwrap_or_default();
        let value = serde_json::to_value(obj).unwrap();
        self.objects.lock().unwrap().insert(name, value);
        self
    }

    pub fn fail_get_with(&self, code: u16) {
        *self.get_failure.lock().unwrap() = Some(code);
    }

    pub fn fail_create_with(&self, code: u16) {
        *self.create_failure.lock().unwrap() = Some(code);
    }

    pub fn fail_patch_with(&self, code: u16) {
        *self.patch_failure.lock().unwrap() = Some(code);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Every patch received, as sent on the wire.
    pub fn sent_patches(&self) -> Vec<serde_json::Value> {
        self.patches.lock().unwrap().clone()
    }

    pub fn stored(&self, name: &str) -> Option<K> {
        let objects = self.objects.lock().unwrap();
        objects
            .get(name)
            .map(|value| serde_json::from_value(value.clone()).unwrap())
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl<K> ResourceClient<K> for FakeApi<K>
where
    K: Resource + Serialize + DeserializeOwned + Send + Sync,
{
    async fn get(&self, name: &str) -> Result<K, kube::Error> {
        self.record(format!("get {name}"));
        if let Some(code) = *self.get_failure.lock().unwrap() {
            return Err(api_error(code, "InternalError"));
        }
        let objects = self.objects.lock().unwrap();
        match objects.get(name) {
            Some(value) => Ok(serde_json::from_value(value.clone()).unwrap()),
            None => Err(api_error(404, "NotFound")),
        }
    }

    async fn create(&self, obj: &K) -> Result<K, kube::Error> {
        let name = obj.meta().name.clone().unwrap_or_default();
        self.record(format!("create {name}"));
        if let Some(code) = *self.create_failure.lock().unwrap() {
            return Err(api_error(code, "Forbidden"));
        }
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(&name) {
            return Err(api_error(409, "AlreadyExists"));
        }
        let value = serde_json::to_value(obj).unwrap();
        objects.insert(name, value.clone());
        Ok(serde_json::from_value(value).unwrap())
    }

    async fn patch(&self, name: &str, patch: &json_patch::Patch) -> Result<K, kube::Error> {
        self.record(format!("patch {name}"));
        self.patches
            .lock()
            .unwrap()
            .push(serde_json::to_value(patch).unwrap());
        if let Some(code) = *self.patch_failure.lock().unwrap() {
            return Err(api_error(code, "Conflict"));
        }
        let mut objects = self.objects.lock().unwrap();
        let value = objects
            .get_mut(name)
            .ok_or_else(|| api_error(404, "NotFound"))?;
        json_patch::patch(value, patch).map_err(|e| api_error(422, &e.to_string()))?;
        Ok(serde_json::from_value(value.clone()).unwrap())
    }
}
