//! Create-or-patch helpers over the `kube` client.
//!
//! [`create_or_patch`] fetches an object, applies a caller supplied transform
//! and either creates the object (when it does not exist) or sends the
//! difference between the live and the transformed state. The returned
//! [`Verb`] tells which branch was taken.
//!
//! ```no_run
//! # use k8s_openapi::api::core::v1::ConfigMap;
//! # use kube::api::ObjectMeta;
//! # async fn run(client: kube::Client) -> kutil::KutilResult<()> {
//! let meta = ObjectMeta {
//!     name: Some("settings".to_string()),
//!     namespace: Some("default".to_string()),
//!     ..Default::default()
//! };
//! let (_cm, verb) = kutil::core_v1::create_or_patch_config_map(&client, meta, |mut cm: ConfigMap| {
//!     cm.data = Some([("mode".to_string(), "fast".to_string())].into());
//!     cm
//! })
//! .await?;
//! tracing::info!("config map {verb}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod core_v1;
pub mod error;
pub mod patch;
pub mod verb;

pub use client::ResourceClient;
pub use config::init_kube_client;
pub use config::ClientConfig;
pub use error::is_not_found;
pub use error::kube_error;
pub use error::KutilError;
pub use error::KutilResult;
pub use patch::create_or_patch;
pub use patch::patch;
pub use patch::patch_object;
pub use verb::Verb;
