//! Kubernetes client configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use error_stack::ResultExt;
use kube::config::KubeConfigOptions;
use kube::config::Kubeconfig;
use kube::Client;
use kube::Config;

use crate::error::KutilError;
use crate::error::KutilResult;

/// How to reach the API server.
///
/// Meant to be flattened into the host binary's command line.
#[derive(Args, Debug, Clone, Default)]
pub struct ClientConfig {
    #[arg(
        long,
        env = "KUBECONFIG",
        value_hint = clap::ValueHint::FilePath,
        help = "Path to kubeconfig file (in-cluster or ~/.kube/config when unset)"
    )]
    pub kubeconfig: Option<PathBuf>,

    #[arg(long = "kube-context", help = "Kubeconfig context to use")]
    pub context: Option<String>,

    #[arg(
        long = "kube-timeout-secs",
        help = "Read timeout for API requests, in seconds"
    )]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn kubeconfig_options(&self) -> KubeConfigOptions {
        KubeConfigOptions {
            context: self.context.clone(),
            ..Default::default()
        }
    }
}

/// Build a client from `config`.
///
/// # Errors
///
/// - [`KutilError::ConnectionFailed`] if the kubeconfig cannot be read or no
///   configuration can be inferred
#[tracing::instrument(skip_all, fields(kubeconfig = ?config.kubeconfig, context = ?config.context))]
pub async fn init_kube_client(config: &ClientConfig) -> KutilResult<Client> {
    let options = config.kubeconfig_options();

    let mut kube_config = match &config.kubeconfig {
        Some(kubeconfig_path) => {
            let kubeconfig = Kubeconfig::read_from(kubeconfig_path).change_context(
                KutilError::ConnectionFailed {
                    message: format!(
                        "Failed to read kubeconfig file: {}",
                        kubeconfig_path.display()
                    ),
                },
            )?;

            Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .change_context(KutilError::ConnectionFailed {
                    message: format!(
                        "Failed to create config from kubeconfig: {}",
                        kubeconfig_path.display()
                    ),
                })?
        }
        None if config.context.is_some() => Config::from_kubeconfig(&options)
            .await
            .change_context(KutilError::ConnectionFailed {
                message: "Failed to create config for the requested context".to_string(),
            })?,
        // In-cluster or ~/.kube/config
        None => Config::infer()
            .await
            .change_context(KutilError::ConnectionFailed {
                message: "Failed to infer Kubernetes config".to_string(),
            })?,
    };

    if let Some(timeout) = config.timeout() {
        kube_config.read_timeout = Some(timeout);
    }

    Client::try_from(kube_config).change_context(KutilError::ConnectionFailed {
        message: "Failed to create Kubernetes client".to_string(),
    })
}
