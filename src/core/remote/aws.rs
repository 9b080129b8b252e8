//! AWS Secrets Manager backend.
//!
//! Enable with `--features aws`. Credentials come from the default provider
//! chain (environment, shared config, SSO, instance metadata).

use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_secretsmanager::Client;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::RemoteStore;
use crate::error::{Result, StoreError};

const OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDeniedException",
    "UnrecognizedClientException",
    "InvalidSignatureException",
    "IncompleteSignature",
    "InvalidClientTokenId",
    "MissingAuthenticationToken",
    "ExpiredTokenException",
];

/// AWS Secrets Manager client.
///
/// The SDK is async; each call builds a current-thread runtime and blocks on
/// it, keeping the rest of tether synchronous.
#[derive(Debug, Default)]
pub struct AwsSecretsManager;

impl AwsSecretsManager {
    pub fn new() -> Self {
        Self
    }

    fn block_on<F, T>(&self, region: &str, op: impl FnOnce(Client) -> F) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
    {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::Transient(format!("failed to create runtime: {}", e)))?;

        rt.block_on(async {
            let config = aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.to_string()))
                .timeout_config(
                    TimeoutConfig::builder()
                        .operation_timeout(OPERATION_TIMEOUT)
                        .build(),
                )
                .load()
                .await;
            op(Client::new(&config)).await
        })
    }
}

/// Map an SDK failure onto the store error kinds.
fn classify<E, R>(err: SdkError<E, R>, name: &str, region: &str) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();

    if let Some(code) = err.as_service_error().and_then(|e| e.code()) {
        if code == "ResourceNotFoundException" {
            return StoreError::NotFound {
                name: name.to_string(),
                region: region.to_string(),
            };
        }
        if code == "ResourceExistsException" {
            return StoreError::AlreadyExists {
                name: name.to_string(),
                region: region.to_string(),
            };
        }
        if AUTH_ERROR_CODES.contains(&code) {
            return StoreError::Auth(message);
        }
        return StoreError::Transient(message);
    }

    // Credential resolution failures surface before dispatch.
    if message.to_lowercase().contains("credentials") {
        return StoreError::Auth(message);
    }

    StoreError::Transient(message)
}

impl RemoteStore for AwsSecretsManager {
    fn name(&self) -> &'static str {
        "aws"
    }

    fn describe(&self, name: &str, region: &str) -> Result<bool> {
        debug!(name, region, "describing secret");
        self.block_on(region, |client| async move {
            match client.describe_secret().secret_id(name).send().await {
                Ok(_) => Ok(true),
                Err(e) => match classify(e, name, region) {
                    StoreError::NotFound { .. } => Ok(false),
                    other => Err(other.into()),
                },
            }
        })
    }

    fn get(&self, name: &str, region: &str) -> Result<Zeroizing<String>> {
        debug!(name, region, "fetching secret");
        self.block_on(region, |client| async move {
            let output = client
                .get_secret_value()
                .secret_id(name)
                .send()
                .await
                .map_err(|e| classify(e, name, region))?;

            let payload = output.secret_string().ok_or_else(|| {
                StoreError::Parse("secret has no string value (binary secrets are not supported)".into())
            })?;

            trace!(payload_len = payload.len(), "fetched secret");
            Ok(Zeroizing::new(payload.to_string()))
        })
    }

    fn create(&self, name: &str, region: &str, payload: &str) -> Result<()> {
        debug!(name, region, "creating secret");
        self.block_on(region, |client| async move {
            client
                .create_secret()
                .name(name)
                .secret_string(payload)
                .send()
                .await
                .map_err(|e| classify(e, name, region))?;
            Ok(())
        })
    }

    fn put(&self, name: &str, region: &str, payload: &str) -> Result<()> {
        debug!(name, region, "updating secret");
        self.block_on(region, |client| async move {
            client
                .put_secret_value()
                .secret_id(name)
                .secret_string(payload)
                .send()
                .await
                .map_err(|e| classify(e, name, region))?;
            Ok(())
        })
    }
}
