//! Backend operator construction
//!
//! The pipeline never retries; transient backend failures are absorbed here
//! by an OpenDAL retry layer before an error ever reaches the chunk store.

use anyhow::{Context, Result};
use opendal::Operator;

use cstor_core::config::StorageConfig;

/// Backend credentials, deliberately separate from `StorageConfig` so that
/// config files never carry secrets.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Build the chunk backend operator from config plus credentials.
///
/// Any S3-compatible endpoint works; addressing is path-style (the opendal
/// default), which MinIO and SeaweedFS require. A plaintext HTTP endpoint
/// is refused outright when `storage.enforce_tls` is set, and logged loudly
/// otherwise, since chunk keys in transit are worthless but credentials are
/// not.
pub fn build_operator(storage: &StorageConfig, creds: &Credentials) -> Result<Operator> {
    if storage.endpoint.starts_with("http://") {
        anyhow::ensure!(
            !storage.enforce_tls,
            "refusing plaintext endpoint {} while storage.enforce_tls is set",
            storage.endpoint
        );
        tracing::warn!(
            endpoint = %storage.endpoint,
            "chunk backend reached over plaintext HTTP; credentials travel unencrypted"
        );
    }

    let builder = opendal::services::S3::default()
        .endpoint(&storage.endpoint)
        .region(&storage.region)
        .bucket(&storage.bucket)
        .access_key_id(&creds.access_key_id)
        .secret_access_key(&creds.secret_access_key);

    let op = Operator::new(builder)
        .context("building chunk backend operator")?
        .layer(opendal::layers::LoggingLayer::default())
        .layer(
            opendal::layers::RetryLayer::new()
                .with_max_times(5)
                .with_jitter(),
        )
        .finish();

    Ok(op)
}

/// In-memory operator, for tests and local experiments.
pub fn memory_operator() -> Result<Operator> {
    let op = Operator::new(opendal::services::Memory::default())
        .context("creating in-memory operator")?
        .finish();
    Ok(op)
}
