//! S3-based blob store implementation
//!
//! Stores cache entries in AWS S3 (or S3-compatible services like MinIO)
//! under `{prefix}/{key}`.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use super::backend::BlobStore;
use super::error::CacheError;

/// S3-based blob store
#[derive(Debug, Clone)]
pub struct S3Store {
    /// S3 client
    client: Client,
    /// S3 bucket name
    bucket: String,
    /// Key prefix for all entries
    prefix: String,
}

impl S3Store {
    /// Create a new S3 store with the given configuration
    pub async fn new(
        bucket: String,
        prefix: String,
        region: Option<String>,
        endpoint: Option<String>,
    ) -> Result<Self, CacheError> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_sdk_s3::config::Region::new(region));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint_url) = endpoint {
            // MinIO and similar services address buckets by path, not vhost
            builder = builder.endpoint_url(endpoint_url).force_path_style(true);
        }
        let client = Client::from_conf(builder.build());

        tracing::debug!(
            bucket = %bucket,
            prefix = %prefix,
            "S3 cache backend initialized"
        );

        Ok(Self {
            client,
            bucket,
            prefix,
        })
    }

    /// Get the full S3 object key for a cache key
    fn object_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.prefix, key)
        }
    }
}

#[async_trait]
impl BlobStore for S3Store {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let object_key = self.object_key(key);

        let response = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    return Ok(None);
                }
                return Err(CacheError::Backend(format!(
                    "S3 get_object error: {service_err}"
                )));
            }
        };

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| CacheError::Backend(format!("S3 body read error: {e}")))?
            .into_bytes()
            .to_vec();

        Ok(Some(data))
    }

    async fn put(&self, key: &str, data: Vec<u8>) -> Result<(), CacheError> {
        let object_key = self.object_key(key);
        let size = data.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| CacheError::Backend(format!("S3 put_object error: {e}")))?;

        tracing::debug!(key, size, object_key = %object_key, "Cache entry stored in S3");

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let object_key = self.object_key(key);

        // S3 delete_object doesn't fail if the object doesn't exist
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .send()
            .await
            .map_err(|e| CacheError::Backend(format!("S3 delete_object error: {e}")))?;

        tracing::debug!(key, "Cache entry deleted from S3");

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    // Helper mirroring S3Store::object_key without requiring a client
    fn compute_object_key(prefix: &str, key: &str) -> String {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}/{key}")
        }
    }

    #[test]
    fn test_object_key_with_prefix() {
        assert_eq!(
            compute_object_key("viewgate/cache", "EVENTS/1_a.cache"),
            "viewgate/cache/EVENTS/1_a.cache"
        );
    }

    #[test]
    fn test_object_key_without_prefix() {
        assert_eq!(compute_object_key("", "EVENTS/1_a.cache"), "EVENTS/1_a.cache");
    }
}
