// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! File Reader module that abstracts reading files from different storage types.
//!
//! This module provides functionality to read files from either local filesystem
//! or an S3 bucket through a unified trait interface.

use std::fs::File;
use std::future::Future;
use std::io::{Read, Write};
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::{ProbeError, ProbeResult};

/// Future returned by [`FileReader`] methods; owns everything it needs.
pub type ReadFuture<T> = Pin<Box<dyn Future<Output = ProbeResult<T>> + Send>>;

/// Trait defining the interface for reading files from different storage types
pub trait FileReader {
    /// Reads the content of a file as a String
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file (format depends on the implementation)
    fn read_string(&self, path: &str) -> ReadFuture<String>;

    /// Reads the content of a file as bytes
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file (format depends on the implementation)
    fn read_bytes(&self, path: &str) -> ReadFuture<Vec<u8>>;
}

/// Reader for local filesystem files
#[derive(Debug, Default)]
pub struct LocalReader;

impl LocalReader {
    pub fn new() -> Self {
        LocalReader
    }
}

impl FileReader for LocalReader {
    fn read_string(&self, path: &str) -> ReadFuture<String> {
        let path = path.to_string();
        Box::pin(async move {
            let mut file = File::open(&path)?;
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            Ok(content)
        })
    }

    fn read_bytes(&self, path: &str) -> ReadFuture<Vec<u8>> {
        let path = path.to_string();
        Box::pin(async move {
            let mut file = File::open(&path)?;
            let mut content = Vec::new();
            file.read_to_end(&mut content)?;
            Ok(content)
        })
    }
}

/// Reader for files stored in S3
#[derive(Debug, Clone)]
pub struct S3Reader {
    client: Arc<aws_sdk_s3::Client>,
}

impl S3Reader {
    /// Creates a new S3Reader
    ///
    /// # Arguments
    ///
    /// * `client` - An initialized AWS S3 client
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        S3Reader {
            client: Arc::new(client),
        }
    }

    /// Downloads a file from S3 to the local filesystem
    ///
    /// # Arguments
    ///
    /// * `s3_path` - Path in the format "s3://bucket-name/key/path"
    /// * `local_path` - Path where the file should be saved locally
    pub fn download_to_file(&self, s3_path: &str, local_path: &Path) -> ReadFuture<()> {
        let bytes = self.fetch(s3_path);
        let local_path = local_path.to_path_buf();
        Box::pin(async move {
            let bytes = bytes.await?;
            let mut file = File::create(&local_path)?;
            file.write_all(&bytes)?;
            Ok(())
        })
    }

    /// Parses an S3 path in the format "s3://bucket-name/key/path"
    ///
    /// # Returns
    ///
    /// A tuple (bucket, key) if the path is valid
    fn parse_s3_path(s3_path: &str) -> ProbeResult<(String, String)> {
        let path = s3_path.strip_prefix("s3://").ok_or_else(|| {
            ProbeError::InvalidArgument(format!("S3 path must start with s3://: {}", s3_path))
        })?;
        let mut parts = path.splitn(2, '/');

        let bucket = parts
            .next()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                ProbeError::InvalidArgument("Invalid S3 path format, missing bucket name".into())
            })?;
        let key = parts
            .next()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ProbeError::InvalidArgument("Invalid S3 path format, missing key".into())
            })?;

        Ok((bucket.to_string(), key.to_string()))
    }

    fn fetch(&self, path: &str) -> ReadFuture<Vec<u8>> {
        let client = Arc::clone(&self.client);
        let path = path.to_string();
        Box::pin(async move {
            let (bucket, key) = Self::parse_s3_path(&path)?;
            let s3_response = client
                .get_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| ProbeError::Storage(format!("GetObject {} failed: {}", path, e)))?;
            let bytes = s3_response
                .body
                .collect()
                .await
                .map_err(|e| ProbeError::Storage(format!("Reading {} failed: {}", path, e)))?;
            Ok(bytes.into_bytes().to_vec())
        })
    }
}

impl FileReader for S3Reader {
    fn read_string(&self, path: &str) -> ReadFuture<String> {
        let bytes = self.fetch(path);
        Box::pin(async move {
            let content = String::from_utf8(bytes.await?)
                .map_err(|e| ProbeError::Storage(format!("Object is not UTF-8: {}", e)))?;
            Ok(content)
        })
    }

    fn read_bytes(&self, path: &str) -> ReadFuture<Vec<u8>> {
        self.fetch(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    // Helper function to create a temporary file with content
    fn create_temp_file(content: &[u8]) -> PathBuf {
        let file_name = format!("onnx_probe_reader_{}.bin", uuid::Uuid::new_v4());
        let file_path = env::temp_dir().join(file_name);

        let mut file = File::create(&file_path).unwrap();
        file.write_all(content).unwrap();

        file_path
    }

    #[tokio::test]
    async fn test_local_reader_read_string() {
        let file_path = create_temp_file(b"{\"iterations\": 3}");

        let reader = LocalReader::new();
        let content = reader
            .read_string(file_path.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(content, "{\"iterations\": 3}");

        fs::remove_file(file_path).unwrap();
    }

    #[tokio::test]
    async fn test_local_reader_read_bytes() {
        let file_path = create_temp_file(&[0x08, 0x07, 0x12, 0x00]);

        let reader = LocalReader::new();
        let bytes = reader
            .read_bytes(file_path.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(bytes, vec![0x08, 0x07, 0x12, 0x00]);

        fs::remove_file(file_path).unwrap();
    }

    #[tokio::test]
    async fn test_local_reader_file_not_found() {
        let reader = LocalReader::new();
        let result = reader.read_bytes("non_existent_model.onnx").await;

        assert!(matches!(result, Err(ProbeError::Io(_))));
    }

    #[test]
    fn test_s3_parse_path() {
        let (bucket, key) =
            S3Reader::parse_s3_path("s3://my-bucket/opset8/alexnet.onnx").unwrap();

        assert_eq!(bucket, "my-bucket");
        assert_eq!(key, "opset8/alexnet.onnx");

        assert!(S3Reader::parse_s3_path("invalid-path").is_err());
        assert!(S3Reader::parse_s3_path("s3://bucket-only").is_err());
        assert!(S3Reader::parse_s3_path("s3:///key").is_err());
    }
}
