use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::Sha256;

use crate::blob::BlobStore;

type HmacSha256 = Hmac<Sha256>;

/// Azure Blob Storage service version used for SAS signing.
const SIGNED_VERSION: &str = "2020-12-06";

#[derive(Debug, thiserror::Error)]
pub enum AzureStoreError {
    #[error("invalid connection string: missing {0}")]
    MissingConnectionField(&'static str),
    #[error("invalid account key: {0}")]
    InvalidAccountKey(#[from] base64::DecodeError),
    #[error("invalid account key length")]
    InvalidAccountKeyLength,
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Blob container client speaking the Azure Storage REST API directly.
///
/// Uploads go through a short-lived write SAS and read access is handed out
/// as a service SAS on the individual blob, both signed locally with the
/// account key from the connection string.
#[derive(Debug, Clone)]
pub struct AzureBlobStore {
    client: Client,
    account: String,
    key: Vec<u8>,
    endpoint_suffix: String,
    container: String,
}

impl AzureBlobStore {
    /// How long the upload-scoped SAS stays valid.
    const UPLOAD_SAS_MINUTES: i64 = 30;

    pub fn from_connection_string(
        connection_string: &str,
        container: impl Into<String>,
    ) -> Result<Self, AzureStoreError> {
        let mut account = None;
        let mut key = None;
        let mut endpoint_suffix = "core.windows.net".to_string();

        for pair in connection_string.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            match name {
                "AccountName" => account = Some(value.to_string()),
                "AccountKey" => key = Some(value.to_string()),
                "EndpointSuffix" => endpoint_suffix = value.to_string(),
                _ => {}
            }
        }

        let account = account.ok_or(AzureStoreError::MissingConnectionField("AccountName"))?;
        let key = key.ok_or(AzureStoreError::MissingConnectionField("AccountKey"))?;
        let key = BASE64.decode(key.trim())?;
        if key.is_empty() {
            return Err(AzureStoreError::InvalidAccountKeyLength);
        }

        Ok(AzureBlobStore {
            client: Client::new(),
            account,
            key,
            endpoint_suffix,
            container: container.into(),
        })
    }

    fn blob_url(&self, blob_name: &str) -> String {
        format!(
            "https://{}.blob.{}/{}/{}",
            self.account,
            self.endpoint_suffix,
            self.container,
            urlencoding::encode(blob_name)
        )
    }

    /// Builds a service SAS query string for `blob_name` with the given
    /// permissions, valid from five minutes ago until `expiry` from now.
    fn sas_token(
        &self,
        blob_name: &str,
        permissions: &str,
        expiry: Duration,
    ) -> Result<String, AzureStoreError> {
        let now = Utc::now();
        let start = format_sas_time(now - Duration::minutes(5));
        let end = format_sas_time(now + expiry);

        let canonicalized_resource =
            format!("/blob/{}/{}/{}", self.account, self.container, blob_name);

        // Service SAS string-to-sign for version 2020-12-06: permissions,
        // start, expiry, resource, identifier, IP, protocol, version,
        // resource type, snapshot time, encryption scope, then the five
        // response header overrides.
        let string_to_sign = [
            permissions,
            start.as_str(),
            end.as_str(),
            canonicalized_resource.as_str(),
            "",
            "",
            "https",
            SIGNED_VERSION,
            "b",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]
        .join("\n");

        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|_| AzureStoreError::InvalidAccountKeyLength)?;
        mac.update(string_to_sign.as_bytes());
        let signature = BASE64.encode(mac.finalize().into_bytes());

        Ok(format!(
            "sp={}&st={}&se={}&spr=https&sv={}&sr=b&sig={}",
            permissions,
            urlencoding::encode(&start),
            urlencoding::encode(&end),
            SIGNED_VERSION,
            urlencoding::encode(&signature)
        ))
    }
}

fn format_sas_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

impl BlobStore for AzureBlobStore {
    async fn upload(&self, blob_name: &str, audio_path: &Path) -> anyhow::Result<()> {
        let bytes = tokio::fs::read(audio_path)
            .await
            .map_err(AzureStoreError::Io)?;

        let sas = self.sas_token(
            blob_name,
            "cw",
            Duration::minutes(Self::UPLOAD_SAS_MINUTES),
        )?;
        let url = format!("{}?{}", self.blob_url(blob_name), sas);

        let resp = self
            .client
            .put(url)
            .header("x-ms-blob-type", "BlockBlob")
            .header("content-type", "audio/mpeg")
            .body(bytes)
            .send()
            .await
            .map_err(AzureStoreError::Request)
            .inspect_err(|e| tracing::error!(error = %e, blob_name, "Failed to upload blob"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(AzureStoreError::Api { status, message }.into());
        }

        tracing::info!(blob_name, "Uploaded episode audio");
        Ok(())
    }

    async fn signed_url(&self, blob_name: &str, expiry: chrono::Duration) -> anyhow::Result<String> {
        let sas = self.sas_token(blob_name, "r", expiry)?;
        Ok(format!("{}?{}", self.blob_url(blob_name), sas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONNECTION_STRING: &str = "DefaultEndpointsProtocol=https;AccountName=pdfpod;\
        AccountKey=c2VjcmV0LWFjY291bnQta2V5;EndpointSuffix=core.windows.net";

    #[test]
    fn parses_connection_string() {
        let store = AzureBlobStore::from_connection_string(CONNECTION_STRING, "episodes").unwrap();
        assert_eq!(store.account, "pdfpod");
        assert_eq!(store.endpoint_suffix, "core.windows.net");
        assert_eq!(store.key, b"secret-account-key");
        assert_eq!(store.container, "episodes");
    }

    #[test]
    fn endpoint_suffix_defaults_when_absent() {
        let store = AzureBlobStore::from_connection_string(
            "AccountName=pdfpod;AccountKey=c2VjcmV0LWFjY291bnQta2V5",
            "episodes",
        )
        .unwrap();
        assert_eq!(store.endpoint_suffix, "core.windows.net");
    }

    #[test]
    fn missing_account_key_is_rejected() {
        let err = AzureBlobStore::from_connection_string("AccountName=pdfpod", "episodes")
            .unwrap_err();
        assert!(matches!(
            err,
            AzureStoreError::MissingConnectionField("AccountKey")
        ));
    }

    #[test]
    fn blob_url_encodes_name() {
        let store = AzureBlobStore::from_connection_string(CONNECTION_STRING, "episodes").unwrap();
        assert_eq!(
            store.blob_url("Hello.mp3"),
            "https://pdfpod.blob.core.windows.net/episodes/Hello.mp3"
        );
    }

    #[test]
    fn sas_token_carries_expected_parameters() {
        let store = AzureBlobStore::from_connection_string(CONNECTION_STRING, "episodes").unwrap();
        let sas = store
            .sas_token("Hello.mp3", "r", Duration::hours(8))
            .unwrap();
        assert!(sas.starts_with("sp=r&st="));
        assert!(sas.contains("&spr=https&sv=2020-12-06&sr=b&sig="));
    }
}
