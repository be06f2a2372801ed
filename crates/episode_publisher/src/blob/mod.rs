pub mod azure;

use std::{future::Future, path::Path, sync::LazyLock};

use regex::Regex;

static NON_ALPHABETIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z]").expect("valid regex literal"));

/// Object storage for episode audio.
pub trait BlobStore {
    /// Uploads the file at `audio_path` under `blob_name`, overwriting any
    /// existing blob with that name.
    fn upload(
        &self,
        blob_name: &str,
        audio_path: &Path,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Mints a read-only URL for `blob_name` valid for `expiry`.
    fn signed_url(
        &self,
        blob_name: &str,
        expiry: chrono::Duration,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}

impl<T: BlobStore + Send + Sync> BlobStore for &T {
    async fn upload(&self, blob_name: &str, audio_path: &Path) -> anyhow::Result<()> {
        (**self).upload(blob_name, audio_path).await
    }

    async fn signed_url(&self, blob_name: &str, expiry: chrono::Duration) -> anyhow::Result<String> {
        (**self).signed_url(blob_name, expiry).await
    }
}

/// Reduces an episode title to ASCII letters only.
///
/// Titles that differ only in digits, punctuation, or whitespace collide on
/// the same name, so a later upload overwrites the earlier blob. A title
/// with no letters at all maps to `episode`.
pub fn sanitize_blob_name(title: &str) -> String {
    let sanitized = NON_ALPHABETIC.replace_all(title, "");
    if sanitized.is_empty() {
        "episode".to_string()
    } else {
        sanitized.into_owned()
    }
}

/// Blob name for an episode's audio, derived from its title.
pub fn blob_name_for(title: &str) -> String {
    format!("{}.mp3", sanitize_blob_name(title))
}
