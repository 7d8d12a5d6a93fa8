use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tempfile::TempPath;

/// Downloads a dictionary source into a temporary file
#[derive(Clone)]
pub struct SourceClient {
    url: String,
    client: reqwest::Client,
    temp_dir: Option<PathBuf>,
}

impl SourceClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(url, client))
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
            temp_dir: None,
        }
    }

    /// Download into `dir` instead of the system temp directory
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the source into a `.txt` temp file.
    ///
    /// The file is deleted when the returned guard is dropped, and immediately if
    /// the download fails part way.
    pub async fn download(&self) -> Result<TempPath> {
        tracing::info!("Downloading dictionary source from {}", self.url);

        let mut response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", self.url))?
            .error_for_status()
            .with_context(|| format!("Dictionary source {} returned an error", self.url))?;

        let mut builder = tempfile::Builder::new();
        builder.prefix("hanja-").suffix(".txt");
        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .context("Failed to create temporary file for download")?;

        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .context("Failed to read dictionary source body")?
        {
            file.write_all(&chunk)
                .context("Failed to write downloaded dictionary")?;
            written += chunk.len() as u64;
        }
        file.flush().context("Failed to write downloaded dictionary")?;

        let path = file.into_temp_path();
        tracing::info!("Downloaded {written} bytes to {}", path.display());
        Ok(path)
    }
}
