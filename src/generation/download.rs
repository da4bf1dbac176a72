//! Saves a generated video to disk.
//!
//! The body is streamed into `<file>.part` and renamed once complete, so a
//! half-written file never sits under the final name.

use std::fmt;
use std::path::{Path, PathBuf};

use futures::StreamExt;
use log::{debug, info};
use tokio::io::AsyncWriteExt;

use super::types::VideoLocation;

pub const DEFAULT_FILE_NAME: &str = "dream_video.mp4";

#[derive(Debug)]
pub enum DownloadError {
    /// Connection or stream failure.
    Network(String),
    /// The server answered with a non-2xx status.
    Status(u16),
    /// Writing the file failed.
    Io(std::io::Error),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Network(msg) => write!(f, "network error: {msg}"),
            DownloadError::Status(status) => write!(f, "server returned HTTP {status}"),
            DownloadError::Io(e) => write!(f, "could not write file: {e}"),
        }
    }
}

impl std::error::Error for DownloadError {}

impl From<std::io::Error> for DownloadError {
    fn from(e: std::io::Error) -> Self {
        DownloadError::Io(e)
    }
}

/// Path of the in-progress file for `dest`.
fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

pub struct Downloader {
    client: reqwest::Client,
    destination: PathBuf,
}

impl Downloader {
    pub fn new(dir: &Path, file_name: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            destination: dir.join(file_name),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Downloads `location` to the destination, replacing any existing file.
    /// Returns the number of bytes written.
    pub async fn download(&self, location: &VideoLocation) -> Result<u64, DownloadError> {
        info!("Downloading {} to {}", location, self.destination.display());

        let response = self
            .client
            .get(location.as_str())
            .send()
            .await
            .map_err(|e| DownloadError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DownloadError::Status(response.status().as_u16()));
        }

        if let Some(parent) = self.destination.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = part_path(&self.destination);
        let written = match self.write_part(response, &tmp).await {
            Ok(written) => written,
            Err(e) => {
                let _ = tokio::fs::remove_file(&tmp).await;
                return Err(e);
            }
        };

        info!("Saved {} bytes to {}", written, self.destination.display());
        Ok(written)
    }

    /// Streams the body into `tmp` and moves it into place. On error the
    /// caller removes whatever was left at `tmp`.
    async fn write_part(
        &self,
        response: reqwest::Response,
        tmp: &Path,
    ) -> Result<u64, DownloadError> {
        let mut file = tokio::fs::File::create(tmp).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| DownloadError::Network(e.to_string()))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            debug!("Downloaded {} bytes so far", written);
        }

        file.flush().await?;
        drop(file);
        tokio::fs::rename(tmp, &self.destination).await?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_path_appends_suffix() {
        assert_eq!(
            part_path(Path::new("/tmp/dream_video.mp4")),
            PathBuf::from("/tmp/dream_video.mp4.part")
        );
    }

    #[test]
    fn destination_joins_dir_and_name() {
        let downloader = Downloader::new(Path::new("videos"), DEFAULT_FILE_NAME);
        assert_eq!(downloader.destination(), Path::new("videos/dream_video.mp4"));
    }

    #[test]
    fn status_error_display() {
        assert_eq!(DownloadError::Status(403).to_string(), "server returned HTTP 403");
    }
}
