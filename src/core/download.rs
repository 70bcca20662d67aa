use crate::core::drive;
use crate::error::{FetchError, Result};
use crate::utils::fs;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

/// Fetches a remote resource into a local file.
pub trait Download {
    fn download(&self, url: &str, destination: &Path) -> Result<()>;
}

/// Blocking HTTP(S) downloader. Understands Google Drive share links.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("celeba-fetch/", env!("CARGO_PKG_VERSION")))
            // The archive is over a gigabyte; let the transfer take as long as it needs.
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self { client })
    }

    fn get(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response)
    }

    /// Resolves Drive's virus-scan interstitial into the actual file response.
    fn resolve_drive_page(&self, url: &str, file_id: &str, response: Response) -> Result<Response> {
        let page = response.text()?;
        let confirm = drive::confirm_url(&page, file_id).ok_or_else(|| {
            FetchError::network(url, "Google Drive returned a page without a download link")
        })?;

        let response = self.get(&confirm)?;
        if is_html(&response) {
            return Err(FetchError::network(
                url,
                "Google Drive did not serve the file (it may be private or over its download quota)",
            ));
        }
        Ok(response)
    }

    /// Requests `request_url` and writes the body to `destination`. HTML
    /// answers are treated as a Drive interstitial when `drive_id` is set.
    fn receive(
        &self,
        url: &str,
        request_url: &str,
        drive_id: Option<&str>,
        destination: &Path,
    ) -> Result<u64> {
        let mut response = self.get(request_url)?;
        if let Some(id) = drive_id {
            if is_html(&response) {
                response = self.resolve_drive_page(url, id, response)?;
            }
        }
        stream_to_file(url, &mut response, destination)
    }
}

impl Download for HttpDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<()> {
        println!("Downloading from {url}...");

        if let Some(parent) = destination.parent() {
            fs::ensure_dir_exists(parent)?;
        }

        let request_url = drive::direct_url(url);
        let drive_id = drive::file_id(&request_url);
        let written = self.receive(url, &request_url, drive_id.as_deref(), destination)?;
        println!("Downloaded {written} bytes to {destination:?}");
        Ok(())
    }
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("text/html"))
        .unwrap_or(false)
}

/// Copies `reader` into `destination`. Read failures are network errors,
/// write failures are filesystem errors. A failed transfer leaves the
/// partial file in place.
fn stream_to_file<R: Read>(url: &str, reader: &mut R, destination: &Path) -> Result<u64> {
    let file = File::create(destination).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => FetchError::PermissionDenied {
            path: destination.to_path_buf(),
        },
        _ => FetchError::from(e),
    })?;
    let mut writer = BufWriter::new(file);
    let mut buffer = [0u8; 64 * 1024];
    let mut written: u64 = 0;

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FetchError::network(url, e)),
        };
        writer.write_all(&buffer[..n])?;
        written += n as u64;
    }

    writer.flush()?;
    Ok(written)
}
