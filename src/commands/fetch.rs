use crate::core::{
    config::FetchConfig,
    download::{Download, HttpDownloader},
    extract,
};
use crate::error::Result;
use crate::utils::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    Downloaded,
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    Extracted { entries: usize },
    AlreadyExtracted,
}

/// Which of the two steps actually ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOutcome {
    pub download: DownloadStatus,
    pub extraction: ExtractionStatus,
}

/// Makes sure the archive is on disk and unpacked.
///
/// The download is skipped whenever a file already sits at the archive path,
/// and extraction is skipped whenever the extraction directory has any entry.
/// Neither check looks at content, so a truncated archive left by an earlier
/// run is reused as-is and only fails once extraction reads it.
pub fn ensure_dataset_available<D: Download + ?Sized>(
    config: &FetchConfig,
    downloader: &D,
) -> Result<FetchOutcome> {
    let paths = config.paths();

    fs::ensure_dir_exists(&paths.extraction_dir)?;

    let download = if !paths.archive_path.exists() {
        println!("Downloading archive to {:?}", paths.archive_path);
        download_with_retries(
            downloader,
            &config.remote_url,
            &paths.archive_path,
            config.retries,
        )?;
        DownloadStatus::Downloaded
    } else {
        println!("Archive already downloaded: {:?}", paths.archive_path);
        DownloadStatus::AlreadyPresent
    };

    let extraction = if fs::is_dir_empty(&paths.extraction_dir)? {
        println!("Unpacking archive...");
        let entries = extract::extract_archive(&paths.archive_path, &paths.extraction_target())?;
        ExtractionStatus::Extracted { entries }
    } else {
        println!("Archive already extracted: {:?}", paths.extraction_dir);
        ExtractionStatus::AlreadyExtracted
    };

    Ok(FetchOutcome {
        download,
        extraction,
    })
}

fn download_with_retries<D: Download + ?Sized>(
    downloader: &D,
    url: &str,
    destination: &Path,
    retries: u8,
) -> Result<()> {
    let mut attempt = 0;
    loop {
        match downloader.download(url, destination) {
            Ok(()) => return Ok(()),
            Err(e) if e.is_retryable() && attempt < retries => {
                attempt += 1;
                println!("⚠️  {e}");
                println!("   Retrying ({attempt}/{retries})...");
            }
            Err(e) => return Err(e),
        }
    }
}

/// Entry point for the `fetch` command.
pub fn fetch_dataset(config: &FetchConfig) -> Result<()> {
    let downloader = HttpDownloader::new()?;
    let outcome = ensure_dataset_available(config, &downloader)?;

    let paths = config.paths();
    match outcome.extraction {
        ExtractionStatus::Extracted { entries } => {
            println!("✅ Dataset ready: {entries} entries in {:?}", paths.extraction_target());
        }
        ExtractionStatus::AlreadyExtracted => {
            println!("✅ Dataset ready in {:?}", paths.extraction_dir);
        }
    }
    Ok(())
}
