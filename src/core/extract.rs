use crate::error::{FetchError, Result};
use crate::utils::fs;
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::Path;
use tar::Archive;
use zip::ZipArchive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveFormat::TarGz)
        } else if name.ends_with(".zip") {
            Some(ArchiveFormat::Zip)
        } else {
            None
        }
    }
}

/// Unpacks `archive_path` into `destination`, keeping the archive's folder
/// structure. Returns the number of entries written.
pub fn extract_archive(archive_path: &Path, destination: &Path) -> Result<usize> {
    println!("Extracting {archive_path:?} to {destination:?}");

    let format = ArchiveFormat::from_path(archive_path).ok_or_else(|| {
        FetchError::archive(archive_path, "unsupported archive format")
    })?;

    if !archive_path.is_file() {
        return Err(FetchError::archive(archive_path, "archive file not found"));
    }

    fs::ensure_dir_exists(destination)?;

    let count = match format {
        ArchiveFormat::Zip => extract_zip(archive_path, destination)?,
        ArchiveFormat::TarGz => extract_tar_gz(archive_path, destination)?,
    };

    println!("Extraction completed ({count} entries)");
    Ok(count)
}

/// Read-side failures mean a broken archive; anything else is the disk.
fn entry_error(archive_path: &Path, target: &Path, e: std::io::Error) -> FetchError {
    match e.kind() {
        std::io::ErrorKind::InvalidData
        | std::io::ErrorKind::InvalidInput
        | std::io::ErrorKind::UnexpectedEof => FetchError::archive(archive_path, e),
        std::io::ErrorKind::PermissionDenied => FetchError::PermissionDenied {
            path: target.to_path_buf(),
        },
        _ => FetchError::from(e),
    }
}

fn extract_tar_gz(archive_path: &Path, destination: &Path) -> Result<usize> {
    let file = File::open(archive_path)?;
    let mut archive = Archive::new(GzDecoder::new(file));
    let mut count = 0;

    let entries = archive
        .entries()
        .map_err(|e| FetchError::archive(archive_path, e))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| FetchError::archive(archive_path, e))?;
        if entry
            .unpack_in(destination)
            .map_err(|e| entry_error(archive_path, destination, e))?
        {
            count += 1;
        }
    }
    Ok(count)
}

fn extract_zip(archive_path: &Path, destination: &Path) -> Result<usize> {
    let file = File::open(archive_path)?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| FetchError::archive(archive_path, e))?;
    let mut count = 0;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| FetchError::archive(archive_path, e))?;
        let outpath = match file.enclosed_name() {
            Some(path) => destination.join(path),
            None => continue,
        };

        if file.is_dir() {
            fs::ensure_dir_exists(&outpath)?;
        } else {
            if let Some(p) = outpath.parent() {
                fs::ensure_dir_exists(p)?;
            }
            let mut outfile =
                File::create(&outpath).map_err(|e| entry_error(archive_path, &outpath, e))?;
            std::io::copy(&mut file, &mut outfile)
                .map_err(|e| entry_error(archive_path, &outpath, e))?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))
                    .map_err(|e| entry_error(archive_path, &outpath, e))?;
            }
        }

        count += 1;
    }
    Ok(count)
}
