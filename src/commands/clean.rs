use crate::core::config::FetchConfig;
use crate::error::Result;
use crate::utils::fs;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub archive_removed: bool,
    pub extracted_removed: usize,
}

/// Removes the downloaded archive and/or the extracted files.
///
/// The extraction directory is left behind empty so the next fetch unpacks
/// into it again. This is how a truncated archive from an interrupted
/// download gets replaced.
pub fn clean(config: &FetchConfig, archive: bool, extracted: bool) -> Result<CleanReport> {
    let paths = config.paths();
    let mut report = CleanReport::default();

    if archive {
        report.archive_removed = fs::remove_file_if_exists(&paths.archive_path)?;
        if report.archive_removed {
            println!("Removed archive {:?}", paths.archive_path);
        } else {
            println!("No archive at {:?}", paths.archive_path);
        }
    }

    if extracted {
        report.extracted_removed = fs::count_entries(&paths.extraction_dir)?;
        fs::remove_dir_recursive(&paths.extraction_dir)?;
        fs::ensure_dir_exists(&paths.extraction_dir)?;
        println!(
            "Removed {} extracted entries from {:?}",
            report.extracted_removed, paths.extraction_dir
        );
    }

    Ok(report)
}

pub fn clean_dataset(config: &FetchConfig, archive_only: bool, extracted_only: bool) -> Result<()> {
    // With neither flag, both go.
    let (archive, extracted) = match (archive_only, extracted_only) {
        (false, false) => (true, true),
        flags => flags,
    };

    let report = clean(config, archive, extracted)?;
    if report.archive_removed || report.extracted_removed > 0 {
        println!("✅ Cleanup completed");
    } else {
        println!("Nothing to clean up");
    }
    Ok(())
}
