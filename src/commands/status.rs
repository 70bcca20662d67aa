use crate::core::config::FetchConfig;
use crate::error::Result;
use crate::utils::fs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetStatus {
    pub archive_size: Option<u64>,
    pub extracted_entries: usize,
}

impl DatasetStatus {
    pub fn archive_present(&self) -> bool {
        self.archive_size.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.archive_present() && self.extracted_entries > 0
    }
}

/// Looks at the local files only; never touches the network.
pub fn inspect(config: &FetchConfig) -> Result<DatasetStatus> {
    let paths = config.paths();

    let archive_size = if paths.archive_path.is_file() {
        Some(std::fs::metadata(&paths.archive_path)?.len())
    } else {
        None
    };

    Ok(DatasetStatus {
        archive_size,
        extracted_entries: fs::count_entries(&paths.extraction_dir)?,
    })
}

pub fn show_status(config: &FetchConfig) -> Result<()> {
    let paths = config.paths();
    let status = inspect(config)?;

    println!("Dataset status");
    println!("==============");
    println!("Source:   {}", config.remote_url);

    match status.archive_size {
        Some(size) => println!("Archive:  {:?} ({size} bytes)", paths.archive_path),
        None => println!("Archive:  not downloaded ({:?})", paths.archive_path),
    }

    if status.extracted_entries > 0 {
        println!(
            "Images:   {} entries in {:?}",
            status.extracted_entries, paths.extraction_dir
        );
    } else {
        println!("Images:   not extracted ({:?})", paths.extraction_dir);
    }

    println!();
    if status.is_ready() {
        println!("✅ Dataset is ready");
    } else {
        println!("Run 'celeba-fetch fetch' to download and unpack the dataset");
    }

    Ok(())
}
