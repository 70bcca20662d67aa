use std::path::PathBuf;

/// Filesystem locations derived from a project root, recomputed per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPaths {
    pub project_root: PathBuf,
    /// Directory holding the archive; entries are unpacked here.
    pub data_dir: PathBuf,
    pub archive_path: PathBuf,
    pub extraction_dir: PathBuf,
}

impl LocalPaths {
    /// Where extraction writes to. The archive carries the extraction
    /// directory's name as its top-level folder, so this is its parent.
    pub fn extraction_target(&self) -> PathBuf {
        self.extraction_dir
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.data_dir.clone())
    }
}
