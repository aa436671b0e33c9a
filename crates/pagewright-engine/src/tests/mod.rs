use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary site root
pub fn create_test_site() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a page (or any file) under the site root, with parent directories
pub fn create_test_page(site: &TempDir, relative: &str, content: &str) -> PathBuf {
    let file_path = site.path().join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}
