use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Page not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid site root: {0}")]
    InvalidSiteRoot(String),
}

/// Extensions of files that hold page markup.
pub const PAGE_EXTENSIONS: &[&str] = &["jsx", "tsx", "js"];

/// Read a page and return its markup
pub fn read_page(relative_path: &RelativePath, site_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(site_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    Ok(fs::read_to_string(&absolute_path)?)
}

/// Write markup to a page, creating parent directories as needed
pub fn write_page(
    relative_path: &RelativePath,
    site_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(site_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&absolute_path, content)?;
    log::debug!("wrote {} bytes to {}", content.len(), absolute_path.display());
    Ok(())
}

/// Scan the site root for page files, returned relative to the root and sorted
pub fn scan_pages(site_root: &Path) -> Result<Vec<RelativePathBuf>, IoError> {
    validate_site_root(site_root)?;

    let mut files = Vec::new();
    scan_directory_recursive(site_root, &mut files)?;

    let mut pages: Vec<RelativePathBuf> = files
        .iter()
        .filter_map(|path| to_relative(path, site_root))
        .collect();
    pages.sort();
    Ok(pages)
}

/// Express an absolute path under `site_root` as a relative page path.
pub fn to_relative(path: &Path, site_root: &Path) -> Option<RelativePathBuf> {
    let stripped = path.strip_prefix(site_root).ok()?;
    RelativePathBuf::from_path(stripped).ok()
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            if path.file_name().is_some_and(|name| name == "node_modules") {
                continue;
            }
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && PAGE_EXTENSIONS.iter().any(|page_ext| ext == *page_ext)
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_site_root(path: &Path) -> Result<(), IoError> {
    if !path.is_dir() {
        return Err(IoError::InvalidSiteRoot(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}
