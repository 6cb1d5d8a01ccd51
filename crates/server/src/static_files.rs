//! Serves a browser front end from a directory on disk.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

use crate::routes::response::{ApiError, ApiReply};

#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let root = root
            .canonicalize()
            .with_context(|| format!("Web root {} is not accessible", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn serve(&self, url_path: &str) -> Result<ApiReply, ApiError> {
        let file = self
            .resolve(url_path)
            .ok_or_else(|| ApiError::NoRoute(url_path.to_string()))?;
        let body = std::fs::read(&file).map_err(|_| ApiError::NoRoute(url_path.to_string()))?;
        Ok(ApiReply::bytes(content_type(&file), body))
    }

    /// Map a URL path to a file under the root, refusing anything that
    /// would escape it.
    fn resolve(&self, url_path: &str) -> Option<PathBuf> {
        let relative = url_path.trim_start_matches('/');
        let relative = if relative.is_empty() {
            "index.html"
        } else {
            relative
        };

        let mut candidate = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => candidate.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        if candidate.is_dir() {
            candidate.push("index.html");
        }

        let resolved = candidate.canonicalize().ok()?;
        if resolved.starts_with(&self.root) && resolved.is_file() {
            Some(resolved)
        } else {
            None
        }
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn web_root() -> (StaticFiles, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("index.html"), "<h1>tasks</h1>").unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/app.js"), "console.log(1)").unwrap();
        (StaticFiles::new(dir.path()).unwrap(), dir)
    }

    #[test]
    fn serves_index_and_assets() {
        let (files, _dir) = web_root();
        let index = files.serve("/").unwrap();
        assert_eq!(index.content_type, "text/html; charset=utf-8");
        assert_eq!(index.body_str(), "<h1>tasks</h1>");

        let script = files.serve("/assets/app.js").unwrap();
        assert_eq!(script.content_type, "application/javascript");
    }

    #[test]
    fn refuses_path_traversal() {
        let (files, _dir) = web_root();
        assert!(files.serve("/../etc/passwd").is_err());
        assert!(files.serve("/assets/../../secret").is_err());
        assert!(files.serve("/missing.css").is_err());
    }
}
