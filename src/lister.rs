//! Directory listing used to expand ant-style resource paths and find bundle files.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::GlobBuilder;
use walkdir::WalkDir;

use crate::asset_paths::{is_ant_pattern, is_external_reference};

/// Lists the file names available under a web path.
pub trait DirectoryLister {
  /// List `path`.
  ///
  /// Patterns yield full web paths of matching files, directories yield the names of the
  /// files they contain, and plain files and external URLs yield themselves.
  fn list(&self, path: &str) -> io::Result<Vec<String>>;
}

impl<T: DirectoryLister + ?Sized> DirectoryLister for &T {
  fn list(&self, path: &str) -> io::Result<Vec<String>> {
    (**self).list(path)
  }
}

impl<T: DirectoryLister + ?Sized> DirectoryLister for Arc<T> {
  fn list(&self, path: &str) -> io::Result<Vec<String>> {
    (**self).list(path)
  }
}

/// [`DirectoryLister`] backed by the local filesystem below a web root.
#[derive(Debug, Clone)]
pub struct FsDirectoryLister {
  root: PathBuf,
}

impl FsDirectoryLister {
  /// Create a lister that resolves web paths relative to `root`.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn resolve(&self, web_path: &str) -> PathBuf {
    let relative = web_path.trim_start_matches('/');
    if relative.is_empty() {
      self.root.clone()
    } else {
      self.root.join(relative)
    }
  }

  fn list_pattern(&self, pattern: &str) -> io::Result<Vec<String>> {
    let rooted = pattern.starts_with('/');
    let relative = pattern.trim_start_matches('/');
    let matcher = GlobBuilder::new(relative)
      .literal_separator(true)
      .build()
      .map_err(|err| io::Error::new(ErrorKind::InvalidInput, err))?
      .compile_matcher();

    let base = literal_prefix(relative);
    let start = self.resolve(&base);
    if !start.is_dir() {
      return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for entry in WalkDir::new(&start).follow_links(true).sort_by_file_name() {
      let entry = entry.map_err(walkdir_error)?;
      if !entry.file_type().is_file() {
        continue;
      }

      let Ok(stripped) = entry.path().strip_prefix(&self.root) else {
        continue;
      };
      let web_path = stripped.to_string_lossy().replace('\\', "/");
      if matcher.is_match(&web_path) {
        matches.push(if rooted {
          format!("/{web_path}")
        } else {
          web_path
        });
      }
    }

    matches.sort();
    Ok(matches)
  }

  fn list_directory(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
      let entry = entry?;
      if entry.file_type()?.is_file() {
        names.push(entry.file_name().to_string_lossy().into_owned());
      }
    }
    names.sort();
    Ok(names)
  }
}

impl DirectoryLister for FsDirectoryLister {
  fn list(&self, path: &str) -> io::Result<Vec<String>> {
    if is_external_reference(path) {
      return Ok(vec![path.to_string()]);
    }
    if is_ant_pattern(path) {
      return self.list_pattern(path);
    }

    let resolved = self.resolve(path);
    match std::fs::metadata(&resolved) {
      Ok(metadata) if metadata.is_dir() => Self::list_directory(&resolved),
      Ok(_) => Ok(vec![path.to_string()]),
      Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
      Err(err) => Err(err),
    }
  }
}

/// Directory portion of a pattern that contains no glob metacharacters.
fn literal_prefix(pattern: &str) -> String {
  let mut prefix = Vec::new();
  let mut segments = pattern.split('/').peekable();
  while let Some(segment) = segments.next() {
    if is_ant_pattern(segment) || segments.peek().is_none() {
      break;
    }
    prefix.push(segment);
  }
  prefix.join("/")
}

fn walkdir_error(err: walkdir::Error) -> io::Error {
  let kind = err.io_error().map_or(ErrorKind::Other, io::Error::kind);
  io::Error::new(kind, err)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  fn fixture() -> tempfile::TempDir {
    let temp = tempdir().expect("failed to create temp dir");
    let root = temp.path();
    fs::create_dir_all(root.join("js/lib/extra")).unwrap();
    fs::create_dir_all(root.join("css")).unwrap();
    fs::write(root.join("js/b.js"), "b").unwrap();
    fs::write(root.join("js/a.js"), "a").unwrap();
    fs::write(root.join("js/readme.txt"), "").unwrap();
    fs::write(root.join("js/lib/c.js"), "c").unwrap();
    fs::write(root.join("js/lib/extra/d.js"), "d").unwrap();
    fs::write(root.join("css/site.css"), "").unwrap();
    temp
  }

  #[test]
  fn single_star_stays_in_one_directory() {
    let temp = fixture();
    let lister = FsDirectoryLister::new(temp.path());
    assert_eq!(lister.list("js/*.js").unwrap(), vec!["js/a.js", "js/b.js"]);
  }

  #[test]
  fn double_star_spans_directories() {
    let temp = fixture();
    let lister = FsDirectoryLister::new(temp.path());
    assert_eq!(lister.list("js/lib/**/*.js").unwrap(), vec![
      "js/lib/c.js",
      "js/lib/extra/d.js"
    ]);
  }

  #[test]
  fn rooted_patterns_keep_their_leading_separator() {
    let temp = fixture();
    let lister = FsDirectoryLister::new(temp.path());
    assert_eq!(lister.list("/css/*.css").unwrap(), vec!["/css/site.css"]);
  }

  #[test]
  fn directories_list_file_names() {
    let temp = fixture();
    let lister = FsDirectoryLister::new(temp.path());
    assert_eq!(lister.list("/js").unwrap(), vec!["a.js", "b.js", "readme.txt"]);
  }

  #[test]
  fn plain_files_list_themselves() {
    let temp = fixture();
    let lister = FsDirectoryLister::new(temp.path());
    assert_eq!(lister.list("css/site.css").unwrap(), vec!["css/site.css"]);
  }

  #[test]
  fn missing_paths_list_nothing() {
    let temp = fixture();
    let lister = FsDirectoryLister::new(temp.path());
    assert!(lister.list("fonts").unwrap().is_empty());
    assert!(lister.list("fonts/*.woff").unwrap().is_empty());
  }

  #[test]
  fn external_urls_list_themselves() {
    let temp = fixture();
    let lister = FsDirectoryLister::new(temp.path());
    assert_eq!(lister.list("https://cdn.example.com/a.js").unwrap(), vec![
      "https://cdn.example.com/a.js"
    ]);
  }

  #[test]
  fn literal_prefix_stops_at_first_pattern_segment() {
    assert_eq!(literal_prefix("js/lib/**/*.js"), "js/lib");
    assert_eq!(literal_prefix("*.js"), "");
    assert_eq!(literal_prefix("js/{a,b}/x.js"), "js");
  }
}
