//! Pattern resolution against a root directory.
//!
//! Resolution is a pure function of the pattern and the filesystem: it
//! returns relative file paths in a deterministic order and never touches
//! the archive. Directories are never returned.

use crate::BuildOptions;
use crate::Pattern;
use crate::Result;
use crate::pattern::IncludeGlob;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Resolves a pattern to the files it selects below `root`.
///
/// Returned paths are relative to `root`, sorted depth-first by file name,
/// with the exclude filter (if any) already applied. A pattern that matches
/// nothing yields an empty vector.
///
/// # Examples
///
/// ```no_run
/// use distzip_core::BuildOptions;
/// use distzip_core::Pattern;
/// use distzip_core::resolve;
/// use std::path::Path;
///
/// let pattern = Pattern::parse("dist/**/*.js:!*.min.js")?;
/// let files = resolve(&pattern, Path::new("project"), &BuildOptions::default())?;
/// for file in files {
///     println!("{}", file.display());
/// }
/// # Ok::<(), distzip_core::DistzipError>(())
/// ```
///
/// # Errors
///
/// Returns an error if a directory below the walked prefix cannot be read.
pub fn resolve(pattern: &Pattern, root: &Path, options: &BuildOptions) -> Result<Vec<PathBuf>> {
    let include = pattern.include();
    let mut files = if include.is_literal() {
        resolve_literal(include, root)?
    } else {
        GlobWalker::new(root, include, options).files()?
    };

    if pattern.is_include_exclude() {
        files.retain(|file| !pattern.excludes(file));
    }

    tracing::trace!(
        pattern = pattern.as_str(),
        matched = files.len(),
        "resolved pattern"
    );
    Ok(files)
}

fn resolve_literal(include: &IncludeGlob, root: &Path) -> Result<Vec<PathBuf>> {
    let relative: PathBuf = include
        .as_str()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    if relative.as_os_str().is_empty() {
        return Ok(Vec::new());
    }

    match fs::metadata(root.join(&relative)) {
        Ok(metadata) if metadata.is_file() => Ok(vec![relative]),
        Ok(_) => Ok(Vec::new()),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Walks the literal prefix of a glob and collects matching files.
struct GlobWalker<'a> {
    root: &'a Path,
    glob: &'a IncludeGlob,
    options: &'a BuildOptions,
}

impl<'a> GlobWalker<'a> {
    fn new(root: &'a Path, glob: &'a IncludeGlob, options: &'a BuildOptions) -> Self {
        Self {
            root,
            glob,
            options,
        }
    }

    fn files(&self) -> Result<Vec<PathBuf>> {
        let start = self.root.join(self.glob.base());
        if !start.is_dir() {
            return Ok(Vec::new());
        }

        let include_hidden = self.options.include_hidden;
        let names_hidden = self.glob.names_hidden();
        let walker = WalkDir::new(&start)
            .follow_links(self.options.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                entry.depth() == 0
                    || include_hidden
                    || !is_hidden(entry.file_name())
                    || (names_hidden && self.reaches(entry.path()))
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            if !is_file(&entry) {
                continue;
            }

            let relative = self.relative(entry.path())?.to_path_buf();
            let parts = names(&relative);
            if !self.glob.is_match(&parts.join("/")) {
                continue;
            }
            if !include_hidden
                && parts.iter().any(|part| part.starts_with('.'))
                && !self.glob.admits(&parts)
            {
                continue;
            }

            tracing::trace!(path = %relative.display(), "glob match");
            files.push(relative);
        }

        Ok(files)
    }

    // Hidden entries are only entered when the glob can still match below
    // them.
    fn reaches(&self, path: &Path) -> bool {
        path.strip_prefix(self.root)
            .is_ok_and(|relative| self.glob.admits_prefix(&names(relative)))
    }

    fn relative<'p>(&self, path: &'p Path) -> Result<&'p Path> {
        path.strip_prefix(self.root).map_err(|_| {
            std::io::Error::other(format!("walked outside of root: {}", path.display())).into()
        })
    }
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|name| name.starts_with('.'))
}

fn is_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_file())
}

fn names(path: &Path) -> Vec<Cow<'_, str>> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect()
}
