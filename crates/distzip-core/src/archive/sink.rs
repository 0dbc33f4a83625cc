//! Zip output stream.
//!
//! Entries are written to a temporary file next to the destination. The
//! file is renamed over the destination only by [`ZipSink::finish`], so a
//! failed build never leaves a truncated archive behind and a successful
//! one replaces the previous archive.

use crate::DistzipError;
use crate::Result;
use std::collections::HashSet;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Outcome of adding one file to a [`ZipSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The file was written; `bytes` is its uncompressed size.
    Added {
        /// Uncompressed bytes copied into the entry.
        bytes: u64,
    },
    /// An entry with this name already exists; nothing was written.
    Duplicate,
}

/// Streaming zip writer that lands on disk atomically.
pub struct ZipSink {
    zip: ZipWriter<NamedTempFile>,
    destination: PathBuf,
    options: SimpleFileOptions,
    names: HashSet<String>,
    buffer: Vec<u8>,
    own_paths: Vec<PathBuf>,
}

impl ZipSink {
    /// Opens a sink for `destination`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the temporary file cannot
    /// be created.
    pub fn create(destination: &Path, compression_level: u8) -> Result<Self> {
        let dir = parent_dir(destination);
        fs::create_dir_all(dir)?;

        let mut builder = tempfile::Builder::new();
        builder.prefix(".distzip-").suffix(".part");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o644));
        }
        let temp = builder.tempfile_in(dir)?;

        // Both paths are compared against matches so the archive never
        // packs itself.
        let own_paths = [destination, temp.path()]
            .iter()
            .filter_map(|p| fs::canonicalize(p).ok())
            .collect();

        tracing::debug!(
            destination = %destination.display(),
            temp = %temp.path().display(),
            level = compression_level,
            "opened zip stream"
        );

        Ok(Self {
            zip: ZipWriter::new(temp),
            destination: destination.to_path_buf(),
            options: file_options(compression_level),
            names: HashSet::new(),
            buffer: vec![0u8; COPY_BUFFER_SIZE],
            own_paths,
        })
    }

    /// Returns `true` if `path` is the destination archive or this sink's
    /// temporary file.
    #[must_use]
    pub fn owns(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        if !self.own_paths.iter().any(|own| own.file_name() == Some(name)) {
            return false;
        }
        fs::canonicalize(path).is_ok_and(|canonical| self.own_paths.contains(&canonical))
    }

    /// Streams `source` into a new entry called `name`.
    ///
    /// If an entry called `name` was already written, the file is not read
    /// and [`AddOutcome::Duplicate`] is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the entry cannot be
    /// written.
    pub fn add_file(&mut self, source: &Path, name: &str) -> Result<AddOutcome> {
        if !self.names.insert(name.to_string()) {
            tracing::debug!(entry = name, "duplicate entry name, keeping the first");
            return Ok(AddOutcome::Duplicate);
        }

        let mut file = File::open(source)?;
        let metadata = file.metadata()?;

        let mut options = self
            .options
            .large_file(metadata.len() >= u64::from(u32::MAX));
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            options = options.unix_permissions(metadata.permissions().mode());
        }

        self.zip.start_file(name, options)?;

        let mut bytes = 0u64;
        loop {
            let read = file.read(&mut self.buffer)?;
            if read == 0 {
                break;
            }
            self.zip.write_all(&self.buffer[..read])?;
            bytes += read as u64;
        }

        tracing::trace!(entry = name, bytes, "entry written");
        Ok(AddOutcome::Added { bytes })
    }

    /// Number of distinct entries written so far.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.names.len()
    }

    /// Writes the central directory, moves the archive into place and
    /// returns its final size in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be finalized, flushed or
    /// renamed over the destination.
    pub fn finish(self) -> Result<u64> {
        let mut temp = self.zip.finish()?;
        temp.flush()?;
        temp.as_file().sync_all()?;
        let size = temp.as_file().metadata()?.len();

        temp.persist(&self.destination).map_err(|e| e.error)?;

        tracing::debug!(
            destination = %self.destination.display(),
            size,
            "archive finalized"
        );
        Ok(size)
    }
}

/// Converts a relative path into a zip entry name.
///
/// Zip names use `/` separators on every platform.
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8.
pub fn entry_name(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| {
                DistzipError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("path is not valid UTF-8: {}", relative.display()),
                ))
            })?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}

fn file_options(level: u8) -> SimpleFileOptions {
    if level == 0 {
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
    } else {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level)))
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::tree;
    use crate::test_utils::zip_names;
    use tempfile::TempDir;

    #[test]
    fn test_entry_name_uses_forward_slashes() {
        let path: PathBuf = ["a", "b", "c.txt"].iter().collect();
        assert_eq!(entry_name(&path).unwrap(), "a/b/c.txt");
        assert_eq!(entry_name(Path::new("./a.txt")).unwrap(), "a.txt");
    }

    #[test]
    fn test_sink_writes_entries() {
        let source = tree(&["a/1.txt", "a/2.txt"]);
        let out = TempDir::new().unwrap();
        let dest = out.path().join("out.zip");

        let mut sink = ZipSink::create(&dest, 9).unwrap();
        let outcome = sink
            .add_file(&source.path().join("a/1.txt"), "a/1.txt")
            .unwrap();
        assert_eq!(outcome, AddOutcome::Added { bytes: 7 });
        sink.add_file(&source.path().join("a/2.txt"), "a/2.txt")
            .unwrap();
        let size = sink.finish().unwrap();

        assert_eq!(size, fs::metadata(&dest).unwrap().len());
        assert_eq!(zip_names(&dest), ["a/1.txt", "a/2.txt"]);
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let source = tree(&["x.txt", "y.txt"]);
        let out = TempDir::new().unwrap();
        let dest = out.path().join("dup.zip");

        let mut sink = ZipSink::create(&dest, 9).unwrap();
        sink.add_file(&source.path().join("x.txt"), "x.txt").unwrap();
        let outcome = sink.add_file(&source.path().join("y.txt"), "x.txt").unwrap();
        assert_eq!(outcome, AddOutcome::Duplicate);
        assert_eq!(sink.entries(), 1);
        sink.finish().unwrap();

        assert_eq!(zip_names(&dest), ["x.txt"]);
    }

    #[test]
    fn test_create_makes_parent_directories() {
        let out = TempDir::new().unwrap();
        let dest = out.path().join("nested/deeper/out.zip");

        let sink = ZipSink::create(&dest, 9).unwrap();
        sink.finish().unwrap();
        assert!(dest.is_file());
    }

    #[test]
    fn test_dropped_sink_leaves_no_files() {
        let source = tree(&["x.txt"]);
        let out = TempDir::new().unwrap();
        let dest = out.path().join("out.zip");

        {
            let mut sink = ZipSink::create(&dest, 9).unwrap();
            sink.add_file(&source.path().join("x.txt"), "x.txt").unwrap();
        }

        assert!(!dest.exists());
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let out = TempDir::new().unwrap();
        let mut sink = ZipSink::create(&out.path().join("out.zip"), 9).unwrap();
        let err = sink
            .add_file(&out.path().join("missing.txt"), "missing.txt")
            .unwrap_err();
        assert!(matches!(err, DistzipError::Io(_)));
    }

    #[test]
    fn test_owns_detects_destination_and_temp_file() {
        let out = TempDir::new().unwrap();
        let dest = out.path().join("out.zip");
        fs::write(&dest, b"old archive").unwrap();

        let sink = ZipSink::create(&dest, 9).unwrap();
        assert!(sink.owns(&dest));
        let temp = fs::read_dir(out.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .find(|p| p.extension().is_some_and(|e| e == "part"))
            .unwrap();
        assert!(sink.owns(&temp));

        fs::write(out.path().join("other.zip"), b"").unwrap();
        assert!(!sink.owns(&out.path().join("other.zip")));
    }

    #[test]
    fn test_stored_level_writes_uncompressed() {
        let source = tree(&["big.txt"]);
        fs::write(source.path().join("big.txt"), "a".repeat(10_000)).unwrap();
        let out = TempDir::new().unwrap();

        let stored = out.path().join("stored.zip");
        let mut sink = ZipSink::create(&stored, 0).unwrap();
        sink.add_file(&source.path().join("big.txt"), "big.txt").unwrap();
        let stored_size = sink.finish().unwrap();

        let deflated = out.path().join("deflated.zip");
        let mut sink = ZipSink::create(&deflated, 9).unwrap();
        sink.add_file(&source.path().join("big.txt"), "big.txt").unwrap();
        let deflated_size = sink.finish().unwrap();

        assert!(stored_size > 10_000);
        assert!(deflated_size < stored_size);
    }
}
