//! Filesystem adapters: the buffered output handle and whole-file text reads.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use crate::domain::errors::CombineError;
use crate::domain::model::OutputRecord;

/// Exclusively owned, buffered handle on the output file.
///
/// Created with truncate semantics, so every run rebuilds the file from
/// scratch. Dropping the sink without calling [`OutputSink::finish`] still
/// flushes what was buffered, which is how an aborted run leaves a partial
/// file behind.
#[derive(Debug)]
pub struct OutputSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl OutputSink {
    /// Create or truncate the file at `path`.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, CombineError> {
        let path = path.into();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| CombineError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_record(&mut self, record: &OutputRecord<'_>) -> Result<(), CombineError> {
        record
            .write_to(&mut self.writer)
            .map_err(|source| CombineError::Write {
                path: self.path.clone(),
                source,
            })
    }

    /// Flush and close the file, surfacing errors that a drop would swallow.
    pub fn finish(self) -> Result<PathBuf, CombineError> {
        let Self { path, writer } = self;
        match writer.into_inner() {
            Ok(file) => {
                drop(file);
                Ok(path)
            }
            Err(err) => Err(CombineError::Write {
                path,
                source: err.into_error(),
            }),
        }
    }
}

/// Read a whole file as UTF-8 text.
///
/// Content that is not valid UTF-8 is reported as [`CombineError::Decode`];
/// every other failure, including the path being a directory, is a
/// [`CombineError::Read`].
pub fn read_text(path: &Path) -> Result<String, CombineError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::InvalidData {
            CombineError::Decode {
                path: path.to_path_buf(),
                source,
            }
        } else {
            CombineError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
