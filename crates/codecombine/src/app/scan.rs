//! Directory scanning services.

use std::io;
use std::path::PathBuf;

use ignore::WalkBuilder;

use crate::domain::errors::CombineError;
use crate::domain::model::{EntryOrder, ExtensionSet};

/// Inputs for a single-level scan.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub root: PathBuf,
    pub extensions: ExtensionSet,
    pub order: EntryOrder,
    /// Entry name never reported as a match, normally the output file.
    pub exclude: Option<String>,
}

impl ScannerConfig {
    pub fn from_root(root: PathBuf) -> Self {
        Self {
            root,
            extensions: ExtensionSet::default(),
            order: EntryOrder::default(),
            exclude: None,
        }
    }

    pub fn with_extensions(mut self, extensions: ExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_order(mut self, order: EntryOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude = Some(name.into());
        self
    }
}

/// Result of scanning a directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub root: PathBuf,
    /// Matched entry names, in the order they will be combined.
    pub matched: Vec<String>,
    /// Number of immediate entries seen, matched or not.
    pub entries_seen: usize,
}

/// Lists the immediate entries of a directory whose names match a suffix set.
///
/// Subdirectories are never descended into, but a subdirectory whose own name
/// matches is reported like any file. No ignore files, hidden-file rules, or
/// type checks apply.
#[derive(Debug, Default)]
pub struct Scanner;

impl Scanner {
    pub fn new() -> Self {
        Self
    }

    pub fn scan(&self, cfg: &ScannerConfig) -> Result<ScanResult, CombineError> {
        let enumerate_err = |source: ignore::Error| CombineError::Enumerate {
            dir: cfg.root.clone(),
            source,
        };

        let walker = WalkBuilder::new(&cfg.root)
            .standard_filters(false)
            .max_depth(Some(1))
            .build();

        let mut matched = Vec::new();
        let mut entries_seen = 0;

        for result in walker {
            let entry = result.map_err(enumerate_err)?;
            if entry.depth() == 0 {
                // The root may be a symlink; judge it by its target.
                if !entry.path().is_dir() {
                    return Err(enumerate_err(ignore::Error::Io(io::Error::new(
                        io::ErrorKind::NotADirectory,
                        "not a directory",
                    ))));
                }
                continue;
            }

            entries_seen += 1;
            let Some(name) = entry.file_name().to_str() else {
                if cfg.extensions.matches(&entry.file_name().to_string_lossy()) {
                    return Err(CombineError::EntryName {
                        path: entry.path().to_path_buf(),
                    });
                }
                tracing::debug!(
                    path = %entry.path().display(),
                    "ignoring non-matching entry with a non UTF-8 name"
                );
                continue;
            };

            if cfg.exclude.as_deref() == Some(name) {
                tracing::debug!(name, "skipping output file");
                continue;
            }

            if cfg.extensions.matches(name) {
                matched.push(name.to_owned());
            }
        }

        if cfg.order == EntryOrder::Name {
            matched.sort();
        }

        Ok(ScanResult {
            root: cfg.root.clone(),
            matched,
            entries_seen,
        })
    }
}
