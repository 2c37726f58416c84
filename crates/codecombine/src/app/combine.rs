//! The combine pass: scan a directory and write every match into one file.

use std::path::{Path, PathBuf};

use crate::app::scan::{Scanner, ScannerConfig};
use crate::domain::errors::CombineError;
use crate::domain::model::{EntryOrder, ExtensionSet, OutputRecord};
use crate::infra::config::Config;
use crate::infra::fs::{OutputSink, read_text};

/// Output file written when nothing else is configured.
pub const DEFAULT_OUTPUT: &str = "combined_code.txt";

/// Runtime options controlling a combine run.
#[derive(Debug, Clone)]
pub struct CombineOptions {
    /// Directory whose immediate entries are scanned.
    pub root: PathBuf,
    /// Output file, resolved against `root` when relative.
    pub output: PathBuf,
    pub extensions: ExtensionSet,
    pub order: EntryOrder,
}

impl CombineOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            extensions: ExtensionSet::default(),
            order: EntryOrder::default(),
        }
    }

    /// Build options from configuration defaults.
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Result<Self, CombineError> {
        Ok(Self {
            root: root.into(),
            output: PathBuf::from(config.combine.output()),
            extensions: ExtensionSet::new(config.combine.extensions())?,
            order: config.combine.order(),
        })
    }

    /// Absolute-or-root-relative location of the output file.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output)
    }

    /// Name of the output file if it lives directly inside `root`.
    fn output_entry_name(&self) -> Option<String> {
        let path = self.output_path();
        if path.parent() != Some(self.root.as_path()) {
            return None;
        }
        path.file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned)
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineReport {
    pub output_path: PathBuf,
    /// Combined entry names, in the order they were written.
    pub files: Vec<String>,
    /// Total bytes of file content written, excluding headers and separators.
    pub content_bytes: usize,
}

/// Runs the combine pass.
#[derive(Debug, Default)]
pub struct Combiner {
    scanner: Scanner,
}

impl Combiner {
    pub fn new() -> Self {
        Self {
            scanner: Scanner::new(),
        }
    }

    /// Rebuild the output file from the matching entries under `options.root`.
    ///
    /// The output is truncated before the directory is listed. The first
    /// failure aborts the run and leaves the records written so far in place.
    pub fn combine(&self, options: &CombineOptions) -> Result<CombineReport, CombineError> {
        let mut sink = OutputSink::create(options.output_path())?;
        tracing::debug!(output = %sink.path().display(), "output truncated");

        let mut scan_cfg = ScannerConfig::from_root(options.root.clone())
            .with_extensions(options.extensions.clone())
            .with_order(options.order);
        if let Some(name) = options.output_entry_name() {
            scan_cfg = scan_cfg.with_exclude(name);
        }
        let scan = self.scanner.scan(&scan_cfg)?;
        tracing::info!(
            root = %scan.root.display(),
            seen = scan.entries_seen,
            matched = scan.matched.len(),
            extensions = %options.extensions,
            "scanned directory"
        );

        let mut content_bytes = 0;
        for name in &scan.matched {
            let content = read_text(&options.root.join(name))?;
            sink.write_record(&OutputRecord {
                name,
                content: &content,
            })?;
            tracing::debug!(name = %name, bytes = content.len(), "combined file");
            content_bytes += content.len();
        }

        let output_path = sink.finish()?;
        tracing::info!(
            output = %output_path.display(),
            files = scan.matched.len(),
            content_bytes,
            "combine finished"
        );

        Ok(CombineReport {
            output_path,
            files: scan.matched,
            content_bytes,
        })
    }
}

/// Convenience wrapper for a default-configured run over `root`.
pub fn combine_dir(root: &Path) -> Result<CombineReport, CombineError> {
    Combiner::new().combine(&CombineOptions::new(root))
}
