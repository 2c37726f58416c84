//! Domain models for suffix filtering, ordering, and output records.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::errors::CombineError;

/// Suffixes combined when nothing else is configured.
pub const DEFAULT_EXTENSIONS: [&str; 3] = [".html", ".css", ".js"];

/// Ordered set of filename suffixes selecting which entries are combined.
///
/// Matching is a plain, case-sensitive "ends with" test rather than an
/// extension parse, so `page.xhtml` matches `.html` while `page.HTML` does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    suffixes: Vec<String>,
}

impl ExtensionSet {
    /// Build a set from raw suffixes, preserving their order.
    pub fn new<I, S>(suffixes: I) -> Result<Self, CombineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let suffixes: Vec<String> = suffixes.into_iter().map(Into::into).collect();
        if suffixes.is_empty() {
            return Err(CombineError::InvalidExtension {
                reason: "at least one suffix is required".into(),
            });
        }
        if suffixes.iter().any(String::is_empty) {
            return Err(CombineError::InvalidExtension {
                reason: "empty suffix would match every entry".into(),
            });
        }
        Ok(Self { suffixes })
    }

    /// Whether `name` ends with any suffix in the set.
    pub fn matches(&self, name: &str) -> bool {
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.suffixes.join(", "))
    }
}

/// Order in which matched entries are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum EntryOrder {
    /// Whatever order the filesystem enumerates entries in.
    #[default]
    #[serde(alias = "fs", alias = "unsorted")]
    #[value(alias = "fs", alias = "unsorted")]
    Listing,
    /// Matched names sorted bytewise.
    #[serde(alias = "sorted", alias = "alpha")]
    #[value(alias = "sorted", alias = "alpha")]
    Name,
}

impl EntryOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryOrder::Listing => "listing",
            EntryOrder::Name => "name",
        }
    }
}

impl FromStr for EntryOrder {
    type Err = EntryOrderParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "listing" | "fs" | "unsorted" => Ok(EntryOrder::Listing),
            "name" | "sorted" | "alpha" => Ok(EntryOrder::Name),
            other => Err(EntryOrderParseError::UnknownOrder(other.to_string())),
        }
    }
}

/// Error returned when parsing an [`EntryOrder`] fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum EntryOrderParseError {
    #[error("unknown entry order '{0}'")]
    UnknownOrder(String),
}

/// One combined file: a header line, the verbatim content, then a blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord<'a> {
    pub name: &'a str,
    pub content: &'a str,
}

impl OutputRecord<'_> {
    /// The `--- name ---` marker line, without its newline.
    pub fn header(&self) -> String {
        format!("--- {} ---", self.name)
    }

    /// Write the record in its on-disk layout.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.header())?;
        out.write_all(self.content.as_bytes())?;
        out.write_all(b"\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_matches_web_sources() {
        let set = ExtensionSet::default();
        assert!(set.matches("index.html"));
        assert!(set.matches("style.css"));
        assert!(set.matches("app.js"));
        assert!(!set.matches("readme.md"));
        assert!(!set.matches("app.json"));
    }

    #[test]
    fn matching_is_a_case_sensitive_suffix_test() {
        let set = ExtensionSet::default();
        assert!(set.matches("legacy.xhtml"));
        assert!(set.matches(".js"));
        assert!(!set.matches("INDEX.HTML"));
        assert!(!set.matches("app.js.bak"));
    }

    #[test]
    fn rejects_empty_suffixes() {
        assert!(ExtensionSet::new(Vec::<String>::new()).is_err());
        assert!(ExtensionSet::new([".rs", ""]).is_err());
        let set = ExtensionSet::new([".rs"]).unwrap();
        assert_eq!(set.suffixes(), [".rs".to_string()]);
    }

    #[test]
    fn parses_entry_order_aliases() {
        assert_eq!("listing".parse::<EntryOrder>(), Ok(EntryOrder::Listing));
        assert_eq!(" Sorted ".parse::<EntryOrder>(), Ok(EntryOrder::Name));
        assert!("random".parse::<EntryOrder>().is_err());
    }

    #[test]
    fn entry_order_aliases_agree_across_sources() {
        #[derive(Deserialize)]
        struct Holder {
            order: EntryOrder,
        }

        for (alias, expected) in [
            ("fs", EntryOrder::Listing),
            ("unsorted", EntryOrder::Listing),
            ("sorted", EntryOrder::Name),
            ("alpha", EntryOrder::Name),
        ] {
            let parsed: Holder = toml::from_str(&format!("order = \"{alias}\"")).unwrap();
            assert_eq!(parsed.order, expected, "toml alias {alias}");
            assert_eq!(
                <EntryOrder as ValueEnum>::from_str(alias, false),
                Ok(expected),
                "clap alias {alias}"
            );
            assert_eq!(alias.parse::<EntryOrder>(), Ok(expected), "FromStr alias {alias}");
        }
    }

    #[test]
    fn record_layout_has_header_content_and_blank_line() {
        let record = OutputRecord {
            name: "app.js",
            content: "console.log(1)",
        };
        let mut buf = Vec::new();
        record.write_to(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "--- app.js ---\nconsole.log(1)\n\n"
        );
    }
}
