//! Configuration type definitions.
//!
//! These types are pure data - no I/O or complex logic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::build::placeholder::Placeholder;

/// The whole `docmerge.yaml` file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub concat: ConcatConfig,
    #[serde(default)]
    pub html: HtmlConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

// =============================================================================
// Concatenation
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcatConfig {
    /// Directory holding the chapters to merge
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// Merged Markdown file
    #[serde(default = "default_markdown_file")]
    pub output: PathBuf,
    /// Literal written on its own line between chapters
    #[serde(default)]
    pub pagebreak: Option<String>,
    /// File names never merged (case-insensitive)
    #[serde(default = "default_reserved")]
    pub reserved: Vec<String>,
    /// Merge chapters in name order rather than directory order
    #[serde(default = "default_sort")]
    pub sort: bool,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("./")
}

fn default_markdown_file() -> PathBuf {
    PathBuf::from("index.md")
}

fn default_reserved() -> Vec<String> {
    vec!["readme.md".to_string(), "readme-references.md".to_string()]
}

fn default_sort() -> bool {
    true
}

impl Default for ConcatConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output: default_markdown_file(),
            pagebreak: None,
            reserved: default_reserved(),
            sort: default_sort(),
        }
    }
}

// =============================================================================
// HTML page
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlConfig {
    /// Markdown document to convert
    #[serde(default = "default_markdown_file")]
    pub input: PathBuf,
    /// HTML page to write
    #[serde(default = "default_html_file")]
    pub output: PathBuf,
    #[serde(default = "default_header")]
    pub header: PathBuf,
    #[serde(default = "default_footer")]
    pub footer: PathBuf,
    /// Extra literal replacements, applied after `{{VERSION}}`
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
}

fn default_html_file() -> PathBuf {
    PathBuf::from("index.html")
}

fn default_header() -> PathBuf {
    PathBuf::from("./src/html/header.html")
}

fn default_footer() -> PathBuf {
    PathBuf::from("./src/html/footer.html")
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            input: default_markdown_file(),
            output: default_html_file(),
            header: default_header(),
            footer: default_footer(),
            placeholders: Vec::new(),
        }
    }
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Link bare URLs found in text
    #[serde(default = "default_true")]
    pub autolink: bool,
    /// Give headings GitHub-style anchor ids
    #[serde(default = "default_true")]
    pub header_ids: bool,
    /// Accept a trailing `{id}` on a heading to choose its id
    #[serde(default = "default_true")]
    pub custom_header_ids: bool,
    /// Extra CommonMark extensions to enable
    #[serde(default)]
    pub extensions: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            autolink: true,
            header_ids: true,
            custom_header_ids: true,
            extensions: Vec::new(),
        }
    }
}
