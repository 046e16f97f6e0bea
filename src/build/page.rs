//! Rendering a Markdown document into a standalone HTML page.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::markdown::{MarkdownError, render_markdown};
use super::placeholder::Placeholders;
use crate::config::MarkdownConfig;

#[derive(thiserror::Error, Debug)]
pub enum PageError {
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read page fragment {path}: {source}")]
    ReadFragment {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to render {path}: {source}")]
    Render {
        path: PathBuf,
        source: MarkdownError,
    },

    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything the converter needs for one page.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// HTML placed before the rendered document.
    pub header: PathBuf,
    /// HTML placed after the rendered document.
    pub footer: PathBuf,
    pub markdown: MarkdownConfig,
}

/// Assemble the final page from its three parts.
pub fn wrap_page(header: &str, body: &str, footer: &str) -> String {
    format!("{}\n{}\n{}", header, body, footer)
}

fn read_fragment(path: &Path) -> Result<String, PageError> {
    std::fs::read_to_string(path).map_err(|e| PageError::ReadFragment {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Convert `options.input` to HTML, substitute placeholders and write the
/// page wrapped in the header and footer fragments.
pub fn convert(options: &PageOptions, placeholders: &Placeholders) -> Result<(), PageError> {
    let markdown = std::fs::read_to_string(&options.input).map_err(|e| PageError::ReadInput {
        path: options.input.clone(),
        source: e,
    })?;

    let html = render_markdown(&markdown, &options.markdown).map_err(|e| PageError::Render {
        path: options.input.clone(),
        source: e,
    })?;
    debug!("rendered {} bytes of HTML", html.len());

    let body = placeholders.apply(&html);

    let header = read_fragment(&options.header)?;
    let footer = read_fragment(&options.footer)?;
    let page = wrap_page(&header, &body, &footer);

    std::fs::write(&options.output, page).map_err(|e| PageError::WriteOutput {
        path: options.output.clone(),
        source: e,
    })?;

    info!(
        "{} converted to {}",
        options.input.display(),
        options.output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::placeholder::Placeholder;

    struct Fixture {
        dir: tempfile::TempDir,
        options: PageOptions,
    }

    fn fixture(markdown: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let fragments = dir.path().join("src").join("html");
        std::fs::create_dir_all(&fragments).unwrap();
        std::fs::write(fragments.join("header.html"), "<html>").unwrap();
        std::fs::write(fragments.join("footer.html"), "</html>").unwrap();
        std::fs::write(dir.path().join("index.md"), markdown).unwrap();

        let options = PageOptions {
            input: dir.path().join("index.md"),
            output: dir.path().join("index.html"),
            header: fragments.join("header.html"),
            footer: fragments.join("footer.html"),
            markdown: MarkdownConfig::default(),
        };
        Fixture { dir, options }
    }

    #[test]
    fn test_wrap_page() {
        assert_eq!(wrap_page("<html>", "<p>x</p>", "</html>"), "<html>\n<p>x</p>\n</html>");
    }

    #[test]
    fn test_convert_title_and_version() {
        let fixture = fixture("# Title\n{{VERSION}}");
        let placeholders = Placeholders::with_version("2026-10-18-abc1234");

        convert(&fixture.options, &placeholders).unwrap();

        let page = std::fs::read_to_string(&fixture.options.output).unwrap();
        assert!(page.starts_with("<html>\n"));
        assert!(page.contains("<h1 id=\"title\">Title</h1>"));
        assert!(page.contains("<p>2026-10-18-abc1234</p>"));
        assert!(!page.contains("{{VERSION}}"));
        assert!(page.ends_with("\n</html>"));
    }

    #[test]
    fn test_convert_applies_extra_placeholders() {
        let fixture = fixture("Copyright {{YEAR}}, build {{VERSION}}");
        let mut placeholders = Placeholders::with_version("v1");
        placeholders.push(Placeholder::new("{{YEAR}}", "2026"));

        convert(&fixture.options, &placeholders).unwrap();

        let page = std::fs::read_to_string(&fixture.options.output).unwrap();
        assert!(page.contains("<p>Copyright 2026, build v1</p>"));
    }

    #[test]
    fn test_convert_overwrites_output() {
        let fixture = fixture("new");
        std::fs::write(&fixture.options.output, "old content that is longer").unwrap();

        convert(&fixture.options, &Placeholders::new()).unwrap();

        let page = std::fs::read_to_string(&fixture.options.output).unwrap();
        assert_eq!(page, "<html>\n<p>new</p>\n\n</html>");
    }

    #[test]
    fn test_convert_missing_input() {
        let fixture = fixture("");
        let options = PageOptions {
            input: fixture.dir.path().join("missing.md"),
            ..fixture.options.clone()
        };

        let result = convert(&options, &Placeholders::new());

        assert!(matches!(result, Err(PageError::ReadInput { .. })));
        assert!(!options.output.exists());
    }

    #[test]
    fn test_convert_missing_footer() {
        let fixture = fixture("text");
        std::fs::remove_file(&fixture.options.footer).unwrap();

        let result = convert(&fixture.options, &Placeholders::new());

        assert!(matches!(result, Err(PageError::ReadFragment { path, .. }) if path == fixture.options.footer));
    }
}
