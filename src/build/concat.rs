//! Merging a directory of Markdown files into a single document.

use std::path::{Path, PathBuf};

use tracing::info;

use super::listing::{ListError, ListOptions, list_files};

#[derive(thiserror::Error, Debug)]
pub enum ConcatError {
    #[error("failed to list markdown files: {0}")]
    List(#[from] ListError),

    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything the concatenator needs for one run.
#[derive(Debug, Clone)]
pub struct ConcatOptions {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    /// Literal placed on its own line between merged files.
    pub pagebreak: Option<String>,
    /// Names that are never merged, in addition to the output file.
    pub reserved: Vec<String>,
    pub sort: bool,
}

pub struct ConcatResult {
    pub files: Vec<String>,
    pub output: PathBuf,
}

/// Build the string placed between two merged files.
///
/// Without a page break this is a single newline. With one it is the
/// page break surrounded by a blank line on each side.
pub fn separator(pagebreak: Option<&str>) -> String {
    let mut eof = match pagebreak {
        Some(pagebreak) if !pagebreak.is_empty() => format!("\n\n{}\n", pagebreak),
        _ => String::new(),
    };
    eof.push('\n');
    eof
}

/// Join file contents with `separator` and terminate with a newline.
pub fn join_contents(contents: &[Vec<u8>], separator: &str) -> Vec<u8> {
    let mut output = contents.join(separator.as_bytes());
    output.push(b'\n');
    output
}

/// The lowercase file name of the output, used to keep it out of its own input.
fn output_name(output: &Path) -> Option<String> {
    output
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
}

/// Merge every Markdown file of `options.input_dir` into `options.output`.
pub async fn concat(options: &ConcatOptions) -> Result<ConcatResult, ConcatError> {
    let mut list_options = ListOptions {
        ignore: options.reserved.clone(),
        sort: options.sort,
    };
    if let Some(name) = output_name(&options.output) {
        list_options = list_options.ignoring(name);
    }

    let files = list_files(&options.input_dir, "md", &list_options).await?;

    info!("Merge files:");
    for file in &files {
        info!("{}", file);
    }

    let contents = files
        .iter()
        .map(|file| {
            let path = options.input_dir.join(file);
            std::fs::read(&path).map_err(|e| ConcatError::ReadInput { path, source: e })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let eof = separator(options.pagebreak.as_deref());
    let output = join_contents(&contents, &eof);

    std::fs::write(&options.output, output).map_err(|e| ConcatError::WriteOutput {
        path: options.output.clone(),
        source: e,
    })?;

    info!(
        "{} files merged to {}",
        files.len(),
        options.output.display()
    );

    Ok(ConcatResult {
        files,
        output: options.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(input_dir: &Path, output: PathBuf, pagebreak: Option<&str>) -> ConcatOptions {
        ConcatOptions {
            input_dir: input_dir.to_path_buf(),
            output,
            pagebreak: pagebreak.map(str::to_string),
            reserved: vec!["readme.md".to_string(), "readme-references.md".to_string()],
            sort: true,
        }
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator(None), "\n");
        assert_eq!(separator(Some("")), "\n");
        assert_eq!(separator(Some("<div class=\"page-break\"></div>")), "\n\n<div class=\"page-break\"></div>\n\n");
    }

    #[test]
    fn test_join_empty_list() {
        assert_eq!(join_contents(&[], &separator(None)), b"\n");
    }

    #[test]
    fn test_join_without_pagebreak() {
        let contents = vec![b"one".to_vec(), b"two".to_vec(), b"three".to_vec()];
        assert_eq!(
            join_contents(&contents, &separator(None)),
            b"one\ntwo\nthree\n"
        );
    }

    #[test]
    fn test_join_with_pagebreak() {
        let contents = vec![b"one".to_vec(), b"two".to_vec()];
        assert_eq!(
            join_contents(&contents, &separator(Some("\\newpage"))),
            b"one\n\n\\newpage\n\ntwo\n"
        );
    }

    #[tokio::test]
    async fn test_concat_hello_world() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "Hello").unwrap();
        std::fs::write(dir.path().join("b.md"), "World").unwrap();
        let output = dir.path().join("index.md");

        let result = concat(&options(dir.path(), output.clone(), None))
            .await
            .unwrap();

        assert_eq!(result.files, vec!["a.md", "b.md"]);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "Hello\nWorld\n");
    }

    #[tokio::test]
    async fn test_concat_skips_output_and_reserved_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("01-intro.md"), "Intro\n").unwrap();
        std::fs::write(dir.path().join("README.md"), "readme").unwrap();
        std::fs::write(dir.path().join("Readme-References.md"), "refs").unwrap();
        std::fs::write(dir.path().join("Book.MD"), "stale output").unwrap();
        let output = dir.path().join("book.md");

        let result = concat(&options(dir.path(), output.clone(), None))
            .await
            .unwrap();

        assert_eq!(result.files, vec!["01-intro.md"]);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "Intro\n\n");
    }

    #[tokio::test]
    async fn test_concat_with_pagebreak() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "# A").unwrap();
        std::fs::write(dir.path().join("b.md"), "# B").unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("merged.md");

        concat(&options(dir.path(), output.clone(), Some("<!-- pagebreak -->")))
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "# A\n\n<!-- pagebreak -->\n\n# B\n"
        );
    }

    #[tokio::test]
    async fn test_concat_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("index.md");

        let result = concat(&options(dir.path(), output.clone(), None))
            .await
            .unwrap();

        assert!(result.files.is_empty());
        assert_eq!(std::fs::read(&output).unwrap(), b"\n");
    }

    #[tokio::test]
    async fn test_concat_preserves_raw_bytes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("latin1.md"), [0x63, 0x61, 0x66, 0xe9]).unwrap();
        let output = dir.path().join("index.md");

        concat(&options(dir.path(), output.clone(), None))
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), vec![0x63, 0x61, 0x66, 0xe9, b'\n']);
    }

    #[tokio::test]
    async fn test_concat_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "A").unwrap();
        let output = dir.path().join("missing").join("index.md");

        let result = concat(&options(dir.path(), output, None)).await;

        assert!(matches!(result, Err(ConcatError::WriteOutput { .. })));
    }
}
