use crate::utils::error::{LiturgistError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Output document kinds, chosen by the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Docx,
    Odt,
    Text,
}

impl OutputFormat {
    pub fn from_path(path: &str) -> Self {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("pdf") => OutputFormat::Pdf,
            Some("docx") => OutputFormat::Docx,
            Some("odt") => OutputFormat::Odt,
            _ => OutputFormat::Text,
        }
    }
}

/// External programs used for binary document formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converters {
    pub pandoc: String,
    pub weasyprint: String,
}

impl Default for Converters {
    fn default() -> Self {
        Self {
            pandoc: "pandoc".to_string(),
            weasyprint: "weasyprint".to_string(),
        }
    }
}

/// Pandoc input format for a template, taken from its extension.
pub fn source_format(template_path: Option<&str>) -> String {
    let extension = template_path
        .and_then(|path| Path::new(path).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        None | Some("htm") | Some("hbs") | Some("handlebars") => "html".to_string(),
        Some("md") => "markdown".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Turns rendered template text into the bytes of the output document.
pub async fn build_document(
    rendered: &str,
    format: OutputFormat,
    template_path: Option<&str>,
    converters: &Converters,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Text => Ok(rendered.as_bytes().to_vec()),
        OutputFormat::Pdf => run_converter(&converters.weasyprint, &["-", "-"], rendered).await,
        OutputFormat::Docx | OutputFormat::Odt => {
            let to = if format == OutputFormat::Docx { "docx" } else { "odt" };
            let from = source_format(template_path);
            run_converter(&converters.pandoc, &["-f", from.as_str(), "-t", to, "-o", "-"], rendered).await
        }
    }
}

/// Pipes `input` through `program` and collects its stdout.
async fn run_converter(program: &str, args: &[&str], input: &str) -> Result<Vec<u8>> {
    tracing::debug!("Running {} {}", program, args.join(" "));

    let conversion_error = |message: String| LiturgistError::ConversionError {
        program: program.to_string(),
        message,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| conversion_error(e.to_string()))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| conversion_error("stdin was not captured".to_string()))?;
    let input = input.to_owned();
    let writer = tokio::spawn(async move {
        stdin.write_all(input.as_bytes()).await?;
        stdin.shutdown().await
    });

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(conversion_error(format!("exited with {}: {}", output.status, stderr)));
    }

    writer
        .await
        .map_err(|e| conversion_error(e.to_string()))??;

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(OutputFormat::from_path("output/out.pdf"), OutputFormat::Pdf);
        assert_eq!(OutputFormat::from_path("out.DOCX"), OutputFormat::Docx);
        assert_eq!(OutputFormat::from_path("out.odt"), OutputFormat::Odt);
        assert_eq!(OutputFormat::from_path("out.html"), OutputFormat::Text);
        assert_eq!(OutputFormat::from_path("out"), OutputFormat::Text);
    }

    #[test]
    fn test_source_format() {
        assert_eq!(source_format(None), "html");
        assert_eq!(source_format(Some("templates/bulletin.html")), "html");
        assert_eq!(source_format(Some("bulletin.md")), "markdown");
        assert_eq!(source_format(Some("bulletin.rst")), "rst");
    }

    #[tokio::test]
    async fn test_text_output_is_passed_through() {
        let bytes = build_document("Hello", OutputFormat::Text, None, &Converters::default())
            .await
            .unwrap();
        assert_eq!(bytes, b"Hello");
    }

    #[tokio::test]
    async fn test_missing_converter_is_reported() {
        let converters = Converters {
            pandoc: "liturgist-no-such-pandoc".to_string(),
            weasyprint: "liturgist-no-such-weasyprint".to_string(),
        };

        let err = build_document("<p>Hi</p>", OutputFormat::Pdf, None, &converters)
            .await
            .unwrap_err();

        match err {
            LiturgistError::ConversionError { program, .. } => {
                assert_eq!(program, "liturgist-no-such-weasyprint")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_converter_stdout_is_collected() {
        let bytes = run_converter("cat", &[], "<p>Hi</p>").await.unwrap();
        assert_eq!(bytes, b"<p>Hi</p>");
    }
}
