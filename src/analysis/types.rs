use crate::{Error, Result};
use serde_json::Value;
use std::path::Path;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_MIME: &str = "text/plain";
pub const OCTET_STREAM_MIME: &str = "application/octet-stream";

/// A document picked by the user, held in memory until it is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::internal(format!("Not a file path: {}", path.display())))?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Maps the extensions the analysis service parses to their MIME types.
/// Anything else is still sent, as an opaque binary part.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => PDF_MIME,
        Some("docx") => DOCX_MIME,
        Some("txt") => TEXT_MIME,
        _ => OCTET_STREAM_MIME,
    }
}

/// Snapshot of the form taken when a submission starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub document: Document,
    pub query: String,
}

impl AnalysisRequest {
    /// Multipart body with exactly two parts: `file`, then `query` as a plain field.
    pub fn into_form(self) -> Result<reqwest::multipart::Form> {
        let part = reqwest::multipart::Part::bytes(self.document.bytes)
            .file_name(self.document.file_name)
            .mime_str(&self.document.content_type)?;

        Ok(reqwest::multipart::Form::new()
            .part("file", part)
            .text("query", self.query))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResponse {
    pub answer: Option<String>,
}

impl AnalysisResponse {
    pub fn answered(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
        }
    }

    /// Parses a response body. Only `answer` is read. A missing or falsy answer
    /// (`null`, `false`, `0`, `""`) is "no answer", not an error; any other
    /// value is shown as text. The body must be JSON and must not be `null`.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        if value.is_null() {
            return Err(Error::analysis("Response body is null"));
        }
        let answer = value.get("answer").and_then(answer_text);
        Ok(Self { answer })
    }
}

fn answer_text(answer: &Value) -> Option<String> {
    match answer {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
