use crate::analysis::{AnalysisRequest, Document};

/// The file picker. Owns both the selected document and what the picker
/// displays, so clearing one always clears the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    document: Option<Document>,
}

impl FileSelection {
    pub fn select(&mut self, document: Document) {
        self.document = Some(document);
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn is_selected(&self) -> bool {
        self.document.is_some()
    }

    /// Text shown in the picker: the file name, or nothing.
    pub fn display_value(&self) -> &str {
        self.document
            .as_ref()
            .map(|document| document.file_name.as_str())
            .unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.document = None;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub file: FileSelection,
    pub query: String,
}

impl FormInput {
    /// Both a file and a non-empty query. Whitespace counts as a query.
    pub fn is_ready(&self) -> bool {
        self.file.is_selected() && !self.query.is_empty()
    }

    /// Copies the current inputs into a request, if they are ready.
    pub fn snapshot(&self) -> Option<AnalysisRequest> {
        if !self.is_ready() {
            return None;
        }
        let document = self.file.document()?.clone();
        Some(AnalysisRequest {
            document,
            query: self.query.clone(),
        })
    }

    pub fn clear(&mut self) {
        self.file.clear();
        self.query.clear();
    }
}
