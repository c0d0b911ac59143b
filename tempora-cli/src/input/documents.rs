//! Turning input files into documents
//!
//! Plain text files become one document each and are tokenized by the
//! engine. JSON files hold one document or an array of them. Tagged files
//! hold BIO-tagged sentences; their temporal tags become pre-existing
//! entities.

use super::FileReader;
use crate::error::CliError;
use anyhow::Result;
use std::path::Path;
use tempora_api::{DiagnosticDTO, Input};
use tempora_engine::{parse_tagged, Diagnostics, Document};

/// Layout of input files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InputFormat {
    /// Plain UTF-8 text, one document per file
    #[default]
    Text,
    /// Serialized document, or an array of documents
    Json,
    /// `word<TAB>tag[<TAB>space_after]` lines, blank line between sentences
    Tagged,
}

/// One document ready for processing
#[derive(Debug)]
pub struct SourceDocument {
    /// Where the document came from, for reporting
    pub source: String,
    /// Input handed to the processor
    pub input: Input,
    /// Problems met while reading the document
    pub diagnostics: Vec<DiagnosticDTO>,
}

impl SourceDocument {
    fn new(source: String, input: Input) -> Self {
        Self {
            source,
            input,
            diagnostics: Vec::new(),
        }
    }
}

/// Read every document stored in `path`
pub fn load_documents(path: &Path, format: InputFormat) -> Result<Vec<SourceDocument>> {
    let name = path.display().to_string();
    let content = FileReader::read_text(path)?;

    match format {
        InputFormat::Text => Ok(vec![SourceDocument::new(name, Input::from_text(content))]),
        InputFormat::Json => {
            let documents = parse_json_documents(&content)
                .map_err(|e| CliError::InvalidInput(format!("{name}: {e}")))?;
            Ok(number_sources(&name, documents)
                .map(|(source, doc)| SourceDocument::new(source, Input::from_document(doc)))
                .collect())
        }
        InputFormat::Tagged => {
            let sentences =
                parse_tagged(&content).map_err(|e| CliError::InvalidInput(format!("{name}: {e}")))?;
            let mut loaded = Vec::with_capacity(sentences.len());
            for (source, sentence) in number_sources(&name, sentences) {
                let mut diagnostics = Diagnostics::new();
                let (doc, _) = sentence
                    .to_document(&mut diagnostics)
                    .map_err(|e| CliError::InvalidInput(format!("{source}: {e}")))?;
                loaded.push(SourceDocument {
                    source,
                    input: Input::from_document(doc),
                    diagnostics: diagnostics.iter().map(DiagnosticDTO::from).collect(),
                });
            }
            Ok(loaded)
        }
    }
}

fn parse_json_documents(content: &str) -> serde_json::Result<Vec<Document>> {
    if content.trim_start().starts_with('[') {
        serde_json::from_str(content)
    } else {
        serde_json::from_str(content).map(|doc| vec![doc])
    }
}

fn number_sources<T>(name: &str, items: Vec<T>) -> impl Iterator<Item = (String, T)> {
    let name = name.to_string();
    let single = items.len() == 1;
    items.into_iter().enumerate().map(move |(index, item)| {
        if single {
            (name.clone(), item)
        } else {
            (format!("{name}#{}", index + 1), item)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_text_file_is_one_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "Secolul XX a fost important.").unwrap();

        let docs = load_documents(&path, InputFormat::Text).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(matches!(docs[0].input, Input::Text(_)));
    }

    #[test]
    fn test_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs.json");
        fs::write(
            &path,
            r#"[
                {"text": "anul 1846", "tokens": [
                    {"text": "anul", "char_offset": 0},
                    {"text": "1846", "char_offset": 5}
                ]},
                {"text": "ieri", "tokens": [{"text": "ieri", "char_offset": 0}],
                 "entities": [{"range": {"start": 0, "end": 0}, "label": "DATETIME"}]}
            ]"#,
        )
        .unwrap();

        let docs = load_documents(&path, InputFormat::Json).unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[1].source.ends_with("#2"));
        match &docs[1].input {
            Input::Document(doc) => assert_eq!(doc.entities().len(), 1),
            other => panic!("expected document, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_json_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"text": "ab", "tokens": [{"text": "abc", "char_offset": 0}]}"#)
            .unwrap();

        let err = load_documents(&path, InputFormat::Json).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_tagged_sentences_keep_diagnostics() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.tsv");
        fs::write(
            &path,
            "între\tB-PERIOD\n1856\tI-PERIOD\nși\tI-DATETIME\n1857\tI-PERIOD\t0\n\nieri\tB-DATETIME\t0\n",
        )
        .unwrap();

        let docs = load_documents(&path, InputFormat::Tagged).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].diagnostics.len(), 1);
        assert_eq!(docs[0].diagnostics[0].kind, "tag_type_inconsistency");
        assert!(docs[1].diagnostics.is_empty());
    }
}
