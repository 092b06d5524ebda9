use crate::{Document, KnowledgeBaseError};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub fn discover_document_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let is_json = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentFile {
    Many(Vec<Document>),
    One(Box<Document>),
}

pub fn load_documents_file(path: &Path) -> Result<Vec<Document>, KnowledgeBaseError> {
    let bytes = fs::read(path)?;
    let parsed: DocumentFile =
        serde_json::from_slice(&bytes).map_err(|source| KnowledgeBaseError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(match parsed {
        DocumentFile::Many(documents) => documents,
        DocumentFile::One(document) => vec![*document],
    })
}

#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct KnowledgeBaseReport {
    pub documents: Vec<Document>,
    pub skipped_files: Vec<SkippedFile>,
    pub rejected_documents: Vec<SkippedFile>,
    pub fingerprint: String,
}

/// Loads a knowledge base from a single JSON file or a folder of them.
///
/// Unreadable files and documents with a blank or repeated id are reported
/// instead of failing the whole load. A folder with no JSON files is an error.
pub fn load_knowledge_base(path: &Path) -> Result<KnowledgeBaseReport, KnowledgeBaseError> {
    let files = if path.is_dir() {
        discover_document_files(path)
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        return Err(KnowledgeBaseError::InvalidArgument(format!(
            "knowledge base path does not exist: {}",
            path.display()
        )));
    };

    if files.is_empty() {
        return Err(KnowledgeBaseError::InvalidArgument(format!(
            "no json files found in {}",
            path.display()
        )));
    }

    let mut documents = Vec::new();
    let mut skipped_files = Vec::new();
    let mut rejected_documents = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for file in files {
        let loaded = match load_documents_file(&file) {
            Ok(loaded) => loaded,
            Err(error) => {
                warn!(path = %file.display(), %error, "skipping knowledge base file");
                skipped_files.push(SkippedFile {
                    path: file,
                    reason: error.to_string(),
                });
                continue;
            }
        };

        debug!(path = %file.display(), documents = loaded.len(), "loaded knowledge base file");

        for document in loaded {
            match validate_document(&document, &seen_ids) {
                Ok(()) => {
                    seen_ids.insert(document.id.clone());
                    documents.push(document);
                }
                Err(error) => rejected_documents.push(SkippedFile {
                    path: file.clone(),
                    reason: error.to_string(),
                }),
            }
        }
    }

    let fingerprint = corpus_fingerprint(&documents);

    Ok(KnowledgeBaseReport {
        documents,
        skipped_files,
        rejected_documents,
        fingerprint,
    })
}

fn validate_document(
    document: &Document,
    seen_ids: &HashSet<String>,
) -> Result<(), KnowledgeBaseError> {
    if document.id.trim().is_empty() {
        return Err(KnowledgeBaseError::InvalidDocument(format!(
            "document titled {:?} has an empty id",
            document.title
        )));
    }
    if seen_ids.contains(&document.id) {
        return Err(KnowledgeBaseError::InvalidDocument(format!(
            "duplicate document id {}",
            document.id
        )));
    }
    Ok(())
}

/// Content hash of a document set, in order. Any edit to an indexed field changes it.
pub fn corpus_fingerprint(documents: &[Document]) -> String {
    let mut hasher = Sha256::new();
    for document in documents {
        let updated_at = document.updated_at.to_rfc3339();
        let keywords = document.keywords.join("\u{1f}");
        for field in [
            document.id.as_str(),
            updated_at.as_str(),
            document.title.as_str(),
            document.category.as_str(),
            keywords.as_str(),
            document.content.as_str(),
        ] {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}
