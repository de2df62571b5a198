//! Document library: the onboarding documents and which were downloaded.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::OnboardingForm;
use crate::error::ValidationError;
use crate::store::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Doc,
    Guide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    Technical,
    Compliance,
    Integration,
}

/// Catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub doc_type: DocumentType,
    pub size: &'static str,
    pub category: DocumentCategory,
    pub required: bool,
}

pub static CATALOGUE: &[Document] = &[
    Document {
        id: "riskcherry-policy",
        title: "RiskCherry Policy : Client Testing & Order Submission Disclaimer",
        description: "Important policy document regarding client testing procedures and order submission requirements",
        doc_type: DocumentType::Pdf,
        size: "850 KB",
        category: DocumentCategory::Compliance,
        required: true,
    },
    Document {
        id: "portal-user-guide",
        title: "Portal User Guide",
        description: "Complete guide for using the RiskCherry certification portal",
        doc_type: DocumentType::Pdf,
        size: "2.1 MB",
        category: DocumentCategory::Technical,
        required: false,
    },
    Document {
        id: "game-provisions-guide",
        title: "Game Provisions Guide",
        description: "Game certification requirements and provisions for compliance",
        doc_type: DocumentType::Pdf,
        size: "1.8 MB",
        category: DocumentCategory::Compliance,
        required: false,
    },
    Document {
        id: "rng-provisions-guide",
        title: "RNG Provisions Guide",
        description: "Random Number Generator testing and certification provisions",
        doc_type: DocumentType::Pdf,
        size: "1.5 MB",
        category: DocumentCategory::Technical,
        required: false,
    },
    Document {
        id: "ukgc-agta-guide",
        title: "UKGC AGTA Guide",
        description: "UK Gambling Commission Automated Gaming Technical Approval guidelines",
        doc_type: DocumentType::Pdf,
        size: "2.4 MB",
        category: DocumentCategory::Compliance,
        required: false,
    },
];

pub fn find_document(id: &str) -> Option<&'static Document> {
    CATALOGUE.iter().find(|doc| doc.id == id)
}

/// Download state of the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentLibrary {
    pub downloaded: BTreeSet<String>,
}

impl DocumentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a document downloaded. Downloading twice is harmless.
    pub fn download(&mut self, id: &str) -> Result<&'static Document, ValidationError> {
        let doc = find_document(id).ok_or_else(|| ValidationError::UnknownDocument(id.into()))?;
        self.downloaded.insert(doc.id.to_string());
        Ok(doc)
    }

    pub fn is_downloaded(&self, id: &str) -> bool {
        self.downloaded.contains(id)
    }

    /// (downloaded, total) counts over required documents.
    pub fn required_progress(&self) -> (usize, usize) {
        let required: Vec<&Document> = CATALOGUE.iter().filter(|d| d.required).collect();
        let done = required.iter().filter(|d| self.is_downloaded(d.id)).count();
        (done, required.len())
    }

    pub fn can_complete(&self) -> bool {
        let (done, total) = self.required_progress();
        done == total
    }
}

impl OnboardingForm for DocumentLibrary {
    const KEY: &'static str = keys::DOCUMENTS;
    const LATENCY: Duration = Duration::ZERO;

    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(unknown) = self.downloaded.iter().find(|id| find_document(id).is_none()) {
            return Err(ValidationError::UnknownDocument(unknown.clone()));
        }
        let (done, total) = self.required_progress();
        if done < total {
            return Err(ValidationError::RequiredDocumentsMissing {
                remaining: total - done,
            });
        }
        Ok(())
    }
}
