//! Search engine abstraction and an in-memory implementation

use async_trait::async_trait;
use jukebox_common::{EntryStatus, Result};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::document::{field, Document};

/// One searchable field of an entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTerm {
    pub field: &'static str,
    /// Substring match when true, exact match otherwise
    pub like: bool,
}

impl SearchTerm {
    pub const fn like(field: &'static str) -> Self {
        Self { field, like: true }
    }

    pub const fn exact(field: &'static str) -> Self {
        Self { field, like: false }
    }

    fn matches(&self, document: &Document, keywords: &str) -> bool {
        let Some(value) = document.get_string(self.field) else {
            return false;
        };

        if self.like {
            value.to_lowercase().contains(&keywords.to_lowercase())
        } else {
            value == keywords
        }
    }
}

/// Query against one company's documents
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Restrict to these entry class names; empty means all
    pub class_names: Vec<String>,
    /// Restrict to one group
    pub group_id: Option<i64>,
    pub keywords: Option<String>,
    /// Fields `keywords` are matched against; any match is a hit
    pub terms: Vec<SearchTerm>,
    /// Include trashed entries as well as approved ones
    pub include_trash: bool,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_name(mut self, class_name: &str) -> Self {
        self.class_names.push(class_name.to_string());
        self
    }

    pub fn group_id(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn keywords(mut self, keywords: &str, terms: &[SearchTerm]) -> Self {
        self.keywords = Some(keywords.to_string());
        self.terms.extend_from_slice(terms);
        self
    }

    pub fn include_trash(mut self, include_trash: bool) -> Self {
        self.include_trash = include_trash;
        self
    }

    /// Whether `document` passes every filter of this query
    pub fn matches(&self, document: &Document) -> bool {
        if !self.class_names.is_empty() {
            let class_name = document.get_string(field::ENTRY_CLASS_NAME);
            if !self
                .class_names
                .iter()
                .any(|name| class_name.as_deref() == Some(name.as_str()))
            {
                return false;
            }
        }

        if let Some(group_id) = self.group_id {
            if document.get_long(field::GROUP_ID) != Some(group_id) {
                return false;
            }
        }

        if !self.include_trash && document.status() != Some(EntryStatus::Approved) {
            return false;
        }

        match self.keywords.as_deref().map(str::trim) {
            Some(keywords) if !keywords.is_empty() => self
                .terms
                .iter()
                .any(|term| term.matches(document, keywords)),
            _ => true,
        }
    }
}

/// Document store queried by indexers
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Insert or replace a document keyed by its uid
    async fn update_document(&self, company_id: i64, document: Document) -> Result<()>;

    async fn update_documents(&self, company_id: i64, documents: Vec<Document>) -> Result<()>;

    async fn delete_document(&self, company_id: i64, uid: &str) -> Result<()>;

    /// Documents matching `query`, in uid order
    async fn search(&self, company_id: i64, query: &Query) -> Result<Vec<Document>>;
}

/// Search engine keeping every document in memory
///
/// Hits are returned in uid order; there is no relevance ranking.
#[derive(Default)]
pub struct InMemorySearchEngine {
    companies: RwLock<HashMap<i64, BTreeMap<String, Document>>>,
}

impl InMemorySearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents stored for a company
    pub async fn document_count(&self, company_id: i64) -> usize {
        self.companies
            .read()
            .await
            .get(&company_id)
            .map_or(0, BTreeMap::len)
    }
}

fn insert(documents: &mut BTreeMap<String, Document>, document: Document) {
    match document.uid() {
        Some(uid) => {
            documents.insert(uid, document);
        }
        None => warn!("Skipping document without a uid"),
    }
}

#[async_trait]
impl SearchEngine for InMemorySearchEngine {
    async fn update_document(&self, company_id: i64, document: Document) -> Result<()> {
        let mut companies = self.companies.write().await;
        insert(companies.entry(company_id).or_default(), document);
        Ok(())
    }

    async fn update_documents(&self, company_id: i64, documents: Vec<Document>) -> Result<()> {
        let count = documents.len();
        let mut companies = self.companies.write().await;
        let stored = companies.entry(company_id).or_default();
        for document in documents {
            insert(stored, document);
        }
        debug!("Stored {} documents for company {}", count, company_id);
        Ok(())
    }

    async fn delete_document(&self, company_id: i64, uid: &str) -> Result<()> {
        if let Some(documents) = self.companies.write().await.get_mut(&company_id) {
            documents.remove(uid);
        }
        Ok(())
    }

    async fn search(&self, company_id: i64, query: &Query) -> Result<Vec<Document>> {
        let companies = self.companies.read().await;
        let hits = companies
            .get(&company_id)
            .map(|documents| {
                documents
                    .values()
                    .filter(|document| query.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(hits)
    }
}
