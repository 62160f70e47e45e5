//! Indexer capability and registry
//!
//! An [`Indexer`] turns one entry type into search documents. Implementors
//! provide the per-type pieces (document construction, company paging,
//! searchable fields); reindexing, deletion, summaries and keyword queries
//! are shared default methods.

use async_trait::async_trait;
use jukebox_common::config::SearchConfig;
use jukebox_common::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

use super::document::{uid, Document, Summary};
use super::engine::{Query, SearchEngine, SearchTerm};

#[async_trait]
pub trait Indexer: Send + Sync {
    /// Entry class name stamped into `entryClassName`
    fn class_name(&self) -> &'static str;

    fn portlet_id(&self) -> &'static str;

    /// Fields matched against search keywords
    fn search_terms(&self) -> &'static [SearchTerm];

    fn engine(&self) -> &Arc<dyn SearchEngine>;

    fn settings(&self) -> &SearchConfig;

    /// Build the document for one entry
    async fn document(&self, class_pk: i64) -> Result<Document>;

    /// Documents for a company's entries in `[start, end)`
    async fn company_documents(&self, company_id: i64, start: i64, end: i64) -> Result<Vec<Document>>;

    /// Mark `document` as related to the entry `class_pk`
    async fn add_related_entry_fields(&self, document: &mut Document, class_pk: i64) -> Result<()>;

    /// Rebuild and store the document of one entry
    async fn reindex(&self, class_pk: i64) -> Result<()> {
        let document = self.document(class_pk).await?;
        let company_id = document.company_id().ok_or_else(|| {
            Error::Internal(format!(
                "{} document {} has no company",
                self.class_name(),
                class_pk
            ))
        })?;

        self.engine().update_document(company_id, document).await?;
        debug!("Reindexed {} {}", self.class_name(), class_pk);
        Ok(())
    }

    /// Rebuild every document of a company, one batch at a time
    ///
    /// Returns the number of documents stored.
    async fn reindex_company(&self, company_id: i64) -> Result<usize> {
        let batch_size = self.settings().reindex_batch_size.max(1) as i64;
        let mut start = 0;
        let mut total = 0;

        loop {
            let documents = self
                .company_documents(company_id, start, start + batch_size)
                .await?;
            let count = documents.len();

            if count > 0 {
                self.engine().update_documents(company_id, documents).await?;
                total += count;
            }
            if (count as i64) < batch_size {
                break;
            }
            start += batch_size;
        }

        info!(
            "Reindexed {} {} documents for company {}",
            total,
            self.class_name(),
            company_id
        );
        Ok(total)
    }

    async fn delete(&self, company_id: i64, class_pk: i64) -> Result<()> {
        self.engine()
            .delete_document(company_id, &uid(self.class_name(), class_pk))
            .await
    }

    fn summary(&self, document: &Document) -> Summary {
        Summary::from_document(document, self.settings().summary_max_content_length)
    }

    /// Keyword query over this indexer's entries
    fn query(&self, keywords: &str) -> Query {
        Query::new()
            .class_name(self.class_name())
            .keywords(keywords, self.search_terms())
    }

    async fn search(&self, company_id: i64, query: &Query) -> Result<Vec<Document>> {
        self.engine().search(company_id, query).await
    }
}

/// Indexers keyed by entry class name, in registration order
#[derive(Default)]
pub struct IndexerRegistry {
    indexers: Vec<Arc<dyn Indexer>>,
}

impl IndexerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an indexer; a class name may only be registered once
    pub fn register(&mut self, indexer: Arc<dyn Indexer>) -> Result<()> {
        if self.get(indexer.class_name()).is_some() {
            return Err(Error::InvalidInput(format!(
                "An indexer for {} is already registered",
                indexer.class_name()
            )));
        }
        self.indexers.push(indexer);
        Ok(())
    }

    pub fn get(&self, class_name: &str) -> Option<&Arc<dyn Indexer>> {
        self.indexers
            .iter()
            .find(|indexer| indexer.class_name() == class_name)
    }

    pub fn class_names(&self) -> Vec<&'static str> {
        self.indexers.iter().map(|i| i.class_name()).collect()
    }

    /// Reindex a company with every registered indexer
    pub async fn reindex_all(&self, company_id: i64) -> Result<usize> {
        let mut total = 0;
        for indexer in &self.indexers {
            total += indexer.reindex_company(company_id).await?;
        }
        info!(
            "Reindexed company {}: {} documents across {} indexers",
            company_id,
            total,
            self.indexers.len()
        );
        Ok(total)
    }
}
