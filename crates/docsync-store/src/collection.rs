//! In-memory document collection shared by the backends
//!
//! Documents are indexed by `(project, path)` with each chain kept in
//! ascending version order, so "latest" is the last element and
//! "all latest" is one range scan over the project's chains.

use std::collections::BTreeMap;

use crate::model::Document;
use crate::{Error, Result};

type ChainKey = (String, String);

/// A set of documents indexed by `(project, path, version)`.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    chains: BTreeMap<ChainKey, Vec<Document>>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every document, ordered by project, path and version.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.chains.values().flatten()
    }

    /// Total number of documents across all projects.
    pub fn len(&self) -> usize {
        self.chains.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Highest version of `(project, path)`.
    pub fn latest(&self, project: &str, path: &str) -> Option<&Document> {
        self.chains
            .get(&(project.to_string(), path.to_string()))
            .and_then(|chain| chain.last())
    }

    /// Highest version of every path in `project`.
    pub fn all_latest(&self, project: &str) -> Vec<&Document> {
        self.project_chains(project)
            .filter_map(|chain| chain.last())
            .collect()
    }

    /// Every version of every path in `project`.
    pub fn records(&self, project: &str) -> Vec<&Document> {
        self.project_chains(project).flatten().collect()
    }

    /// Insert a new document. Existing documents are never replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateVersion`] if the version already exists and
    /// an operation error for version 0.
    pub fn insert(&mut self, document: Document) -> Result<()> {
        if document.version == 0 {
            return Err(Error::operation(format!(
                "version numbers start at 1 (got 0 for {})",
                document.path
            )));
        }

        let chain = self
            .chains
            .entry((document.project.clone(), document.path.clone()))
            .or_default();
        match chain.binary_search_by_key(&document.version, |d| d.version) {
            Ok(_) => Err(Error::DuplicateVersion {
                path: document.path,
                version: document.version,
            }),
            Err(idx) => {
                chain.insert(idx, document);
                Ok(())
            }
        }
    }

    /// Remove every version of `(project, path)`, returning how many were removed.
    pub fn delete_chain(&mut self, project: &str, path: &str) -> u64 {
        self.chains
            .remove(&(project.to_string(), path.to_string()))
            .map_or(0, |chain| chain.len() as u64)
    }

    /// Detach the chain of `(project, path)`, keeping it for [`Collection::restore_chain`].
    pub fn take_chain(&mut self, project: &str, path: &str) -> Option<Vec<Document>> {
        self.chains.remove(&(project.to_string(), path.to_string()))
    }

    /// Put back a chain returned by [`Collection::take_chain`].
    pub fn restore_chain(&mut self, chain: Vec<Document>) {
        if let Some(first) = chain.first() {
            let key = (first.project.clone(), first.path.clone());
            self.chains.insert(key, chain);
        }
    }

    /// Drop one version, undoing an [`Collection::insert`] that could not be persisted.
    pub fn remove_version(&mut self, project: &str, path: &str, version: u64) -> Option<Document> {
        let key = (project.to_string(), path.to_string());
        let chain = self.chains.get_mut(&key)?;
        let idx = chain.binary_search_by_key(&version, |d| d.version).ok()?;
        let removed = chain.remove(idx);
        if chain.is_empty() {
            self.chains.remove(&key);
        }
        Some(removed)
    }

    fn project_chains<'a>(&'a self, project: &str) -> impl Iterator<Item = &'a Vec<Document>> + use<'a> {
        let project = project.to_string();
        self.chains
            .range((project.clone(), String::new())..)
            .take_while(move |((p, _), _)| *p == project)
            .map(|(_, chain)| chain)
    }
}
