//! Case-insensitive lookups over the loaded listings.

use std::sync::Arc;

use log::debug;

use super::dataset::{DataStore, Dataset, Record};

/// Pure read access to the [`DataStore`], shared by every session.
#[derive(Debug, Clone)]
pub struct DataIntegrator {
    store: Arc<DataStore>,
}

impl DataIntegrator {
    #[must_use]
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// Jobs whose `title` or `description` contains `term`, ignoring case.
    ///
    /// An empty term matches every job.
    #[must_use]
    pub fn search_jobs(&self, term: &str) -> Vec<&Record> {
        let matches = search(&self.store.jobs, term, &["title", "description"]);
        debug!("Job search for '{term}' matched {} records", matches.len());
        matches
    }

    /// Events whose `name` or `description` contains `term`, ignoring case.
    ///
    /// An empty term matches every event.
    #[must_use]
    pub fn search_events(&self, term: &str) -> Vec<&Record> {
        let matches = search(&self.store.events, term, &["name", "description"]);
        debug!("Event search for '{term}' matched {} records", matches.len());
        matches
    }

    /// The full mentorship catalog, unfiltered.
    #[must_use]
    pub fn get_mentorship_programs(&self) -> Vec<&Record> {
        self.store.mentorship.records().iter().collect()
    }

    #[must_use]
    pub fn get_job_details(&self, id: &str) -> Option<&Record> {
        self.store.jobs.find_by_id(id)
    }

    #[must_use]
    pub fn get_event_details(&self, id: &str) -> Option<&Record> {
        self.store.events.find_by_id(id)
    }
}

fn search<'a>(dataset: &'a Dataset, term: &str, fields: &[&str]) -> Vec<&'a Record> {
    let needle = term.to_lowercase();
    dataset
        .records()
        .iter()
        .filter(|record| {
            fields.iter().any(|field| {
                record
                    .get(field)
                    .is_some_and(|value| value.to_lowercase().contains(&needle))
            })
        })
        .collect()
}
