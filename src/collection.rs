use std::collections::HashMap;
use tracing::warn;

use crate::types::{AvailableDraw, DrawNumber, DrawRecord, ResultsDocument};

/// Every draw whose record was published, keyed by draw number.
#[derive(Debug, Default, Clone)]
pub struct DrawCollection {
    draws: HashMap<DrawNumber, DrawRecord>,
}

impl DrawCollection {
    /// Merges the current draw with the historical mapping. Historical entries
    /// are keyed by their map key and win over the current draw on collision.
    pub fn build<I>(current: Option<&DrawRecord>, historical: I) -> Self
    where
        I: IntoIterator<Item = (String, DrawRecord)>,
    {
        let mut draws = HashMap::new();

        if let Some(current) = current {
            match &current.number {
                Some(number) => {
                    draws.insert(number.clone(), current.clone());
                }
                None => warn!("current draw has no draw number, it cannot be selected"),
            }
        }

        for (number, record) in historical {
            draws.insert(DrawNumber::new(number), record);
        }

        Self { draws }
    }

    pub fn get(&self, number: &str) -> Option<&DrawRecord> {
        self.draws.get(number)
    }

    pub fn contains(&self, number: &str) -> bool {
        self.draws.contains_key(number)
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn numbers(&self) -> impl Iterator<Item = &DrawNumber> {
        self.draws.keys()
    }
}

/// Everything the viewer keeps from one load. Built once, never mutated.
#[derive(Debug, Default, Clone)]
pub struct DrawData {
    pub current: Option<DrawRecord>,
    pub collection: DrawCollection,
    pub available: Vec<AvailableDraw>,
    pub scraped_at: Option<String>,
    pub source_url: Option<String>,
    pub total_draws_scraped: Option<u64>,
}

impl DrawData {
    pub fn current_number(&self) -> Option<&DrawNumber> {
        self.current.as_ref().and_then(|draw| draw.number.as_ref())
    }
}

impl From<ResultsDocument> for DrawData {
    fn from(document: ResultsDocument) -> Self {
        let collection = DrawCollection::build(
            document.current_draw.as_ref(),
            document.historical_draws.unwrap_or_default(),
        );

        Self {
            current: document.current_draw,
            collection,
            available: document.available_draws.unwrap_or_default(),
            scraped_at: document.scraped_at,
            source_url: document.source_url,
            total_draws_scraped: document.total_draws_scraped,
        }
    }
}
