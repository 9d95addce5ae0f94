use std::collections::HashMap;

/// Name -> id of the most recent producer. Scoped to a single graph build.
#[derive(Debug, Default)]
pub struct ProducerTable {
    latest: HashMap<String, usize>,
}

impl ProducerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` as the producer of `name`, replacing any earlier one.
    pub fn record(&mut self, name: String, id: usize) {
        self.latest.insert(name, id);
    }

    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.latest.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }
}
