use serde::{Deserialize, Serialize};

/// Fixed class universe of a labeled dataset: an ordered list of
/// human-readable class names indexed by label id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    class_names: Vec<String>,
}

impl DatasetDescriptor {
    pub fn new(class_names: Vec<String>) -> DatasetDescriptor {
        DatasetDescriptor { class_names }
    }

    /// Convenience constructor from string literals.
    pub fn from_names(names: &[&str]) -> DatasetDescriptor {
        DatasetDescriptor::new(names.iter().map(|s| s.to_string()).collect())
    }

    pub fn class_count(&self) -> usize {
        self.class_names.len()
    }

    /// Name for a label id. Panics on an out-of-range label, which can only
    /// come from a dataset/model disagreement fatal to the run anyway.
    pub fn class_name(&self, label: usize) -> &str {
        &self.class_names[label]
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }
}
