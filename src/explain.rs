//! Execution statistics extracted from a `find` explain document.

use std::fmt;

use mongodb::bson::{Bson, Document};

/// Headline numbers of an `executionStats` explain, for before/after comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub n_returned: Option<u64>,
    pub docs_examined: Option<u64>,
    pub keys_examined: Option<u64>,
    pub execution_time_ms: Option<u64>,
    /// Stage names from the root of the execution tree down to its leaves.
    pub stages: Vec<String>,
    pub index_names: Vec<String>,
}

impl ExecutionSummary {
    pub fn from_explain(explain_doc: &Document) -> Self {
        let mut summary = Self::default();
        let Some(execution_stats) = execution_stats(explain_doc) else {
            return summary;
        };

        summary.n_returned = read_u64(execution_stats, "nReturned");
        summary.docs_examined = read_u64(execution_stats, "totalDocsExamined");
        summary.keys_examined = read_u64(execution_stats, "totalKeysExamined");
        summary.execution_time_ms = read_u64(execution_stats, "executionTimeMillis");

        if let Ok(root) = execution_stats.get_document("executionStages") {
            summary.collect_stages(root);
        }
        summary
    }

    fn collect_stages(&mut self, stage: &Document) {
        if let Ok(label) = stage.get_str("stage") {
            self.stages.push(label.to_string());
        }
        if let Ok(index_name) = stage.get_str("indexName")
            && !self.index_names.iter().any(|name| name == index_name)
        {
            self.index_names.push(index_name.to_string());
        }
        if let Ok(input) = stage.get_document("inputStage") {
            self.collect_stages(input);
        }
        if let Ok(inputs) = stage.get_array("inputStages") {
            for input in inputs {
                if let Bson::Document(input) = input {
                    self.collect_stages(input);
                }
            }
        }
    }

    pub fn has_collscan(&self) -> bool {
        self.stages.iter().any(|stage| stage.eq_ignore_ascii_case("COLLSCAN"))
    }

    pub fn uses_index(&self, name: &str) -> bool {
        self.index_names.iter().any(|index| index == name)
    }
}

impl fmt::Display for ExecutionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = |value: Option<u64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
        write!(
            f,
            "returned {}, keys examined {}, docs examined {}, {} ms",
            count(self.n_returned),
            count(self.keys_examined),
            count(self.docs_examined),
            count(self.execution_time_ms),
        )?;
        if !self.stages.is_empty() {
            write!(f, ", plan {}", self.stages.join(" <- "))?;
        }
        if !self.index_names.is_empty() {
            write!(f, ", index {}", self.index_names.join(", "))?;
        }
        Ok(())
    }
}

/// The `executionStats` sub-document, present when explain ran with that verbosity.
pub fn execution_stats(explain_doc: &Document) -> Option<&Document> {
    explain_doc.get_document("executionStats").ok()
}

fn read_u64(doc: &Document, key: &str) -> Option<u64> {
    let value = doc.get(key)?;
    match value {
        Bson::Int32(v) if *v >= 0 => Some(*v as u64),
        Bson::Int64(v) if *v >= 0 => Some(*v as u64),
        Bson::Double(v) if *v >= 0.0 => Some(*v as u64),
        _ => None,
    }
}
