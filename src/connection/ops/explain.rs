//! Explain command for find queries.

use mongodb::bson::{Document, doc};

use crate::connection::ScopedConnection;
use crate::error::Result;

pub const EXECUTION_STATS: &str = "executionStats";

pub struct ExplainFindRequest {
    pub filter: Document,
    /// Index key pattern the server is told to use.
    pub hint: Option<Document>,
    pub verbosity: String,
}

impl ExplainFindRequest {
    pub fn execution_stats(filter: Document, hint: Option<Document>) -> Self {
        Self { filter, hint, verbosity: EXECUTION_STATS.to_string() }
    }

    fn into_command(self, collection: &str) -> Document {
        let mut find_cmd = doc! { "find": collection };
        if !self.filter.is_empty() {
            find_cmd.insert("filter", self.filter);
        }
        if let Some(hint) = self.hint {
            find_cmd.insert("hint", hint);
        }
        doc! {
            "explain": find_cmd,
            "verbosity": self.verbosity,
        }
    }
}

impl ScopedConnection {
    /// Run explain for a `find` command on the bound collection.
    pub fn explain_find(&self, request: ExplainFindRequest) -> Result<Document> {
        let db = self.database();
        let command = request.into_command(self.collection_name());
        self.block_on(async move {
            let explain = db.run_command(command).await?;
            Ok(explain)
        })
    }
}
