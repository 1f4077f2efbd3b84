//! Aggregation pipeline operations.

use mongodb::bson::Document;

use crate::connection::ScopedConnection;
use crate::error::Result;

impl ScopedConnection {
    /// Run an aggregation pipeline against the bound collection and collect every result.
    pub fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>> {
        use futures::TryStreamExt;

        let coll = self.collection();
        self.block_on(async move {
            let cursor = coll.aggregate(pipeline).await?;
            let docs: Vec<Document> = cursor.try_collect().await?;
            Ok(docs)
        })
    }
}
