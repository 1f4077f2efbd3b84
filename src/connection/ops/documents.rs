//! Find, update and delete operations on the bound collection.

use mongodb::bson::Document;
use mongodb::options::FindOptions;

use crate::connection::ScopedConnection;
use crate::connection::types::FindDocumentsOptions;
use crate::error::Result;
use crate::models::{DeleteCounts, UpdateCounts};

impl ScopedConnection {
    /// Find documents matching `filter`, honoring projection, sort and paging options.
    pub fn find_documents(
        &self,
        filter: Document,
        opts: FindDocumentsOptions,
    ) -> Result<Vec<Document>> {
        use futures::TryStreamExt;

        let coll = self.collection();
        self.block_on(async move {
            let mut options = FindOptions::default();
            options.projection = opts.projection;
            options.sort = opts.sort;
            options.skip = opts.skip;
            options.limit = opts.limit;

            let cursor = coll.find(filter).with_options(options).await?;
            let documents: Vec<Document> = cursor.try_collect().await?;
            Ok(documents)
        })
    }

    /// Apply `update` to the first document matching `filter`.
    pub fn update_one(&self, filter: Document, update: Document) -> Result<UpdateCounts> {
        let coll = self.collection();
        self.block_on(async move {
            let result = coll.update_one(filter, update).await?;
            Ok(result.into())
        })
    }

    /// Delete the first document matching `filter`.
    pub fn delete_one(&self, filter: Document) -> Result<DeleteCounts> {
        let coll = self.collection();
        self.block_on(async move {
            let result = coll.delete_one(filter).await?;
            Ok(result.into())
        })
    }
}
