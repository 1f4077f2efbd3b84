//! Index operations for the bound collection.

use mongodb::IndexModel;
use mongodb::bson::Document;

use crate::connection::ScopedConnection;
use crate::error::Result;

impl ScopedConnection {
    /// List indexes for the collection
    pub fn list_indexes(&self) -> Result<Vec<IndexModel>> {
        use futures::TryStreamExt;

        let coll = self.collection();
        self.block_on(async move {
            let cursor = coll.list_indexes().await?;
            let indexes: Vec<IndexModel> = cursor.try_collect().await?;
            Ok(indexes)
        })
    }

    /// Names of every index on the collection, sorted.
    pub fn index_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .list_indexes()?
            .into_iter()
            .filter_map(|index| index.options.and_then(|options| options.name))
            .collect();
        names.sort_unstable();
        Ok(names)
    }

    /// Create an index and return its name. Re-creating an identical index is a no-op
    /// on the server.
    pub fn create_index(&self, keys: Document) -> Result<String> {
        let coll = self.collection();
        let index = IndexModel::builder().keys(keys).build();

        self.block_on(async move {
            let result = coll.create_index(index).await?;
            Ok(result.index_name)
        })
    }
}
