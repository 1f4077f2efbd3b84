// Book record and write-result summaries

use mongodb::bson::{self, Document};
use mongodb::results::{DeleteResult, UpdateResult};
use serde::{Deserialize, Serialize};

/// A record in the books collection. The store owns the schema; this type
/// only mirrors the fields the queries touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    pub price: f64,
    pub in_stock: bool,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        published_year: i32,
        price: f64,
        in_stock: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            published_year,
            price,
            in_stock,
        }
    }

    /// Decode a book from a raw document; extra fields such as `_id` are ignored.
    pub fn from_document(document: Document) -> bson::de::Result<Self> {
        bson::from_document(document)
    }

    pub fn to_document(&self) -> bson::ser::Result<Document> {
        bson::to_document(self)
    }
}

/// Matched/modified counts of an `updateOne`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateCounts {
    pub matched: u64,
    pub modified: u64,
}

impl From<UpdateResult> for UpdateCounts {
    fn from(result: UpdateResult) -> Self {
        Self { matched: result.matched_count, modified: result.modified_count }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteCounts {
    pub deleted: u64,
}

impl From<DeleteResult> for DeleteCounts {
    fn from(result: DeleteResult) -> Self {
        Self { deleted: result.deleted_count }
    }
}
