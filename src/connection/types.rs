use mongodb::bson::Document;

use crate::queries::{Page, SortDirection, sort_by_price};

/// Options for a `find` on the bound collection. Unset fields fall back to the
/// server's defaults (all fields, natural order, no paging).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindDocumentsOptions {
    pub sort: Option<Document>,
    pub projection: Option<Document>,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

impl FindDocumentsOptions {
    pub fn projected(projection: Document) -> Self {
        Self { projection: Some(projection), ..Self::default() }
    }

    pub fn sorted_by_price(mut self, direction: SortDirection) -> Self {
        self.sort = Some(sort_by_price(direction));
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.skip = Some(page.skip());
        self.limit = Some(page.limit());
        self
    }
}
