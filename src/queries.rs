//! Filter, projection, sort, pipeline and index key documents for the books collection.
//!
//! Everything here is pure so the exact shape sent to the server can be
//! checked without a running store.

use mongodb::bson::{Document, doc};

pub const TITLE_INDEX_NAME: &str = "title_1";
pub const AUTHOR_YEAR_INDEX_NAME: &str = "author_1_published_year_-1";

pub fn genre_equals(genre: &str) -> Document {
    doc! { "genre": genre }
}

pub fn published_after(year: i32) -> Document {
    doc! { "published_year": { "$gt": year } }
}

pub fn author_equals(author: &str) -> Document {
    doc! { "author": author }
}

pub fn title_equals(title: &str) -> Document {
    doc! { "title": title }
}

pub fn in_stock_published_after(year: i32) -> Document {
    doc! { "in_stock": true, "published_year": { "$gt": year } }
}

pub fn set_price(price: f64) -> Document {
    doc! { "$set": { "price": price } }
}

/// `title`, `author`, `price` with `_id` suppressed.
pub fn listing_projection() -> Document {
    doc! { "_id": 0, "title": 1, "author": 1, "price": 1 }
}

pub fn price_projection() -> Document {
    doc! { "_id": 0, "title": 1, "price": 1 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_i32(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

pub fn sort_by_price(direction: SortDirection) -> Document {
    doc! { "price": direction.as_i32() }
}

/// One page of a result set: pages are numbered from 1, page 0 reads as page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u64,
    pub per_page: u64,
}

impl Page {
    pub fn new(number: u64, per_page: u64) -> Self {
        Self { number: number.max(1), per_page }
    }

    pub fn skip(&self) -> u64 {
        (self.number - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

pub fn average_price_by_genre() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$genre", "avgPrice": { "$avg": "$price" } } },
        doc! { "$sort": { "avgPrice": -1 } },
    ]
}

pub fn author_with_most_books() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$author", "bookCount": { "$sum": 1 } } },
        doc! { "$sort": { "bookCount": -1 } },
        doc! { "$limit": 1 },
    ]
}

/// Groups by a `"<decade>s"` label derived from `published_year`.
pub fn books_by_decade() -> Vec<Document> {
    vec![
        doc! {
            "$project": {
                "decade": {
                    "$concat": [
                        {
                            "$toString": {
                                "$toLong": {
                                    "$subtract": [
                                        "$published_year",
                                        { "$mod": ["$published_year", 10] }
                                    ]
                                }
                            }
                        },
                        "s"
                    ]
                }
            }
        },
        doc! { "$group": { "_id": "$decade", "count": { "$sum": 1 } } },
        doc! { "$sort": { "_id": 1 } },
    ]
}

/// Client-side twin of the `$project` stage in [`books_by_decade`].
pub fn decade_label(year: i64) -> String {
    format!("{}s", year - year % 10)
}

pub fn title_index_keys() -> Document {
    doc! { "title": 1 }
}

pub fn author_year_index_keys() -> Document {
    doc! { "author": 1, "published_year": -1 }
}
