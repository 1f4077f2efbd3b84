//! Test fixtures for integration tests.

#![allow(dead_code)]

use bookstore_queries::models::Book;

/// A small bookstore: three Fiction titles, two by George Orwell, several
/// recent in-stock books and one out-of-stock.
pub fn bookstore() -> Vec<Book> {
    vec![
        Book::new("To Kill a Mockingbird", "Harper Lee", "Fiction", 1960, 12.99, true),
        Book::new("1984", "George Orwell", "Dystopian", 1949, 10.99, true),
        Book::new("The Great Gatsby", "F. Scott Fitzgerald", "Fiction", 1925, 9.99, true),
        Book::new("Brave New World", "Aldous Huxley", "Dystopian", 1932, 11.5, false),
        Book::new("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1937, 14.99, true),
        Book::new("The Catcher in the Rye", "J.D. Salinger", "Fiction", 1951, 8.99, true),
        Book::new("Animal Farm", "George Orwell", "Political Satire", 1945, 8.5, false),
        Book::new("Moby Dick", "Herman Melville", "Adventure", 1851, 12.5, false),
        Book::new("The Midnight Library", "Matt Haig", "Fantasy", 2020, 16.0, true),
        Book::new("Project Hail Mary", "Andy Weir", "Science Fiction", 2021, 18.5, true),
        Book::new("Klara and the Sun", "Kazuo Ishiguro", "Literary", 2021, 17.25, false),
        Book::new("The Martian", "Andy Weir", "Science Fiction", 2011, 13.0, true),
    ]
}

/// Two genres with known average prices: A averages 15, B averages 5.
pub fn genre_prices() -> Vec<Book> {
    vec![
        Book::new("A1", "Author One", "A", 2000, 10.0, true),
        Book::new("A2", "Author Two", "A", 2001, 20.0, true),
        Book::new("B1", "Author Three", "B", 1955, 5.0, true),
    ]
}
