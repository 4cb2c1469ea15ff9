pub use in_memory_books_repository::InMemoryBookRepository;
pub use postgres_books_repository::{PostgresBooksRepository, PostgresBooksRepositoryConfig};

use serde_json::Value;

use crate::api::{
    Book, BookId, BookReviews, Document, UserWishlist, WishlistEntry, ID_FIELD,
};

mod in_memory_books_repository;
mod postgres_books_repository;

#[derive(thiserror::Error, Debug)]
pub enum BookRepositoryError {
    #[error("Book {0} not found")]
    NotFound(BookId),

    #[error("Wishlist of user {0} not found")]
    WishlistNotFound(String),

    #[error("Wishlist item {0} not found")]
    WishlistEntryNotFound(String),

    #[error("Failed to deserialize book: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Database failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}

impl BookRepositoryError {
    /// True for errors caused by a book or wishlist item that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BookRepositoryError::NotFound(_)
                | BookRepositoryError::WishlistNotFound(_)
                | BookRepositoryError::WishlistEntryNotFound(_)
        )
    }
}

#[async_trait::async_trait]
pub trait BookRepository: Send + Sync {
    /// Lists all books in the repository, in the order they were added
    async fn list_books(&self) -> Result<Vec<Book>, BookRepositoryError>;

    /// Retrieves a book from repository
    async fn get_book(&self, book_id: BookId) -> Result<Book, BookRepositoryError>;

    /// Adds book to repository, returns an id assigned to the book
    async fn add_book(&self, fields: Document) -> Result<BookId, BookRepositoryError>;

    /// Overwrites the top level fields present in `fields`, other fields are left untouched.
    /// Returns the book after the update, never creates a new book
    async fn update_book(
        &self,
        book_id: BookId,
        fields: Document,
    ) -> Result<Book, BookRepositoryError>;

    /// Removes the book together with its reviews and wishlist
    async fn delete_book(&self, book_id: BookId) -> Result<(), BookRepositoryError>;

    /// Appends a review to the reviews of the book
    async fn add_review(&self, book_id: BookId, review: Value) -> Result<(), BookRepositoryError>;

    async fn get_reviews(&self, book_id: BookId) -> Result<BookReviews, BookRepositoryError>;

    /// Appends an entry to the wishlist of the book
    async fn add_wishlist_entry(
        &self,
        book_id: BookId,
        entry: WishlistEntry,
    ) -> Result<(), BookRepositoryError>;

    /// Finds all books wishlisted by the user. Wishlist of every returned book
    /// contains only the entries of that user
    async fn find_wishlist_by_user(
        &self,
        wish_list_user: &str,
    ) -> Result<Vec<UserWishlist>, BookRepositoryError>;

    /// Removes every wishlist entry with given id, from every book that has one
    async fn remove_wishlist_entry(&self, wish_list_id: &str) -> Result<(), BookRepositoryError>;
}

/// Drops the fields owned by the store from a document sent by the caller
pub(crate) fn strip_reserved_fields(mut fields: Document) -> Document {
    fields.remove(ID_FIELD);
    fields
}

/// Reviews stored under the reviews field, a missing or null field means no reviews.
/// Any other value is returned as stored
pub(crate) fn reviews_from_value(book_id: BookId, reviews: Option<Value>) -> BookReviews {
    let reviews = match reviews {
        None | Some(Value::Null) => Value::Array(vec![]),
        Some(reviews) => reviews,
    };
    BookReviews { book_id, reviews }
}

/// Checks if embedded entry is an object whose `key` is the string `expected`
pub(crate) fn entry_matches(entry: &Value, key: &str, expected: &str) -> bool {
    entry.get(key).and_then(Value::as_str) == Some(expected)
}
