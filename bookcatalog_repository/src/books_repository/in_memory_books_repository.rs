use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

use serde_json::{json, Value};

use crate::api::{
    Book, BookId, BookReviews, Document, UserWishlist, WishlistEntry, REVIEWS_FIELD,
    WISHLIST_FIELD, WISHLIST_ID_FIELD, WISHLIST_USER_FIELD,
};
use crate::books_repository::{
    entry_matches, reviews_from_value, strip_reserved_fields, BookRepository,
    BookRepositoryError,
};

/// Books kept in process memory, ordered by id which follows insertion order
#[derive(Default)]
pub struct InMemoryBookRepository {
    book_sequence_generator: AtomicI32,
    books: parking_lot::RwLock<BTreeMap<BookId, Document>>,
}

impl InMemoryBookRepository {
    /// Appends `value` to the array under `field`, creating it when missing.
    /// A field holding something other than an array is left untouched
    fn push_embedded(
        &self,
        book_id: BookId,
        field: &str,
        value: Value,
    ) -> Result<(), BookRepositoryError> {
        let mut locked_books = self.books.write();
        let book = locked_books
            .get_mut(&book_id)
            .ok_or(BookRepositoryError::NotFound(book_id))?;

        match book
            .entry(field)
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(items) => {
                items.push(value);
                Ok(())
            }
            _ => Err(BookRepositoryError::NotFound(book_id)),
        }
    }
}

fn user_wishlist(
    book_id: BookId,
    fields: &Document,
    wish_list_user: &str,
) -> Option<UserWishlist> {
    let wishlist: Vec<Value> = fields
        .get(WISHLIST_FIELD)?
        .as_array()?
        .iter()
        .filter(|entry| entry_matches(entry, WISHLIST_USER_FIELD, wish_list_user))
        .cloned()
        .collect();

    if wishlist.is_empty() {
        return None;
    }

    Some(UserWishlist {
        book_id,
        title: fields.get("title").cloned(),
        author: fields.get("author").cloned(),
        genre: fields.get("genre").cloned(),
        publication_date: fields.get("publicationDate").cloned(),
        wishlist,
    })
}

#[async_trait::async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list_books(&self) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(self
            .books
            .read()
            .iter()
            .map(|(&book_id, fields)| Book {
                book_id,
                fields: fields.clone(),
            })
            .collect())
    }

    async fn get_book(&self, book_id: BookId) -> Result<Book, BookRepositoryError> {
        self.books
            .read()
            .get(&book_id)
            .map(|fields| Book {
                book_id,
                fields: fields.clone(),
            })
            .ok_or(BookRepositoryError::NotFound(book_id))
    }

    async fn add_book(&self, fields: Document) -> Result<BookId, BookRepositoryError> {
        let id = self.book_sequence_generator.fetch_add(1, Ordering::Relaxed);
        self.books.write().insert(id, strip_reserved_fields(fields));
        Ok(id)
    }

    async fn update_book(
        &self,
        book_id: BookId,
        fields: Document,
    ) -> Result<Book, BookRepositoryError> {
        let mut locked_books = self.books.write();
        let book = locked_books
            .get_mut(&book_id)
            .ok_or(BookRepositoryError::NotFound(book_id))?;
        book.extend(strip_reserved_fields(fields));
        Ok(Book {
            book_id,
            fields: book.clone(),
        })
    }

    async fn delete_book(&self, book_id: BookId) -> Result<(), BookRepositoryError> {
        self.books
            .write()
            .remove(&book_id)
            .map(|_| ())
            .ok_or(BookRepositoryError::NotFound(book_id))
    }

    async fn add_review(&self, book_id: BookId, review: Value) -> Result<(), BookRepositoryError> {
        self.push_embedded(book_id, REVIEWS_FIELD, review)
    }

    async fn get_reviews(&self, book_id: BookId) -> Result<BookReviews, BookRepositoryError> {
        let reviews = self
            .books
            .read()
            .get(&book_id)
            .ok_or(BookRepositoryError::NotFound(book_id))?
            .get(REVIEWS_FIELD)
            .cloned();
        Ok(reviews_from_value(book_id, reviews))
    }

    async fn add_wishlist_entry(
        &self,
        book_id: BookId,
        entry: WishlistEntry,
    ) -> Result<(), BookRepositoryError> {
        self.push_embedded(book_id, WISHLIST_FIELD, json!(entry))
    }

    async fn find_wishlist_by_user(
        &self,
        wish_list_user: &str,
    ) -> Result<Vec<UserWishlist>, BookRepositoryError> {
        let wishlists = self
            .books
            .read()
            .iter()
            .filter_map(|(&book_id, fields)| user_wishlist(book_id, fields, wish_list_user))
            .collect::<Vec<_>>();

        if wishlists.is_empty() {
            return Err(BookRepositoryError::WishlistNotFound(
                wish_list_user.to_string(),
            ));
        }
        Ok(wishlists)
    }

    async fn remove_wishlist_entry(&self, wish_list_id: &str) -> Result<(), BookRepositoryError> {
        let mut removed_any = false;
        for fields in self.books.write().values_mut() {
            if let Some(Value::Array(entries)) = fields.get_mut(WISHLIST_FIELD) {
                let len_before = entries.len();
                entries.retain(|entry| !entry_matches(entry, WISHLIST_ID_FIELD, wish_list_id));
                removed_any |= entries.len() != len_before;
            }
        }

        if removed_any {
            Ok(())
        } else {
            Err(BookRepositoryError::WishlistEntryNotFound(
                wish_list_id.to_string(),
            ))
        }
    }
}
