use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type BookId = i32;

/// Schema-less set of book fields, exactly as supplied by the caller
pub type Document = serde_json::Map<String, Value>;

/// Name of the field holding the store assigned id
pub const ID_FIELD: &str = "_id";
pub const REVIEWS_FIELD: &str = "reviews";
pub const WISHLIST_FIELD: &str = "wishlist";
pub const WISHLIST_USER_FIELD: &str = "wishListUser";
pub const WISHLIST_ID_FIELD: &str = "wishListId";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Book stored in the catalog, an id assigned by the store and any fields given at creation
pub struct Book {
    #[serde(rename = "_id")]
    pub book_id: BookId,
    #[serde(flatten)]
    pub fields: Document,
}

impl Book {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCreated {
    #[serde(rename = "_id")]
    pub book_id: BookId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Reviews of a single book, without any other book fields
/// `reviews` is returned as stored, an empty array when the book has none
pub struct BookReviews {
    #[serde(rename = "_id")]
    pub book_id: BookId,
    pub reviews: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Entry of a book wishlist. Fields other than user and id are kept as they were sent
pub struct WishlistEntry {
    #[serde(rename = "wishListUser")]
    pub wish_list_user: String,
    #[serde(rename = "wishListId")]
    pub wish_list_id: String,
    #[serde(flatten)]
    pub extra: Document,
}

impl WishlistEntry {
    pub fn new(wish_list_user: impl Into<String>, wish_list_id: impl Into<String>) -> Self {
        Self {
            wish_list_user: wish_list_user.into(),
            wish_list_id: wish_list_id.into(),
            extra: Document::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Book descriptive fields together with the wishlist entries of a single user
/// Fields missing on the book are omitted, entries are returned as stored
pub struct UserWishlist {
    #[serde(rename = "_id")]
    pub book_id: BookId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Value>,
    #[serde(
        rename = "publicationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub publication_date: Option<Value>,
    pub wishlist: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of POST /reviews/{book_id}
pub struct AddReviewRequest {
    pub reviews: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of POST /wishlist/{book_id}
pub struct AddWishlistEntryRequest {
    pub wishlist: WishlistEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Envelope of every JSON response of the service
pub struct ApiResponse<T> {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: true,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            status: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}
