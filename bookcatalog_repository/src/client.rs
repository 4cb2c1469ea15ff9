use anyhow::Context;
use reqwest::header::LOCATION;
use reqwest::{Response, StatusCode, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{
    AddReviewRequest, AddWishlistEntryRequest, ApiResponse, Book, BookId, BookReviews, Document,
    UserWishlist, WishlistEntry,
};

pub struct BookCatalogClient {
    url: Url,
    client: ClientWithMiddleware,
}

/// Reads `data` from a successful response envelope
async fn read_data<T: DeserializeOwned>(response: Response) -> anyhow::Result<T> {
    let envelope: ApiResponse<T> = response
        .json()
        .await
        .context("Failed to parse response")?;
    envelope.data.context("No data in response")
}

/// Builds an error out of a failed response envelope
async fn failure(operation: &str, response: Response) -> anyhow::Error {
    let status = response.status();
    let error = response
        .json::<ApiResponse<()>>()
        .await
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or_default();
    anyhow::anyhow!("Failed to {} ({}) {}", operation, status, error)
}

/// True for a success, false for 404, error otherwise
async fn found(response: Response, operation: &str) -> anyhow::Result<bool> {
    match response.status() {
        StatusCode::NOT_FOUND => Ok(false),
        status if status.is_success() => Ok(true),
        _ => Err(failure(operation, response).await),
    }
}

impl BookCatalogClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let url = Url::parse(url).with_context(|| format!("Invalid service url {}", url))?;
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self { url, client })
    }

    /// Service url extended by `segments`, each one percent-encoded as a single path segment
    fn endpoint(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Service url {} cannot be a base", self.url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Calls GET /books endpoint
    pub async fn list_books(&self) -> anyhow::Result<Vec<Book>> {
        let response = self
            .client
            .get(self.endpoint(&["books"])?)
            .send()
            .await?;
        if response.status().is_success() {
            read_data(response).await
        } else {
            Err(failure("list books", response).await)
        }
    }

    /// Calls POST /book endpoint
    /// Returns id assigned to the book, taken from the location header
    pub async fn add_book(&self, fields: &Document) -> anyhow::Result<BookId> {
        let response = self
            .client
            .post(self.endpoint(&["book"])?)
            .json(fields)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(failure("add book", response).await);
        }

        let location_header = response
            .headers()
            .get(LOCATION)
            .context("No location header")?;

        location_header
            .to_str()
            .context("Failed to convert header to str")?
            .strip_prefix("/book/")
            .context("Invalid location header")?
            .parse()
            .context("Failed to parse book id")
    }

    /// Calls GET /book/{book_id} endpoint
    /// Returns None if book was not in the repository
    pub async fn get_book(&self, book_id: BookId) -> anyhow::Result<Option<Book>> {
        let response = self
            .client
            .get(self.endpoint(&["book", &book_id.to_string()])?)
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(read_data(response).await?)),
            _ => Err(failure("get book", response).await),
        }
    }

    /// Calls PATCH /book/{book_id} endpoint
    /// Returns the updated book or None if book was not in the repository
    pub async fn update_book(
        &self,
        book_id: BookId,
        fields: &Document,
    ) -> anyhow::Result<Option<Book>> {
        let response = self
            .client
            .patch(self.endpoint(&["book", &book_id.to_string()])?)
            .json(fields)
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(read_data(response).await?)),
            _ => Err(failure("update book", response).await),
        }
    }

    /// Calls DELETE /book/{book_id} endpoint
    /// Returns false if book was not in the repository
    pub async fn delete_book(&self, book_id: BookId) -> anyhow::Result<bool> {
        let response = self
            .client
            .delete(self.endpoint(&["book", &book_id.to_string()])?)
            .send()
            .await?;
        found(response, "delete book").await
    }

    /// Calls POST /reviews/{book_id} endpoint
    /// Returns false if book was not in the repository
    pub async fn add_review(&self, book_id: BookId, review: Value) -> anyhow::Result<bool> {
        let response = self
            .client
            .post(self.endpoint(&["reviews", &book_id.to_string()])?)
            .json(&AddReviewRequest { reviews: review })
            .send()
            .await?;
        found(response, "add review").await
    }

    /// Calls GET /review/{book_id} endpoint
    pub async fn get_reviews(&self, book_id: BookId) -> anyhow::Result<Option<BookReviews>> {
        let response = self
            .client
            .get(self.endpoint(&["review", &book_id.to_string()])?)
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(read_data(response).await?)),
            _ => Err(failure("get reviews", response).await),
        }
    }

    /// Calls POST /wishlist/{book_id} endpoint
    /// Returns false if book was not in the repository
    pub async fn add_wishlist_entry(
        &self,
        book_id: BookId,
        entry: WishlistEntry,
    ) -> anyhow::Result<bool> {
        let response = self
            .client
            .post(self.endpoint(&["wishlist", &book_id.to_string()])?)
            .json(&AddWishlistEntryRequest { wishlist: entry })
            .send()
            .await?;
        found(response, "add wishlist entry").await
    }

    /// Calls GET /wishlist/{user} endpoint
    /// Returns an empty list if user has nothing on any wishlist
    pub async fn find_wishlist_by_user(&self, user: &str) -> anyhow::Result<Vec<UserWishlist>> {
        let response = self
            .client
            .get(self.endpoint(&["wishlist", user])?)
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(vec![]),
            status if status.is_success() => read_data(response).await,
            _ => Err(failure("find wishlist", response).await),
        }
    }

    /// Calls DELETE /wishlist/{wishlist_id} endpoint
    /// Returns false if no wishlist contained the item
    pub async fn remove_wishlist_entry(&self, wish_list_id: &str) -> anyhow::Result<bool> {
        let response = self
            .client
            .delete(self.endpoint(&["wishlist", wish_list_id])?)
            .send()
            .await?;
        found(response, "remove wishlist entry").await
    }
}
