use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::web::{self, Data};
use actix_web::{Error, HttpResponse};

use crate::api::{
    AddReviewRequest, AddWishlistEntryRequest, ApiResponse, BookCreated, BookId, Document,
};
use crate::books_repository::{BookRepository, BookRepositoryError};

type BooksRepository = Data<Arc<dyn BookRepository>>;

/// Maps a failed repository call to a response, not found errors become 404
fn error_response(operation: &str, err: BookRepositoryError) -> HttpResponse {
    if err.is_not_found() {
        HttpResponse::NotFound().json(ApiResponse::<()>::error(err.to_string()))
    } else {
        tracing::error!("{} failed {}", operation, err);
        HttpResponse::InternalServerError()
            .json(ApiResponse::<()>::error(format!("{} failed", operation)))
    }
}

pub async fn hello() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().body("Hello World!"))
}

pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

pub async fn get_all_books(books_repository: BooksRepository) -> Result<HttpResponse, Error> {
    Ok(match books_repository.list_books().await {
        Ok(books) => HttpResponse::Ok().json(ApiResponse::data(books)),
        Err(err) => error_response("Get all books", err),
    })
}

pub async fn add_book(
    books_repository: BooksRepository,
    fields: web::Json<Document>,
) -> Result<HttpResponse, Error> {
    Ok(match books_repository.add_book(fields.into_inner()).await {
        Ok(book_id) => HttpResponse::Created()
            .append_header((LOCATION, format!("/book/{}", book_id)))
            .json(ApiResponse::data(BookCreated { book_id })),
        Err(err) => error_response("Add book", err),
    })
}

pub async fn get_book(
    books_repository: BooksRepository,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    Ok(match books_repository.get_book(book_id.into_inner()).await {
        Ok(book) => HttpResponse::Ok().json(ApiResponse::data(book)),
        Err(err) => error_response("Get book", err),
    })
}

pub async fn update_book(
    books_repository: BooksRepository,
    book_id: web::Path<BookId>,
    fields: web::Json<Document>,
) -> Result<HttpResponse, Error> {
    Ok(
        match books_repository
            .update_book(book_id.into_inner(), fields.into_inner())
            .await
        {
            Ok(book) => HttpResponse::Ok().json(ApiResponse::data(book)),
            Err(err) => error_response("Update book", err),
        },
    )
}

pub async fn delete_book(
    books_repository: BooksRepository,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    Ok(match books_repository.delete_book(book_id.into_inner()).await {
        Ok(()) => {
            HttpResponse::Ok().json(ApiResponse::<()>::message("Book deleted successfully"))
        }
        Err(err) => error_response("Delete book", err),
    })
}

pub async fn add_review(
    books_repository: BooksRepository,
    book_id: web::Path<BookId>,
    request: web::Json<AddReviewRequest>,
) -> Result<HttpResponse, Error> {
    Ok(
        match books_repository
            .add_review(book_id.into_inner(), request.into_inner().reviews)
            .await
        {
            Ok(()) => {
                HttpResponse::Ok().json(ApiResponse::<()>::message("Added review successfully"))
            }
            Err(err) => error_response("Add review", err),
        },
    )
}

pub async fn get_reviews(
    books_repository: BooksRepository,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    Ok(match books_repository.get_reviews(book_id.into_inner()).await {
        Ok(reviews) => HttpResponse::Ok().json(ApiResponse::data(reviews)),
        Err(err) => error_response("Get reviews", err),
    })
}

pub async fn add_wishlist_entry(
    books_repository: BooksRepository,
    book_id: web::Path<BookId>,
    request: web::Json<AddWishlistEntryRequest>,
) -> Result<HttpResponse, Error> {
    Ok(
        match books_repository
            .add_wishlist_entry(book_id.into_inner(), request.into_inner().wishlist)
            .await
        {
            Ok(()) => {
                HttpResponse::Ok()
                    .json(ApiResponse::<()>::message("Added wishlist entry successfully"))
            }
            Err(err) => error_response("Add wishlist entry", err),
        },
    )
}

pub async fn find_wishlist_by_user(
    books_repository: BooksRepository,
    wish_list_user: web::Path<String>,
) -> Result<HttpResponse, Error> {
    Ok(
        match books_repository
            .find_wishlist_by_user(&wish_list_user)
            .await
        {
            Ok(wishlists) => HttpResponse::Ok().json(ApiResponse::data(wishlists)),
            Err(err) => error_response("Find wishlist", err),
        },
    )
}

pub async fn remove_wishlist_entry(
    books_repository: BooksRepository,
    wish_list_id: web::Path<String>,
) -> Result<HttpResponse, Error> {
    Ok(
        match books_repository
            .remove_wishlist_entry(&wish_list_id)
            .await
        {
            Ok(()) => {
                HttpResponse::Ok()
                    .json(ApiResponse::<()>::message("Wishlist item deleted successfully"))
            }
            Err(err) => error_response("Remove wishlist entry", err),
        },
    )
}
