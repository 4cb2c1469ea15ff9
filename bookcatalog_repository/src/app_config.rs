use actix_web::error::{InternalError, JsonPayloadError, PathError};
use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::ApiResponse;
use crate::handlers;

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::<()>::error(format!("Invalid id: {}", err)));
    InternalError::from_response(err, response).into()
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::<()>::error(format!("Invalid body: {}", err)));
    InternalError::from_response(err, response).into()
}

pub fn config_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(web::resource("/").route(web::get().to(handlers::hello)))
        .service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(web::resource("/books").route(web::get().to(handlers::get_all_books)))
        .service(web::resource("/book").route(web::post().to(handlers::add_book)))
        .service(
            web::resource("/book/{book_id}")
                .route(web::get().to(handlers::get_book))
                .route(web::patch().to(handlers::update_book))
                .route(web::delete().to(handlers::delete_book)),
        )
        .service(web::resource("/reviews/{book_id}").route(web::post().to(handlers::add_review)))
        .service(web::resource("/review/{book_id}").route(web::get().to(handlers::get_reviews)))
        // The same segment holds a book id, a user or a wishlist item id depending on the method
        .service(
            web::resource("/wishlist/{key}")
                .route(web::post().to(handlers::add_wishlist_entry))
                .route(web::get().to(handlers::find_wishlist_by_user))
                .route(web::delete().to(handlers::remove_wishlist_entry)),
        );
}
