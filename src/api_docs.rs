use crate::api;
use crate::api::response::{Envelope, Status};
use crate::models::{Book, BookPayload, BookSummary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::create_book,
        api::books::get_book,
        api::books::update_book,
        api::books::delete_book,
    ),
    components(schemas(Book, BookSummary, BookPayload, Envelope, Status)),
    tags(
        (name = "bookshelf", description = "Bookshelf catalog API")
    )
)]
pub struct ApiDoc;
