use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::api::handlers::{
    AppState,
    books::{get_book_detail, get_books, get_popular_books},
    profile::get_profile,
    reviews::{get_categories, get_latest_reviews, post_rating},
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/books", get(get_books))
        .route("/api/books/popular", get(get_popular_books))
        .route("/api/books/:id", get(get_book_detail))
        .route("/api/books/:id/rate", post(post_rating))
        .route("/api/categories", get(get_categories))
        .route("/api/reviews/latest", get(get_latest_reviews))
        .route("/api/profile/:id", get(get_profile))
        .with_state(state)
}
