use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, connection_error, error_response};
use crate::api::models::{
    BookRef, CategoriesResponse, CategoryItem, LatestReviewItem, LatestReviewsResponse, RateBody,
    RatingCreated, UserView,
};
use crate::catalog::review;
use crate::database;

pub async fn post_rating(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<i64>,
    Json(body): Json<RateBody>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    let submitted = review::submit(
        &mut conn,
        &state.config.review,
        body.user_id,
        book_id,
        body.rate,
        &body.description,
    );

    match submitted {
        Ok(rating) => (
            StatusCode::CREATED,
            Json(RatingCreated {
                id: rating.id,
                book_id: rating.book_id,
                user_id: rating.user_id,
                rate: rating.rate,
                description: rating.description,
                created_at: rating.created_at,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_latest_reviews(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    let limit = state.config.catalog.latest_reviews_limit;

    match database::ratings::list_latest_with_refs(&mut conn, limit) {
        Ok(rows) => {
            let reviews = rows
                .into_iter()
                .map(|row| LatestReviewItem {
                    id: row.rating.id,
                    rate: row.rating.rate,
                    description: row.rating.description,
                    created_at: row.rating.created_at,
                    book: BookRef {
                        id: row.book.id,
                        name: row.book.name,
                        author: row.book.author,
                        cover_url: row.book.cover_url,
                    },
                    user: UserView {
                        id: row.user.id,
                        name: row.user.name,
                        avatar_url: row.user.avatar_url,
                    },
                })
                .collect();

            Json(LatestReviewsResponse { reviews }).into_response()
        }
        Err(e) => error_response(e.into()),
    }
}

pub async fn get_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match database::categories::list_all(&mut conn) {
        Ok(rows) => {
            let categories = rows
                .into_iter()
                .map(|c| CategoryItem {
                    id: c.id,
                    name: c.name,
                })
                .collect();

            Json(CategoriesResponse { categories }).into_response()
        }
        Err(e) => error_response(e.into()),
    }
}
