use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, BookParams, connection_error, error_response};
use crate::api::models::{
    BookDetail, BookDetailResponse, BookListItem, BookListResponse, BookReviewItem, CategoryItem,
    PopularBookItem, PopularBooksResponse, UserView,
};
use crate::catalog::{aggregate, filter};
use crate::database::{self, DbConn};
use crate::errors::{CoreError, CoreResult};

pub async fn get_books(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookParams>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    let search = params.search.as_deref().filter(|s| !s.is_empty());

    match filter::list_books(&mut conn, params.category, search, params.viewer) {
        Ok(entries) => {
            let books = entries
                .into_iter()
                .map(|entry| BookListItem {
                    id: entry.book.id,
                    name: entry.book.name,
                    author: entry.book.author,
                    cover_url: entry.book.cover_url,
                    total_pages: entry.book.total_pages,
                    summary: entry.book.summary,
                    ratings: entry.rating_count,
                    avg_rating: entry.average_rating,
                    already_read: entry.already_read,
                })
                .collect();

            Json(BookListResponse { books }).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_book_detail(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<i64>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match load_book_detail(&mut conn, book_id) {
        Ok(book) => Json(BookDetailResponse { book }).into_response(),
        Err(e) => error_response(e),
    }
}

fn load_book_detail(conn: &mut DbConn, book_id: i64) -> CoreResult<BookDetail> {
    let book = database::books::find_by_id(conn, book_id)?
        .ok_or_else(|| CoreError::not_found("book"))?;

    let categories = database::categories::find_for_book(conn, book_id)?
        .into_iter()
        .map(|c| CategoryItem {
            id: c.id,
            name: c.name,
        })
        .collect();

    let ratings = database::ratings::list_for_book_with_users(conn, book_id)?
        .into_iter()
        .map(|row| BookReviewItem {
            id: row.rating.id,
            rate: row.rating.rate,
            description: row.rating.description,
            created_at: row.rating.created_at,
            user: UserView {
                id: row.user.id,
                name: row.user.name,
                avatar_url: row.user.avatar_url,
            },
        })
        .collect();

    let avg_rating = aggregate::average_rating(conn, book_id)?;

    Ok(BookDetail {
        id: book.id,
        name: book.name,
        author: book.author,
        cover_url: book.cover_url,
        total_pages: book.total_pages,
        summary: book.summary,
        categories,
        ratings,
        avg_rating,
    })
}

pub async fn get_popular_books(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    let limit = state.config.catalog.popular_books_limit;

    match aggregate::popular_books(&mut conn, limit) {
        Ok(rows) => {
            let popular_books = rows
                .into_iter()
                .map(|row| PopularBookItem {
                    id: row.book.id,
                    name: row.book.name,
                    author: row.book.author,
                    cover_url: row.book.cover_url,
                    ratings: row.rating_count,
                    avg_rating: row.average_rating,
                })
                .collect();

            Json(PopularBooksResponse { popular_books }).into_response()
        }
        Err(e) => error_response(e),
    }
}
