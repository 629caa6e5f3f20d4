use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, connection_error, error_response};
use crate::api::models::{BookRef, ProfileRatingItem, ProfileResponse, ProfileUser, ProfileView};
use crate::catalog::profile;

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match profile::profile_overview(&mut conn, user_id) {
        Ok(overview) => {
            let ratings = overview
                .ratings
                .into_iter()
                .map(|row| ProfileRatingItem {
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
                })
                .collect();

            let profile = ProfileView {
                user: ProfileUser {
                    name: overview.user.name,
                    avatar_url: overview.user.avatar_url,
                    member_since: overview.user.created_at,
                },
                ratings,
                read_pages: overview.stats.read_pages,
                rated_books: overview.stats.rated_books,
                read_authors: overview.stats.read_authors,
                most_read_category: overview.stats.most_read_category.map(|c| c.name),
            };

            Json(ProfileResponse { profile }).into_response()
        }
        Err(e) => error_response(e),
    }
}
