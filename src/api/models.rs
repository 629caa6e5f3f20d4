use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListItem {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub cover_url: Option<String>,
    pub total_pages: i64,
    pub summary: String,
    pub ratings: i64,
    pub avg_rating: f64,
    pub already_read: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListResponse {
    pub books: Vec<BookListItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryItem {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRef {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub cover_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookReviewItem {
    pub id: i64,
    pub rate: i32,
    pub description: String,
    pub created_at: Option<NaiveDateTime>,
    pub user: UserView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetail {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub cover_url: Option<String>,
    pub total_pages: i64,
    pub summary: String,
    pub categories: Vec<CategoryItem>,
    pub ratings: Vec<BookReviewItem>,
    pub avg_rating: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailResponse {
    pub book: BookDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularBookItem {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub cover_url: Option<String>,
    pub ratings: i64,
    pub avg_rating: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularBooksResponse {
    pub popular_books: Vec<PopularBookItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestReviewItem {
    pub id: i64,
    pub rate: i32,
    pub description: String,
    pub created_at: Option<NaiveDateTime>,
    pub book: BookRef,
    pub user: UserView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestReviewsResponse {
    pub reviews: Vec<LatestReviewItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    pub name: String,
    pub avatar_url: Option<String>,
    pub member_since: Option<NaiveDateTime>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRatingItem {
    pub id: i64,
    pub rate: i32,
    pub description: String,
    pub created_at: Option<NaiveDateTime>,
    pub book: BookRef,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub user: ProfileUser,
    pub ratings: Vec<ProfileRatingItem>,
    pub read_pages: i64,
    pub rated_books: i64,
    pub read_authors: i64,
    pub most_read_category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile: ProfileView,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateBody {
    pub user_id: i64,
    pub rate: i32,
    pub description: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingCreated {
    pub id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub rate: i32,
    pub description: String,
    pub created_at: Option<NaiveDateTime>,
}
