use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub cover_url: Option<String>,
    pub total_pages: i64,
    pub summary: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Rating {
    pub id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub rate: i32,
    pub description: String,
    pub created_at: Option<NaiveDateTime>,
}

// DTOs for joined queries

/// One book row together with its rating aggregates.
#[derive(Debug, Clone)]
pub struct BookWithStats {
    pub book: Book,
    pub rating_count: i64,
    pub average_rating: f64,
}

/// A rating joined with the user who wrote it (book detail view).
#[derive(Debug, Clone)]
pub struct RatingWithUser {
    pub rating: Rating,
    pub user: User,
}

/// A rating joined with the book it reviews (profile and latest feeds).
#[derive(Debug, Clone)]
pub struct RatingWithBook {
    pub rating: Rating,
    pub book: Book,
}

/// A rating joined with both sides (latest reviews feed).
#[derive(Debug, Clone)]
pub struct RatingWithRefs {
    pub rating: Rating,
    pub book: Book,
    pub user: User,
}

/// Category frequency over some set of rated books.
#[derive(Debug, Clone)]
pub struct CategoryUsage {
    pub category: Category,
    pub uses: i64,
}
