use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::{Book, Rating, RatingWithBook, RatingWithRefs, RatingWithUser, User};

/// Inserts a rating unless the `(user_id, book_id)` pair already exists.
///
/// The UNIQUE constraint on the ratings table makes existence check and
/// insert one atomic statement; a constraint rejection comes back as
/// `Ok(None)` so concurrent duplicates cannot both succeed.
pub fn insert_if_absent(
    conn: &mut DbConn,
    book_id: i64,
    user_id: i64,
    rate: i32,
    description: &str,
) -> Result<Option<Rating>> {
    let sql = "INSERT INTO ratings (book_id, user_id, rate, description) \
               VALUES (?1, ?2, ?3, ?4) \
               RETURNING id, book_id, user_id, rate, description, created_at";

    match conn.query_row(sql, params![book_id, user_id, rate, description], parse_rating_row) {
        Ok(rating) => Ok(Some(rating)),
        Err(e) if is_unique_violation(&e) => Ok(None),
        Err(e) => Err(e).context("Failed to insert rating"),
    }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

pub fn exists_for(conn: &mut DbConn, user_id: i64, book_id: i64) -> Result<bool> {
    let sql = "SELECT EXISTS(SELECT 1 FROM ratings WHERE user_id = ?1 AND book_id = ?2)";

    conn.query_row(sql, params![user_id, book_id], |row| row.get(0))
        .context("Failed to check for existing rating")
}

pub fn average_for_book(conn: &mut DbConn, book_id: i64) -> Result<f64> {
    let sql = "SELECT COALESCE(AVG(rate), 0.0) FROM ratings WHERE book_id = ?1";

    conn.query_row(sql, params![book_id], |row| row.get(0))
        .context("Failed to compute average rating for book")
}

pub fn count_for_book(conn: &mut DbConn, book_id: i64) -> Result<i64> {
    let sql = "SELECT COUNT(*) FROM ratings WHERE book_id = ?1";

    conn.query_row(sql, params![book_id], |row| row.get(0))
        .context("Failed to count ratings for book")
}

pub fn book_ids_rated_by(conn: &mut DbConn, user_id: i64) -> Result<Vec<i64>> {
    let sql = "SELECT book_id FROM ratings WHERE user_id = ?1";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![user_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Ratings of one book joined with their authors, newest first.
pub fn list_for_book_with_users(conn: &mut DbConn, book_id: i64) -> Result<Vec<RatingWithUser>> {
    let sql = "SELECT r.id, r.book_id, r.user_id, r.rate, r.description, r.created_at, \
                      u.id, u.name, u.avatar_url, u.created_at \
               FROM ratings r \
               JOIN users u ON u.id = r.user_id \
               WHERE r.book_id = ?1 \
               ORDER BY r.created_at DESC, r.id DESC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![book_id], |row| {
            Ok(RatingWithUser {
                rating: parse_rating_row(row)?,
                user: parse_user_at(row, 6)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// One user's ratings joined with the rated books, newest first.
pub fn list_for_user_with_books(conn: &mut DbConn, user_id: i64) -> Result<Vec<RatingWithBook>> {
    let sql = "SELECT r.id, r.book_id, r.user_id, r.rate, r.description, r.created_at, \
                      b.id, b.name, b.author, b.cover_url, b.total_pages, b.summary, b.created_at \
               FROM ratings r \
               JOIN books b ON b.id = r.book_id \
               WHERE r.user_id = ?1 \
               ORDER BY r.created_at DESC, r.id DESC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![user_id], |row| {
            Ok(RatingWithBook {
                rating: parse_rating_row(row)?,
                book: parse_book_at(row, 6)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// The most recent ratings across the whole catalog, with both the book
/// and the reviewer attached.
pub fn list_latest_with_refs(conn: &mut DbConn, limit: usize) -> Result<Vec<RatingWithRefs>> {
    let sql = "SELECT r.id, r.book_id, r.user_id, r.rate, r.description, r.created_at, \
                      b.id, b.name, b.author, b.cover_url, b.total_pages, b.summary, b.created_at, \
                      u.id, u.name, u.avatar_url, u.created_at \
               FROM ratings r \
               JOIN books b ON b.id = r.book_id \
               JOIN users u ON u.id = r.user_id \
               ORDER BY r.created_at DESC, r.id DESC \
               LIMIT ?1";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(RatingWithRefs {
                rating: parse_rating_row(row)?,
                book: parse_book_at(row, 6)?,
                user: parse_user_at(row, 13)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_rating_row(row: &rusqlite::Row) -> rusqlite::Result<Rating> {
    Ok(Rating {
        id: row.get(0)?,
        book_id: row.get(1)?,
        user_id: row.get(2)?,
        rate: row.get(3)?,
        description: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn parse_book_at(row: &rusqlite::Row, offset: usize) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        author: row.get(offset + 2)?,
        cover_url: row.get(offset + 3)?,
        total_pages: row.get(offset + 4)?,
        summary: row.get(offset + 5)?,
        created_at: row.get(offset + 6)?,
    })
}

fn parse_user_at(row: &rusqlite::Row, offset: usize) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        avatar_url: row.get(offset + 2)?,
        created_at: row.get(offset + 3)?,
    })
}
