use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use super::models::{Book, BookWithStats};

const BOOK_COLUMNS: &str = "id, name, author, cover_url, total_pages, summary, created_at";

pub fn insert_book(
    conn: &mut DbConn,
    name: &str,
    author: &str,
    cover_url: Option<&str>,
    total_pages: i64,
    summary: &str,
) -> Result<Book> {
    let sql = format!(
        "INSERT INTO books (name, author, cover_url, total_pages, summary) \
         VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {BOOK_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![name, author, cover_url, total_pages, summary],
        parse_book_row,
    )
    .context("Failed to insert book")
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Book>> {
    let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_book_row)
        .optional()
        .context("Failed to query book by id")
}

/// All books (optionally restricted to one category) with their rating
/// aggregates, in ascending id order.
pub fn list_with_stats(conn: &mut DbConn, category_id: Option<i64>) -> Result<Vec<BookWithStats>> {
    let sql = match category_id {
        Some(_) => {
            "SELECT b.id, b.name, b.author, b.cover_url, b.total_pages, b.summary, b.created_at, \
                    COUNT(r.id), COALESCE(AVG(r.rate), 0.0) \
             FROM books b \
             JOIN books_categories bc ON bc.book_id = b.id AND bc.category_id = ?1 \
             LEFT JOIN ratings r ON r.book_id = b.id \
             GROUP BY b.id \
             ORDER BY b.id ASC"
        }
        None => {
            "SELECT b.id, b.name, b.author, b.cover_url, b.total_pages, b.summary, b.created_at, \
                    COUNT(r.id), COALESCE(AVG(r.rate), 0.0) \
             FROM books b \
             LEFT JOIN ratings r ON r.book_id = b.id \
             GROUP BY b.id \
             ORDER BY b.id ASC"
        }
    };

    let mut stmt = conn.prepare(sql)?;
    let rows: rusqlite::Result<Vec<BookWithStats>> = match category_id {
        Some(id) => stmt.query_map(params![id], parse_book_with_stats_row)?.collect(),
        None => stmt.query_map([], parse_book_with_stats_row)?.collect(),
    };

    rows.context("Failed to list books with rating stats")
}

/// The `limit` books with the most ratings, descending; ties resolved by
/// ascending book id so repeated calls rank identically.
pub fn list_most_rated(conn: &mut DbConn, limit: usize) -> Result<Vec<BookWithStats>> {
    let sql = "SELECT b.id, b.name, b.author, b.cover_url, b.total_pages, b.summary, b.created_at, \
                      COUNT(r.id), COALESCE(AVG(r.rate), 0.0) \
               FROM books b \
               LEFT JOIN ratings r ON r.book_id = b.id \
               GROUP BY b.id \
               ORDER BY COUNT(r.id) DESC, b.id ASC \
               LIMIT ?1";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![limit as i64], parse_book_with_stats_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_book_row(row: &rusqlite::Row) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        name: row.get(1)?,
        author: row.get(2)?,
        cover_url: row.get(3)?,
        total_pages: row.get(4)?,
        summary: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn parse_book_with_stats_row(row: &rusqlite::Row) -> rusqlite::Result<BookWithStats> {
    Ok(BookWithStats {
        book: parse_book_row(row)?,
        rating_count: row.get(7)?,
        average_rating: row.get(8)?,
    })
}
