use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use super::models::{Category, CategoryUsage};

pub fn upsert_category(conn: &mut DbConn, name: &str) -> Result<Category> {
    if let Some(existing) = find_by_name(conn, name)? {
        return Ok(existing);
    }

    let sql = "INSERT INTO categories (name) VALUES (?1) RETURNING id, name";
    conn.query_row(sql, params![name], parse_category_row)
        .context("Failed to insert category")
}

fn find_by_name(conn: &mut DbConn, name: &str) -> Result<Option<Category>> {
    let sql = "SELECT id, name FROM categories WHERE name = ?1";

    conn.query_row(sql, params![name], parse_category_row)
        .optional()
        .context("Failed to query category by name")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Category>> {
    let sql = "SELECT id, name FROM categories ORDER BY id ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_category_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn find_for_book(conn: &mut DbConn, book_id: i64) -> Result<Vec<Category>> {
    let sql = "SELECT c.id, c.name FROM categories c \
               JOIN books_categories bc ON bc.category_id = c.id \
               WHERE bc.book_id = ?1 \
               ORDER BY c.id ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![book_id], parse_category_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn assign_to_book(conn: &mut DbConn, book_id: i64, category_id: i64) -> Result<()> {
    let sql = "INSERT OR IGNORE INTO books_categories (book_id, category_id) VALUES (?1, ?2)";

    conn.execute(sql, params![book_id, category_id])
        .context("Failed to assign category to book")
        .map(|_| ())
}

/// How often each category occurs across the books a user has rated.
/// A book carrying N categories contributes N entries. Unordered; the
/// caller owns any ranking rule.
pub fn usage_by_user(conn: &mut DbConn, user_id: i64) -> Result<Vec<CategoryUsage>> {
    let sql = "SELECT c.id, c.name, COUNT(*) \
               FROM ratings r \
               JOIN books_categories bc ON bc.book_id = r.book_id \
               JOIN categories c ON c.id = bc.category_id \
               WHERE r.user_id = ?1 \
               GROUP BY c.id, c.name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![user_id], |row| {
            Ok(CategoryUsage {
                category: parse_category_row(row)?,
                uses: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_category_row(row: &rusqlite::Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}
