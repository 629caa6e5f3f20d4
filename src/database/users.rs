use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use super::models::User;

pub fn insert_user(conn: &mut DbConn, name: &str, avatar_url: Option<&str>) -> Result<User> {
    let sql = "INSERT INTO users (name, avatar_url) VALUES (?1, ?2) \
               RETURNING id, name, avatar_url, created_at";

    conn.query_row(sql, params![name, avatar_url], parse_user_row)
        .context("Failed to insert user")
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<User>> {
    let sql = "SELECT id, name, avatar_url, created_at FROM users WHERE id = ?1";

    conn.query_row(sql, params![id], parse_user_row)
        .optional()
        .context("Failed to query user by id")
}

fn parse_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        avatar_url: row.get(2)?,
        created_at: row.get(3)?,
    })
}
