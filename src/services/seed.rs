use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::database::{self, DbConn};

/// Catalog fixture loaded from a JSON file. Books, users and categories
/// are owned by this seeding path; ratings only ever enter through the
/// submission endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedFixture {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub books: Vec<SeedBook>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedUser {
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedBook {
    pub name: String,
    pub author: String,
    pub cover_url: Option<String>,
    pub total_pages: i64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

pub struct SeedService {
    fixture_path: PathBuf,
    reset: bool,
}

impl SeedService {
    pub fn new(fixture_path: PathBuf, reset: bool) -> Self {
        Self { fixture_path, reset }
    }

    pub fn run(&self) -> Result<()> {
        let db_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "bookwise.db".to_string());

        info!("=== Seeding catalog from {} ===", self.fixture_path.display());

        let fixture = load_fixture(&self.fixture_path)?;

        let pool = database::create_pool(&db_path)?;
        let mut conn = database::get_connection(&pool)?;

        if self.reset {
            database::setup::reset_database(&mut conn)?;
        }

        let summary = apply_fixture(&mut conn, &fixture)?;
        info!(
            "Seeded {} users, {} books, {} category assignments",
            summary.users, summary.books, summary.assignments
        );

        Ok(())
    }
}

pub struct SeedSummary {
    pub users: usize,
    pub books: usize,
    pub assignments: usize,
}

pub fn load_fixture(path: &Path) -> Result<SeedFixture> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))
}

pub fn apply_fixture(conn: &mut DbConn, fixture: &SeedFixture) -> Result<SeedSummary> {
    let mut assignments = 0;

    for user in &fixture.users {
        database::users::insert_user(conn, &user.name, user.avatar_url.as_deref())?;
    }

    for book in &fixture.books {
        let stored = database::books::insert_book(
            conn,
            &book.name,
            &book.author,
            book.cover_url.as_deref(),
            book.total_pages,
            &book.summary,
        )?;

        for category_name in &book.categories {
            let category = database::categories::upsert_category(conn, category_name)?;
            database::categories::assign_to_book(conn, stored.id, category.id)?;
            assignments += 1;
        }
    }

    Ok(SeedSummary {
        users: fixture.users.len(),
        books: fixture.books.len(),
        assignments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testsupport::test_store;
    use crate::database;

    const FIXTURE: &str = r#"{
        "users": [{ "name": "alice" }],
        "books": [
            {
                "name": "The Hobbit",
                "author": "J.R.R. Tolkien",
                "totalPages": 310,
                "categories": ["Fantasy", "Adventure"]
            },
            {
                "name": "Dune",
                "author": "Frank Herbert",
                "coverUrl": "covers/dune.png",
                "totalPages": 412,
                "summary": "Desert planet politics.",
                "categories": ["Fantasy"]
            }
        ]
    }"#;

    #[test]
    fn fixture_populates_books_users_and_categories() {
        let (_pool, mut conn) = test_store();
        let fixture: SeedFixture = serde_json::from_str(FIXTURE).unwrap();

        let summary = apply_fixture(&mut conn, &fixture).unwrap();
        assert_eq!(summary.users, 1);
        assert_eq!(summary.books, 2);
        assert_eq!(summary.assignments, 3);

        // "Fantasy" occurs twice in the fixture but is stored once.
        let categories = database::categories::list_all(&mut conn).unwrap();
        assert_eq!(categories.len(), 2);

        let books = database::books::list_with_stats(&mut conn, None).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[1].book.cover_url.as_deref(), Some("covers/dune.png"));
    }
}
