//! Catalog listing: optional category restriction, literal
//! case-insensitive substring search over name and author, and the
//! per-viewer "already read" flag.

use std::collections::HashSet;

use crate::database::{self, Book, DbConn};
use crate::errors::CoreResult;

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub book: Book,
    pub rating_count: i64,
    pub average_rating: f64,
    pub already_read: bool,
}

/// Books in ascending id order, filtered and augmented. `viewer_id`
/// drives the `already_read` flag; without a viewer the flag is false
/// everywhere.
pub fn list_books(
    conn: &mut DbConn,
    category_id: Option<i64>,
    search_term: Option<&str>,
    viewer_id: Option<i64>,
) -> CoreResult<Vec<CatalogEntry>> {
    let rows = database::books::list_with_stats(conn, category_id)?;

    let read_ids: HashSet<i64> = match viewer_id {
        Some(user_id) => database::ratings::book_ids_rated_by(conn, user_id)?
            .into_iter()
            .collect(),
        None => HashSet::new(),
    };

    // The case fold happens here rather than in SQL: SQLite's LIKE only
    // folds ASCII, while to_lowercase() is Unicode-aware.
    let needle = search_term.map(str::to_lowercase);

    let entries = rows
        .into_iter()
        .filter(|row| matches_search(&row.book, needle.as_deref()))
        .map(|row| CatalogEntry {
            already_read: read_ids.contains(&row.book.id),
            book: row.book,
            rating_count: row.rating_count,
            average_rating: row.average_rating,
        })
        .collect();

    Ok(entries)
}

fn matches_search(book: &Book, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => {
            book.name.to_lowercase().contains(needle)
                || book.author.to_lowercase().contains(needle)
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testsupport::*;

    #[test]
    fn search_matches_author_case_insensitively() {
        let (_pool, mut conn) = test_store();
        add_book(&mut conn, "The Hobbit", "J.R.R. Tolkien", 310);
        add_book(&mut conn, "Dune", "Frank Herbert", 412);

        let hits = list_books(&mut conn, None, Some("tolkien"), None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].book.name, "The Hobbit");
    }

    #[test]
    fn search_matches_name_substring() {
        let (_pool, mut conn) = test_store();
        add_book(&mut conn, "The Fellowship of the Ring", "J.R.R. Tolkien", 423);
        add_book(&mut conn, "The Two Towers", "J.R.R. Tolkien", 352);

        let hits = list_books(&mut conn, None, Some("fellow"), None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].book.name, "The Fellowship of the Ring");
    }

    #[test]
    fn category_filter_restricts_the_listing() {
        let (_pool, mut conn) = test_store();
        let fantasy = add_category(&mut conn, "Fantasy");
        let scifi = add_category(&mut conn, "Sci-fi");
        let hobbit = add_book(&mut conn, "The Hobbit", "J.R.R. Tolkien", 310);
        let dune = add_book(&mut conn, "Dune", "Frank Herbert", 412);
        categorize(&mut conn, hobbit, fantasy);
        categorize(&mut conn, dune, scifi);

        let hits = list_books(&mut conn, Some(fantasy), None, None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].book.id, hobbit);

        let all = list_books(&mut conn, None, None, None).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn already_read_follows_the_viewer() {
        let (_pool, mut conn) = test_store();
        let hobbit = add_book(&mut conn, "The Hobbit", "J.R.R. Tolkien", 310);
        let dune = add_book(&mut conn, "Dune", "Frank Herbert", 412);
        let alice = add_user(&mut conn, "alice");
        rate(&mut conn, alice, hobbit, 5);

        let entries = list_books(&mut conn, None, None, Some(alice)).unwrap();
        let flag_of = |id: i64| entries.iter().find(|e| e.book.id == id).unwrap().already_read;
        assert!(flag_of(hobbit));
        assert!(!flag_of(dune));

        let anonymous = list_books(&mut conn, None, None, None).unwrap();
        assert!(anonymous.iter().all(|e| !e.already_read));
    }

    #[test]
    fn listing_carries_rating_aggregates_in_id_order() {
        let (_pool, mut conn) = test_store();
        let first = add_book(&mut conn, "First", "A", 100);
        let second = add_book(&mut conn, "Second", "B", 200);
        let u1 = add_user(&mut conn, "u1");
        let u2 = add_user(&mut conn, "u2");
        rate(&mut conn, u1, second, 2);
        rate(&mut conn, u2, second, 4);

        let entries = list_books(&mut conn, None, None, None).unwrap();
        assert_eq!(entries[0].book.id, first);
        assert_eq!(entries[0].rating_count, 0);
        assert_eq!(entries[0].average_rating, 0.0);
        assert_eq!(entries[1].book.id, second);
        assert_eq!(entries[1].rating_count, 2);
        assert_eq!(entries[1].average_rating, 3.0);
    }
}
