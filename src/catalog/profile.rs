//! Per-user reading statistics, derived entirely from the user's own
//! rating rows joined against book and category data.

use std::collections::HashSet;

use crate::database::{self, Category, CategoryUsage, DbConn, RatingWithBook, User};
use crate::errors::{CoreError, CoreResult};

#[derive(Debug, Clone)]
pub struct ProfileStats {
    pub read_pages: i64,
    pub rated_books: i64,
    pub read_authors: i64,
    pub most_read_category: Option<Category>,
}

/// Everything the profile page needs in one pass: the user header, the
/// rating history (newest first) and the derived stats.
#[derive(Debug)]
pub struct ProfileOverview {
    pub user: User,
    pub ratings: Vec<RatingWithBook>,
    pub stats: ProfileStats,
}

pub fn profile_stats(conn: &mut DbConn, user_id: i64) -> CoreResult<ProfileStats> {
    Ok(profile_overview(conn, user_id)?.stats)
}

pub fn profile_overview(conn: &mut DbConn, user_id: i64) -> CoreResult<ProfileOverview> {
    let user = database::users::find_by_id(conn, user_id)?
        .ok_or_else(|| CoreError::not_found("user"))?;

    let ratings = database::ratings::list_for_user_with_books(conn, user_id)?;
    let usage = database::categories::usage_by_user(conn, user_id)?;
    let stats = derive_stats(&ratings, usage);

    Ok(ProfileOverview { user, ratings, stats })
}

fn derive_stats(ratings: &[RatingWithBook], usage: Vec<CategoryUsage>) -> ProfileStats {
    // One rating per (user, book) is enforced at insert time, so the
    // rating count doubles as the distinct-books count.
    let rated_books = ratings.len() as i64;
    let read_pages = ratings.iter().map(|r| r.book.total_pages).sum();

    let authors: HashSet<&str> = ratings.iter().map(|r| r.book.author.as_str()).collect();

    ProfileStats {
        read_pages,
        rated_books,
        read_authors: authors.len() as i64,
        most_read_category: pick_most_read(usage),
    }
}

/// Highest category frequency wins; equal frequencies fall back to the
/// lowest category id so the answer is deterministic.
fn pick_most_read(usage: Vec<CategoryUsage>) -> Option<Category> {
    usage
        .into_iter()
        .min_by_key(|u| (std::cmp::Reverse(u.uses), u.category.id))
        .map(|u| u.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testsupport::*;

    #[test]
    fn sums_pages_and_counts_books() {
        let (_pool, mut conn) = test_store();
        let user = add_user(&mut conn, "alice");
        let b1 = add_book(&mut conn, "Short", "A", 100);
        let b2 = add_book(&mut conn, "Long", "B", 250);
        rate(&mut conn, user, b1, 4);
        rate(&mut conn, user, b2, 5);

        let stats = profile_stats(&mut conn, user).unwrap();
        assert_eq!(stats.read_pages, 350);
        assert_eq!(stats.rated_books, 2);
    }

    #[test]
    fn authors_are_counted_distinctly() {
        let (_pool, mut conn) = test_store();
        let user = add_user(&mut conn, "bob");
        let b1 = add_book(&mut conn, "Emma", "Jane Austen", 474);
        let b2 = add_book(&mut conn, "Persuasion", "Jane Austen", 249);
        let b3 = add_book(&mut conn, "Dune", "Frank Herbert", 412);
        for b in [b1, b2, b3] {
            rate(&mut conn, user, b, 4);
        }

        let stats = profile_stats(&mut conn, user).unwrap();
        assert_eq!(stats.rated_books, 3);
        assert_eq!(stats.read_authors, 2);
    }

    #[test]
    fn most_read_category_counts_the_multiset_of_assignments() {
        let (_pool, mut conn) = test_store();
        let user = add_user(&mut conn, "carol");
        let fantasy = add_category(&mut conn, "Fantasy");
        let scifi = add_category(&mut conn, "Sci-fi");

        let b1 = add_book(&mut conn, "One", "A", 10);
        let b2 = add_book(&mut conn, "Two", "B", 10);
        let b3 = add_book(&mut conn, "Three", "C", 10);
        categorize(&mut conn, b1, fantasy);
        categorize(&mut conn, b2, fantasy);
        categorize(&mut conn, b2, scifi);
        categorize(&mut conn, b3, scifi);

        // fantasy: b1 + b2 = 2, scifi: b2 = 1
        rate(&mut conn, user, b1, 4);
        rate(&mut conn, user, b2, 4);

        let stats = profile_stats(&mut conn, user).unwrap();
        assert_eq!(stats.most_read_category.unwrap().name, "Fantasy");
    }

    #[test]
    fn category_frequency_tie_goes_to_the_lowest_id() {
        let (_pool, mut conn) = test_store();
        let user = add_user(&mut conn, "dave");
        let first = add_category(&mut conn, "Romance");
        let second = add_category(&mut conn, "Horror");

        let b1 = add_book(&mut conn, "One", "A", 10);
        let b2 = add_book(&mut conn, "Two", "B", 10);
        categorize(&mut conn, b1, second);
        categorize(&mut conn, b2, first);
        rate(&mut conn, user, b1, 3);
        rate(&mut conn, user, b2, 3);

        let stats = profile_stats(&mut conn, user).unwrap();
        assert_eq!(stats.most_read_category.unwrap().id, first.min(second));
    }

    #[test]
    fn user_without_ratings_gets_empty_stats() {
        let (_pool, mut conn) = test_store();
        let user = add_user(&mut conn, "erin");

        let stats = profile_stats(&mut conn, user).unwrap();
        assert_eq!(stats.read_pages, 0);
        assert_eq!(stats.rated_books, 0);
        assert_eq!(stats.read_authors, 0);
        assert!(stats.most_read_category.is_none());
    }

    #[test]
    fn unknown_user_is_a_not_found() {
        let (_pool, mut conn) = test_store();

        let err = profile_stats(&mut conn, 999).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::CoreError::NotFound { entity: "user" }
        ));
    }

    #[test]
    fn overview_lists_the_rating_history() {
        let (_pool, mut conn) = test_store();
        let user = add_user(&mut conn, "fred");
        let b1 = add_book(&mut conn, "One", "A", 10);
        let b2 = add_book(&mut conn, "Two", "B", 20);
        rate(&mut conn, user, b1, 2);
        rate(&mut conn, user, b2, 5);

        let overview = profile_overview(&mut conn, user).unwrap();
        assert_eq!(overview.user.id, user);
        assert_eq!(overview.ratings.len(), 2);
        // Newest first; identical timestamps fall back to id order.
        assert_eq!(overview.ratings[0].book.id, b2);
    }
}
