//! Read-model aggregation over the rating rows: per-book averages,
//! counts, and the popularity ranking. Pure reads; every call reflects
//! the store as of the query, no caching in between.

use crate::database::{self, BookWithStats, DbConn};
use crate::errors::CoreResult;

/// Mean of all rates given to a book; `0.0` when nobody rated it yet.
pub fn average_rating(conn: &mut DbConn, book_id: i64) -> CoreResult<f64> {
    Ok(database::ratings::average_for_book(conn, book_id)?)
}

pub fn rating_count(conn: &mut DbConn, book_id: i64) -> CoreResult<i64> {
    Ok(database::ratings::count_for_book(conn, book_id)?)
}

/// Whether the user already rated this book. Listing views render this
/// as the "already read" badge, and it gates review-writing eligibility.
pub fn already_rated(conn: &mut DbConn, user_id: i64, book_id: i64) -> CoreResult<bool> {
    Ok(database::ratings::exists_for(conn, user_id, book_id)?)
}

/// The `limit` most-rated books, highest count first. Equal counts rank
/// by ascending book id so the ordering is stable between calls.
pub fn popular_books(conn: &mut DbConn, limit: usize) -> CoreResult<Vec<BookWithStats>> {
    Ok(database::books::list_most_rated(conn, limit)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testsupport::*;

    #[test]
    fn unrated_book_reports_zero_average_and_count() {
        let (_pool, mut conn) = test_store();
        let book = add_book(&mut conn, "Hobbit", "J.R.R. Tolkien", 310);

        assert_eq!(average_rating(&mut conn, book).unwrap(), 0.0);
        assert_eq!(rating_count(&mut conn, book).unwrap(), 0);
    }

    #[test]
    fn average_is_arithmetic_mean_of_rates() {
        let (_pool, mut conn) = test_store();
        let book = add_book(&mut conn, "Dune", "Frank Herbert", 412);
        for (i, r) in [2, 4, 5].into_iter().enumerate() {
            let user = add_user(&mut conn, &format!("u{i}"));
            rate(&mut conn, user, book, r);
        }

        let avg = average_rating(&mut conn, book).unwrap();
        assert!((avg - 11.0 / 3.0).abs() < 1e-9);
        assert_eq!(rating_count(&mut conn, book).unwrap(), 3);
    }

    #[test]
    fn already_rated_tracks_the_user_book_pair() {
        let (_pool, mut conn) = test_store();
        let book = add_book(&mut conn, "Emma", "Jane Austen", 474);
        let other = add_book(&mut conn, "Persuasion", "Jane Austen", 249);
        let user = add_user(&mut conn, "alice");
        rate(&mut conn, user, book, 5);

        assert!(already_rated(&mut conn, user, book).unwrap());
        assert!(!already_rated(&mut conn, user, other).unwrap());
    }

    #[test]
    fn popularity_ranks_by_count_then_ascending_id() {
        let (_pool, mut conn) = test_store();
        let a = add_book(&mut conn, "A", "x", 100);
        let b = add_book(&mut conn, "B", "y", 100);
        let c = add_book(&mut conn, "C", "z", 100);
        rate_n_times(&mut conn, a, 5);
        rate_n_times(&mut conn, b, 5);
        rate_n_times(&mut conn, c, 3);

        let top = popular_books(&mut conn, 2).unwrap();
        let ids: Vec<i64> = top.iter().map(|e| e.book.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(top[0].rating_count, 5);
    }

    #[test]
    fn popularity_carries_the_average_alongside_the_count() {
        let (_pool, mut conn) = test_store();
        let book = add_book(&mut conn, "Solo", "x", 90);
        let user = add_user(&mut conn, "bob");
        rate(&mut conn, user, book, 3);

        let top = popular_books(&mut conn, 1).unwrap();
        assert_eq!(top[0].book.id, book);
        assert_eq!(top[0].average_rating, 3.0);
    }
}
