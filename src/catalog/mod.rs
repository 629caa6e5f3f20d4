pub mod aggregate;
pub mod filter;
pub mod profile;
pub mod review;

#[cfg(test)]
pub(crate) mod testsupport {
    use crate::database::{self, DbConn, DbPool};

    /// Fresh in-memory store. The pool is returned so it outlives the
    /// connection; it only ever holds this one connection.
    pub fn test_store() -> (DbPool, DbConn) {
        let pool = database::create_memory_pool().unwrap();
        let mut conn = pool.get().unwrap();
        database::setup::reset_database(&mut conn).unwrap();
        (pool, conn)
    }

    pub fn add_book(conn: &mut DbConn, name: &str, author: &str, total_pages: i64) -> i64 {
        database::books::insert_book(conn, name, author, None, total_pages, "")
            .unwrap()
            .id
    }

    pub fn add_user(conn: &mut DbConn, name: &str) -> i64 {
        database::users::insert_user(conn, name, None).unwrap().id
    }

    pub fn add_category(conn: &mut DbConn, name: &str) -> i64 {
        database::categories::upsert_category(conn, name).unwrap().id
    }

    pub fn categorize(conn: &mut DbConn, book_id: i64, category_id: i64) {
        database::categories::assign_to_book(conn, book_id, category_id).unwrap();
    }

    pub fn rate(conn: &mut DbConn, user_id: i64, book_id: i64, rate: i32) {
        database::ratings::insert_if_absent(conn, book_id, user_id, rate, "fine read")
            .unwrap()
            .expect("fixture rating collided with an existing one");
    }

    /// N anonymous users each rating the book once, to drive its count up.
    pub fn rate_n_times(conn: &mut DbConn, book_id: i64, n: usize) {
        for i in 0..n {
            let user_id = add_user(conn, &format!("reader-{book_id}-{i}"));
            rate(conn, user_id, book_id, 4);
        }
    }

    pub fn rating_rows(conn: &mut DbConn) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM ratings", [], |row| row.get(0))
            .unwrap()
    }
}
