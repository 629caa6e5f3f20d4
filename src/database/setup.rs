use anyhow::{Context, Result};

use super::connection::DbConn;

/// Drops and recreates every table. Destructive; used by `seed --reset`
/// and the test fixtures.
pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    conn.execute_batch(schema_sql)
        .context("Failed to apply database schema")?;

    log::info!("Database schema reset");
    Ok(())
}
