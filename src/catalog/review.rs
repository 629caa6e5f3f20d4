//! Rating submission: field validation plus the one-rating-per-user-
//! per-book guard. The guard is the store's atomic conditional insert,
//! not a check-then-act pair, so concurrent duplicates cannot slip
//! through between a lookup and a write.

use crate::config::settings::ReviewSettings;
use crate::database::{self, DbConn, Rating};
use crate::errors::{CoreError, CoreResult};

pub fn submit(
    conn: &mut DbConn,
    settings: &ReviewSettings,
    user_id: i64,
    book_id: i64,
    rate: i32,
    description: &str,
) -> CoreResult<Rating> {
    validate_rate(settings, rate)?;
    validate_description(settings, description)?;

    database::users::find_by_id(conn, user_id)?
        .ok_or_else(|| CoreError::not_found("user"))?;
    database::books::find_by_id(conn, book_id)?
        .ok_or_else(|| CoreError::not_found("book"))?;

    database::ratings::insert_if_absent(conn, book_id, user_id, rate, description)?
        .ok_or(CoreError::AlreadyRated)
}

fn validate_rate(settings: &ReviewSettings, rate: i32) -> CoreResult<()> {
    if rate < settings.min_rate || rate > settings.max_rate {
        return Err(CoreError::invalid(
            "rate",
            format!(
                "must be between {} and {}",
                settings.min_rate, settings.max_rate
            ),
        ));
    }
    Ok(())
}

fn validate_description(settings: &ReviewSettings, description: &str) -> CoreResult<()> {
    if description.trim().is_empty() {
        return Err(CoreError::invalid("description", "must not be empty"));
    }
    // Counted in characters, not bytes, so multibyte reviews are not
    // penalized for their encoding.
    if description.chars().count() > settings.max_description_chars {
        return Err(CoreError::invalid(
            "description",
            format!("must be at most {} characters", settings.max_description_chars),
        ));
    }
    Ok(())
}
