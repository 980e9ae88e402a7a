pub mod bids;
pub mod bookings;
pub mod categories;
pub mod customers;
pub mod jobs;
pub mod notifications;
pub mod reviews;
pub mod settings;
pub mod stats;
pub mod workers;

use crate::error::HttpError;

/// Store failures are logged in full; clients get a generic message.
pub(crate) fn internal_error(err: sqlx::Error) -> HttpError {
    tracing::error!("database error: {}", err);
    HttpError::server_error("Internal server error")
}

/// Registration collides on the unique email index.
pub(crate) fn registration_error(err: sqlx::Error) -> HttpError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some("users_email_key")
        {
            return HttpError::conflict("A user with this email already exists");
        }
    }
    internal_error(err)
}
