//! Error types for the tablebook library.
//!
//! Every failure carries a [`StatusClass`] so callers at the request
//! boundary can map it onto an HTTP-style status without matching on
//! individual variants.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::date::CalendarDay;
use crate::reservation::ReservationId;

/// Result type alias for operations that may fail with a tablebook error.
///
/// # Examples
///
/// ```
/// use tablebook::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(4)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP-style classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// 400: the request was malformed or broke a business rule.
    BadRequest,
    /// 401: the caller is not a known user.
    Unauthorized,
    /// 403: the caller is known but not allowed to do this.
    Forbidden,
    /// 404: the referenced record does not exist.
    NotFound,
    /// 409: the request collides with existing state.
    Conflict,
    /// 500: unexpected store or infrastructure failure.
    Internal,
}

impl StatusClass {
    /// Returns the numeric HTTP status code.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::StatusClass;
    ///
    /// assert_eq!(StatusClass::Conflict.code(), 409);
    /// ```
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }

    /// Returns true for 4xx classes.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        !matches!(self, Self::Internal)
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The main error type for the tablebook library.
#[derive(Debug, Error)]
pub enum Error {
    /// A field was missing or malformed.
    #[error("invalid {field}: {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The requested day lies before today.
    #[error("cannot book for past date {date} (today is {today})")]
    PastDate {
        /// The requested day.
        date: CalendarDay,
        /// Today's day according to the injected clock.
        today: CalendarDay,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The table exists but has been deactivated.
    #[error("table {table_number} is not available for reservations")]
    TableInactive {
        /// Number of the inactive table.
        table_number: u32,
    },

    /// The party does not fit at the table.
    #[error(
        "This table can only accommodate {capacity} guests. Please select a larger table."
    )]
    CapacityExceeded {
        /// Number of the table.
        table_number: u32,
        /// Seats at the table.
        capacity: u32,
        /// Party size that was requested.
        requested: u32,
    },

    /// The table is already booked for that day and time slot.
    #[error("reservation conflict: {details}")]
    Conflict {
        /// Details about the conflict.
        details: String,
    },

    /// A table with the same number is already registered.
    #[error("table number {table_number} already exists")]
    DuplicateTable {
        /// The clashing table number.
        table_number: u32,
    },

    /// The caller may not perform the operation.
    #[error("forbidden: {details}")]
    Forbidden {
        /// Why the caller was refused.
        details: String,
    },

    /// The caller could not be identified.
    #[error("not authenticated: {details}")]
    Unauthenticated {
        /// Why the caller was refused.
        details: String,
    },

    /// The reservation was cancelled earlier.
    #[error("reservation {id} is already cancelled")]
    AlreadyCancelled {
        /// The reservation id.
        id: ReservationId,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A configuration file, environment variable or merged setting is invalid.
    #[error("invalid configuration in {location}: {message}")]
    InvalidConfig {
        /// File path, environment variable or field that is wrong.
        location: String,
        /// What is wrong with it.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::InvalidConfig`].
    pub fn config(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Shorthand for [`Error::Forbidden`].
    pub fn forbidden(details: impl Into<String>) -> Self {
        Self::Forbidden {
            details: details.into(),
        }
    }

    /// Returns the HTTP-style status class for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::{Error, StatusClass};
    ///
    /// let err = Error::not_found("reservation 7");
    /// assert_eq!(err.status(), StatusClass::NotFound);
    /// ```
    #[must_use]
    pub const fn status(&self) -> StatusClass {
        match self {
            Self::InvalidInput { .. }
            | Self::PastDate { .. }
            | Self::TableInactive { .. }
            | Self::CapacityExceeded { .. }
            | Self::AlreadyCancelled { .. } => StatusClass::BadRequest,
            Self::Unauthenticated { .. } => StatusClass::Unauthorized,
            Self::Forbidden { .. } => StatusClass::Forbidden,
            Self::NotFound { .. } => StatusClass::NotFound,
            Self::Conflict { .. } | Self::DuplicateTable { .. } => StatusClass::Conflict,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::InvalidConfig { .. }
            | Self::Io(_)
            | Self::LockTimeout { .. }
            | Self::DataDirectoryNotFound { .. }
            | Self::DatabaseCorruption { .. }
            | Self::UnsupportedSchemaVersion { .. } => StatusClass::Internal,
        }
    }

    /// Returns true when the request was refused by a booking rule
    /// rather than by bad input, missing data, or infrastructure.
    #[must_use]
    pub const fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::PastDate { .. }
                | Self::TableInactive { .. }
                | Self::CapacityExceeded { .. }
                | Self::Conflict { .. }
                | Self::DuplicateTable { .. }
                | Self::AlreadyCancelled { .. }
        )
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::InvalidInput {
            field: err.field,
            message: err.message,
        }
    }
}
