//! The JSON envelope every request answers with.

use serde::Serialize;

use crate::error::Error;

/// `{success, count?, message?, data?, status}` envelope.
///
/// # Examples
///
/// ```
/// use tablebook::response::Response;
///
/// let body = serde_json::to_value(Response::list(vec![1, 2, 3])).unwrap();
/// assert_eq!(body["success"], true);
/// assert_eq!(body["count"], 3);
/// assert_eq!(body["status"], 200);
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Response<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Number of items, for list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Human-readable outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// HTTP-style status code.
    pub status: u16,
}

impl<T> Response<T> {
    /// A 200 response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            count: None,
            message: None,
            data: Some(data),
            status: 200,
        }
    }

    /// A 201 response for a newly created record.
    pub fn created(data: T) -> Self {
        Self {
            success: true,
            count: None,
            message: None,
            data: Some(data),
            status: 201,
        }
    }

    /// Adds a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// A failure response built from a library error.
    pub fn failure(err: &Error) -> Self {
        Self {
            success: false,
            count: None,
            message: Some(err.to_string()),
            data: None,
            status: err.status().code(),
        }
    }
}

impl<T> Response<Vec<T>> {
    /// A 200 response for a list, with its count.
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            message: None,
            data: Some(items),
            status: 200,
        }
    }
}
