//! Restaurant tables.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// Opaque identifier of a stored table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(i64);

impl TableId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TableId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| ValidationError {
                field: "table_id".into(),
                message: format!("'{s}' is not a table id"),
            })
    }
}

/// A table as stored in the registry.
///
/// Tables are never deleted; `is_active = false` takes a table out of
/// availability and booking while keeping its history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Identifier.
    pub id: TableId,
    /// Number shown to guests and staff; unique across all tables.
    pub table_number: u32,
    /// Seats at the table.
    pub capacity: u32,
    /// Whether the table can be booked.
    pub is_active: bool,
    /// When the table was registered.
    pub created_at: DateTime<Utc>,
    /// When the table was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Table {
    /// Whether a party of `party_size` fits at this table.
    #[must_use]
    pub const fn seats(&self, party_size: u32) -> bool {
        self.capacity >= party_size
    }

    /// The compact form joined onto reservations.
    #[must_use]
    pub const fn summary(&self) -> TableSummary {
        TableSummary {
            table_number: self.table_number,
            capacity: self.capacity,
        }
    }
}

/// Table details attached to a reservation read model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    /// Table number.
    pub table_number: u32,
    /// Seats at the table.
    pub capacity: u32,
}

/// A table about to be registered.
///
/// # Examples
///
/// ```
/// use tablebook::NewTable;
///
/// assert!(NewTable::new(4, 6).is_ok());
/// assert!(NewTable::new(4, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTable {
    /// Table number.
    pub table_number: u32,
    /// Seats at the table.
    pub capacity: u32,
}

impl NewTable {
    /// Validates and creates a new table description.
    ///
    /// # Errors
    ///
    /// Returns an error if the number or the capacity is zero.
    pub fn new(table_number: u32, capacity: u32) -> Result<Self, ValidationError> {
        validate_positive("table_number", table_number)?;
        validate_positive("capacity", capacity)?;
        Ok(Self {
            table_number,
            capacity,
        })
    }
}

/// A partial change to a table. Fields left as `None` are untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableUpdate {
    /// New capacity.
    pub capacity: Option<u32>,
    /// New active flag.
    pub is_active: Option<bool>,
}

impl TableUpdate {
    /// Sets the capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// True when nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.capacity.is_none() && self.is_active.is_none()
    }

    /// Checks the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns an error if a supplied capacity is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(capacity) = self.capacity {
            validate_positive("capacity", capacity)?;
        }
        Ok(())
    }

    /// Applies the update to a copy of `table`.
    #[must_use]
    pub fn apply(&self, table: &Table) -> Table {
        let mut updated = table.clone();
        if let Some(capacity) = self.capacity {
            updated.capacity = capacity;
        }
        if let Some(is_active) = self.is_active {
            updated.is_active = is_active;
        }
        updated
    }
}

fn validate_positive(field: &str, value: u32) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError {
            field: field.into(),
            message: "must be a positive integer".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table(capacity: u32, is_active: bool) -> Table {
        let now = Utc::now();
        Table {
            id: TableId::new(1),
            table_number: 1,
            capacity,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_table_rejects_zero() {
        assert_eq!(NewTable::new(0, 4).unwrap_err().field, "table_number");
        assert_eq!(NewTable::new(1, 0).unwrap_err().field, "capacity");
    }

    #[test]
    fn test_seats_is_at_least() {
        let table = sample_table(4, true);
        assert!(table.seats(1));
        assert!(table.seats(4));
        assert!(!table.seats(5));
    }

    #[test]
    fn test_update_is_partial() {
        let table = sample_table(4, true);
        let update = TableUpdate::default().with_active(false);
        let updated = update.apply(&table);
        assert_eq!(updated.capacity, 4);
        assert!(!updated.is_active);
        assert!(TableUpdate::default().is_empty());
    }

    #[test]
    fn test_update_validates_capacity() {
        assert!(TableUpdate::default().with_capacity(0).validate().is_err());
        assert!(TableUpdate::default().with_capacity(2).validate().is_ok());
        assert!(TableUpdate::default().validate().is_ok());
    }

    #[test]
    fn test_table_id_parse() {
        assert_eq!("7".parse::<TableId>().unwrap(), TableId::new(7));
        assert!("0".parse::<TableId>().is_err());
        assert!("abc".parse::<TableId>().is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample_table(2, true)).unwrap();
        assert_eq!(json["tableNumber"], 1);
        assert_eq!(json["isActive"], true);
    }
}
