//! Plan types for booking and administration operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use crate::{NewReservation, NewTable, NewUser, Reservation, ReservationId, Table};

/// A single action to be taken during plan execution.
///
/// Update actions carry the full record as it should look afterwards;
/// planners compute it from the stored record and a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Register a new table.
    CreateTable(NewTable),

    /// Write back a table's capacity and active flag.
    UpdateTable(Table),

    /// Add a user directory entry.
    CreateUser(NewUser),

    /// Persist a confirmed reservation.
    CreateReservation(NewReservation),

    /// Move a reservation to `cancelled`.
    CancelReservation(ReservationId),

    /// Write back an admin edit of a reservation.
    UpdateReservation(Reservation),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateTable(t) => {
                format!("Create table {} seating {}", t.table_number, t.capacity)
            }
            Self::UpdateTable(t) => format!(
                "Update table {}: capacity {}, {}",
                t.table_number,
                t.capacity,
                if t.is_active { "active" } else { "inactive" }
            ),
            Self::CreateUser(u) => format!("Add {} {} <{}>", u.role, u.name, u.email),
            Self::CreateReservation(r) => format!(
                "Reserve table {} on {} at {} for {} guests",
                r.table_id(),
                r.date(),
                r.time_slot(),
                r.number_of_guests()
            ),
            Self::CancelReservation(id) => format!("Cancel reservation {id}"),
            Self::UpdateReservation(r) => format!(
                "Update reservation {}: {} at {}, {} guests, {}",
                r.id, r.date, r.time_slot, r.number_of_guests, r.status
            ),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Cancel reservation 7");
    /// assert_eq!(plan.description, "Cancel reservation 7");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::operations::{OperationPlan, PlanAction};
    /// use tablebook::ReservationId;
    ///
    /// let plan = OperationPlan::new("Test")
    ///     .add_action(PlanAction::CancelReservation(ReservationId::new(7)));
    ///
    /// assert_eq!(plan.actions.len(), 1);
    /// ```
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
