//! Admin edits of existing reservations.
//!
//! Edits are raw: they skip the past-date, capacity and availability
//! checks of a booking. The one rule they cannot skip is the store's
//! single-confirmed-booking-per-slot index, so a colliding edit is
//! refused as a conflict during planning. Cancelled reservations are
//! closed and cannot be edited; re-booking takes a new reservation.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::{Actor, ReservationId, ReservationStatus, ReservationUpdate};

use super::access::authenticate_admin;
use super::plan::{OperationPlan, PlanAction};

/// Options for an admin edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditReservationOptions {
    /// Who is editing; must be an admin.
    pub actor: Actor,
    /// Reservation to edit.
    pub reservation_id: ReservationId,
    /// Fields to change.
    pub update: ReservationUpdate,
}

impl EditReservationOptions {
    /// Creates edit options with no changes.
    #[must_use]
    pub fn new(actor: Actor, reservation_id: ReservationId) -> Self {
        Self {
            actor,
            reservation_id,
            update: ReservationUpdate::default(),
        }
    }

    /// Sets the fields to change.
    #[must_use]
    pub const fn with_update(mut self, update: ReservationUpdate) -> Self {
        self.update = update;
        self
    }
}

/// An admin edit plan generator.
pub struct EditReservationPlan {
    options: EditReservationOptions,
}

impl EditReservationPlan {
    /// Creates a new edit planner.
    #[must_use]
    pub const fn new(options: EditReservationOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this edit.
    ///
    /// An empty update yields an empty plan with a warning.
    ///
    /// # Errors
    ///
    /// - [`Error::Forbidden`] unless the caller is an admin
    /// - [`Error::InvalidInput`] for a zero party size
    /// - [`Error::NotFound`] if the reservation does not exist
    /// - [`Error::AlreadyCancelled`] if the reservation is cancelled
    /// - [`Error::Conflict`] if the result would double-book a slot
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let EditReservationOptions {
            actor,
            reservation_id,
            update,
        } = self.options;
        let mut plan = OperationPlan::new(format!("Edit reservation {reservation_id}"));

        authenticate_admin(conn, &actor, "edit reservations")?;
        update.validate()?;

        let current = Database::get_reservation(conn, reservation_id)?
            .ok_or_else(|| Error::not_found(format!("reservation {reservation_id}")))?;

        if current.status == ReservationStatus::Cancelled {
            return Err(Error::AlreadyCancelled { id: reservation_id });
        }

        if update.is_empty() {
            return Ok(plan.add_warning("No changes requested"));
        }

        let edited = update.apply(&current);

        if edited.status == ReservationStatus::Confirmed {
            let holder =
                Database::find_confirmed(conn, edited.table_id, edited.date, edited.time_slot)?;
            if holder.is_some_and(|id| id != reservation_id) {
                return Err(Error::Conflict {
                    details: format!(
                        "table {} is already reserved on {} at {}",
                        edited.table_id, edited.date, edited.time_slot
                    ),
                });
            }
        }

        if let Some(table) = Database::get_table(conn, edited.table_id)? {
            if !table.seats(edited.number_of_guests) {
                plan = plan.add_warning(format!(
                    "Party of {} exceeds the capacity of table {} ({})",
                    edited.number_of_guests, table.table_number, table.capacity
                ));
            }
        }

        Ok(plan.add_action(PlanAction::UpdateReservation(edited)))
    }
}
