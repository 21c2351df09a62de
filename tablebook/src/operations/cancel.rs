//! Cancellation planning.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::{Actor, ReservationId, ReservationStatus};

use super::access::authenticate;
use super::plan::{OperationPlan, PlanAction};

/// Options for a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelOptions {
    /// Who is cancelling.
    pub actor: Actor,
    /// Reservation to cancel.
    pub reservation_id: ReservationId,
}

impl CancelOptions {
    /// Creates cancellation options.
    #[must_use]
    pub const fn new(actor: Actor, reservation_id: ReservationId) -> Self {
        Self {
            actor,
            reservation_id,
        }
    }
}

/// A cancellation plan generator.
///
/// Owners may cancel their own reservations; admins may cancel any.
/// Cancelling is one-way: there is no path back to `confirmed` here.
pub struct CancelPlan {
    options: CancelOptions,
}

impl CancelPlan {
    /// Creates a new cancellation planner.
    #[must_use]
    pub const fn new(options: CancelOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this cancellation.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthenticated`] if the caller is not in the directory
    /// - [`Error::NotFound`] if the reservation does not exist
    /// - [`Error::Forbidden`] if a customer cancels someone else's booking
    /// - [`Error::AlreadyCancelled`] if it was cancelled before
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let CancelOptions {
            actor,
            reservation_id,
        } = self.options;
        let plan = OperationPlan::new(format!("Cancel reservation {reservation_id}"));

        authenticate(conn, &actor)?;

        let reservation = Database::get_reservation(conn, reservation_id)?
            .ok_or_else(|| Error::not_found(format!("reservation {reservation_id}")))?;

        if !actor.may_access(reservation.user_id) {
            return Err(Error::forbidden(format!(
                "reservation {reservation_id} belongs to another user"
            )));
        }

        if reservation.status == ReservationStatus::Cancelled {
            return Err(Error::AlreadyCancelled { id: reservation_id });
        }

        Ok(plan.add_action(PlanAction::CancelReservation(reservation_id)))
    }
}
