use crate::clock::{Clock, SystemClock};
use crate::models::{BookingInfo, LockInfo, Seat, SeatStatus};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Seats created when no inventory is configured
pub const DEFAULT_SEAT_IDS: [&str; 10] = ["A1", "A2", "A3", "A4", "A5", "B1", "B2", "B3", "B4", "B5"];

/// How long a lock is held before the sweep reclaims it
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Cadence of the background expiry sweep
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_millis(10_000);

/// Owns the seat inventory and drives every seat through
/// Available → Locked → Booked, reclaiming stale locks on the way.
///
/// Every public operation sweeps expired locks before doing anything else,
/// so callers never observe a lock that has already timed out.
pub struct SeatRegistry {
    seats: BTreeMap<String, Seat>,
    lock_timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl SeatRegistry {
    /// Build a registry over `seat_ids`, all seats available
    pub fn new<I, S>(seat_ids: I, lock_timeout: Duration, clock: Arc<dyn Clock>) -> Result<Self, InventoryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seats = BTreeMap::new();

        for id in seat_ids {
            let id = id.into();
            if id.is_empty() {
                return Err(InventoryError::EmptySeatId);
            }
            if seats.contains_key(&id) {
                return Err(InventoryError::DuplicateSeat(id));
            }
            seats.insert(id.clone(), Seat::new(id));
        }

        if seats.is_empty() {
            return Err(InventoryError::Empty);
        }

        Ok(Self {
            seats,
            lock_timeout,
            clock,
        })
    }

    pub fn lock_timeout(&self) -> Duration {
        self.lock_timeout
    }

    /// Snapshot of every seat, ordered by id
    pub fn list_seats(&mut self) -> Vec<Seat> {
        self.release_expired_locks();
        self.seats.values().cloned().collect()
    }

    /// Lock a seat for `user_id`, or renew the lock the user already holds
    pub fn lock_seat(&mut self, seat_id: &str, user_id: &str) -> Result<LockInfo, LockError> {
        self.release_expired_locks();
        let now = self.clock.now();

        let seat = self.seats.get_mut(seat_id)
            .ok_or_else(|| LockError::SeatNotFound(seat_id.to_string()))?;

        match seat.status {
            SeatStatus::Booked => return Err(LockError::AlreadyBooked(seat_id.to_string())),
            SeatStatus::Locked if !seat.is_locked_by(user_id) => {
                return Err(LockError::LockedByOther(seat_id.to_string()));
            }
            _ => {}
        }

        seat.lock(user_id, now);
        debug_assert!(seat.is_consistent(), "seat {} violates status invariant", seat.id);

        Ok(LockInfo {
            seat_id: seat.id.clone(),
            locked_by: user_id.to_string(),
            expires_in: self.lock_timeout,
        })
    }

    /// Turn the caller's live lock into a permanent booking
    pub fn confirm_booking(&mut self, seat_id: &str, user_id: &str) -> Result<BookingInfo, ConfirmError> {
        self.release_expired_locks();

        let seat = self.seats.get_mut(seat_id)
            .ok_or_else(|| ConfirmError::SeatNotFound(seat_id.to_string()))?;

        // Never locked, expired, or held by someone else all look the same
        if !seat.is_locked_by(user_id) {
            return Err(ConfirmError::NotLockedByCaller(seat_id.to_string()));
        }

        seat.book(user_id);
        debug_assert!(seat.is_consistent(), "seat {} violates status invariant", seat.id);

        Ok(BookingInfo {
            seat_id: seat.id.clone(),
            booked_by: user_id.to_string(),
        })
    }

    /// Return every lock older than the timeout to the pool.
    ///
    /// Idempotent; returns how many locks were released.
    pub fn release_expired_locks(&mut self) -> usize {
        let now = self.clock.now();
        let timeout = chrono::Duration::from_std(self.lock_timeout).unwrap_or(chrono::Duration::MAX);
        let mut released = 0;

        for seat in self.seats.values_mut() {
            if seat.lock_expired(now, timeout) {
                debug!("Lock on seat {} held by {:?} expired", seat.id, seat.locked_by);
                seat.release();
                released += 1;
            }
        }

        released
    }
}

impl Default for SeatRegistry {
    fn default() -> Self {
        Self {
            seats: DEFAULT_SEAT_IDS.iter()
                .map(|id| (id.to_string(), Seat::new(*id)))
                .collect(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            clock: Arc::new(SystemClock),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LockError {
    #[error("Seat not found: {0}")]
    SeatNotFound(String),

    #[error("Seat is already booked: {0}")]
    AlreadyBooked(String),

    #[error("Seat is already locked by another user: {0}")]
    LockedByOther(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfirmError {
    #[error("Seat not found: {0}")]
    SeatNotFound(String),

    #[error("Seat is not locked by caller: {0}")]
    NotLockedByCaller(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("Inventory must contain at least one seat")]
    Empty,

    #[error("Seat id must not be empty")]
    EmptySeatId,

    #[error("Duplicate seat id: {0}")]
    DuplicateSeat(String),
}
