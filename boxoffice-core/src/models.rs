use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Seat status in the reservation lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Locked,
    Booked,
}

/// A single seat in the inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: String,
    pub status: SeatStatus,
    pub locked_by: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub locked_at: Option<DateTime<Utc>>,
    pub booked_by: Option<String>,
}

impl Seat {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: SeatStatus::Available,
            locked_by: None,
            locked_at: None,
            booked_by: None,
        }
    }

    /// Take (or renew) the lock for `user_id`
    pub fn lock(&mut self, user_id: &str, now: DateTime<Utc>) {
        self.status = SeatStatus::Locked;
        self.locked_by = Some(user_id.to_string());
        self.locked_at = Some(now);
    }

    /// Convert the held lock into a booking (terminal)
    pub fn book(&mut self, user_id: &str) {
        self.status = SeatStatus::Booked;
        self.booked_by = Some(user_id.to_string());
        self.locked_by = None;
        self.locked_at = None;
    }

    /// Drop a lock and return the seat to the pool
    pub fn release(&mut self) {
        self.status = SeatStatus::Available;
        self.locked_by = None;
        self.locked_at = None;
    }

    pub fn is_locked_by(&self, user_id: &str) -> bool {
        self.status == SeatStatus::Locked && self.locked_by.as_deref() == Some(user_id)
    }

    /// True when the lock is older than `timeout` at `now`
    pub fn lock_expired(&self, now: DateTime<Utc>, timeout: chrono::Duration) -> bool {
        match (self.status, self.locked_at) {
            (SeatStatus::Locked, Some(locked_at)) => now - locked_at > timeout,
            _ => false,
        }
    }

    /// Auxiliary fields must agree with the status
    pub fn is_consistent(&self) -> bool {
        match self.status {
            SeatStatus::Available => {
                self.locked_by.is_none() && self.locked_at.is_none() && self.booked_by.is_none()
            }
            SeatStatus::Locked => {
                self.locked_by.is_some() && self.locked_at.is_some() && self.booked_by.is_none()
            }
            SeatStatus::Booked => {
                self.locked_by.is_none() && self.locked_at.is_none() && self.booked_by.is_some()
            }
        }
    }
}

/// Result of a successful lock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockInfo {
    pub seat_id: String,
    pub locked_by: String,
    pub expires_in: Duration,
}

/// Result of a successful confirmation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingInfo {
    pub seat_id: String,
    pub booked_by: String,
}
