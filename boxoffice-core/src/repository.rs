use async_trait::async_trait;
use crate::models::{BookingInfo, LockInfo, Seat};
use crate::registry::{ConfirmError, LockError};

/// Storage seam for seat reservations.
///
/// Implementations must make all four operations mutually exclusive over
/// the shared inventory; a lock followed by a confirm is a read-modify-write.
#[async_trait]
pub trait SeatRepository: Send + Sync {
    async fn list_seats(&self) -> Vec<Seat>;

    async fn lock_seat(&self, seat_id: &str, user_id: &str) -> Result<LockInfo, LockError>;

    async fn confirm_booking(&self, seat_id: &str, user_id: &str) -> Result<BookingInfo, ConfirmError>;

    /// Reclaim stale locks, returning how many were released
    async fn release_expired_locks(&self) -> usize;
}
