use async_trait::async_trait;
use boxoffice_core::{
    BookingInfo, ConfirmError, LockError, LockInfo, Seat, SeatRegistry, SeatRepository,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Process-local seat store.
///
/// One mutex guards the whole registry so list, lock, confirm and the
/// periodic sweep never interleave.
pub struct InMemorySeatRepository {
    registry: Mutex<SeatRegistry>,
}

impl InMemorySeatRepository {
    pub fn new(registry: SeatRegistry) -> Self {
        Self {
            registry: Mutex::new(registry),
        }
    }
}

impl Default for InMemorySeatRepository {
    fn default() -> Self {
        Self::new(SeatRegistry::default())
    }
}

#[async_trait]
impl SeatRepository for InMemorySeatRepository {
    async fn list_seats(&self) -> Vec<Seat> {
        self.registry.lock().await.list_seats()
    }

    async fn lock_seat(&self, seat_id: &str, user_id: &str) -> Result<LockInfo, LockError> {
        let result = self.registry.lock().await.lock_seat(seat_id, user_id);
        match &result {
            Ok(lock) => info!("Seat {} locked by {} for {:?}", lock.seat_id, lock.locked_by, lock.expires_in),
            Err(e) => debug!("Lock on seat {} for {} rejected: {}", seat_id, user_id, e),
        }
        result
    }

    async fn confirm_booking(&self, seat_id: &str, user_id: &str) -> Result<BookingInfo, ConfirmError> {
        let result = self.registry.lock().await.confirm_booking(seat_id, user_id);
        match &result {
            Ok(booking) => info!("Seat {} booked by {}", booking.seat_id, booking.booked_by),
            Err(e) => debug!("Booking of seat {} for {} rejected: {}", seat_id, user_id, e),
        }
        result
    }

    async fn release_expired_locks(&self) -> usize {
        self.registry.lock().await.release_expired_locks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_core::{ManualClock, SeatStatus, DEFAULT_LOCK_TIMEOUT, DEFAULT_SEAT_IDS};
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn repo() -> (Arc<InMemorySeatRepository>, ManualClock) {
        let clock = ManualClock::new(Utc::now());
        let registry = SeatRegistry::new(DEFAULT_SEAT_IDS, DEFAULT_LOCK_TIMEOUT, Arc::new(clock.clone())).unwrap();
        (Arc::new(InMemorySeatRepository::new(registry)), clock)
    }

    #[tokio::test]
    async fn test_repository_lifecycle() {
        let (repo, clock) = repo();

        repo.lock_seat("A1", "user1").await.unwrap();
        assert_eq!(repo.lock_seat("A1", "user2").await, Err(LockError::LockedByOther("A1".to_string())));

        clock.advance(Duration::seconds(61));
        assert_eq!(repo.release_expired_locks().await, 1);

        repo.lock_seat("A1", "user2").await.unwrap();
        let booking = repo.confirm_booking("A1", "user2").await.unwrap();
        assert_eq!(booking.booked_by, "user2");

        let seats = repo.list_seats().await;
        assert_eq!(seats[0].status, SeatStatus::Booked);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_lock_has_single_winner() {
        let (repo, _clock) = repo();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.lock_seat("B2", &format!("user{}", i)).await })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(e) => assert_eq!(e, LockError::LockedByOther("B2".to_string())),
            }
        }
        assert_eq!(winners, 1);

        let seats = repo.list_seats().await;
        assert!(seats.iter().all(|s| s.is_consistent()));
    }

    #[tokio::test]
    async fn test_default_repository_uses_reference_inventory() {
        let repo = InMemorySeatRepository::default();
        let seats = repo.list_seats().await;
        assert_eq!(seats.len(), 10);
        assert!(seats.iter().all(|s| s.status == SeatStatus::Available));
    }
}
