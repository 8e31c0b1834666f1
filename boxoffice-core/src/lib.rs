pub mod models;
pub mod registry;
pub mod repository;
pub mod clock;

pub use models::{Seat, SeatStatus, LockInfo, BookingInfo};
pub use registry::{
    SeatRegistry, LockError, ConfirmError, InventoryError,
    DEFAULT_SEAT_IDS, DEFAULT_LOCK_TIMEOUT, DEFAULT_SWEEP_INTERVAL,
};
pub use repository::SeatRepository;
pub use clock::{Clock, SystemClock, ManualClock};
