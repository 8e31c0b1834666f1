use std::sync::Arc;
use boxoffice_core::SeatRepository;

#[derive(Clone)]
pub struct AppState {
    pub seat_repo: Arc<dyn SeatRepository>,
}

impl AppState {
    pub fn new(seat_repo: Arc<dyn SeatRepository>) -> Self {
        Self { seat_repo }
    }
}
