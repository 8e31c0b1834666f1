use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use boxoffice_core::Seat;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use crate::{
    error::{AppError, SEAT_NOT_FOUND_MESSAGE},
    state::AppState,
};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of both seat actions.
///
/// Fields are kept as raw JSON so an absent, null, empty, `false` or `0` id
/// is reported as missing instead of as a parse failure.
#[derive(Debug, Default)]
pub struct SeatActionRequest {
    pub seat_id: Option<Value>,
    pub user_id: Option<Value>,
}

impl SeatActionRequest {
    /// Pull `seatId`/`userId` out of any JSON document; non-objects have neither
    pub fn from_body(mut body: Value) -> Self {
        Self {
            seat_id: body.get_mut("seatId").map(Value::take),
            user_id: body.get_mut("userId").map(Value::take),
        }
    }

    fn into_ids(self) -> Result<(String, String), AppError> {
        let seat_id = self.seat_id.filter(is_present);
        let user_id = self.user_id.filter(is_present);

        let (Some(seat_id), Some(user_id)) = (seat_id, user_id) else {
            return Err(AppError::MissingFields);
        };

        // Seat ids are strings, so any other value names no seat
        let seat_id = match seat_id {
            Value::String(s) => s,
            _ => return Err(AppError::NotFoundError(SEAT_NOT_FOUND_MESSAGE.to_string())),
        };
        let user_id = match user_id {
            Value::String(s) => s,
            other => other.to_string(),
        };

        Ok((seat_id, user_id))
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// "60 seconds", "1.5 seconds"
fn format_expires_in(expires_in: Duration) -> String {
    format!("{} seconds", expires_in.as_secs_f64())
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(message: &str, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.to_string(),
            data,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockSeatResponse {
    pub seat_id: String,
    pub locked_by: String,
    pub expires_in: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBookingResponse {
    pub seat_id: String,
    pub booked_by: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/seats", get(list_seats))
        .route("/lock-seat", post(lock_seat))
        .route("/confirm-booking", post(confirm_booking))
}

/// GET /
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Ticket Booking System API",
        "endpoints": [
            "GET /seats - View all available seats",
            "POST /lock-seat - Lock a seat for booking",
            "POST /confirm-booking - Confirm a locked seat",
        ],
    }))
}

/// GET /seats
async fn list_seats(State(state): State<AppState>) -> Json<ApiResponse<Vec<Seat>>> {
    let seats = state.seat_repo.list_seats().await;
    ApiResponse::ok("Seats retrieved successfully", seats)
}

/// POST /lock-seat
async fn lock_seat(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<LockSeatResponse>>, AppError> {
    let Json(body) = payload?;
    let (seat_id, user_id) = SeatActionRequest::from_body(body).into_ids()?;

    let lock = state.seat_repo.lock_seat(&seat_id, &user_id).await?;

    Ok(ApiResponse::ok("Seat locked successfully", LockSeatResponse {
        seat_id: lock.seat_id,
        locked_by: lock.locked_by,
        expires_in: format_expires_in(lock.expires_in),
    }))
}

/// POST /confirm-booking
async fn confirm_booking(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<ConfirmBookingResponse>>, AppError> {
    let Json(body) = payload?;
    let (seat_id, user_id) = SeatActionRequest::from_body(body).into_ids()?;

    let booking = state.seat_repo.confirm_booking(&seat_id, &user_id).await?;

    Ok(ApiResponse::ok("Booking confirmed successfully", ConfirmBookingResponse {
        seat_id: booking.seat_id,
        booked_by: booking.booked_by,
    }))
}
