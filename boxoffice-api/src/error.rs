use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use boxoffice_core::{ConfirmError, LockError};
use serde_json::json;

pub const MISSING_FIELDS_MESSAGE: &str = "seatId and userId are required";
pub const SEAT_NOT_FOUND_MESSAGE: &str = "Seat not found";
pub const ALREADY_BOOKED_MESSAGE: &str = "Seat is already booked";
pub const LOCKED_BY_OTHER_MESSAGE: &str = "Seat is already locked by another user";
pub const NOT_LOCKED_BY_CALLER_MESSAGE: &str = "Seat is not locked by you. Please lock the seat first.";

#[derive(Debug)]
pub enum AppError {
    MissingFields,
    InvalidBody(String),
    NotFoundError(String),
    ValidationError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MissingFields => (StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE.to_string()),
            AppError::InvalidBody(msg) => {
                tracing::debug!("Rejected request body: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            },
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<LockError> for AppError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::SeatNotFound(_) => AppError::NotFoundError(SEAT_NOT_FOUND_MESSAGE.to_string()),
            LockError::AlreadyBooked(_) => AppError::ValidationError(ALREADY_BOOKED_MESSAGE.to_string()),
            LockError::LockedByOther(_) => AppError::ValidationError(LOCKED_BY_OTHER_MESSAGE.to_string()),
        }
    }
}

impl From<ConfirmError> for AppError {
    fn from(err: ConfirmError) -> Self {
        match err {
            ConfirmError::SeatNotFound(_) => AppError::NotFoundError(SEAT_NOT_FOUND_MESSAGE.to_string()),
            ConfirmError::NotLockedByCaller(_) => AppError::ValidationError(NOT_LOCKED_BY_CALLER_MESSAGE.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // A body that is not declared as JSON carries no fields at all
            JsonRejection::MissingJsonContentType(_) => AppError::MissingFields,
            other => AppError::InvalidBody(other.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::MissingFields, StatusCode::BAD_REQUEST),
            (AppError::from(LockError::SeatNotFound("Z9".into())), StatusCode::NOT_FOUND),
            (AppError::from(LockError::AlreadyBooked("A1".into())), StatusCode::BAD_REQUEST),
            (AppError::from(LockError::LockedByOther("A1".into())), StatusCode::BAD_REQUEST),
            (AppError::from(ConfirmError::SeatNotFound("Z9".into())), StatusCode::NOT_FOUND),
            (AppError::from(ConfirmError::NotLockedByCaller("B1".into())), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_messages() {
        match AppError::from(ConfirmError::NotLockedByCaller("B1".into())) {
            AppError::ValidationError(msg) => assert_eq!(msg, NOT_LOCKED_BY_CALLER_MESSAGE),
            other => panic!("unexpected error: {:?}", other),
        }
        match AppError::from(LockError::LockedByOther("A1".into())) {
            AppError::ValidationError(msg) => assert_eq!(msg, LOCKED_BY_OTHER_MESSAGE),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
