// Rejection to response mapping

use std::convert::Infallible;

use tracing::{debug, error};
use warp::http::StatusCode;
use warp::Rejection;

use crate::models::ErrorResponse;

/// Something failed that the client cannot fix; details stay in the logs
#[derive(Debug)]
pub struct InternalError;

impl warp::reject::Reject for InternalError {}

/// Turn any rejection into a JSON error reply
pub async fn handle_rejection(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (code, detail) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found")
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        debug!(error = %e, "Rejected request body");
        (StatusCode::UNPROCESSABLE_ENTITY, "Invalid request body")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required")
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    } else if err.find::<InternalError>().is_some() {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    } else {
        error!(rejection = ?err, "Unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    };

    let body = ErrorResponse {
        detail: detail.to_string(),
    };
    Ok(warp::reply::with_status(warp::reply::json(&body), code))
}
