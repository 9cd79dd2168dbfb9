use std::convert::Infallible;

use warp::{http::StatusCode, Rejection, Reply};

use sendgrid_dev::api::{ErrorDetail, ErrorResponse};

/// Maps router rejections to the API's error envelope.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let status_code;
    let message;

    if err.is_not_found() {
        status_code = StatusCode::NOT_FOUND;
        message = "resource not found";
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        status_code = StatusCode::METHOD_NOT_ALLOWED;
        message = "method not allowed";
    } else {
        log::error!("Unhandled rejection: {:?}", err);
        status_code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "internal server error";
    }

    let resp = ErrorResponse::single(ErrorDetail::message(message));

    Ok(warp::reply::with_status(
        warp::reply::json(&resp),
        status_code,
    ))
}
