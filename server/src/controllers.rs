use std::convert::Infallible;
use std::sync::Arc;

use warp::http::StatusCode;
use warp::reply::{self, Reply, Response};

use sendgrid_dev::api::ErrorResponse;
use sendgrid_dev::MailHandler;

/// Handles a v3 mail send.
///
/// Never rejects: every outcome, good or bad, is a JSON error envelope with
/// the matching status.
pub async fn mail_send(body: bytes::Bytes, handler: Arc<MailHandler>) -> Result<Response, Infallible> {
    let resp = match handler.handle(&body).await {
        Ok(receipt) => {
            log::info!(
                "Accepted {}: {} message(s) built, {} sent",
                receipt.message_id,
                receipt.built,
                receipt.sent
            );

            let json = reply::json(&ErrorResponse::accepted());
            let json = reply::with_header(json, "X-Message-Id", receipt.message_id);

            reply::with_status(json, StatusCode::ACCEPTED).into_response()
        }
        Err(e) => {
            log::info!("Rejected mail send ({}): {}", e.status(), e);

            let status =
                StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            reply::with_status(reply::json(&e.to_response()), status).into_response()
        }
    };

    Ok(resp)
}
