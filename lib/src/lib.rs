use std::sync::Arc;

use lettre::Message;
use uuid::Uuid;

pub mod api;
pub mod attachment;
pub mod builder;
pub mod config;
pub mod dispatch;
pub mod email;
pub mod error;
pub mod recipient;
pub mod sendgrid;
pub mod substitution;

pub use config::Config;
pub use dispatch::{Dispatch, SmtpDispatcher};
pub use error::Error;

/// Outcome of an accepted send
#[derive(Debug)]
pub struct Receipt {
    /// Returned to the caller as `X-Message-Id`
    pub message_id: String,

    /// Messages built, one per personalization
    pub built: usize,

    /// Messages the SMTP server accepted
    pub sent: usize,
}

/// Turns `/v3/mail/send` bodies into SMTP deliveries.
///
/// Every personalization is built before anything is dispatched, so a
/// request that fails on its last personalization sends nothing.
pub struct MailHandler {
    config: Arc<Config>,
    dispatcher: Arc<dyn Dispatch>,
}

impl MailHandler {
    pub fn new(config: Arc<Config>, dispatcher: Arc<dyn Dispatch>) -> Self {
        Self { config, dispatcher }
    }

    pub async fn handle(&self, body: &[u8]) -> Result<Receipt, Error> {
        let req = sendgrid::MailSendRequest::from_json(body)?;
        sendgrid::validate(&req)?;

        let message_id = Uuid::new_v4().simple().to_string();

        let messages = req
            .personalizations
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let email = builder::build(&req, i, p)?;

                // Nothing to put on the envelope; reported as a send failure
                if !email.has_recipients() {
                    return Ok(None);
                }

                email
                    .to_message(format!("<{}.{}@sendgrid-dev>", message_id, i))
                    .map(Some)
            })
            .collect::<Result<Vec<Option<Message>>, Error>>()?;

        let built = messages.len();

        log::info!("Built {} message(s) for {}", built, message_id);

        if self.config.dry_run {
            log::info!("Test mode, not sending {}", message_id);
            return Ok(Receipt {
                message_id,
                built,
                sent: 0,
            });
        }

        let mut sent = 0;

        for (i, message) in messages.into_iter().enumerate() {
            let message = match message {
                Some(message) => message,
                None => {
                    log::error!("Could not send message {}.{}: no recipients", message_id, i);
                    continue;
                }
            };

            // Delivery failures are logged, never reported to the caller
            match self.dispatcher.dispatch(message).await {
                Ok(()) => sent += 1,
                Err(e) => log::error!("Could not send message {}.{}: {}", message_id, i, e),
            }
        }

        Ok(Receipt {
            message_id,
            built,
            sent,
        })
    }
}
