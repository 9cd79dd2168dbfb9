use async_trait::async_trait;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::Config;
use crate::Error;

/// Hands a finished message to a mail sink.
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(&self, message: Message) -> Result<(), Error>;
}

/// Plain SMTP relay to the configured local sink.
///
/// The connection is never encrypted. When a username is configured the
/// session authenticates with PLAIN; otherwise it sends anonymously.
pub struct SmtpDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpDispatcher {
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.smtp_host())
                .port(config.smtp_port()?);

        if config.has_credentials() {
            builder = builder
                .credentials(Credentials::new(
                    config.smtp_username.clone(),
                    config.smtp_password.clone(),
                ))
                .authentication(vec![Mechanism::Plain]);
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Dispatch for SmtpDispatcher {
    async fn dispatch(&self, message: Message) -> Result<(), Error> {
        let response = self.transport.send(message).await?;
        log::debug!("SMTP server replied {}", response.code());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn message() -> Message {
        Message::builder()
            .from("f@example.com".parse().unwrap())
            .to("a@example.com".parse().unwrap())
            .subject("s")
            .body(String::from("x"))
            .unwrap()
    }

    #[test]
    fn bad_port_is_rejected_up_front() {
        let config = Config {
            smtp_server: "127.0.0.1:port".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            SmtpDispatcher::from_config(&config),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_smtp_error() {
        // Grab a free port and release it so nothing is listening there
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let config = Config {
            smtp_server: format!("127.0.0.1:{}", port),
            smtp_username: "user".to_string(),
            smtp_password: "pass".to_string(),
            ..Default::default()
        };

        let dispatcher = SmtpDispatcher::from_config(&config).unwrap();
        let result = dispatcher.dispatch(message()).await;

        assert!(matches!(result, Err(Error::Smtp(_))));
    }
}
