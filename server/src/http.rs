use std::sync::Arc;

use warp::Filter;

use sendgrid_dev::{Config, Error, MailHandler, SmtpDispatcher};

use super::routes;

pub async fn run(config: Config) -> Result<(), Error> {
    let addr = config.bind_addr()?;

    log_config(&config);

    let config = Arc::new(config);
    let dispatcher = Arc::new(SmtpDispatcher::from_config(&config)?);
    let handler = Arc::new(MailHandler::new(config.clone(), dispatcher));

    let router = routes::api(handler).with(warp::log::custom(access_log));

    let (addr, server) = warp::serve(router)
        .try_bind_with_graceful_shutdown(addr, shutdown_signal())
        .map_err(|e| Error::Config(format!("could not bind {}: {}", addr, e)))?;

    log::info!("Starting HTTP server at {}...", addr);

    server.await;

    log::info!("Server stopped");

    Ok(())
}

fn log_config(config: &Config) {
    let password = if config.smtp_password.is_empty() { "" } else { "********" };

    log::info!("SENDGRID_DEV_API_SERVER {}", config.api_server);
    log::info!("SENDGRID_DEV_API_KEY {}", config.api_key);
    log::info!("SENDGRID_DEV_SMTP_SERVER {}", config.smtp_server);
    log::info!("SENDGRID_DEV_SMTP_USERNAME {}", config.smtp_username);
    log::info!("SENDGRID_DEV_SMTP_PASSWORD {}", password);

    if config.dry_run {
        log::info!("SENDGRID_DEV_TEST set, messages will not be sent");
    }
}

/// One LTSV line per request, in the key layout alp understands
fn access_log(info: warp::log::Info<'_>) {
    let header = |name: &str| {
        info.request_headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string()
    };

    let remote = info
        .remote_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());
    let host = info.host().unwrap_or("-");
    let elapsed = info.elapsed();

    log::info!(
        target: "sendgrid_dev::access",
        "time:{}\thost:{}\tforwardedfor:{}\treq:-\tstatus:{}\tmethod:{}\turi:{}\tsize:-\treferer:{}\tua:{}\treqtime_ns:{}\tcache:-\truntime:-\tapptime:-\tvhost:{}\treqtime_human:{:?}\tx-request-id:{}",
        chrono::Local::now().to_rfc3339(),
        remote,
        header("x-forwarded-for"),
        info.status().as_u16(),
        info.method(),
        info.path(),
        info.referer().unwrap_or("-"),
        info.user_agent().unwrap_or("-"),
        elapsed.as_nanos(),
        host,
        elapsed,
        header("x-request-id"),
    );
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Could not install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }

    log::info!("Shutting down...");
}
