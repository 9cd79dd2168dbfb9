use sendgrid_dev::Config;

/// Health endpoint of the server described by `config`, always via localhost
pub fn health_url(config: &Config) -> Result<String, sendgrid_dev::Error> {
    let port = config.bind_addr()?.port();
    Ok(format!("http://localhost:{}/health", port))
}

/// One-shot probe used by container health checks.
///
/// Fails on connection errors and on any status other than 200.
pub async fn check(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let url = health_url(config)?;

    let resp = reqwest::get(&url).await?;
    let status = resp.status();
    let body = resp.text().await?;

    if status != reqwest::StatusCode::OK {
        return Err(format!("status={}, body={}", status, body).into());
    }

    Ok(())
}
