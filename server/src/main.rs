use clap::{Parser, Subcommand};

mod controllers;
mod errors;
mod health;
mod http;
mod routes;

#[derive(Debug, Parser)]
#[command(
    name = "sendgrid-dev",
    about = "Local SendGrid v3 mail send API that relays to an SMTP sink."
)]
struct Opt {
    /// TOML settings file; SENDGRID_DEV_* variables take precedence
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Exit non-zero unless the local server answers /health with 200
    Health,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let opt = Opt::parse();

    let config = match sendgrid_dev::Config::load(opt.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    match opt.command {
        Some(Command::Health) => {
            if let Err(e) = health::check(&config).await {
                println!("{}", e);
                std::process::exit(1);
            }
        }
        None => {
            if let Err(e) = http::run(config).await {
                log::error!("{}", e);
                std::process::exit(1);
            }
        }
    }
}
