use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use webstr::mailer::{MailTransport, SmtpMailer};
use webstr::routes::AppState;

/// webstr - contact relay and asset pipeline
#[derive(Parser)]
#[command(name = "webstr")]
#[command(about = "Contact relay service and image pipeline for the webstr site", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Resize source images into the site's responsive variants
    OptimizeImages {
        /// Directory of source images
        #[arg(long, default_value = "images")]
        input: PathBuf,

        /// Directory the resized variants are written to
        #[arg(long, default_value = "assets/images")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = webstr::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    webstr::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::OptimizeImages { input, output } => optimize_command(input, output),
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: webstr::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting webstr server...");

    let host = host_override.unwrap_or(config.server.host);
    let port = port_override.unwrap_or(config.server.port);

    let mailer = SmtpMailer::new(&config.smtp)?;

    // One-time best-effort probe; a failure here must not prevent serving,
    // requests will simply fail at send time.
    if mailer.verify() {
        tracing::info!("SMTP transport verified, ready to send emails");
    } else {
        tracing::warn!(
            smtp_host = %config.smtp.host,
            smtp_port = config.smtp.port,
            "SMTP transport verification failed, check SMTP settings"
        );
    }

    let state = AppState {
        mailer: Arc::new(mailer),
        target_email: config.contact.target_email,
    };

    let app = webstr::create_app(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Contact API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

fn optimize_command(input: PathBuf, output: PathBuf) -> Result<()> {
    let config = webstr::images::OptimizeConfig::new(input, output);
    webstr::images::optimize_directory(&config)?;
    Ok(())
}
