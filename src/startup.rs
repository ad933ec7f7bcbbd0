use crate::calendar::CalendarService;
use crate::config::Config;
use crate::digest::DigestFormatter;
use crate::email::EmailSender;
use crate::error::Error;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and validate the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Run one fetch-format-send digest cycle.
///
/// A calendar failure ends the run before the formatter or sender are
/// touched; otherwise the result is whatever the email transport reported.
pub async fn run_digest(config: &Config) -> bool {
    info!("Starting digest workflow");

    let mut calendar_service = CalendarService::new(config);
    let events = match calendar_service
        .get_today_events(Some(config.quiet_hours_start), Some(config.quiet_hours_end))
        .await
    {
        Ok(events) => events,
        Err(e) => {
            error!("Error in digest workflow: {}", e);
            return false;
        }
    };

    let formatter = DigestFormatter::new(config.timezone);
    let digest_content = formatter.format_digest(&events);

    let email_sender = EmailSender::new(config);
    let success = email_sender
        .send_digest(&config.email_recipient, &digest_content)
        .await;

    if success {
        info!("Digest sent successfully via email");
    } else {
        error!("Failed to send digest via email");
    }

    success
}
