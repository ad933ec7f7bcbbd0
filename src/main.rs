use orbit_digest::startup;
use tracing::{error, info};

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting OrbitDigest");

    // Load configuration
    let config = startup::load_config()?;

    // Run one digest cycle
    let success = startup::run_digest(&config).await;

    if success {
        info!("OrbitDigest completed successfully");
        Ok(())
    } else {
        error!("OrbitDigest failed");
        std::process::exit(1);
    }
}
