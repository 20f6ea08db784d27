use std::path::PathBuf;

use saddle::BootOptions;
use utility::get_config_value::get_config_value;
use webserver::Webserver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load service-specific .env, then the workspace root one as fallback
    let cargo_manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dotenvy::from_path(cargo_manifest_dir.join(".env")).ok();
    dotenvy::dotenv().ok();

    let environment: String = get_config_value("ENVIRONMENT", None)?;
    let address: String = get_config_value("ADDRESS", Some(saddle::boot::DEFAULT_ADDRESS.into()))?;
    let config_dir: PathBuf = get_config_value("CONFIG_DIR", Some(PathBuf::from(".config")))?;

    let options = BootOptions::new(environment, saddle::build_info!())
        .with_address(address)
        .with_config_dir(config_dir);

    saddle::up(Webserver::new(), options).await;

    println!("👋 Shutting down gracefully...");

    Ok(())
}
