use std::env;
use std::sync::Arc;
use std::time::Duration;

use config::Config;
use dotenvy::dotenv;

use sisgop::models::config::ServerConfig;
use sisgop::repository::api_client::ApiClient;

fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    // The blocking client must be built and dropped outside the async runtime.
    let timeout = Duration::from_secs(server_config.request_timeout_secs);
    let client = match ApiClient::new(&server_config.api_url, timeout) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            log::error!("Error building the backend client: {err}");
            std::process::exit(1);
        }
    };

    let result =
        actix_web::rt::System::new().block_on(sisgop::run(server_config, Arc::clone(&client)));
    drop(client);
    result
}
