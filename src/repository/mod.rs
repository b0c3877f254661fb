pub mod repository_error;
pub mod user_repo;
pub mod client_repo;
pub mod quotation_repo;
pub mod settings_repo;
pub mod counter_repo;

use mongodb::options::{ClientOptions, Credential, ResolverConfig};
use mongodb::{Client, Database};

use crate::config::MongoConfig;

/// Opens a database handle from the shared Mongo configuration. Every
/// repository constructor goes through here.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options =
        ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("QmsBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }

    let client = Client::with_options(client_options)?;
    Ok(client.database(&config.database))
}
