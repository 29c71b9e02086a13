use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

/// Default database name when the URI and environment do not name one.
const DEFAULT_DATABASE_NAME: &str = "poker_room";

/// Connection settings for the MongoDB store.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub options: ClientOptions,
    pub database_name: String,
}

impl MongoConfig {
    /// Parse a connection URI, resolving the database name from the explicit
    /// override, then the URI default, then [`DEFAULT_DATABASE_NAME`].
    pub async fn from_uri(uri: &str, database_name: Option<&str>) -> MongoResult<Self> {
        let options = ClientOptions::parse(uri)
            .await
            .map_err(|source| MongoDaoError::UriParse { source })?;

        let database_name = database_name
            .map(str::to_owned)
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_owned());

        Ok(Self {
            options,
            database_name,
        })
    }
}
