use std::time::Duration;

use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use tokio::time::sleep;
use tracing::debug;

use super::error::{MongoDaoError, MongoResult};

/// Ping attempts before the connection is declared dead.
const MAX_PING_ATTEMPTS: u32 = 10;
const FIRST_RETRY_DELAY: Duration = Duration::from_millis(250);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Build a client and wait until the server answers a ping, backing off
/// between attempts. The driver connects lazily, so the ping is what
/// actually proves the deployment is reachable.
pub async fn establish_connection(
    options: &ClientOptions,
    database_name: &str,
) -> MongoResult<(Client, Database)> {
    let client = Client::with_options(options.clone())
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(database_name);

    let mut delay = FIRST_RETRY_DELAY;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => return Ok((client, database)),
            Err(err) if attempt >= MAX_PING_ATTEMPTS => {
                return Err(MongoDaoError::InitialPing {
                    attempts: attempt,
                    source: err,
                });
            }
            Err(err) => {
                debug!(attempt, error = %err, "MongoDB ping failed; backing off");
                sleep(delay).await;
                delay = (delay * 2).min(MAX_RETRY_DELAY);
            }
        }
    }
}
