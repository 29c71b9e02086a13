use thiserror::Error;
use uuid::Uuid;

/// Result alias for MongoDB DAO operations.
pub type MongoResult<T> = Result<T, MongoDaoError>;

/// Failures talking to MongoDB, tagged with the operation that failed.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    #[error("invalid MongoDB connection URI")]
    UriParse { source: mongodb::error::Error },
    #[error("failed to construct MongoDB client")]
    ClientConstruction { source: mongodb::error::Error },
    #[error("MongoDB did not answer the initial ping after {attempts} attempts")]
    InitialPing {
        attempts: u32,
        source: mongodb::error::Error,
    },
    #[error("health ping failed")]
    HealthPing { source: mongodb::error::Error },
    #[error("failed to ensure index `{index}` on `{collection}`")]
    EnsureIndex {
        collection: &'static str,
        index: &'static str,
        source: mongodb::error::Error,
    },
    #[error("write to `{collection}` failed")]
    Write {
        collection: &'static str,
        source: mongodb::error::Error,
    },
    #[error("write to `{collection}` for `{id}` failed")]
    WriteById {
        collection: &'static str,
        id: Uuid,
        source: mongodb::error::Error,
    },
    #[error("query on `{collection}` failed")]
    Query {
        collection: &'static str,
        source: mongodb::error::Error,
    },
}

impl MongoDaoError {
    pub(super) fn write(collection: &'static str) -> impl FnOnce(mongodb::error::Error) -> Self {
        move |source| MongoDaoError::Write { collection, source }
    }

    pub(super) fn write_by_id(
        collection: &'static str,
        id: Uuid,
    ) -> impl FnOnce(mongodb::error::Error) -> Self {
        move |source| MongoDaoError::WriteById {
            collection,
            id,
            source,
        }
    }

    pub(super) fn query(collection: &'static str) -> impl FnOnce(mongodb::error::Error) -> Self {
        move |source| MongoDaoError::Query { collection, source }
    }
}
