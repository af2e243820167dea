use mongodb::{
    bson::{doc, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions, ReturnDocument, ServerApi, ServerApiVersion},
    Client, Collection, IndexModel,
};
use secrecy::ExposeSecret;
use std::time::Duration;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const COUNTERS_COLLECTION: &str = "counters";
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut client_options =
            ClientOptions::parse(config.mongo_conn_string.expose_secret()).await?;

        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        client_options.server_api = Some(server_api);
        client_options.max_pool_size = Some(10);
        client_options.min_pool_size = Some(2);
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        log::info!("Connected to MongoDB database '{}'", config.mongo_db_name);

        Ok(Self {
            client,
            db_name: config.mongo_db_name.clone(),
        })
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client
            .database(&self.db_name)
            .collection(collection_name)
    }

    /// Allocates the next numeric id for `sequence`. Sequences start at 1.
    pub async fn next_id(&self, sequence: &str) -> AppResult<i64> {
        let counters: Collection<Document> = self.get_collection(COUNTERS_COLLECTION);

        let counter = counters
            .find_one_and_update(doc! { "_id": sequence }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        counter
            .and_then(|d| d.get_i64("seq").ok())
            .ok_or_else(|| {
                AppError::DatabaseError(format!("Counter '{}' could not be incremented", sequence))
            })
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

/// Unique index on the numeric `id` field every entity carries.
pub async fn ensure_id_index<T>(collection: &Collection<T>) -> AppResult<()>
where
    T: Send + Sync,
{
    let index = IndexModel::builder()
        .keys(doc! { "id": 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .name("id_unique".to_string())
                .build(),
        )
        .build();

    collection.create_index(index).await?;
    log::info!("Ensured unique id index on '{}'", collection.name());
    Ok(())
}

/// Turns a unique-index violation into `AlreadyExists`; any other driver
/// error stays a database error.
pub fn map_write_error(err: MongoError, conflict: impl FnOnce() -> String) -> AppError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE => {
            AppError::AlreadyExists(conflict())
        }
        _ => err.into(),
    }
}
