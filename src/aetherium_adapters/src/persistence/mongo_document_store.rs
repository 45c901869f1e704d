use aetherium_core::{DatastoreError, DatastoreProbe};
use mongodb::{Client, bson::doc};
use secrecy::{ExposeSecret, Secret};

/// Handle on the document database. Only its liveness is observed here.
#[derive(Clone)]
pub struct MongoDocumentStore {
    client: Client,
    database: String,
}

impl MongoDocumentStore {
    #[tracing::instrument(name = "Connecting to MongoDB", skip(uri))]
    pub async fn connect(uri: &Secret<String>, database: &str) -> Result<Self, DatastoreError> {
        let client = Client::with_uri_str(uri.expose_secret())
            .await
            .map_err(|e| DatastoreError(e.to_string()))?;

        Ok(Self {
            client,
            database: database.to_owned(),
        })
    }
}

#[async_trait::async_trait]
impl DatastoreProbe for MongoDocumentStore {
    #[tracing::instrument(name = "Pinging MongoDB", skip_all)]
    async fn ping(&self) -> Result<(), DatastoreError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| DatastoreError(e.to_string()))
    }
}
