pub mod hashmap_refresh_token_store;
pub mod hashmap_user_store;
pub mod mongo_document_store;
pub mod postgres_credential_store;

pub use hashmap_refresh_token_store::HashMapRefreshTokenStore;
pub use hashmap_user_store::HashMapUserStore;
pub use mongo_document_store::MongoDocumentStore;
pub use postgres_credential_store::PostgresCredentialStore;
