use std::sync::Arc;

use anyhow::Context;
use bson::doc;
use mongodb::{options::IndexOptions, Client, Database, IndexModel};
use tracing::info;

use crate::auth::repo_types::UserDoc;
use crate::config::AppConfig;

/// Shared per-process resources. The Mongo handle is created once at
/// startup and injected into every handler through axum state; nothing
/// else in the process is mutable across requests.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        // Short server-selection timeout so a dead Mongo fails startup
        // instead of hanging.
        let uri = if config.mongodb_uri.contains('?') {
            format!(
                "{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000",
                config.mongodb_uri
            )
        } else {
            format!(
                "{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000",
                config.mongodb_uri
            )
        };

        let client = Client::with_uri_str(&uri)
            .await
            .context("parse MongoDB connection string")?;
        let db = client.database(&config.db_name);

        db.run_command(doc! { "ping": 1 })
            .await
            .context("ping MongoDB")?;
        info!(db = %config.db_name, "connected to MongoDB");

        ensure_indexes(&db).await?;

        Ok(Self { db, config })
    }
}

async fn ensure_indexes(db: &Database) -> anyhow::Result<()> {
    let email_unique = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build(),
        )
        .build();
    db.collection::<UserDoc>(crate::auth::repo::USER_COLLECTION)
        .create_index(email_unique)
        .await
        .context("create unique index on users.email")?;
    Ok(())
}
