use mongodb::bson::doc;
use mongodb::error::Error as MongoError;
use mongodb::options::{ClientOptions, Credential, IndexOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Database, IndexModel};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::repository::mongo::{COMMENTS, REPLIES, WISHLIST};

pub async fn init_db(config: &DatabaseConfig) -> Result<Database, MongoError> {
    let mut opt = ClientOptions::parse(&config.url).await?;

    if let Some(ref username) = config.username {
        opt.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(config.password.clone())
                .build(),
        );
    }
    opt.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );
    opt.app_name = Some(env!("CARGO_PKG_NAME").to_string());

    let client = Client::with_options(opt)?;
    let db = client.database(&config.name);
    db.run_command(doc! { "ping": 1 }).await?;
    info!(database = %config.name, "Connected to MongoDB");

    Ok(db)
}

/// Create lookup indexes and the wishlist uniqueness constraint.
///
/// Index creation failures are logged and skipped: existing duplicate
/// wishlist rows would otherwise keep the server from starting.
pub async fn ensure_indexes(db: &Database) {
    let indexes = [
        (
            COMMENTS,
            IndexModel::builder()
                .keys(doc! { "blog_id": 1, "commented_on": -1 })
                .build(),
        ),
        (
            REPLIES,
            IndexModel::builder()
                .keys(doc! { "comment_id": 1, "replied_on": -1 })
                .build(),
        ),
        (
            WISHLIST,
            IndexModel::builder()
                .keys(doc! { "user_email": 1, "blog_id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        ),
    ];

    for (collection, index) in indexes {
        match db
            .collection::<mongodb::bson::Document>(collection)
            .create_index(index)
            .await
        {
            Ok(result) => info!(collection, index = %result.index_name, "Index ready"),
            Err(e) => warn!(collection, error = %e, "Failed to create index"),
        }
    }
}
