pub mod database;
pub mod post;
mod snowflake;
pub mod user;

use database::Database;
pub use post::Post;
pub use snowflake::Snowflake;
pub use user::User;

use tokio::sync::Mutex;

use crate::{config::Config, error::ApiError, Snowcloud, EPOCH, PRIMARY_ID};

/// Everything a request handler needs, built once at startup and shared
/// behind an `Arc`.
pub struct AppState {
    pub config: Config,
    pub database: Mutex<Database>,
    snowcloud: Snowcloud,
}

impl AppState {
    pub fn new(config: Config) -> Result<AppState, ApiError> {
        let database = Database::build(&config.database_path)?;
        let snowcloud = Snowcloud::new(PRIMARY_ID, EPOCH)
            .map_err(|err| ApiError::Upstream(format!("failed to start id generator: {err}")))?;

        Ok(AppState {
            config,
            database: Mutex::new(database),
            snowcloud,
        })
    }

    pub fn next_snowflake(&self) -> Result<Snowflake, ApiError> {
        self.snowcloud
            .next_id()
            .map(Snowflake::from)
            .map_err(|err| match err {
                snowcloud::Error::SequenceMaxReached(_next_millisecond) => {
                    ApiError::Upstream("id sequence max reached".to_owned())
                }
                _ => ApiError::Upstream(format!("failed to generate snowflake: {err}")),
            })
    }
}
