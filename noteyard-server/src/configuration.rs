use noteyard::notestore::BoxedNoteStore;
use noteyard::{InMemoryStore, PostgreSQLStoreBuilder};
use sqlx::postgres::PgConnectOptions;

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    /// PostgreSQL connection string. When absent, notes live in memory.
    pub databaseurl: Option<String>,
}

impl Settings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the storage backend this process runs on.
    ///
    /// The presence of `databaseurl` selects PostgreSQL, its absence the
    /// in-memory store. The choice is made once, here; the rest of the
    /// process only ever sees the boxed capability set.
    pub async fn get_note_store(&self) -> BoxedNoteStore {
        match self.databaseurl {
            Some(ref url) => {
                let db_options: PgConnectOptions = url
                    .parse()
                    .expect("Failed to parse databaseurl as a PostgreSQL connection string");
                Box::new(PostgreSQLStoreBuilder::new(db_options).build().await)
            }
            None => Box::new(InMemoryStore::new()),
        }
    }
}

/// Read the settings from `configuration.yml` and the environment.
///
/// Environment variables are prefixed with `NOTEYARD`, e.g. `NOTEYARD_PORT`
/// or `NOTEYARD_DATABASEURL`, and take precedence over the file.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let config = config::Config::builder()
        .set_default("debug", false)?
        .set_default("host", "localhost")?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::default()
                .prefix("noteyard")
                .separator("_"),
        )
        .build()?;
    config.try_deserialize()
}
