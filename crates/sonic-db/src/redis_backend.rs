//! Redis database backend.
//!
//! One connection manager is opened per SONiC database number. Table scans
//! use `KEYS <TABLE>|*`, so key order is whatever Redis returns.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info, instrument};

use crate::db::{DbId, FieldValues, SonicDb};
use crate::error::{DbError, DbResult};

/// Configuration for the Redis connections.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis server hostname or IP
    pub host: String,
    /// Redis server port
    pub port: u16,
    /// Database number for CONFIG_DB
    pub config_db_number: u32,
    /// Database number for STATE_DB
    pub state_db_number: u32,
    /// Database number for APPL_DB
    pub appl_db_number: u32,
    /// Timeout for establishing each connection
    pub connection_timeout: Duration,
}

impl RedisConfig {
    /// Creates a configuration with the standard SONiC database numbers.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            config_db_number: DbId::ConfigDb.id(),
            state_db_number: DbId::StateDb.id(),
            appl_db_number: DbId::ApplDb.id(),
            connection_timeout: Duration::from_secs(5),
        }
    }

    /// Sets the connection timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Returns the database number configured for `db`.
    pub fn db_number(&self, db: DbId) -> u32 {
        match db {
            DbId::ApplDb => self.appl_db_number,
            DbId::ConfigDb => self.config_db_number,
            DbId::StateDb => self.state_db_number,
        }
    }

    /// Returns the Redis connection URI for `db`.
    fn uri(&self, db: DbId) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db_number(db))
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 6379)
    }
}

/// Redis-backed implementation of [`SonicDb`].
pub struct RedisDb {
    connections: HashMap<DbId, ConnectionManager>,
}

impl std::fmt::Debug for RedisDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisDb")
            .field("databases", &self.connections.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RedisDb {
    /// Connects to CONFIG_DB and STATE_DB.
    pub async fn connect(config: &RedisConfig) -> DbResult<Self> {
        Self::connect_to(config, &[DbId::ConfigDb, DbId::StateDb]).await
    }

    /// Connects to the given databases.
    pub async fn connect_to(config: &RedisConfig, dbs: &[DbId]) -> DbResult<Self> {
        let mut connections = HashMap::new();

        for &db in dbs {
            let uri = config.uri(db);
            let client = redis::Client::open(uri.as_str())
                .map_err(|e| DbError::Connection(format!("{}: {}", uri, e)))?;

            let connection =
                tokio::time::timeout(config.connection_timeout, client.get_connection_manager())
                    .await
                    .map_err(|_| {
                        DbError::Connection(format!(
                            "{}: timed out after {:?}",
                            uri, config.connection_timeout
                        ))
                    })?
                    .map_err(|e| DbError::Connection(format!("{}: {}", uri, e)))?;

            info!(
                "Connected to {} at {}:{} (db={})",
                db.name(),
                config.host,
                config.port,
                config.db_number(db)
            );
            connections.insert(db, connection);
        }

        Ok(Self { connections })
    }

    fn connection(&self, db: DbId) -> DbResult<ConnectionManager> {
        self.connections
            .get(&db)
            .cloned()
            .ok_or_else(|| DbError::Connection(format!("Not connected to {}", db.name())))
    }
}

#[async_trait]
impl SonicDb for RedisDb {
    #[instrument(skip(self))]
    async fn keys(&self, db: DbId, table: &str) -> DbResult<Vec<String>> {
        let mut conn = self.connection(db)?;
        let pattern = db.entry_key(table, "*");

        let full_keys: Vec<String> = conn
            .keys(&pattern)
            .await
            .map_err(|e| DbError::command("KEYS", e))?;

        let keys: Vec<String> = full_keys
            .iter()
            .filter_map(|k| db.split_key(k))
            .map(|(_, key)| key.to_string())
            .collect();

        debug!("Found {} keys in {}", keys.len(), table);
        Ok(keys)
    }

    #[instrument(skip(self))]
    async fn get_all(&self, db: DbId, table: &str, key: &str) -> DbResult<FieldValues> {
        let mut conn = self.connection(db)?;

        let fvs: HashMap<String, String> = conn
            .hgetall(db.entry_key(table, key))
            .await
            .map_err(|e| DbError::command("HGETALL", e))?;

        Ok(fvs.into_iter().collect())
    }

    #[instrument(skip(self))]
    async fn set_field(
        &self,
        db: DbId,
        table: &str,
        key: &str,
        field: &str,
        value: &str,
    ) -> DbResult<()> {
        let mut conn = self.connection(db)?;

        let _: () = conn
            .hset(db.entry_key(table, key), field, value)
            .await
            .map_err(|e| DbError::command("HSET", e))?;

        Ok(())
    }

    async fn exists(&self, db: DbId, table: &str, key: &str) -> DbResult<bool> {
        let mut conn = self.connection(db)?;

        conn.exists(db.entry_key(table, key))
            .await
            .map_err(|e| DbError::command("EXISTS", e))
    }
}
