//! In-memory database backend.
//!
//! Entries keep insertion order per database, so table scans return keys in
//! the order they were defined (fixture file order for mock tables). Writes
//! only touch memory.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;

use crate::db::{DbId, FieldValues, FieldValuesExt, SonicDb};
use crate::error::{DbError, DbResult};

/// Mock table file names, per database.
const MOCK_TABLE_FILES: [(DbId, &str); 3] = [
    (DbId::ApplDb, "appl_db.json"),
    (DbId::ConfigDb, "config_db.json"),
    (DbId::StateDb, "state_db.json"),
];

#[derive(Debug, Clone)]
struct Entry {
    table: String,
    key: String,
    fvs: FieldValues,
}

/// Ordered in-memory implementation of [`SonicDb`].
#[derive(Debug, Default)]
pub struct MemoryDb {
    data: RwLock<HashMap<DbId, Vec<Entry>>>,
}

impl MemoryDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads mock tables from `dir`.
    ///
    /// Each of `config_db.json`, `state_db.json` and `appl_db.json` is
    /// optional. A file holds one JSON object whose keys are full entry keys
    /// (`TABLE|key`) and whose values are flat field maps.
    pub fn from_mock_tables(dir: impl AsRef<Path>) -> DbResult<Self> {
        let dir = dir.as_ref();
        let mut db = Self::new();

        for (db_id, file_name) in MOCK_TABLE_FILES {
            let path = dir.join(file_name);
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("Mock table {} not present, leaving {} empty", path.display(), db_id.name());
                    continue;
                }
                Err(source) => return Err(DbError::FixtureIo { path, source }),
            };

            let table: Map<String, Value> = serde_json::from_str(&content)
                .map_err(|source| DbError::FixtureParse { path: path.clone(), source })?;
            db.load_table_map(db_id, table)?;
            debug!("Loaded mock table {} into {}", path.display(), db_id.name());
        }

        Ok(db)
    }

    /// Adds an entry, replacing fields of an existing one.
    pub fn with_entry<I, K, V>(mut self, db: DbId, table: &str, key: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fvs: FieldValues = fields
            .into_iter()
            .map(|(f, v)| (f.into(), v.into()))
            .collect();
        Self::upsert(self.data.get_mut(), db, table, key, fvs);
        self
    }

    fn load_table_map(&mut self, db: DbId, map: Map<String, Value>) -> DbResult<()> {
        let data = self.data.get_mut();

        for (full_key, value) in map {
            let (table, key) = db.split_key(&full_key).ok_or_else(|| {
                DbError::InvalidData(format!(
                    "{}: key '{}' has no '{}' separator",
                    db.name(),
                    full_key,
                    db.separator()
                ))
            })?;

            let Value::Object(fields) = value else {
                return Err(DbError::InvalidData(format!(
                    "{}: entry '{}' is not an object",
                    db.name(),
                    full_key
                )));
            };

            let fvs = fields
                .into_iter()
                .map(|(f, v)| match v {
                    Value::String(s) => (f, s),
                    other => (f, other.to_string()),
                })
                .collect();

            Self::upsert(data, db, table, key, fvs);
        }

        Ok(())
    }

    fn upsert(
        data: &mut HashMap<DbId, Vec<Entry>>,
        db: DbId,
        table: &str,
        key: &str,
        fvs: FieldValues,
    ) {
        let entries = data.entry(db).or_default();
        match entries.iter_mut().find(|e| e.table == table && e.key == key) {
            Some(entry) => {
                for (f, v) in &fvs {
                    entry.fvs.set_field(f, v);
                }
            }
            None => entries.push(Entry {
                table: table.to_string(),
                key: key.to_string(),
                fvs,
            }),
        }
    }
}

#[async_trait]
impl SonicDb for MemoryDb {
    async fn keys(&self, db: DbId, table: &str) -> DbResult<Vec<String>> {
        let data = self.data.read().await;
        Ok(data
            .get(&db)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.table == table)
                    .map(|e| e.key.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_all(&self, db: DbId, table: &str, key: &str) -> DbResult<FieldValues> {
        let data = self.data.read().await;
        Ok(data
            .get(&db)
            .and_then(|entries| entries.iter().find(|e| e.table == table && e.key == key))
            .map(|e| e.fvs.clone())
            .unwrap_or_default())
    }

    async fn set_field(
        &self,
        db: DbId,
        table: &str,
        key: &str,
        field: &str,
        value: &str,
    ) -> DbResult<()> {
        let mut data = self.data.write().await;
        Self::upsert(
            &mut data,
            db,
            table,
            key,
            vec![(field.to_string(), value.to_string())],
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_db() -> MemoryDb {
        MemoryDb::new()
            .with_entry(
                DbId::ConfigDb,
                "MUX_CABLE",
                "Ethernet32",
                [("state", "active"), ("server_ipv4", "10.1.1.1")],
            )
            .with_entry(DbId::ConfigDb, "MUX_CABLE", "Ethernet0", [("state", "auto")])
            .with_entry(DbId::ConfigDb, "PORT", "Ethernet0", [("mtu", "9100")])
    }

    #[tokio::test]
    async fn test_keys_keep_insertion_order() {
        let db = sample_db();
        let keys = db.keys(DbId::ConfigDb, "MUX_CABLE").await.unwrap();
        assert_eq!(keys, vec!["Ethernet32".to_string(), "Ethernet0".to_string()]);
    }

    #[tokio::test]
    async fn test_keys_are_scoped_by_db_and_table() {
        let db = sample_db();
        assert!(db.keys(DbId::StateDb, "MUX_CABLE").await.unwrap().is_empty());
        assert_eq!(db.keys(DbId::ConfigDb, "PORT").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_all_missing_is_empty() {
        let db = sample_db();
        let fvs = db.get_all(DbId::ConfigDb, "MUX_CABLE", "Ethernet4").await.unwrap();
        assert!(fvs.is_empty());
        assert!(!db.exists(DbId::ConfigDb, "MUX_CABLE", "Ethernet4").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_field_updates_only_that_field() {
        let db = sample_db();
        db.set_field(DbId::ConfigDb, "MUX_CABLE", "Ethernet32", "state", "auto")
            .await
            .unwrap();

        let fvs = db.get_all(DbId::ConfigDb, "MUX_CABLE", "Ethernet32").await.unwrap();
        assert_eq!(fvs.get_field("state"), Some("auto"));
        assert_eq!(fvs.get_field("server_ipv4"), Some("10.1.1.1"));
    }

    #[tokio::test]
    async fn test_set_field_creates_entry() {
        let db = MemoryDb::new();
        db.set_field(DbId::ConfigDb, "MUX_CABLE", "Ethernet8", "state", "active")
            .await
            .unwrap();
        assert_eq!(
            db.get_field(DbId::ConfigDb, "MUX_CABLE", "Ethernet8", "state")
                .await
                .unwrap(),
            Some("active".to_string())
        );
    }

    #[tokio::test]
    async fn test_from_mock_tables() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("state_db.json"),
            r#"{
                "MUX_CABLE_TABLE|Ethernet32": {"state": "active"},
                "MUX_CABLE_TABLE|Ethernet0": {"state": "standby"},
                "MUX_LINKMGR_TABLE|Ethernet32": {"state": "healthy", "retries": 3}
            }"#,
        )
        .unwrap();

        let db = MemoryDb::from_mock_tables(dir.path()).unwrap();
        assert_eq!(
            db.keys(DbId::StateDb, "MUX_CABLE_TABLE").await.unwrap(),
            vec!["Ethernet32".to_string(), "Ethernet0".to_string()]
        );
        assert_eq!(
            db.get_field(DbId::StateDb, "MUX_LINKMGR_TABLE", "Ethernet32", "retries")
                .await
                .unwrap(),
            Some("3".to_string())
        );
        // config_db.json was not provided
        assert!(db.keys(DbId::ConfigDb, "MUX_CABLE").await.unwrap().is_empty());
    }

    #[test]
    fn test_from_mock_tables_rejects_bad_key() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config_db.json"), r#"{"MUX_CABLE": {}}"#).unwrap();

        let err = MemoryDb::from_mock_tables(dir.path()).unwrap_err();
        assert!(matches!(err, DbError::InvalidData(_)));
    }

    #[test]
    fn test_from_mock_tables_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config_db.json"), "{ not json").unwrap();

        let err = MemoryDb::from_mock_tables(dir.path()).unwrap_err();
        assert!(matches!(err, DbError::FixtureParse { .. }));
    }
}
