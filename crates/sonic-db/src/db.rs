//! Database selector, field-value helpers and the store interface.

use async_trait::async_trait;

use crate::error::DbResult;

/// SONiC database identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbId {
    /// Application database (APPL_DB).
    ApplDb,
    /// Configuration database (CONFIG_DB) - user intent.
    ConfigDb,
    /// State database (STATE_DB) - operational state.
    StateDb,
}

impl DbId {
    /// Returns the database name as used in SONiC.
    pub fn name(&self) -> &'static str {
        match self {
            DbId::ApplDb => "APPL_DB",
            DbId::ConfigDb => "CONFIG_DB",
            DbId::StateDb => "STATE_DB",
        }
    }

    /// Returns the default Redis database number.
    pub fn id(&self) -> u32 {
        match self {
            DbId::ApplDb => 0,
            DbId::ConfigDb => 4,
            DbId::StateDb => 6,
        }
    }

    /// Returns the separator between table name and key.
    pub fn separator(&self) -> char {
        match self {
            DbId::ApplDb => ':',
            DbId::ConfigDb | DbId::StateDb => '|',
        }
    }

    /// Builds the full Redis key for a table entry.
    pub fn entry_key(&self, table: &str, key: &str) -> String {
        format!("{}{}{}", table, self.separator(), key)
    }

    /// Splits a full Redis key into `(table, key)`.
    pub fn split_key<'a>(&self, full_key: &'a str) -> Option<(&'a str, &'a str)> {
        full_key.split_once(self.separator())
    }
}

/// Key-value tuple representing a field and its value.
pub type FieldValue = (String, String);

/// Collection of field-value pairs for a table entry.
pub type FieldValues = Vec<FieldValue>;

/// Helper trait for working with field-value collections.
pub trait FieldValuesExt {
    /// Gets the value for a field, if present.
    fn get_field(&self, field: &str) -> Option<&str>;

    /// Gets the value for a field, returning the default if not present.
    fn get_field_or<'a>(&'a self, field: &str, default: &'a str) -> &'a str;

    /// Inserts or replaces a field, keeping the position of an existing one.
    fn set_field(&mut self, field: &str, value: &str);
}

impl FieldValuesExt for FieldValues {
    fn get_field(&self, field: &str) -> Option<&str> {
        self.iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    fn get_field_or<'a>(&'a self, field: &str, default: &'a str) -> &'a str {
        self.get_field(field).unwrap_or(default)
    }

    fn set_field(&mut self, field: &str, value: &str) {
        match self.iter_mut().find(|(f, _)| f == field) {
            Some((_, v)) => *v = value.to_string(),
            None => self.push((field.to_string(), value.to_string())),
        }
    }
}

/// Store interface shared by the Redis and in-memory backends.
///
/// Keys are returned in the order the backend yields them; callers must not
/// assume sorting.
#[async_trait]
pub trait SonicDb: Send + Sync {
    /// Returns the keys (without table prefix) of every entry in `table`.
    async fn keys(&self, db: DbId, table: &str) -> DbResult<Vec<String>>;

    /// Returns all fields of `table|key`, or an empty collection if the
    /// entry does not exist.
    async fn get_all(&self, db: DbId, table: &str, key: &str) -> DbResult<FieldValues>;

    /// Sets a single field of `table|key`, creating the entry if needed.
    async fn set_field(
        &self,
        db: DbId,
        table: &str,
        key: &str,
        field: &str,
        value: &str,
    ) -> DbResult<()>;

    /// Returns true if `table|key` exists.
    async fn exists(&self, db: DbId, table: &str, key: &str) -> DbResult<bool> {
        Ok(self.keys(db, table).await?.iter().any(|k| k == key))
    }

    /// Returns a single field of `table|key`.
    async fn get_field(
        &self,
        db: DbId,
        table: &str,
        key: &str,
        field: &str,
    ) -> DbResult<Option<String>> {
        let fvs = self.get_all(db, table, key).await?;
        Ok(fvs.get_field(field).map(str::to_string))
    }
}
