//! SONiC database access for command-line utilities.
//!
//! This crate provides the store abstraction that `show`/`config` style
//! utilities read from and write to:
//!
//! - [`SonicDb`]: Injected interface over the SONiC Redis databases
//! - [`DbId`]: Database selector (CONFIG_DB, STATE_DB, APPL_DB)
//! - [`MemoryDb`]: Ordered in-memory backend, seedable from JSON mock tables
//! - [`RedisDb`]: Redis backend using a connection manager
//!
//! # Example
//!
//! ```ignore
//! use sonic_db::{DbId, MemoryDb, SonicDb};
//!
//! let db = MemoryDb::from_mock_tables("tests/mock_tables")?;
//! for key in db.keys(DbId::ConfigDb, "MUX_CABLE").await? {
//!     let fvs = db.get_all(DbId::ConfigDb, "MUX_CABLE", &key).await?;
//!     println!("{key}: {fvs:?}");
//! }
//! ```

mod db;
mod error;
mod memory;
mod redis_backend;

pub use db::{DbId, FieldValues, FieldValuesExt, SonicDb};
pub use error::{DbError, DbResult};
pub use memory::MemoryDb;
pub use redis_backend::{RedisConfig, RedisDb};
