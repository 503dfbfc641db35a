//! `show muxcable` / `config muxcable` utilities for SONiC dual-ToR switches.
//!
//! A mux cable connects a server to two ToR switches; one of them is active
//! at a time. These utilities inspect and change which side is preferred:
//!
//! - [`reader`]: status (STATE_DB) and configuration (CONFIG_DB) views
//! - [`writer`]: `auto` / `active` mode changes with per-port outcome
//! - [`render`]: table and JSON output
//! - [`settings`]: database connection settings from TOML
//! - [`cli`]: clap definitions for the `show` and `config` binaries
//!
//! # Tables
//!
//! | Database | Table | Purpose |
//! |----------|-------|---------|
//! | CONFIG_DB | MUX_CABLE | Configured mode and server addresses |
//! | CONFIG_DB | PEER_SWITCH | Peer ToR name and address |
//! | STATE_DB | MUX_CABLE_TABLE | Current mux state |
//! | STATE_DB | MUX_LINKMGR_TABLE | Link health |
//!
//! # Example
//!
//! ```ignore
//! use sonic_db::MemoryDb;
//! use sonic_muxcable::reader;
//!
//! let db = MemoryDb::from_mock_tables("tests/mock_tables")?;
//! print!("{}", reader::render_status(&db, None, false).await?);
//! ```

pub mod cli;
pub mod error;
pub mod logging;
pub mod reader;
pub mod render;
pub mod settings;
pub mod tables;
pub mod types;
pub mod writer;

pub use error::{MuxCableError, MuxCableResult};
pub use reader::{render_config, render_status, MuxCableReader};
pub use settings::MuxCableSettings;
pub use types::{ModeOutcome, ModeReport, MuxMode, PortScope};
pub use writer::{set_mode, ModeWriter};
