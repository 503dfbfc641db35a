//! Mode writer for `config muxcable mode`.

use sonic_db::{DbId, FieldValuesExt, SonicDb};
use tracing::{debug, info, instrument};

use crate::error::{MuxCableError, MuxCableResult};
use crate::render;
use crate::tables::{self, fields};
use crate::types::{ModeOutcome, ModeReport, MuxMode, PortScope};

/// Writes the configured mux mode of one or all ports.
///
/// Only the `state` field of CONFIG_DB `MUX_CABLE` entries is touched. Ports
/// are updated one after the other; a failure part way leaves earlier ports
/// updated.
pub struct ModeWriter<'a> {
    db: &'a dyn SonicDb,
}

impl<'a> ModeWriter<'a> {
    /// Creates a writer over `db`.
    pub fn new(db: &'a dyn SonicDb) -> Self {
        Self { db }
    }

    /// Applies `mode` to every port selected by `scope`.
    #[instrument(skip(self))]
    pub async fn apply(&self, mode: MuxMode, scope: &PortScope) -> MuxCableResult<ModeReport> {
        let ports = match scope {
            PortScope::All => {
                self.db
                    .keys(DbId::ConfigDb, tables::CFG_MUX_CABLE_TABLE_NAME)
                    .await?
            }
            PortScope::Port(port) => {
                if !self
                    .db
                    .exists(DbId::ConfigDb, tables::CFG_MUX_CABLE_TABLE_NAME, port)
                    .await?
                {
                    return Err(MuxCableError::port_not_found(
                        port,
                        tables::CFG_MUX_CABLE_TABLE_NAME,
                    ));
                }
                vec![port.clone()]
            }
        };

        let mut report = ModeReport::default();
        for port in ports {
            let outcome = self.apply_port(&port, mode).await?;
            report.outcomes.push((port, outcome));
        }

        Ok(report)
    }

    /// Applies `mode` to a single port and reports whether it has settled.
    ///
    /// An unchanged mode is reported `OK` without a write. After a write,
    /// `active` stays `INPROGRESS` until STATE_DB shows the mux as active.
    async fn apply_port(&self, port: &str, mode: MuxMode) -> MuxCableResult<ModeOutcome> {
        let cfg = self
            .db
            .get_all(DbId::ConfigDb, tables::CFG_MUX_CABLE_TABLE_NAME, port)
            .await?;
        let configured = cfg.get_field(fields::STATE).and_then(|s| s.parse::<MuxMode>().ok());

        if configured == Some(mode) {
            debug!("{} already configured as {}", port, mode);
            return Ok(ModeOutcome::Ok);
        }

        self.db
            .set_field(
                DbId::ConfigDb,
                tables::CFG_MUX_CABLE_TABLE_NAME,
                port,
                fields::STATE,
                mode.as_str(),
            )
            .await?;
        info!(
            "Set {} mode from {} to {}",
            port,
            cfg.get_field_or(fields::STATE, "<unset>"),
            mode
        );

        if mode != MuxMode::Active {
            return Ok(ModeOutcome::Ok);
        }

        let current = self
            .db
            .get_field(DbId::StateDb, tables::STATE_MUX_CABLE_TABLE_NAME, port, fields::STATE)
            .await?
            .and_then(|s| s.parse::<MuxMode>().ok());

        if current == Some(MuxMode::Active) {
            Ok(ModeOutcome::Ok)
        } else {
            debug!("{} hardware state is {:?}, switchover pending", port, current);
            Ok(ModeOutcome::InProgress)
        }
    }
}

/// Runs `config muxcable mode <MODE> <all|PORT> [--json]` and renders the report.
pub async fn set_mode(
    db: &dyn SonicDb,
    mode: MuxMode,
    scope: &PortScope,
    json: bool,
) -> MuxCableResult<String> {
    let report = ModeWriter::new(db).apply(mode, scope).await?;
    render::render_mode_report(&report, json)
}
