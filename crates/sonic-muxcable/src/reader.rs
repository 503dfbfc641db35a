//! Status/config reader for `show muxcable`.

use sonic_db::{DbId, FieldValuesExt, SonicDb};
use tracing::{debug, instrument, warn};

use crate::error::{MuxCableError, MuxCableResult};
use crate::render;
use crate::tables::{self, fields};
use crate::types::{ConfigView, PortConfig, PortStatus, StatusView, SwitchInfo};

/// Reads mux cable status and configuration from the databases.
///
/// The reader never writes. Ports come back in the order the store lists
/// them.
pub struct MuxCableReader<'a> {
    db: &'a dyn SonicDb,
}

impl<'a> MuxCableReader<'a> {
    /// Creates a reader over `db`.
    pub fn new(db: &'a dyn SonicDb) -> Self {
        Self { db }
    }

    /// Resolves the ports to show: every key of `table`, or just `port` if it
    /// has an entry there.
    async fn select_ports(
        &self,
        db: DbId,
        table: &str,
        port: Option<&str>,
    ) -> MuxCableResult<Vec<String>> {
        match port {
            Some(port) => {
                if !self.db.exists(db, table, port).await? {
                    return Err(MuxCableError::port_not_found(port, table));
                }
                Ok(vec![port.to_string()])
            }
            None => Ok(self.db.keys(db, table).await?),
        }
    }

    /// Current mux status and link health per port.
    #[instrument(skip(self))]
    pub async fn status(&self, port: Option<&str>) -> MuxCableResult<StatusView> {
        let ports = self
            .select_ports(DbId::StateDb, tables::STATE_MUX_CABLE_TABLE_NAME, port)
            .await?;

        let mut view = StatusView::default();
        for port in ports {
            let mux = self
                .db
                .get_all(DbId::StateDb, tables::STATE_MUX_CABLE_TABLE_NAME, &port)
                .await?;
            let linkmgr = self
                .db
                .get_all(DbId::StateDb, tables::STATE_MUX_LINKMGR_TABLE_NAME, &port)
                .await?;

            if linkmgr.is_empty() {
                warn!("No {} entry for {}", tables::STATE_MUX_LINKMGR_TABLE_NAME, port);
            }

            view.ports.push(PortStatus {
                status: mux.get_field_or(fields::STATE, "").to_string(),
                health: linkmgr.get_field_or(fields::STATE, "").to_string(),
                port,
            });
        }

        debug!("Collected status for {} ports", view.ports.len());
        Ok(view)
    }

    /// Switch name and peer ToR address.
    ///
    /// Only the first `PEER_SWITCH` entry is used; a switch has one peer.
    async fn switch_info(&self) -> MuxCableResult<SwitchInfo> {
        let switches = self
            .db
            .keys(DbId::ConfigDb, tables::CFG_PEER_SWITCH_TABLE_NAME)
            .await?;

        let Some(switch_name) = switches.into_iter().next() else {
            warn!("No {} entry in CONFIG_DB", tables::CFG_PEER_SWITCH_TABLE_NAME);
            return Ok(SwitchInfo::default());
        };

        let peer = self
            .db
            .get_all(DbId::ConfigDb, tables::CFG_PEER_SWITCH_TABLE_NAME, &switch_name)
            .await?;

        Ok(SwitchInfo {
            peer_tor: peer.get_field_or(fields::ADDRESS_IPV4, "").to_string(),
            switch_name,
        })
    }

    /// Configured mux mode and server addresses per port, plus the peer ToR.
    #[instrument(skip(self))]
    pub async fn config(&self, port: Option<&str>) -> MuxCableResult<ConfigView> {
        let ports = self
            .select_ports(DbId::ConfigDb, tables::CFG_MUX_CABLE_TABLE_NAME, port)
            .await?;

        let mut view = ConfigView {
            switch: self.switch_info().await?,
            ports: Vec::with_capacity(ports.len()),
        };

        for port in ports {
            let fvs = self
                .db
                .get_all(DbId::ConfigDb, tables::CFG_MUX_CABLE_TABLE_NAME, &port)
                .await?;

            view.ports.push(PortConfig {
                state: fvs.get_field_or(fields::STATE, "").to_string(),
                ipv4: fvs.get_field_or(fields::SERVER_IPV4, "").to_string(),
                ipv6: fvs.get_field_or(fields::SERVER_IPV6, "").to_string(),
                port,
            });
        }

        Ok(view)
    }
}

/// Renders `show muxcable status [PORT] [--json]`.
pub async fn render_status(
    db: &dyn SonicDb,
    port: Option<&str>,
    json: bool,
) -> MuxCableResult<String> {
    let view = MuxCableReader::new(db).status(port).await?;
    render::render_status_view(&view, json)
}

/// Renders `show muxcable config [PORT] [--json]`.
pub async fn render_config(
    db: &dyn SonicDb,
    port: Option<&str>,
    json: bool,
) -> MuxCableResult<String> {
    let view = MuxCableReader::new(db).config(port).await?;
    render::render_config_view(&view, json)
}
