//! Table and field name constants for muxcable utilities.

/// CONFIG_DB table with per-port mux cable configuration.
pub const CFG_MUX_CABLE_TABLE_NAME: &str = "MUX_CABLE";

/// CONFIG_DB table holding the peer ToR of this switch.
pub const CFG_PEER_SWITCH_TABLE_NAME: &str = "PEER_SWITCH";

/// STATE_DB table with the current mux state per port.
pub const STATE_MUX_CABLE_TABLE_NAME: &str = "MUX_CABLE_TABLE";

/// STATE_DB table with link manager health per port.
pub const STATE_MUX_LINKMGR_TABLE_NAME: &str = "MUX_LINKMGR_TABLE";

/// Field names.
pub mod fields {
    /// Mux state (CONFIG_DB: configured mode, STATE_DB: current state / health).
    pub const STATE: &str = "state";
    /// Server IPv4 address behind the mux cable.
    pub const SERVER_IPV4: &str = "server_ipv4";
    /// Server IPv6 address behind the mux cable.
    pub const SERVER_IPV6: &str = "server_ipv6";
    /// Peer switch IPv4 address.
    pub const ADDRESS_IPV4: &str = "address_ipv4";
}
