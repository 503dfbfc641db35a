//! Output rendering: plain tables and pretty JSON.
//!
//! Tables use the classic "simple" layout of SONiC utilities: a header line,
//! a line of dashes per column, then one line per row. Every column is left
//! aligned and at least two characters wider than its header; columns are
//! separated by two spaces and trailing whitespace is stripped.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::MuxCableResult;
use crate::types::{ConfigView, ModeReport, StatusView};

const COLUMN_SEPARATOR: &str = "  ";
const HEADER_PADDING: usize = 2;

/// A table with fixed headers.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with the given column headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Missing cells render empty, extra cells are dropped.
    pub fn add_row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.headers.len())
            .map(Into::into)
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
        self
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .fold(header.chars().count() + HEADER_PADDING, usize::max)
            })
            .collect()
    }

    fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
        let line = cells
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR);
        line.trim_end().to_string()
    }

    /// Renders the table, one line per header/separator/row, each ending in a newline.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();

        out.push_str(&Self::format_line(
            self.headers.iter().map(String::as_str),
            &widths,
        ));
        out.push('\n');

        let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&Self::format_line(dashes.iter().map(String::as_str), &widths));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&Self::format_line(row.iter().map(String::as_str), &widths));
            out.push('\n');
        }

        out
    }
}

/// Serializes `value` as JSON with a four-space indent and a trailing newline.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> MuxCableResult<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;

    let mut out = String::from_utf8_lossy(&buf).into_owned();
    out.push('\n');
    Ok(out)
}

#[derive(Serialize)]
struct StatusEntry<'a> {
    #[serde(rename = "STATUS")]
    status: &'a str,
    #[serde(rename = "HEALTH")]
    health: &'a str,
}

#[derive(Serialize)]
struct ServerEntry<'a> {
    #[serde(rename = "IPv4")]
    ipv4: &'a str,
    #[serde(rename = "IPv6")]
    ipv6: &'a str,
}

#[derive(Serialize)]
struct PortConfigEntry<'a> {
    #[serde(rename = "STATE")]
    state: &'a str,
    #[serde(rename = "SERVER")]
    server: ServerEntry<'a>,
}

#[derive(Serialize)]
struct ConfigBody {
    #[serde(rename = "PEER_TOR")]
    peer_tor: String,
    #[serde(rename = "PORTS")]
    ports: Map<String, Value>,
}

#[derive(Serialize)]
struct Envelope<T> {
    #[serde(rename = "MUX_CABLE")]
    mux_cable: T,
}

/// Renders a status view.
pub fn render_status_view(view: &StatusView, json: bool) -> MuxCableResult<String> {
    if json {
        let mut ports = Map::new();
        for p in &view.ports {
            let entry = StatusEntry {
                status: &p.status,
                health: &p.health,
            };
            ports.insert(p.port.clone(), serde_json::to_value(entry)?);
        }
        return to_json_pretty(&Envelope { mux_cable: ports });
    }

    let mut table = Table::new(["PORT", "STATUS", "HEALTH"]);
    for p in &view.ports {
        table.add_row([p.port.as_str(), p.status.as_str(), p.health.as_str()]);
    }
    Ok(table.render())
}

/// Renders a config view.
pub fn render_config_view(view: &ConfigView, json: bool) -> MuxCableResult<String> {
    if json {
        let mut ports = Map::new();
        for p in &view.ports {
            let entry = PortConfigEntry {
                state: &p.state,
                server: ServerEntry {
                    ipv4: &p.ipv4,
                    ipv6: &p.ipv6,
                },
            };
            ports.insert(p.port.clone(), serde_json::to_value(entry)?);
        }
        let body = ConfigBody {
            peer_tor: view.switch.peer_tor.clone(),
            ports,
        };
        return to_json_pretty(&Envelope { mux_cable: body });
    }

    let mut switch_table = Table::new(["SWITCH_NAME", "PEER_TOR"]);
    switch_table.add_row([
        view.switch.switch_name.as_str(),
        view.switch.peer_tor.as_str(),
    ]);

    let mut port_table = Table::new(["port", "state", "ipv4", "ipv6"]);
    for p in &view.ports {
        port_table.add_row([
            p.port.as_str(),
            p.state.as_str(),
            p.ipv4.as_str(),
            p.ipv6.as_str(),
        ]);
    }

    Ok(format!("{}{}", switch_table.render(), port_table.render()))
}

/// Renders a mode change report.
pub fn render_mode_report(report: &ModeReport, json: bool) -> MuxCableResult<String> {
    if json {
        let outcomes: Map<String, Value> = report
            .outcomes
            .iter()
            .map(|(port, outcome)| (port.clone(), Value::from(outcome.as_str())))
            .collect();
        return to_json_pretty(&outcomes);
    }

    let mut table = Table::new(["port", "state"]);
    for (port, outcome) in &report.outcomes {
        table.add_row([port.as_str(), outcome.as_str()]);
    }
    Ok(table.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ModeOutcome, PortStatus};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_widths_pad_headers() {
        let mut table = Table::new(["PORT", "STATUS"]);
        table.add_row(["Ethernet0", "auto"]);

        assert_eq!(
            table.render(),
            "PORT       STATUS\n---------  --------\nEthernet0  auto\n"
        );
    }

    #[test]
    fn test_table_without_rows() {
        let table = Table::new(["port", "state"]);
        assert_eq!(table.render(), "port    state\n------  -------\n");
    }

    #[test]
    fn test_table_short_and_long_rows() {
        let mut table = Table::new(["a", "b"]);
        table.add_row(["x"]);
        table.add_row(["1", "2", "3"]);

        assert_eq!(table.render(), "a    b\n---  ---\nx\n1    2\n");
    }

    #[test]
    fn test_empty_last_cell_is_trimmed() {
        let view = StatusView {
            ports: vec![PortStatus {
                port: "Ethernet4".to_string(),
                status: "standby".to_string(),
                health: String::new(),
            }],
        };
        let out = render_status_view(&view, false).unwrap();
        assert_eq!(out.lines().nth(2), Some("Ethernet4  standby"));
    }

    #[test]
    fn test_json_uses_four_space_indent() {
        let report = ModeReport {
            outcomes: vec![("Ethernet0".to_string(), ModeOutcome::Ok)],
        };
        assert_eq!(
            render_mode_report(&report, true).unwrap(),
            "{\n    \"Ethernet0\": \"OK\"\n}\n"
        );
    }

    #[test]
    fn test_empty_json_report() {
        let report = ModeReport::default();
        assert_eq!(render_mode_report(&report, true).unwrap(), "{}\n");
    }

    #[test]
    fn test_mode_report_table() {
        let report = ModeReport {
            outcomes: vec![
                ("Ethernet0".to_string(), ModeOutcome::Ok),
                ("Ethernet1".to_string(), ModeOutcome::InProgress),
            ],
        };
        assert_eq!(
            render_mode_report(&report, false).unwrap(),
            "port       state\n---------  ----------\nEthernet0  OK\nEthernet1  INPROGRESS\n"
        );
    }
}
