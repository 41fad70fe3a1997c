use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use crate::core::graph::Network;
use crate::core::model::{Connection, User};

#[derive(Serialize)]
struct NetworkDocument<'a> {
    users: &'a [User],
    connections: &'a [Connection],
}

/// Writes `{ "users": [...], "connections": [...] }`.
pub fn write_network<W: Write>(mut writer: W, network: &Network, pretty: bool) -> anyhow::Result<()> {
    let doc = NetworkDocument {
        users: network.users(),
        connections: network.connections(),
    };
    let written = if pretty {
        serde_json::to_writer_pretty(&mut writer, &doc)
    } else {
        serde_json::to_writer(&mut writer, &doc)
    };
    written.context("failed to serialize network")?;
    writeln!(writer).context("failed to write network")?;
    Ok(())
}
