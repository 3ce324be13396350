//! External value access and browsing.
//!
//! This is the host side of the accessor contract: reads call the bound read
//! accessor, writes call the write accessor, and writes to variables without
//! one are rejected with `BadNotWritable` before any accessor code runs.
//! Writes to objects fail with `BadNodeClassInvalid`.

use crate::node::{Node, NodeClass};
use crate::space::AddressSpace;
use crate::value::ValueSource;
use std::fmt::Write as _;
use tracing::{debug, warn};
use uamachine_types::{NodeId, StatusCode, Variant};

impl AddressSpace {
    /// Reads the current value of a variable.
    pub fn read_value(&self, node_id: &NodeId) -> Result<Variant, StatusCode> {
        let node = self.find_node(node_id).ok_or(StatusCode::BadNodeIdUnknown)?;
        let attrs = node.variable().ok_or(StatusCode::BadNotReadable)?;
        let value = match &attrs.source {
            ValueSource::Static(v) => v.clone(),
            ValueSource::Bound { read, .. } => read(),
        };
        if !value.fits(attrs.data_type) {
            warn!(
                "Read accessor of {} returned {:?}, declared {}",
                node_id,
                value.data_type(),
                attrs.data_type
            );
            return Err(StatusCode::BadTypeMismatch);
        }
        Ok(value)
    }

    /// Submits an external write to a variable and returns the outcome.
    pub fn write_value(&self, node_id: &NodeId, value: Variant) -> StatusCode {
        let Some(node) = self.find_node(node_id) else {
            return StatusCode::BadNodeIdUnknown;
        };
        let Some(attrs) = node.variable() else {
            debug!("Rejected write to non-variable {}", node_id);
            return StatusCode::BadNodeClassInvalid;
        };
        match &attrs.source {
            ValueSource::Bound {
                write: Some(write), ..
            } => {
                let status = write(&value);
                if status.is_good() {
                    debug!("Wrote {} = {}", node_id, value);
                } else {
                    debug!("Write of {} to {} failed: {}", value, node_id, status);
                }
                status
            }
            _ => {
                debug!("Rejected write to read-only {}", node_id);
                StatusCode::BadNotWritable
            }
        }
    }

    /// Direct children of a node in creation order. Unknown nodes have none.
    pub fn browse(&self, node_id: &NodeId) -> Vec<&Node> {
        self.find_node(node_id)
            .map(|n| {
                n.children()
                    .iter()
                    .filter_map(|c| self.find_node(c))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Renders the subtree below `node_id` as indented text, one node per line.
    pub fn render_tree(&self, node_id: &NodeId) -> String {
        let mut out = String::new();
        self.render_into(node_id, 0, &mut out);
        out
    }

    fn render_into(&self, node_id: &NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.find_node(node_id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let _ = match node.class() {
            NodeClass::Variable => {
                let value = self
                    .read_value(node_id)
                    .map_or_else(|s| format!("{s:?}"), |v| v.to_string());
                writeln!(
                    out,
                    "{indent}{} ({}) = {}",
                    node.browse_name().name,
                    node_id,
                    value
                )
            }
            class => writeln!(
                out,
                "{indent}{} ({}) [{:?}]",
                node.browse_name().name,
                node_id,
                class
            ),
        };
        for child in node.children() {
            self.render_into(child, depth + 1, out);
        }
    }
}
