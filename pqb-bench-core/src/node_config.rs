//! ## pqb-bench-core::node_config
//! **Node address list**
//!
//! The configuration generator writes one line per node. Two layouts are in
//! circulation:
//! - `Headered`: a header line (the signature algorithm) followed by lines
//!   whose second token is the node address.
//! - `Plain`: no header, the first token of each line is the node address.
//!
//! Blank lines are skipped in both layouts and never consume a node index.

use std::path::Path;

use tracing::debug;

use crate::{NodeConfigError, NodeRef};

/// Which of the two node list formats a file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeListLayout {
    /// Header line skipped, address is the second token.
    Headered,
    /// No header, address is the first token.
    Plain,
}

impl NodeListLayout {
    fn header_lines(self) -> usize {
        match self {
            NodeListLayout::Headered => 1,
            NodeListLayout::Plain => 0,
        }
    }

    fn address_position(self) -> usize {
        match self {
            NodeListLayout::Headered => 1,
            NodeListLayout::Plain => 0,
        }
    }
}

/// Ordered node addresses; position `i` belongs to `node<i+1>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeConfiguration {
    addresses: Vec<String>,
}

impl NodeConfiguration {
    pub fn from_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn parse(text: &str, layout: NodeListLayout) -> Result<Self, NodeConfigError> {
        let position = layout.address_position();
        let mut addresses = Vec::new();

        for (line_no, line) in text
            .lines()
            .enumerate()
            .skip(layout.header_lines())
            .map(|(i, line)| (i + 1, line))
        {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            let address = tokens.get(position).ok_or(NodeConfigError::MissingToken {
                line: line_no,
                position: position + 1,
                found: tokens.len(),
            })?;
            addresses.push((*address).to_string());
        }

        Ok(Self { addresses })
    }

    pub fn load<P: AsRef<Path>>(path: P, layout: NodeListLayout) -> Result<Self, NodeConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NodeConfigError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::parse(&text, layout)?;
        debug!(path = %path.display(), nodes = config.len(), ?layout, "Loaded node configuration");
        Ok(config)
    }

    /// Address of `node`, or `None` when the node is not configured.
    pub fn resolve(&self, node: NodeRef) -> Option<&str> {
        self.addresses.get(node.offset()).map(String::as_str)
    }

    pub fn contains(&self, node: NodeRef) -> bool {
        node.offset() < self.addresses.len()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Iterates `(node, address)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeRef, &str)> {
        self.addresses
            .iter()
            .enumerate()
            .filter_map(|(i, address)| NodeRef::new(i + 1).map(|node| (node, address.as_str())))
    }
}
