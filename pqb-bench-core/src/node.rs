//! ## pqb-bench-core::node
//! `node<N>` tokens as they appear in command scripts and manifests.

use std::fmt;
use std::str::FromStr;

use crate::NodeConfigError;

const NODE_PREFIX: &str = "node";

/// A reference to a benchmark node by its 1-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef(usize);

impl NodeRef {
    /// Builds a reference from a 1-based index. Index 0 is rejected.
    pub fn new(index: usize) -> Option<Self> {
        (index > 0).then_some(Self(index))
    }

    /// The 1-based index, as written after the `node` prefix.
    pub fn index(&self) -> usize {
        self.0
    }

    /// The 0-based offset into a [`crate::NodeConfiguration`].
    pub fn offset(&self) -> usize {
        self.0 - 1
    }
}

impl FromStr for NodeRef {
    type Err = NodeConfigError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        token
            .strip_prefix(NODE_PREFIX)
            .and_then(|digits| digits.parse::<usize>().ok())
            .and_then(NodeRef::new)
            .ok_or_else(|| NodeConfigError::InvalidNodeRef(token.to_string()))
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", NODE_PREFIX, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_node_token() {
        let node: NodeRef = "node12".parse().unwrap();
        assert_eq!(node.index(), 12);
        assert_eq!(node.offset(), 11);
        assert_eq!(node.to_string(), "node12");
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["node0", "node", "nodeX", "peer1", "node-1", ""] {
            assert!(
                token.parse::<NodeRef>().is_err(),
                "{token} should not parse"
            );
        }
    }

    proptest! {
        #[test]
        fn display_and_parse_agree(index in 1usize..100_000) {
            let node = NodeRef::new(index).unwrap();
            let parsed: NodeRef = node.to_string().parse().unwrap();
            prop_assert_eq!(parsed.offset() + 1, index);
        }
    }
}
