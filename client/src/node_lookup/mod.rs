//! Out-of-band node metadata. A `node` packet only carries coordinates; the
//! node's kind and whether clicking it does anything come from a separate
//! lookup that answers some frames later.

cfg_if! {
    if #[cfg(feature = "http_lookup")] {
        pub mod http;
    } else {}
}

use thiserror::Error;

use trackside_shared::{NodeId, NodeKind};

/// Identifies one lookup. A response is only merged if the node still
/// carries the same generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LookupTicket {
    pub node_id: NodeId,
    pub generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedNode {
    pub kind: NodeKind,
    /// True only for configurable nodes whose current state reacts to a click
    pub interactable: bool,
}

impl ResolvedNode {
    pub fn new(kind: NodeKind, interactable: bool) -> Self {
        Self {
            kind,
            interactable: kind == NodeKind::Configurable && interactable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Node lookup for {node_id} failed: {reason}")]
    Transport { node_id: NodeId, reason: String },
    #[error("Node lookup for {node_id} returned an unreadable body: {reason}")]
    Malformed { node_id: NodeId, reason: String },
    #[error("Node {node_id} has unknown kind '{kind}'")]
    UnknownKind { node_id: NodeId, kind: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeLookupResponse {
    pub ticket: LookupTicket,
    pub result: Result<ResolvedNode, LookupError>,
}

/// Poll-based node metadata source
pub trait NodeLookup {
    /// Starts a lookup. Must not block.
    fn request(&mut self, ticket: LookupTicket);
    /// Returns the next completed lookup, if any
    fn receive(&mut self) -> Option<NodeLookupResponse>;
}

/// Lookup that never answers. Every node stays pending and non-interactable.
#[derive(Debug, Default)]
pub struct NoLookup;

impl NodeLookup for NoLookup {
    fn request(&mut self, _ticket: LookupTicket) {}

    fn receive(&mut self) -> Option<NodeLookupResponse> {
        None
    }
}
