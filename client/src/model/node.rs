use trackside_shared::{DVec2, NodeId, NodeKind};

use crate::node_lookup::ResolvedNode;

/// Second phase of a node: filled in when the out-of-band lookup answers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeCapability {
    Pending,
    Resolved(ResolvedNode),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    position: DVec2,
    capability: NodeCapability,
    /// Identifies the lookup that may complete this node
    generation: u64,
}

impl Node {
    pub(crate) fn new(id: NodeId, position: DVec2, generation: u64) -> Self {
        Self {
            id,
            position,
            capability: NodeCapability::Pending,
            generation,
        }
    }

    /// New coordinates. The last known capability stays until the lookup
    /// issued under `generation` answers.
    pub(crate) fn relocate(&mut self, position: DVec2, generation: u64) {
        self.position = position;
        self.generation = generation;
    }

    pub(crate) fn resolve(&mut self, resolved: ResolvedNode) {
        self.capability = NodeCapability::Resolved(resolved);
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn capability(&self) -> NodeCapability {
        self.capability
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.capability == NodeCapability::Pending
    }

    pub fn kind(&self) -> Option<NodeKind> {
        match self.capability {
            NodeCapability::Pending => None,
            NodeCapability::Resolved(resolved) => Some(resolved.kind),
        }
    }

    /// Pending nodes are never interactable
    pub fn is_interactable(&self) -> bool {
        match self.capability {
            NodeCapability::Pending => false,
            NodeCapability::Resolved(resolved) => resolved.interactable,
        }
    }
}
