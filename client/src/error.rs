use thiserror::Error;

use trackside_shared::{CurveError, PacketError, TrainId};

/// Which of the two server connections an error or event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Data,
    Control,
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelKind::Data => write!(f, "data"),
            ChannelKind::Control => write!(f, "control"),
        }
    }
}

/// The server and this client disagree about what exists
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesyncError {
    /// Packet text could not be parsed (includes unknown removal kinds)
    #[error("Malformed packet: {0}")]
    Malformed(#[from] PacketError),

    /// `remove` named a train this client has never seen or already removed
    #[error("Removal of unknown train {train_id}")]
    UnknownTrain { train_id: TrainId },
}

/// Errors surfaced by the client core. None of them are fatal to the frame loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Curve math was given a control point list it cannot evaluate
    #[error("Unsupported curve: {0}")]
    UnsupportedDegree(#[from] CurveError),

    /// An entity refers to a map entry that no longer exists
    #[error("{entity} {id} refers to missing {missing} {missing_id}")]
    DanglingReference {
        entity: &'static str,
        id: u32,
        missing: &'static str,
        missing_id: u32,
    },

    /// Server traffic this client cannot reconcile with its model
    #[error("Protocol desync: {0}")]
    ProtocolDesync(#[from] DesyncError),

    /// A channel closed, errored, or is not open yet
    #[error("Connection lost on the {channel} channel")]
    ConnectionLoss { channel: ChannelKind },
}

impl From<PacketError> for ClientError {
    fn from(error: PacketError) -> Self {
        ClientError::ProtocolDesync(DesyncError::Malformed(error))
    }
}
