use thiserror::Error;

/// Errors that can occur while parsing a line-oriented text packet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    /// Packet had no kind line at all
    #[error("Packet is empty")]
    Empty,

    /// First line named a packet kind this build does not understand
    #[error("Packet kind '{kind}' is not recognized")]
    UnknownKind { kind: String },

    /// A required line is absent
    #[error("Packet '{kind}' is missing line {line}")]
    MissingLine { kind: &'static str, line: usize },

    /// A required whitespace-separated field is absent
    #[error("Packet '{kind}' is missing field '{field}'")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    /// A field is present but could not be parsed
    #[error("Packet '{kind}' contains a bad {field}: '{value}'")]
    BadField {
        kind: &'static str,
        field: &'static str,
        value: String,
    },

    /// A `track` packet's declared row count does not match its rows
    #[error("Track packet declares {declared} rows but carries {actual}")]
    TrackCountMismatch { declared: usize, actual: usize },

    /// A `remove` packet carries an effect code this build does not understand
    #[error("Removal kind '{code}' is not recognized (expected one of e, s, d, v, t)")]
    UnknownRemovalKind { code: char },
}
