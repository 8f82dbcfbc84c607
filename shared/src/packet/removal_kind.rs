use super::error::PacketError;

/// How a train leaves the board. Only the first character is significant on
/// the wire, so both `d` and `derail` decode to [`RemovalKind::Derail`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum RemovalKind {
    Explosion,
    Silent,
    Derail,
    Vibrate,
    TakeOff,
}

impl RemovalKind {
    pub fn from_code(code: char) -> Result<Self, PacketError> {
        Ok(match code {
            'e' => Self::Explosion,
            's' => Self::Silent,
            'd' => Self::Derail,
            'v' => Self::Vibrate,
            't' => Self::TakeOff,
            _ => return Err(PacketError::UnknownRemovalKind { code }),
        })
    }
}

impl std::fmt::Display for RemovalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RemovalKind::Explosion => "explosion",
                RemovalKind::Silent => "silent",
                RemovalKind::Derail => "derail",
                RemovalKind::Vibrate => "vibrate",
                RemovalKind::TakeOff => "take_off",
            }
        )
    }
}
