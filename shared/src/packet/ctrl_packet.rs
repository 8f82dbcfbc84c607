use crate::{
    packet::{
        coord::Coord,
        error::PacketError,
        fields::{line, parse_field, Fields},
        node_kind::NodeKind,
    },
    types::{Color, NodeId, TrackId},
};

/// Reshapes a track between its fixed endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveAdjustment {
    ToLine,
    ToQuadratic(Coord),
    ToCubic(Coord, Coord),
}

impl std::str::FromStr for CurveAdjustment {
    type Err = &'static str;

    fn from_str(input: &str) -> Result<CurveAdjustment, Self::Err> {
        if input.is_empty() {
            return Ok(CurveAdjustment::ToLine);
        }
        let mut split = input.split(',');
        match (split.next(), split.next(), split.next()) {
            (Some(p), None, None) => Ok(CurveAdjustment::ToQuadratic(p.parse()?)),
            (Some(p1), Some(p2), None) => Ok(CurveAdjustment::ToCubic(p1.parse()?, p2.parse()?)),
            _ => Err("CurveAdjustment has unexpected amount of commas"),
        }
    }
}

impl std::fmt::Display for CurveAdjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveAdjustment::ToLine => Ok(()),
            CurveAdjustment::ToQuadratic(p) => write!(f, "{}", p),
            CurveAdjustment::ToCubic(p1, p2) => write!(f, "{},{}", p1, p2),
        }
    }
}

/// Editing requests sent on the control channel. The server answers with
/// ordinary data-channel packets; nothing here mutates the client's model.
#[derive(Debug, Clone, PartialEq)]
pub enum CtrlPacket {
    NewNode(Coord, NodeKind),
    NodeMove(NodeId, Coord),
    NodeDelete(NodeId),
    NodeEdit(NodeId, NodeKind),
    NewTrack(NodeId, NodeId, Color),
    TrackDelete(TrackId),
    TrackAdjust(TrackId, CurveAdjustment),
    NewTrain(TrackId, f64),
}

impl CtrlPacket {
    pub fn verb(&self) -> &'static str {
        match self {
            CtrlPacket::NewNode(..) => "node_new",
            CtrlPacket::NodeMove(..) => "node_move",
            CtrlPacket::NodeDelete(_) => "node_delete",
            CtrlPacket::NodeEdit(..) => "node_edit",
            CtrlPacket::NewTrack(..) => "track_new",
            CtrlPacket::TrackDelete(_) => "track_delete",
            CtrlPacket::TrackAdjust(..) => "track_adjust",
            CtrlPacket::NewTrain(..) => "train_new",
        }
    }
}

impl std::fmt::Display for CtrlPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n", self.verb())?;
        match self {
            CtrlPacket::NewNode(coord, kind) => write!(f, "{} {}", coord, kind),
            CtrlPacket::NodeMove(id, coord) => write!(f, "{} {}", id, coord),
            CtrlPacket::NodeDelete(id) => write!(f, "{}", id),
            CtrlPacket::NodeEdit(id, kind) => write!(f, "{} {}", id, kind),
            CtrlPacket::NewTrack(start, end, color) => write!(f, "{} {} {}", start, end, color),
            CtrlPacket::TrackDelete(id) => write!(f, "{}", id),
            CtrlPacket::TrackAdjust(id, adjustment) => write!(f, "{} {}", id, adjustment),
            CtrlPacket::NewTrain(track_id, speed) => write!(f, "{} {}", track_id, speed),
        }
    }
}

impl std::str::FromStr for CtrlPacket {
    type Err = PacketError;

    fn from_str(input: &str) -> Result<CtrlPacket, Self::Err> {
        let lines: Vec<&str> = input.split('\n').collect();
        let kind: &'static str = match lines[0] {
            "" => return Err(PacketError::Empty),
            "node_new" => "node_new",
            "node_move" => "node_move",
            "node_delete" => "node_delete",
            "node_edit" => "node_edit",
            "track_new" => "track_new",
            "track_delete" => "track_delete",
            "track_adjust" => "track_adjust",
            "train_new" => "train_new",
            other => {
                return Err(PacketError::UnknownKind {
                    kind: other.to_string(),
                })
            }
        };
        let args = line(kind, &lines, 1)?;
        let mut fields = Fields::new(kind, args);

        Ok(match kind {
            "node_new" => CtrlPacket::NewNode(
                fields.next_parsed("coordinate")?,
                fields.next_parsed("node kind")?,
            ),
            "node_move" => {
                CtrlPacket::NodeMove(fields.next_parsed("node id")?, fields.next_parsed("coordinate")?)
            }
            "node_delete" => CtrlPacket::NodeDelete(fields.next_parsed("node id")?),
            "node_edit" => {
                CtrlPacket::NodeEdit(fields.next_parsed("node id")?, fields.next_parsed("node kind")?)
            }
            "track_new" => CtrlPacket::NewTrack(
                fields.next_parsed("node 1 id")?,
                fields.next_parsed("node 2 id")?,
                fields.next_str("color")?.to_string(),
            ),
            "track_delete" => CtrlPacket::TrackDelete(fields.next_parsed("track id")?),
            "track_adjust" => {
                let id = fields.next_parsed("track id")?;
                // a missing adjustment field means "straighten"
                let adjustment = match fields.next_opt_str() {
                    Some(raw) => parse_field(kind, "track adjustment", raw)?,
                    None => CurveAdjustment::ToLine,
                };
                CtrlPacket::TrackAdjust(id, adjustment)
            }
            _ => CtrlPacket::NewTrain(fields.next_parsed("track id")?, fields.next_parsed("train speed")?),
        })
    }
}
