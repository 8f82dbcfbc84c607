use crate::{
    packet::{
        coord::Coord,
        direction::Direction,
        error::PacketError,
        fields::{line, parse_field, Fields},
        removal_kind::RemovalKind,
    },
    types::{Color, NodeId, TrackId, TrainId},
};

#[derive(Debug, Clone, PartialEq)]
pub struct TrainRecord {
    pub id: TrainId,
    pub track_id: TrackId,
    /// Fractional position along the track at first observation, `[0, 1)`
    pub phase_offset: f64,
    /// Milliseconds to traverse the whole track, always positive
    pub duration_ms: f64,
    pub direction: Direction,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    pub id: TrackId,
    /// Flat `[x0, y0, x1, y1, ...]` list. The degree is validated by the
    /// registry, not the parser.
    pub control_points: Vec<f64>,
    pub color: Color,
    pub stroke_width: f64,
}

/// Messages arriving on the data channel
#[derive(Debug, Clone, PartialEq)]
pub enum ServerPacket {
    Train(TrainRecord),
    Track(Vec<TrackRecord>),
    Node(NodeId, Coord),
    Nuke(NodeId),
    Remove(TrainId, RemovalKind),
}

impl ServerPacket {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Train(_) => "train",
            Self::Track(_) => "track",
            Self::Node(..) => "node",
            Self::Nuke(_) => "nuke",
            Self::Remove(..) => "remove",
        }
    }
}

impl std::str::FromStr for ServerPacket {
    type Err = PacketError;

    fn from_str(input: &str) -> Result<ServerPacket, Self::Err> {
        let lines: Vec<&str> = input.split('\n').map(|l| l.trim_end_matches('\r')).collect();

        match lines[0] {
            "" => Err(PacketError::Empty),
            "train" => parse_train(&lines),
            "track" => parse_track(&lines),
            "node" => {
                let mut fields = Fields::new("node", line("node", &lines, 1)?);
                let id = fields.next_parsed("node id")?;
                let coord = fields.next_parsed("coordinate")?;
                Ok(ServerPacket::Node(id, coord))
            }
            "nuke" => {
                let mut fields = Fields::new("nuke", line("nuke", &lines, 1)?);
                Ok(ServerPacket::Nuke(fields.next_parsed("node id")?))
            }
            "remove" => {
                let mut fields = Fields::new("remove", line("remove", &lines, 1)?);
                let id = fields.next_parsed("train id")?;
                let word = fields.next_str("removal kind")?;
                let code = word.chars().next().ok_or(PacketError::MissingField {
                    kind: "remove",
                    field: "removal kind",
                })?;
                Ok(ServerPacket::Remove(id, RemovalKind::from_code(code)?))
            }
            other => Err(PacketError::UnknownKind {
                kind: other.to_string(),
            }),
        }
    }
}

fn parse_train(lines: &[&str]) -> Result<ServerPacket, PacketError> {
    let mut fields = Fields::new("train", line("train", lines, 1)?);
    let id = fields.next_parsed("train id")?;
    let track_id = fields.next_parsed("track id")?;
    let phase_raw = fields.next_str("phase offset")?;
    let phase_offset: f64 = parse_field("train", "phase offset", phase_raw)?;
    if !(0.0..1.0).contains(&phase_offset) {
        return Err(PacketError::BadField {
            kind: "train",
            field: "phase offset",
            value: phase_raw.to_string(),
        });
    }
    let duration_raw = fields.next_str("duration")?;
    let duration_ms: f64 = parse_field("train", "duration", duration_raw)?;
    if !(duration_ms > 0.0 && duration_ms.is_finite()) {
        return Err(PacketError::BadField {
            kind: "train",
            field: "duration",
            value: duration_raw.to_string(),
        });
    }
    // older servers omit the direction
    let direction = match fields.next_opt_str() {
        Some(raw) => parse_field("train", "direction", raw)?,
        None => Direction::Forward,
    };
    let image_url = lines.get(2).map(|l| l.trim().to_string()).unwrap_or_default();

    Ok(ServerPacket::Train(TrainRecord {
        id,
        track_id,
        phase_offset,
        duration_ms,
        direction,
        image_url,
    }))
}

fn parse_track(lines: &[&str]) -> Result<ServerPacket, PacketError> {
    let declared: usize = parse_field("track", "row count", line("track", lines, 1)?.trim())?;

    let rows: Vec<&str> = lines[2..]
        .iter()
        .copied()
        .filter(|l| !l.trim().is_empty())
        .collect();
    if rows.len() != declared {
        return Err(PacketError::TrackCountMismatch {
            declared,
            actual: rows.len(),
        });
    }

    let mut tracks = Vec::with_capacity(rows.len());
    for row in rows {
        let mut fields = Fields::new("track", row);
        let id = fields.next_parsed("track id")?;
        let control_points = parse_control_points(fields.next_str("control points")?)?;
        let color = fields.next_str("color")?.to_string();
        let stroke_width = fields.next_parsed("stroke width")?;
        tracks.push(TrackRecord {
            id,
            control_points,
            color,
            stroke_width,
        });
    }
    Ok(ServerPacket::Track(tracks))
}

/// `x0;y0;x1;y1[;...]`, optionally prefixed with a `bezierN;` tag
fn parse_control_points(raw: &str) -> Result<Vec<f64>, PacketError> {
    let mut values = raw.split(';').peekable();
    if values.peek().is_some_and(|v| v.starts_with("bezier")) {
        values.next();
    }

    let points = values
        .map(|v| parse_field("track", "control point", v))
        .collect::<Result<Vec<f64>, _>>()?;
    if points.len() % 2 != 0 {
        return Err(PacketError::BadField {
            kind: "track",
            field: "control points",
            value: raw.to_string(),
        });
    }
    Ok(points)
}

impl std::fmt::Display for ServerPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Train(train) => write!(
                f,
                "train\n{} {} {} {} {}\n{}",
                train.id,
                train.track_id,
                train.phase_offset,
                train.duration_ms,
                train.direction,
                train.image_url
            ),
            Self::Track(tracks) => {
                write!(f, "track\n{}", tracks.len())?;
                for track in tracks {
                    let points: Vec<String> =
                        track.control_points.iter().map(|v| v.to_string()).collect();
                    write!(
                        f,
                        "\n{} bezier{};{} {} {}",
                        track.id,
                        track.control_points.len() / 2,
                        points.join(";"),
                        track.color,
                        track.stroke_width
                    )?;
                }
                Ok(())
            }
            Self::Node(id, coord) => write!(f, "node\n{} {}", id, coord),
            Self::Nuke(id) => write!(f, "nuke\n{}", id),
            Self::Remove(id, kind) => write!(f, "remove\n{} {}", id, kind),
        }
    }
}
