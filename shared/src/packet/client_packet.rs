use crate::{
    packet::{error::PacketError, fields::{line, Fields}},
    types::{NodeId, TrainId},
};

/// Modifier keys held during a click, written `ctrl,shift,alt` as `0`/`1`
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct ClickModifier {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl std::fmt::Display for ClickModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{}",
            u8::from(self.ctrl),
            u8::from(self.shift),
            u8::from(self.alt)
        )
    }
}

impl std::str::FromStr for ClickModifier {
    type Err = &'static str;

    fn from_str(input: &str) -> Result<ClickModifier, Self::Err> {
        let flags = input
            .split(',')
            .map(|flag| match flag {
                "0" => Ok(false),
                "1" => Ok(true),
                _ => Err("ClickModifier contained a unexpected character"),
            })
            .collect::<Result<Vec<bool>, _>>()?;

        match flags.as_slice() {
            [ctrl, shift, alt] => Ok(ClickModifier {
                ctrl: *ctrl,
                shift: *shift,
                alt: *alt,
            }),
            _ => Err("ClickModifier has unexpected amount of commas"),
        }
    }
}

/// Messages the client sends on the data channel
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ClientPacket {
    Click(TrainId, ClickModifier),
    Switch(NodeId, ClickModifier),
}

impl std::fmt::Display for ClientPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Click(train_id, modifier) => write!(f, "click\n{} {}", train_id, modifier),
            Self::Switch(node_id, modifier) => write!(f, "switch\n{} {}", node_id, modifier),
        }
    }
}

impl std::str::FromStr for ClientPacket {
    type Err = PacketError;

    fn from_str(input: &str) -> Result<ClientPacket, Self::Err> {
        let lines: Vec<&str> = input.split('\n').collect();
        let (kind, build): (&'static str, fn(u32, ClickModifier) -> ClientPacket) = match lines[0] {
            "" => return Err(PacketError::Empty),
            "click" => ("click", ClientPacket::Click),
            "switch" => ("switch", ClientPacket::Switch),
            other => {
                return Err(PacketError::UnknownKind {
                    kind: other.to_string(),
                })
            }
        };

        let mut fields = Fields::new(kind, line(kind, &lines, 1)?);
        let id = fields.next_parsed("id")?;
        let modifier = fields.next_parsed("click modifier")?;
        Ok(build(id, modifier))
    }
}
