use std::str::{FromStr, SplitWhitespace};

use super::error::PacketError;

/// Whitespace-separated fields of one packet line, parsed in order
pub(crate) struct Fields<'a> {
    kind: &'static str,
    split: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    pub fn new(kind: &'static str, line: &'a str) -> Self {
        Self {
            kind,
            split: line.split_whitespace(),
        }
    }

    pub fn next_str(&mut self, field: &'static str) -> Result<&'a str, PacketError> {
        self.split.next().ok_or(PacketError::MissingField {
            kind: self.kind,
            field,
        })
    }

    pub fn next_opt_str(&mut self) -> Option<&'a str> {
        self.split.next()
    }

    pub fn next_parsed<T: FromStr>(&mut self, field: &'static str) -> Result<T, PacketError> {
        let value = self.next_str(field)?;
        parse_field(self.kind, field, value)
    }
}

pub(crate) fn parse_field<T: FromStr>(
    kind: &'static str,
    field: &'static str,
    value: &str,
) -> Result<T, PacketError> {
    value.parse().map_err(|_| PacketError::BadField {
        kind,
        field,
        value: value.to_string(),
    })
}

/// Line `index` of a packet, or `MissingLine`
pub(crate) fn line<'a>(
    kind: &'static str,
    lines: &[&'a str],
    index: usize,
) -> Result<&'a str, PacketError> {
    lines
        .get(index)
        .copied()
        .ok_or(PacketError::MissingLine { kind, line: index })
}
