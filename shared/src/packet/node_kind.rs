/// Switching behavior of a junction node, as reported by the node lookup
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum NodeKind {
    Random,
    RoundRobin,
    Reverse,
    Derailing,
    Configurable,
}

impl std::str::FromStr for NodeKind {
    type Err = &'static str;

    fn from_str(input: &str) -> Result<NodeKind, Self::Err> {
        Ok(match input {
            "random" => Self::Random,
            "roundrobin" => Self::RoundRobin,
            "reverse" => Self::Reverse,
            "derail" => Self::Derailing,
            "configurable" => Self::Configurable,
            _ => return Err("Unknown node kind"),
        })
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Random => "random",
                Self::RoundRobin => "roundrobin",
                Self::Reverse => "reverse",
                Self::Derailing => "derail",
                Self::Configurable => "configurable",
            }
        )
    }
}
