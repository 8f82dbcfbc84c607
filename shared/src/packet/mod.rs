pub mod client_packet;
pub mod coord;
pub mod ctrl_packet;
pub mod direction;
pub mod error;
pub mod node_kind;
pub mod removal_kind;
pub mod server_packet;

mod fields;
