pub mod client_model;
pub mod effect;
pub mod node;
pub mod path_registry;
pub mod train;
