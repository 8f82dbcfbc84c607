pub mod scripted_lookup;
pub mod test_client;

pub use scripted_lookup::{ScriptedLookup, ScriptedLookupHandle};
pub use test_client::TestClient;
