use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use trackside_client::{LookupTicket, NodeLookup, NodeLookupResponse};
use trackside_shared::NodeId;

#[derive(Default)]
struct Script {
    requests: Vec<LookupTicket>,
    responses: VecDeque<NodeLookupResponse>,
}

/// Node lookup whose answers are written by the test
pub struct ScriptedLookup {
    script: Arc<Mutex<Script>>,
}

/// The test's end of a [`ScriptedLookup`]
#[derive(Clone)]
pub struct ScriptedLookupHandle {
    script: Arc<Mutex<Script>>,
}

impl ScriptedLookup {
    pub fn new() -> (Self, ScriptedLookupHandle) {
        let script = Arc::new(Mutex::new(Script::default()));
        (
            Self {
                script: script.clone(),
            },
            ScriptedLookupHandle { script },
        )
    }
}

impl NodeLookup for ScriptedLookup {
    fn request(&mut self, ticket: LookupTicket) {
        self.script.lock().unwrap().requests.push(ticket);
    }

    fn receive(&mut self) -> Option<NodeLookupResponse> {
        self.script.lock().unwrap().responses.pop_front()
    }
}

impl ScriptedLookupHandle {
    /// Every lookup the client has started, oldest first
    pub fn requests(&self) -> Vec<LookupTicket> {
        self.script.lock().unwrap().requests.clone()
    }

    /// The most recent lookup started for `node_id`
    pub fn last_request(&self, node_id: NodeId) -> Option<LookupTicket> {
        self.requests()
            .into_iter()
            .rev()
            .find(|ticket| ticket.node_id == node_id)
    }

    /// Queues an answer; the client picks it up on its next poll
    pub fn respond(&self, response: NodeLookupResponse) {
        self.script.lock().unwrap().responses.push_back(response);
    }
}
