use std::{
    collections::{BTreeMap, VecDeque},
    sync::{Arc, Mutex},
};

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tokio::sync::mpsc;

use trackside_shared::{NodeId, NodeKind};

use crate::node_lookup::{
    LookupError, LookupTicket, NodeLookup, NodeLookupResponse, ResolvedNode,
};

type ResponseQueue = Arc<Mutex<VecDeque<NodeLookupResponse>>>;

#[derive(Clone, Debug)]
pub struct HttpLookupConfig {
    /// Origin serving `/nodes/<id>`, e.g. `http://localhost:8080`
    pub base_url: String,
}

impl HttpLookupConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Resolves nodes with `GET /nodes/<id>`, then `/routing` and `/state` for
/// configurable ones. Requests run on a background thread.
pub struct HttpNodeLookup {
    request_tx: mpsc::UnboundedSender<LookupTicket>,
    responses: ResponseQueue,
}

impl HttpNodeLookup {
    pub fn new(config: HttpLookupConfig) -> Self {
        let responses: ResponseQueue = Arc::new(Mutex::new(VecDeque::new()));
        let (request_tx, request_rx) = mpsc::unbounded_channel();

        spawn_lookup_task(config, request_rx, responses.clone());

        Self {
            request_tx,
            responses,
        }
    }
}

impl NodeLookup for HttpNodeLookup {
    fn request(&mut self, ticket: LookupTicket) {
        if self.request_tx.send(ticket).is_err() {
            log::warn!("Node lookup thread is gone, node {} stays pending", ticket.node_id);
        }
    }

    fn receive(&mut self) -> Option<NodeLookupResponse> {
        self.responses.lock().ok()?.pop_front()
    }
}

fn spawn_lookup_task(
    config: HttpLookupConfig,
    mut request_rx: mpsc::UnboundedReceiver<LookupTicket>,
    responses: ResponseQueue,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Failed to create tokio runtime: {}", e);
                return;
            }
        };

        runtime.block_on(async {
            let http = reqwest::Client::new();
            while let Some(ticket) = request_rx.recv().await {
                let result = resolve(&http, &config.base_url, ticket.node_id).await;
                if let Ok(mut queue) = responses.lock() {
                    queue.push_back(NodeLookupResponse { ticket, result });
                }
            }
        });
    });
}

/// Body of `/nodes/<id>/routing`. Only the click behavior of each state is read.
#[derive(Debug, Deserialize)]
struct Routing {
    states: RoutingStates,
}

/// Older servers send the states table as an array, newer ones key it by state id
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoutingStates {
    Keyed(BTreeMap<String, RoutingState>),
    Listed(Vec<RoutingState>),
}

#[derive(Debug, Deserialize)]
struct RoutingState {
    /// `"Nothing"` or an action object
    #[serde(default)]
    after_click: Value,
}

impl Routing {
    fn state(&self, state_id: u64) -> Option<&RoutingState> {
        match &self.states {
            RoutingStates::Keyed(map) => map.get(&state_id.to_string()),
            RoutingStates::Listed(list) => {
                usize::try_from(state_id).ok().and_then(|i| list.get(i))
            }
        }
    }
}

async fn resolve(
    http: &reqwest::Client,
    base_url: &str,
    node_id: NodeId,
) -> Result<ResolvedNode, LookupError> {
    let node_url = format!("{}/nodes/{}", base_url, node_id);

    let raw_kind: String = get_json(http, &node_url, node_id).await?;
    let kind = parse_kind(node_id, &raw_kind)?;
    if kind != NodeKind::Configurable {
        return Ok(ResolvedNode::new(kind, false));
    }

    let routing: Routing = get_json(http, &format!("{}/routing", node_url), node_id).await?;
    let state: u64 = get_json(http, &format!("{}/state", node_url), node_id).await?;
    Ok(ResolvedNode::new(
        kind,
        clickable_in_state(node_id, &routing, state)?,
    ))
}

async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    node_id: NodeId,
) -> Result<T, LookupError> {
    let body = http
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| LookupError::Transport {
            node_id,
            reason: e.to_string(),
        })?
        .text()
        .await
        .map_err(|e| LookupError::Transport {
            node_id,
            reason: e.to_string(),
        })?;

    decode(node_id, &body)
}

fn decode<T: DeserializeOwned>(node_id: NodeId, body: &str) -> Result<T, LookupError> {
    serde_json::from_str(body).map_err(|e| LookupError::Malformed {
        node_id,
        reason: e.to_string(),
    })
}

fn parse_kind(node_id: NodeId, raw: &str) -> Result<NodeKind, LookupError> {
    raw.to_lowercase()
        .parse()
        .map_err(|_| LookupError::UnknownKind {
            node_id,
            kind: raw.to_string(),
        })
}

/// A configurable node is clickable unless its current state's click does nothing
fn clickable_in_state(
    node_id: NodeId,
    routing: &Routing,
    state_id: u64,
) -> Result<bool, LookupError> {
    let current = routing.state(state_id).ok_or_else(|| LookupError::Malformed {
        node_id,
        reason: format!("routing has no state {}", state_id),
    })?;
    Ok(current.after_click.as_str() != Some("Nothing"))
}
