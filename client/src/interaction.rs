use trackside_shared::{ClickModifier, ClientPacket, DVec2};

use crate::{client_config::ClientConfig, frame::Frame};

/// Packets for a click at `screen`. Interactable nodes take precedence: if
/// any is hit, trains under the cursor are ignored. Every train within the
/// sprite's half-diagonal of the click is reported.
pub fn click_packets(
    frame: &Frame,
    config: &ClientConfig,
    screen: DVec2,
    modifier: ClickModifier,
) -> Vec<ClientPacket> {
    let world = frame.origin.to_world(screen);

    let switches: Vec<ClientPacket> = frame
        .nodes
        .iter()
        .filter(|node| node.interactable)
        .filter(|node| node.position.distance(world) <= config.node_radius)
        .map(|node| ClientPacket::Switch(node.id, modifier))
        .collect();
    if !switches.is_empty() {
        return switches;
    }

    let radius = config.train_hit_radius();
    frame
        .trains
        .iter()
        .filter(|train| train.pose.position.distance(world) <= radius)
        .map(|train| ClientPacket::Click(train.id, modifier))
        .collect()
}
