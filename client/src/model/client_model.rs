use std::collections::BTreeMap;

use log::{debug, warn};

use trackside_shared::{
    DVec2, EffectSerial, NodeId, RemovalKind, ServerPacket, TrackRecord, TrainId, TrainRecord,
    WallClock,
};

use crate::{
    client_config::TrackSyncPolicy,
    error::{ClientError, DesyncError},
    model::{
        effect::{Effect, EffectKind, TrainSnapshot},
        node::Node,
        path_registry::{PathRegistry, Track},
        train::Train,
    },
    motion,
    node_lookup::{LookupTicket, NodeLookupResponse},
};

/// Everything the server has told this client: tracks, trains, junction
/// nodes, plus the removal effects still animating.
///
/// Packet handlers are the only writers apart from the lazy clocks the frame
/// loop sets. Every handler either applies fully or leaves the model as it
/// was.
#[derive(Debug)]
pub struct ClientModel {
    pub(crate) tracks: PathRegistry,
    pub(crate) trains: BTreeMap<TrainId, Train>,
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) effects: BTreeMap<EffectSerial, Effect>,
    track_sync: TrackSyncPolicy,
    next_serial: EffectSerial,
    next_generation: u64,
}

impl ClientModel {
    pub fn new(track_sync: TrackSyncPolicy) -> Self {
        Self {
            tracks: PathRegistry::new(),
            trains: BTreeMap::new(),
            nodes: BTreeMap::new(),
            effects: BTreeMap::new(),
            track_sync,
            next_serial: 0,
            next_generation: 0,
        }
    }

    /// Full resync. Serials and lookup generations keep counting so nothing
    /// from before the reset can be mistaken for something after it.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.trains.clear();
        self.nodes.clear();
        self.effects.clear();
    }

    /// Applies one data channel packet. Returns a lookup to start when a node
    /// was announced.
    pub fn apply(
        &mut self,
        packet: ServerPacket,
        now: WallClock,
    ) -> Result<Option<LookupTicket>, ClientError> {
        debug!("Applying {} packet", packet.kind());
        match packet {
            ServerPacket::Train(record) => {
                self.upsert_train(record);
                Ok(None)
            }
            ServerPacket::Track(records) => {
                self.sync_tracks(records)?;
                Ok(None)
            }
            ServerPacket::Node(id, coord) => Ok(Some(self.upsert_node(id, coord.into()))),
            ServerPacket::Nuke(id) => {
                if !self.nuke_node(id) {
                    debug!("Nuke for unknown node {}", id);
                }
                Ok(None)
            }
            ServerPacket::Remove(id, kind) => {
                self.remove_train(id, kind, now)?;
                Ok(None)
            }
        }
    }

    pub fn upsert_train(&mut self, record: TrainRecord) {
        match self.trains.get_mut(&record.id) {
            Some(train) => train.update(record),
            None => {
                self.trains.insert(record.id, Train::from_record(record));
            }
        }
    }

    /// Every row is validated before any is applied
    pub fn sync_tracks(&mut self, records: Vec<TrackRecord>) -> Result<(), ClientError> {
        let tracks = records
            .into_iter()
            .map(Track::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        match self.track_sync {
            TrackSyncPolicy::Upsert => {
                for track in tracks {
                    self.tracks.insert(track);
                }
            }
            TrackSyncPolicy::Replace => self.tracks.replace_all(tracks),
        }
        Ok(())
    }

    /// Creates or moves a node. The returned ticket is the only lookup whose
    /// answer will be merged into it.
    pub fn upsert_node(&mut self, id: NodeId, position: DVec2) -> LookupTicket {
        self.next_generation += 1;
        let generation = self.next_generation;

        match self.nodes.get_mut(&id) {
            Some(node) => node.relocate(position, generation),
            None => {
                self.nodes.insert(id, Node::new(id, position, generation));
            }
        }
        LookupTicket {
            node_id: id,
            generation,
        }
    }

    pub fn nuke_node(&mut self, id: NodeId) -> bool {
        self.nodes.remove(&id).is_some()
    }

    /// Deletes the train and, unless the removal is silent, starts its effect
    /// from the pose it has at `now`.
    pub fn remove_train(
        &mut self,
        id: TrainId,
        kind: RemovalKind,
        now: WallClock,
    ) -> Result<Option<EffectSerial>, ClientError> {
        let Some(mut train) = self.trains.remove(&id) else {
            return Err(DesyncError::UnknownTrain { train_id: id }.into());
        };
        let Some(effect_kind) = EffectKind::from_removal(kind) else {
            return Ok(None);
        };
        let Some(track) = self.tracks.get(train.track_id()) else {
            return Err(ClientError::DanglingReference {
                entity: "train",
                id,
                missing: "track",
                missing_id: train.track_id(),
            });
        };

        let exit = motion::evaluate(&mut train.kinematics, track, now)?;
        let serial = self.next_serial;
        self.next_serial += 1;
        self.effects.insert(
            serial,
            Effect::spawn(serial, effect_kind, TrainSnapshot::capture(train, exit)),
        );
        Ok(Some(serial))
    }

    /// Merges a lookup answer. Returns whether the node changed.
    pub fn merge_node_capability(&mut self, response: NodeLookupResponse) -> bool {
        let ticket = response.ticket;
        let Some(node) = self.nodes.get_mut(&ticket.node_id) else {
            debug!("Dropping lookup for vanished node {}", ticket.node_id);
            return false;
        };
        if node.generation() != ticket.generation {
            debug!("Dropping stale lookup for node {}", ticket.node_id);
            return false;
        }

        match response.result {
            Ok(resolved) => {
                node.resolve(resolved);
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    pub fn tracks(&self) -> &PathRegistry {
        &self.tracks
    }

    pub fn train(&self, id: TrainId) -> Option<&Train> {
        self.trains.get(&id)
    }

    pub fn trains(&self) -> impl Iterator<Item = &Train> {
        self.trains.values()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.values()
    }

    pub fn effect(&self, serial: EffectSerial) -> Option<&Effect> {
        self.effects.get(&serial)
    }

    pub fn track_sync(&self) -> TrackSyncPolicy {
        self.track_sync
    }
}
