// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live collaboration rooms.
//!
//! Every setlist has a room keyed by its id. A room is `Empty` until a
//! session joins and returns to `Empty` (and is dropped) when its last
//! session leaves. Committed mutations are fanned out to every session in
//! the room except the one that made the change.
//!
//! # Architecture
//!
//! - Joining is not an authorization boundary; callers check Read first
//! - Events are the full mutation payload; nothing is merged or diffed
//! - Rooms keep no history; late joiners fetch current state over HTTP
//! - Fan-out never blocks the committing request; slow sessions lag and
//!   lose events instead
//! - Disconnecting removes a session from every room it joined
//! - A session id only suppresses echo for the actor that opened it

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        Path, State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use gigbook_api::{Intent, MutationResponse, authorize};
use gigbook_domain::Setlist;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, error, info, warn};

use crate::AppState;
use crate::handlers::HttpError;
use crate::session::SessionActor;

/// Maximum number of events buffered per room.
/// Sessions that fall further behind skip the missed events.
const ROOM_BUFFER_SIZE: usize = 64;

/// Identifies one live connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps an existing session id.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Generates a fresh random session id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Events delivered to live sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// Sent once, directly to a session that has just joined.
    Joined {
        /// The room joined.
        setlist_id: String,
        /// The id to send back as `X-Session-Id` on mutations.
        session_id: SessionId,
        /// Sessions in the room, this one included.
        participants: usize,
    },
    /// A mutation was committed by another session.
    SetlistUpdated {
        /// The setlist that changed.
        setlist_id: String,
        /// The version the mutation produced.
        version: u64,
        /// Author of the change.
        changed_by: String,
        /// The committed mutation.
        payload: Box<MutationResponse>,
    },
}

/// Occupancy of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomState {
    /// No sessions.
    Empty,
    /// At least one session.
    Active {
        /// Number of sessions in the room.
        participants: usize,
    },
}

#[derive(Debug, Clone)]
struct RoomMessage {
    origin: Option<SessionId>,
    event: LiveEvent,
}

struct Room {
    tx: broadcast::Sender<RoomMessage>,
    /// Session to the actor that opened it.
    members: HashMap<SessionId, String>,
}

/// A session's view of one room. Skips events the session itself caused.
pub struct RoomSubscription {
    session_id: SessionId,
    rx: broadcast::Receiver<RoomMessage>,
}

impl RoomSubscription {
    /// Waits for the next event from another session.
    ///
    /// Returns `None` once the room is gone.
    pub async fn recv(&mut self) -> Option<LiveEvent> {
        loop {
            match self.rx.recv().await {
                Ok(message) if message.origin.as_ref() == Some(&self.session_id) => {}
                Ok(message) => return Some(message.event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        session_id = %self.session_id,
                        skipped,
                        "Live session lagging; events dropped"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Room membership and fan-out for live sessions.
#[derive(Default)]
pub struct CollaborationHub {
    rooms: Mutex<HashMap<String, Room>>,
}

impl CollaborationHub {
    /// Creates a hub with no rooms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session opened by `actor_id` to a room, creating the room if
    /// it is empty.
    ///
    /// The subscription only sees events emitted after this call.
    pub async fn join(
        &self,
        setlist_id: &str,
        session_id: &SessionId,
        actor_id: &str,
    ) -> RoomSubscription {
        let mut rooms = self.rooms.lock().await;
        let room: &mut Room = rooms.entry(setlist_id.to_string()).or_insert_with(|| {
            let (tx, _rx) = broadcast::channel(ROOM_BUFFER_SIZE);
            Room {
                tx,
                members: HashMap::new(),
            }
        });
        room.members.insert(session_id.clone(), actor_id.to_string());
        debug!(
            setlist_id,
            session_id = %session_id,
            actor = actor_id,
            participants = room.members.len(),
            "Session joined room"
        );
        RoomSubscription {
            session_id: session_id.clone(),
            rx: room.tx.subscribe(),
        }
    }

    /// Removes a session from a room. The room is dropped once empty.
    pub async fn leave(&self, setlist_id: &str, session_id: &SessionId) {
        let mut rooms = self.rooms.lock().await;
        let Some(room) = rooms.get_mut(setlist_id) else {
            return;
        };
        room.members.remove(session_id);
        if room.members.is_empty() {
            rooms.remove(setlist_id);
            debug!(setlist_id, "Room is empty");
        }
    }

    /// Removes a session from every room it joined.
    ///
    /// Returns how many rooms it was removed from.
    pub async fn disconnect(&self, session_id: &SessionId) -> usize {
        let joined: Vec<String> = {
            let rooms = self.rooms.lock().await;
            rooms
                .iter()
                .filter(|(_, room)| room.members.contains_key(session_id))
                .map(|(setlist_id, _)| setlist_id.clone())
                .collect()
        };
        for setlist_id in &joined {
            self.leave(setlist_id, session_id).await;
        }
        joined.len()
    }

    /// Current occupancy of a room.
    pub async fn room_state(&self, setlist_id: &str) -> RoomState {
        let rooms = self.rooms.lock().await;
        rooms
            .get(setlist_id)
            .map_or(RoomState::Empty, |room| RoomState::Active {
                participants: room.members.len(),
            })
    }

    /// Fans an event out to every session in the room except `origin`.
    ///
    /// `origin` is honoured only when the session was opened by `actor_id`;
    /// a session id belonging to another actor is ignored.
    ///
    /// Never blocks and never fails; an empty room drops the event.
    /// Returns the number of intended recipients.
    pub async fn emit(
        &self,
        setlist_id: &str,
        origin: Option<&SessionId>,
        actor_id: &str,
        event: LiveEvent,
    ) -> usize {
        let rooms = self.rooms.lock().await;
        let Some(room) = rooms.get(setlist_id) else {
            debug!(setlist_id, "No live sessions for setlist");
            return 0;
        };
        let origin: Option<&SessionId> = origin.filter(|session_id| {
            match room.members.get(*session_id) {
                Some(owner) if owner != actor_id => {
                    warn!(
                        setlist_id,
                        session_id = %session_id,
                        actor = actor_id,
                        "Ignoring session id opened by another actor"
                    );
                    false
                }
                _ => true,
            }
        });
        let recipients: usize = room
            .members
            .keys()
            .filter(|member| Some(*member) != origin)
            .count();
        if recipients == 0 {
            return 0;
        }
        let message: RoomMessage = RoomMessage {
            origin: origin.cloned(),
            event,
        };
        if room.tx.send(message).is_err() {
            debug!(setlist_id, "Room has no live receivers");
        }
        debug!(setlist_id, recipients, "Fanned out live event");
        recipients
    }
}

/// Handler for GET `/setlists/{id}/live`.
///
/// Requires Read access, then upgrades to a WebSocket and joins the room.
///
/// # Errors
///
/// Returns 404 for an unknown setlist and 403 without Read access.
pub async fn handle_live(
    AxumState(app_state): AxumState<AppState>,
    Path(setlist_id): Path<String>,
    session: SessionActor,
    ws: WebSocketUpgrade,
) -> Result<Response, HttpError> {
    let setlist: Setlist = {
        let mut persistence = app_state.persistence.lock().await;
        gigbook_api::load_setlist(&mut persistence, &setlist_id)?
    };
    authorize(
        &app_state.bands,
        &setlist.access_scope(),
        &setlist_id,
        &session.actor,
        Intent::Read,
        "join_live",
    )
    .await
    .map_err(gigbook_api::ApiError::from)?;

    let hub: Arc<CollaborationHub> = Arc::clone(&app_state.hub);
    let actor_id: String = session.actor.id;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, hub, setlist_id, actor_id)))
}

/// Runs one live connection until either side closes it.
async fn handle_socket(
    socket: WebSocket,
    hub: Arc<CollaborationHub>,
    setlist_id: String,
    actor_id: String,
) {
    let session_id: SessionId = SessionId::generate();
    info!(
        setlist_id = %setlist_id,
        actor = %actor_id,
        session_id = %session_id,
        "Live session connected"
    );

    let (mut sender, mut receiver) = socket.split();
    let mut subscription: RoomSubscription = hub.join(&setlist_id, &session_id, &actor_id).await;

    let participants: usize = match hub.room_state(&setlist_id).await {
        RoomState::Active { participants } => participants,
        RoomState::Empty => 0,
    };
    let joined: LiveEvent = LiveEvent::Joined {
        setlist_id: setlist_id.clone(),
        session_id: session_id.clone(),
        participants,
    };

    let confirmed: bool = match serde_json::to_string(&joined) {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            error!(?e, "Failed to serialize join confirmation");
            false
        }
    };

    if confirmed {
        let mut send_task = tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(?e, "Failed to serialize live event");
                    }
                }
            }
        });

        // Edits arrive over HTTP; inbound frames are only watched for close.
        let mut recv_task = tokio::spawn(async move {
            while let Some(msg) = receiver.next().await {
                match msg {
                    Ok(Message::Text(_) | Message::Binary(_)) => {
                        warn!("Received unexpected message from live client, ignoring");
                    }
                    Ok(Message::Close(_)) => {
                        debug!("Live client sent close frame");
                        break;
                    }
                    Ok(Message::Ping(_) | Message::Pong(_)) => {}
                    Err(e) => {
                        error!(?e, "WebSocket receive error");
                        break;
                    }
                }
            }
        });

        tokio::select! {
            _ = &mut send_task => {
                recv_task.abort();
            }
            _ = &mut recv_task => {
                send_task.abort();
            }
        }
    } else {
        warn!(session_id = %session_id, "Failed to send join confirmation");
    }

    hub.disconnect(&session_id).await;
    info!(setlist_id = %setlist_id, session_id = %session_id, "Live session disconnected");
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use std::time::Duration;
    use time::macros::datetime;

    fn update(setlist_id: &str, version: u64) -> LiveEvent {
        LiveEvent::SetlistUpdated {
            setlist_id: setlist_id.to_string(),
            version,
            changed_by: String::from("alice"),
            payload: Box::new(MutationResponse {
                setlist_id: setlist_id.to_string(),
                version,
                changed_by: String::from("alice"),
                action: String::from("AddSong"),
                description: String::from("added 'Wild Rover' to Set 1"),
                setlist: gigbook_api::SetlistResponse {
                    setlist_id: setlist_id.to_string(),
                    title: String::from("Gig"),
                    description: String::new(),
                    performance_date: None,
                    venue: String::new(),
                    visibility: String::from("private"),
                    owner_id: String::from("alice"),
                    band_id: None,
                    version,
                    total_duration_seconds: 150,
                    total_duration: String::from("2:30"),
                    sets: Vec::new(),
                    created_at: datetime!(2026-05-01 19:30 UTC),
                    updated_at: datetime!(2026-05-01 19:45 UTC),
                },
            }),
        }
    }

    async fn nothing_arrives(subscription: &mut RoomSubscription) -> bool {
        tokio::time::timeout(Duration::from_millis(50), subscription.recv())
            .await
            .is_err()
    }

    #[tokio::test]
    async fn test_sender_is_excluded_from_fan_out() {
        let hub: CollaborationHub = CollaborationHub::new();
        let a: SessionId = SessionId::new("session-a");
        let b: SessionId = SessionId::new("session-b");
        let mut a_sub: RoomSubscription = hub.join("setlist-1", &a, "alice").await;
        let mut b_sub: RoomSubscription = hub.join("setlist-1", &b, "bob").await;

        let recipients: usize = hub
            .emit("setlist-1", Some(&a), "alice", update("setlist-1", 2))
            .await;

        assert_eq!(recipients, 1);
        match b_sub.recv().await {
            Some(LiveEvent::SetlistUpdated { version, .. }) => assert_eq!(version, 2),
            other => panic!("Expected SetlistUpdated, got {other:?}"),
        }
        assert!(nothing_arrives(&mut b_sub).await);
        assert!(nothing_arrives(&mut a_sub).await);
    }

    #[tokio::test]
    async fn test_session_id_of_another_actor_does_not_mute_it() {
        let hub: CollaborationHub = CollaborationHub::new();
        let a: SessionId = SessionId::new("session-a");
        let b: SessionId = SessionId::new("session-b");
        let mut a_sub: RoomSubscription = hub.join("setlist-1", &a, "alice").await;
        let mut b_sub: RoomSubscription = hub.join("setlist-1", &b, "bob").await;

        let recipients: usize = hub
            .emit("setlist-1", Some(&a), "mallory", update("setlist-1", 2))
            .await;

        assert_eq!(recipients, 2);
        assert!(matches!(
            a_sub.recv().await,
            Some(LiveEvent::SetlistUpdated { version: 2, .. })
        ));
        assert!(matches!(
            b_sub.recv().await,
            Some(LiveEvent::SetlistUpdated { version: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        let hub: CollaborationHub = CollaborationHub::new();
        let a: SessionId = SessionId::new("session-a");
        let c: SessionId = SessionId::new("session-c");
        hub.join("setlist-1", &a, "alice").await;
        let mut c_sub: RoomSubscription = hub.join("setlist-2", &c, "carol").await;

        hub.emit("setlist-1", Some(&a), "alice", update("setlist-1", 2)).await;

        assert!(nothing_arrives(&mut c_sub).await);
    }

    #[tokio::test]
    async fn test_room_lifecycle() {
        let hub: CollaborationHub = CollaborationHub::new();
        let a: SessionId = SessionId::new("session-a");
        let b: SessionId = SessionId::new("session-b");

        assert_eq!(hub.room_state("setlist-1").await, RoomState::Empty);
        hub.join("setlist-1", &a, "alice").await;
        hub.join("setlist-1", &b, "bob").await;
        assert_eq!(
            hub.room_state("setlist-1").await,
            RoomState::Active { participants: 2 }
        );
        hub.leave("setlist-1", &a).await;
        assert_eq!(
            hub.room_state("setlist-1").await,
            RoomState::Active { participants: 1 }
        );
        hub.leave("setlist-1", &b).await;
        assert_eq!(hub.room_state("setlist-1").await, RoomState::Empty);
    }

    #[tokio::test]
    async fn test_disconnect_leaves_every_room() {
        let hub: CollaborationHub = CollaborationHub::new();
        let a: SessionId = SessionId::new("session-a");
        let b: SessionId = SessionId::new("session-b");
        hub.join("setlist-1", &a, "alice").await;
        hub.join("setlist-2", &a, "alice").await;
        hub.join("setlist-2", &b, "bob").await;

        assert_eq!(hub.disconnect(&a).await, 2);

        assert_eq!(hub.room_state("setlist-1").await, RoomState::Empty);
        assert_eq!(
            hub.room_state("setlist-2").await,
            RoomState::Active { participants: 1 }
        );
        assert_eq!(hub.disconnect(&a).await, 0);
    }

    #[tokio::test]
    async fn test_late_joiner_gets_no_history() {
        let hub: CollaborationHub = CollaborationHub::new();
        let a: SessionId = SessionId::new("session-a");
        let b: SessionId = SessionId::new("session-b");
        let late: SessionId = SessionId::new("session-late");
        hub.join("setlist-1", &a, "alice").await;
        hub.join("setlist-1", &b, "bob").await;
        hub.emit("setlist-1", Some(&a), "alice", update("setlist-1", 2)).await;

        let mut late_sub: RoomSubscription = hub.join("setlist-1", &late, "dave").await;

        assert!(nothing_arrives(&mut late_sub).await);
    }

    #[tokio::test]
    async fn test_emit_without_listeners_is_dropped() {
        let hub: CollaborationHub = CollaborationHub::new();
        let a: SessionId = SessionId::new("session-a");

        assert_eq!(hub.emit("setlist-1", None, "alice", update("setlist-1", 2)).await, 0);
        hub.join("setlist-1", &a, "alice").await;
        assert_eq!(hub.emit("setlist-1", Some(&a), "alice", update("setlist-1", 3)).await, 0);
        assert_eq!(hub.emit("setlist-1", None, "alice", update("setlist-1", 4)).await, 1);
    }

    #[test]
    fn test_event_serialization() {
        let event: LiveEvent = LiveEvent::Joined {
            setlist_id: String::from("setlist-1"),
            session_id: SessionId::new("session-a"),
            participants: 1,
        };

        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "joined");
        assert_eq!(json["session_id"], "session-a");
        assert_eq!(
            serde_json::to_value(update("setlist-1", 7)).unwrap()["type"],
            "setlist_updated"
        );
    }
}
