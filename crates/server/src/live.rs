// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live notification delivery over WebSocket.
//!
//! Each connected client registers under its user id and receives the
//! notifications addressed to that user. Delivery is at-most-once: a
//! notification for a user with no open connection, or for a connection
//! whose buffer is full, is dropped and logged. Nothing here feeds back
//! into allocation or request handling.

use axum::{
    extract::{
        Query, State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::{IntoResponse, Response},
};
use futures::{SinkExt, stream::StreamExt};
use parkstack_api::{AuthenticatedActor, AuthenticationService};
use parkstack_domain::UserId;
use parkstack_events::Notification;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::{AppState, HttpError};

/// Default number of undelivered notifications buffered per connection.
pub const DEFAULT_LIVE_BUFFER: usize = 64;

/// Messages written to a live connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveMessage {
    /// Sent once when the connection is registered.
    Connected {
        user_id: UserId,
        /// Server timestamp (RFC 3339).
        timestamp: String,
    },
    /// A notification addressed to the connected user.
    Notification { notification: Notification },
}

/// A registered connection's receiving half.
pub struct LiveConnection {
    pub user_id: UserId,
    pub connection_id: u64,
    pub receiver: mpsc::Receiver<Notification>,
}

/// Process-local map of open connections, keyed by user id.
///
/// A user may hold several connections; each receives every notification
/// addressed to that user.
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<UserId, Vec<(u64, mpsc::Sender<Notification>)>>>,
    next_id: AtomicU64,
    buffer: usize,
}

impl ConnectionRegistry {
    /// Creates an empty registry whose connections buffer `buffer`
    /// notifications each.
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            buffer: buffer.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<UserId, Vec<(u64, mpsc::Sender<Notification>)>>> {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens a connection for `user_id`.
    pub fn register(&self, user_id: UserId) -> LiveConnection {
        let connection_id: u64 = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.buffer);

        let mut connections = self.lock();
        let entry: &mut Vec<(u64, mpsc::Sender<Notification>)> =
            connections.entry(user_id).or_default();
        entry.push((connection_id, tx));
        info!(user_id = %user_id, connection_id, open = entry.len(), "Registered live connection");

        LiveConnection {
            user_id,
            connection_id,
            receiver: rx,
        }
    }

    /// Closes one connection. Unknown connections are ignored.
    pub fn deregister(&self, user_id: UserId, connection_id: u64) {
        let mut connections = self.lock();
        if let Some(entry) = connections.get_mut(&user_id) {
            entry.retain(|(id, _)| *id != connection_id);
            if entry.is_empty() {
                connections.remove(&user_id);
            }
        }
        info!(user_id = %user_id, connection_id, "Deregistered live connection");
    }

    /// Number of open connections for `user_id`.
    #[must_use]
    pub fn connection_count(&self, user_id: UserId) -> usize {
        self.lock().get(&user_id).map_or(0, Vec::len)
    }

    /// Hands `notification` to every connection of its recipient.
    ///
    /// Returns the number of connections that accepted it.
    pub fn deliver(&self, notification: &Notification) -> usize {
        let recipient: UserId = notification.recipient;
        let mut connections = self.lock();

        let Some(entry) = connections.get_mut(&recipient) else {
            debug!(
                recipient = %recipient,
                kind = %notification.kind,
                "No live connection; notification dropped"
            );
            return 0;
        };

        let mut delivered: usize = 0;
        entry.retain(|(connection_id, tx)| match tx.try_send(notification.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(
                    recipient = %recipient,
                    connection_id,
                    kind = %notification.kind,
                    "Live buffer full; notification dropped"
                );
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                debug!(recipient = %recipient, connection_id, "Pruning closed live connection");
                false
            }
        });
        if entry.is_empty() {
            connections.remove(&recipient);
        }

        delivered
    }

    /// Delivers each notification in order.
    pub fn deliver_all(&self, notifications: &[Notification]) {
        for notification in notifications {
            self.deliver(notification);
        }
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_LIVE_BUFFER)
    }
}

/// Query parameters for `GET /live`.
#[derive(Debug, Deserialize)]
pub struct LiveQuery {
    pub user_id: i64,
}

/// Upgrades to a WebSocket streaming the user's notifications.
///
/// The user must exist.
pub async fn live_notifications_handler(
    ws: WebSocketUpgrade,
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<LiveQuery>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor =
        AuthenticationService::authenticate(&mut persistence, query.user_id)
            .map_err(parkstack_api::ApiError::from)?;
    drop(persistence);

    let registry: Arc<ConnectionRegistry> = Arc::clone(&app_state.registry);
    let user_id: UserId = actor.user_id();
    Ok(ws
        .on_upgrade(move |socket| handle_socket(socket, registry, user_id))
        .into_response())
}

/// Streams notifications to one client until either side closes.
async fn handle_socket(socket: WebSocket, registry: Arc<ConnectionRegistry>, user_id: UserId) {
    let LiveConnection {
        connection_id,
        mut receiver,
        ..
    } = registry.register(user_id);
    let (mut sender, mut incoming) = socket.split();

    let connected: LiveMessage = LiveMessage::Connected {
        user_id,
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!(user_id = %user_id, "Failed to send connection confirmation");
        registry.deregister(user_id, connection_id);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(notification) = receiver.recv().await {
            let message: LiveMessage = LiveMessage::Notification { notification };
            match serde_json::to_string(&message) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize notification");
                }
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = incoming.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
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

    registry.deregister(user_id, connection_id);
}
