//! In-process authorities and snapshot fixtures for exercising the client
//! without a real move-authority process.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ClientError;
use crate::transport::{Authority, CallReply, CallRequest, ReplyReceiver};
use crate::wire::{IndexedSnapshot, ListedSnapshot, WirePiece};

/// Authority stub that replays scripted replies per method and records
/// every call it receives.
///
/// A call with no scripted reply fails as a transport error, so a test
/// that forgets to enqueue fails loudly instead of hanging.
#[derive(Default)]
pub struct ScriptedAuthority {
    replies: Mutex<HashMap<String, VecDeque<CallReply>>>,
    calls: Mutex<Vec<CallRequest>>,
}

impl ScriptedAuthority {
    /// New stub with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw reply for the next call to `method`.
    pub fn enqueue(&self, method: &str, reply: CallReply) {
        self.replies
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Queue a successful reply carrying `value`, encoded the way the
    /// authority encodes responses.
    ///
    /// # Panics
    ///
    /// Panics if `value` fails to encode; fixtures are static test data.
    pub fn enqueue_success<T: Serialize>(&self, method: &str, value: &T) {
        let bytes = rmp_serde::to_vec_named(value).expect("fixture must encode");
        self.enqueue(method, CallReply::Success(bytes));
    }

    /// Every call received so far, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<CallRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Authority for ScriptedAuthority {
    async fn send(&self, call: CallRequest) -> Result<ReplyReceiver, ClientError> {
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&call.method)
            .and_then(VecDeque::pop_front);
        self.calls.lock().unwrap().push(call.clone());

        let reply = reply.ok_or_else(|| ClientError::Transport {
            reason: format!("no scripted reply for {:?}", call.method),
            source: None,
        })?;

        let (tx, rx) = tokio::sync::mpsc::channel(1);
        tx.send(reply).await.map_err(|_| ClientError::Transport {
            reason: "scripted reply channel closed".into(),
            source: None,
        })?;
        Ok(rx)
    }
}

/// The 32 standard starting pieces, rank-major with index 0 = a8.
///
/// Spellings are deliberately the authority's capitalized variant names,
/// so fixtures exercise casing normalization the same way live snapshots
/// do.
const STARTING_PIECES: [(u32, &str, &str); 32] = [
    (0, "Rook", "Black"),
    (1, "Knight", "Black"),
    (2, "Bishop", "Black"),
    (3, "Queen", "Black"),
    (4, "King", "Black"),
    (5, "Bishop", "Black"),
    (6, "Knight", "Black"),
    (7, "Rook", "Black"),
    (8, "Pawn", "Black"),
    (9, "Pawn", "Black"),
    (10, "Pawn", "Black"),
    (11, "Pawn", "Black"),
    (12, "Pawn", "Black"),
    (13, "Pawn", "Black"),
    (14, "Pawn", "Black"),
    (15, "Pawn", "Black"),
    (48, "Pawn", "White"),
    (49, "Pawn", "White"),
    (50, "Pawn", "White"),
    (51, "Pawn", "White"),
    (52, "Pawn", "White"),
    (53, "Pawn", "White"),
    (54, "Pawn", "White"),
    (55, "Pawn", "White"),
    (56, "Rook", "White"),
    (57, "Knight", "White"),
    (58, "Bishop", "White"),
    (59, "Queen", "White"),
    (60, "King", "White"),
    (61, "Bishop", "White"),
    (62, "Knight", "White"),
    (63, "Rook", "White"),
];

fn starting_piece(kind: &str, color: &str, position: Option<u32>) -> WirePiece {
    WirePiece {
        kind: kind.to_string(),
        color: color.to_string(),
        has_moved: false,
        position,
    }
}

/// Starting position as an index-keyed snapshot (shape a).
#[must_use]
pub fn starting_indexed_snapshot() -> IndexedSnapshot {
    STARTING_PIECES
        .iter()
        .map(|&(index, kind, color)| (index.to_string(), starting_piece(kind, color, None)))
        .collect()
}

/// Starting position as a flat piece list (shape b).
#[must_use]
pub fn starting_listed_snapshot() -> ListedSnapshot {
    STARTING_PIECES
        .iter()
        .map(|&(index, kind, color)| starting_piece(kind, color, Some(index)))
        .collect()
}
