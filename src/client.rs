//! Client façade over the move authority.
//!
//! Each operation is one round trip: encode the arguments, hand the call
//! to the [`Authority`], await the single reply, decode it, and — for the
//! board-returning calls — assemble the canonical [`BoardState`]. No
//! legality checking, caching or retrying happens here; the authority owns
//! the rules and this side owns only the representation.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use crate::error::ClientError;
use crate::transport::{Authority, CallReply, CallRequest};
use crate::types::BoardState;
use crate::wire::{
    IndexedSnapshot, LegalMovesRequest, ListedSnapshot, MovePieceRequest, SnapshotFormat,
};

/// Client for the four move-authority operations.
///
/// Cloning is cheap — the authority handle is an `Arc`. The client holds
/// no board state of its own; the caller keeps whichever snapshot it
/// considers current.
#[derive(Clone)]
pub struct BoardClient {
    authority: Arc<dyn Authority>,
    format: SnapshotFormat,
}

impl BoardClient {
    /// Build a client over `authority`, decoding snapshots as `format`.
    ///
    /// The format matches the authority version the process was wired to
    /// and never changes for the life of the client.
    pub fn new(authority: Arc<dyn Authority>, format: SnapshotFormat) -> Self {
        Self { authority, format }
    }

    /// Snapshot shape this client was configured for.
    #[must_use]
    pub fn snapshot_format(&self) -> SnapshotFormat {
        self.format
    }

    /// Fetch the current position.
    #[instrument(skip(self))]
    pub async fn get_board(&self) -> Result<BoardState, ClientError> {
        self.fetch_board("get_board", &()).await
    }

    /// Legal destination indices for the piece at `index`.
    ///
    /// An empty square or a piece with nowhere to go yields an empty
    /// vector, not an error. Index range is the authority's to enforce.
    #[instrument(skip(self))]
    pub async fn get_legal_moves(&self, index: u32) -> Result<Vec<u32>, ClientError> {
        self.call("get_legal_moves", &LegalMovesRequest { index })
            .await
    }

    /// Move the piece at `index` to `target` and fetch the resulting
    /// position.
    ///
    /// The returned board already reflects whatever the authority applied
    /// alongside the move (captures, castling rook hops, promotion).
    /// Legality is not re-checked here; an illegal pair comes back as
    /// [`ClientError::Rejected`].
    #[instrument(skip(self))]
    pub async fn move_piece(&self, index: u32, target: u32) -> Result<BoardState, ClientError> {
        self.fetch_board("move_piece", &MovePieceRequest { index, target })
            .await
    }

    /// Reset the game and fetch the fresh starting position.
    #[instrument(skip(self))]
    pub async fn restart(&self) -> Result<BoardState, ClientError> {
        self.fetch_board("restart", &()).await
    }

    async fn fetch_board<Req: Serialize>(
        &self,
        method: &'static str,
        request: &Req,
    ) -> Result<BoardState, ClientError> {
        match self.format {
            SnapshotFormat::Indexed => {
                let raw: IndexedSnapshot = self.call(method, request).await?;
                tracing::debug!(?raw, "snapshot received");
                BoardState::from_indexed(&raw)
            }
            SnapshotFormat::Listed => {
                let raw: ListedSnapshot = self.call(method, request).await?;
                tracing::debug!(?raw, "snapshot received");
                BoardState::from_listed(&raw)
            }
        }
    }

    async fn call<Req, Res>(&self, method: &'static str, request: &Req) -> Result<Res, ClientError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let payload = rmp_serde::to_vec_named(request).map_err(|e| ClientError::Codec {
            reason: format!("failed to encode {method} request: {e}"),
            source: Some(Box::new(e)),
        })?;

        let mut reply_rx = self
            .authority
            .send(CallRequest {
                method: method.to_string(),
                payload,
            })
            .await?;

        let reply = reply_rx
            .recv()
            .await
            .ok_or_else(|| ClientError::Transport {
                reason: "reply channel closed without response".into(),
                source: None,
            })?;

        match reply {
            CallReply::Success(bytes) => {
                rmp_serde::from_slice(&bytes).map_err(|e| ClientError::Codec {
                    reason: format!("failed to decode {method} response: {e}"),
                    source: Some(Box::new(e)),
                })
            }
            CallReply::Failure(message) => Err(ClientError::Rejected { reason: message }),
        }
    }
}
