//! The request primitive connecting the client to the move authority.
//!
//! Channel setup, framing and process wiring live behind [`Authority`];
//! the client only builds calls and awaits exactly one reply per call.

use async_trait::async_trait;

use crate::error::ClientError;

/// One request to the move authority: a method name plus its
/// MessagePack-encoded argument payload.
#[derive(Clone, Debug)]
pub struct CallRequest {
    /// Remote method name (`get_board`, `get_legal_moves`, `move_piece`,
    /// `restart`).
    pub method: String,
    /// Encoded arguments; argument-less methods send an encoded unit.
    pub payload: Vec<u8>,
}

/// Terminal outcome of one call, as delivered on the reply channel.
#[derive(Clone, Debug)]
pub enum CallReply {
    /// MessagePack-encoded response payload.
    Success(Vec<u8>),
    /// The authority refused the request. Carries its message verbatim.
    Failure(String),
}

/// Receiving half of the reply channel for a single call. The transport
/// sends exactly one [`CallReply`] and then drops the sender.
pub type ReplyReceiver = tokio::sync::mpsc::Receiver<CallReply>;

/// Asynchronous request/response channel to the move-authority process.
///
/// Implementations may interleave concurrently outstanding calls however
/// they like; no ordering is promised between two calls issued without
/// awaiting the first.
#[async_trait]
pub trait Authority: Send + Sync {
    /// Dispatch one call and return the channel its reply will arrive on.
    async fn send(&self, call: CallRequest) -> Result<ReplyReceiver, ClientError>;
}
