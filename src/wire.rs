//! Wire-format records exchanged with the move authority.
//!
//! Two generations of the authority are in use and they serialize board
//! snapshots differently: the older one as an index-keyed map of piece
//! records, the newer one as a flat list of records carrying their own
//! `position`. Which one a client speaks is fixed at construction via
//! [`SnapshotFormat`]; the shapes are structurally close enough that
//! sniffing the payload would be guesswork.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One piece record as the authority serializes it.
///
/// `type` and `color` arrive as strings because the authority emits its
/// enum variant names verbatim (`"Pawn"`, `"WHITE"`, ...). Normalization
/// into the closed vocabularies happens in [`Piece::from_wire`].
///
/// [`Piece::from_wire`]: crate::types::Piece::from_wire
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePiece {
    /// Piece type, any casing.
    #[serde(rename = "type")]
    pub kind: String,
    /// Piece color, any casing.
    pub color: String,
    /// Whether the piece has ever been displaced.
    pub has_moved: bool,
    /// Board index, present only in listed snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

/// Snapshot shape (a): board index (as a string key) to piece record.
/// The key is authoritative for position.
pub type IndexedSnapshot = BTreeMap<String, WirePiece>;

/// Snapshot shape (b): flat piece list. Each record's `position` field is
/// authoritative; list order means nothing.
pub type ListedSnapshot = Vec<WirePiece>;

/// Which snapshot shape the authority in use speaks.
///
/// This is a configuration-time choice made when the client is built,
/// matching the authority version the process was wired to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// Index-keyed map snapshots (shape a).
    Indexed,
    /// Flat piece-list snapshots (shape b).
    Listed,
}

/// Argument payload for `get_legal_moves`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LegalMovesRequest {
    /// Board index to query.
    pub index: u32,
}

/// Argument payload for `move_piece`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovePieceRequest {
    /// Index of the piece to move.
    pub index: u32,
    /// Destination index. Legality is the authority's call, not ours.
    pub target: u32,
}
