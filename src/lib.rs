//! Client-side adapter for a remote chess move authority.
//!
//! The authority process owns every chess rule: legality, check and mate
//! detection, captures, castling, promotion. This crate never second-
//! guesses it. What lives here is the other half of the contract — four
//! typed operations ([`BoardClient::get_board`],
//! [`BoardClient::get_legal_moves`], [`BoardClient::move_piece`],
//! [`BoardClient::restart`]) and the normalization that turns the
//! authority's wire snapshots, in either of its two shapes, into one
//! canonical [`BoardState`] the UI layer can rely on.
//!
//! The shape in use is a wiring-time decision ([`SnapshotFormat`]); the
//! transport itself sits behind the [`transport::Authority`] trait.

pub mod client;
pub mod error;
pub mod testing;
pub mod transport;
pub mod types;
pub mod wire;

pub use client::BoardClient;
pub use error::ClientError;
pub use types::{BoardState, Color, Piece, PieceKind};
pub use wire::SnapshotFormat;
