//! Canonical board representation handed to the UI layer.
//!
//! Everything here is a pure function of its input: normalizing a wire
//! record and assembling a snapshot touch no shared state, so the same
//! input always yields the same [`BoardState`] regardless of call
//! interleaving or wire iteration order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::wire::{IndexedSnapshot, ListedSnapshot, WirePiece};

/// The six piece types, always lowercase on the canonical side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Canonical lowercase spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    fn parse(value: &str) -> Result<Self, ClientError> {
        match value.to_ascii_lowercase().as_str() {
            "pawn" => Ok(Self::Pawn),
            "knight" => Ok(Self::Knight),
            "bishop" => Ok(Self::Bishop),
            "rook" => Ok(Self::Rook),
            "queen" => Ok(Self::Queen),
            "king" => Ok(Self::King),
            _ => Err(ClientError::UnknownPieceKind {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side a piece belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Canonical lowercase spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }

    fn parse(value: &str) -> Result<Self, ClientError> {
        match value.to_ascii_lowercase().as_str() {
            "black" => Ok(Self::Black),
            "white" => Ok(Self::White),
            _ => Err(ClientError::UnknownColor {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized piece. Position is not part of the piece; the board keys
/// pieces by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Piece type, guaranteed in-vocabulary.
    #[serde(rename = "type")]
    pub kind: PieceKind,
    /// Piece color, guaranteed in-vocabulary.
    pub color: Color,
    /// Whether the piece has ever been displaced. The authority consults
    /// this for castling and double-step legality; we just carry it.
    pub has_moved: bool,
}

impl Piece {
    /// Normalize one wire record.
    ///
    /// `type` and `color` are matched against their vocabularies
    /// case-insensitively; anything outside them fails the conversion.
    /// `has_moved` is copied verbatim.
    pub fn from_wire(raw: &WirePiece) -> Result<Self, ClientError> {
        Ok(Self {
            kind: PieceKind::parse(&raw.kind)?,
            color: Color::parse(&raw.color)?,
            has_moved: raw.has_moved,
        })
    }
}

/// Canonical board: a sparse map from board index to the piece occupying
/// that square. Absent index means empty square.
///
/// A `BoardState` is never patched in place. Each successful client call
/// yields a whole new value, so snapshots held by concurrent readers stay
/// untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardState {
    squares: BTreeMap<u32, Piece>,
}

impl BoardState {
    /// Assemble a board from an index-keyed snapshot (shape a).
    ///
    /// Every map key must parse as an integer board index, and two keys
    /// must not land on the same index (`"07"` and `"7"` collide).
    pub fn from_indexed(raw: &IndexedSnapshot) -> Result<Self, ClientError> {
        let mut board = Self::default();
        for (key, record) in raw {
            let index = key
                .parse::<u32>()
                .map_err(|_| ClientError::InvalidIndexKey { key: key.clone() })?;
            board.insert_unique(index, Piece::from_wire(record)?)?;
        }
        Ok(board)
    }

    /// Assemble a board from a flat piece list (shape b).
    ///
    /// Each record must carry its own `position`; two records claiming
    /// the same position fail assembly rather than overwriting.
    pub fn from_listed(raw: &ListedSnapshot) -> Result<Self, ClientError> {
        let mut board = Self::default();
        for record in raw {
            let index = record.position.ok_or(ClientError::MissingPosition)?;
            board.insert_unique(index, Piece::from_wire(record)?)?;
        }
        Ok(board)
    }

    fn insert_unique(&mut self, index: u32, piece: Piece) -> Result<(), ClientError> {
        if self.squares.insert(index, piece).is_some() {
            return Err(ClientError::DuplicateIndex { index });
        }
        Ok(())
    }

    /// Piece occupying `index`, if any.
    #[must_use]
    pub fn piece_at(&self, index: u32) -> Option<&Piece> {
        self.squares.get(&index)
    }

    /// Number of occupied squares.
    #[must_use]
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// True when no square is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Occupied squares in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Piece)> {
        self.squares.iter().map(|(index, piece)| (*index, piece))
    }

    /// Occupied indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.squares.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(kind: &str, color: &str, position: Option<u32>) -> WirePiece {
        WirePiece {
            kind: kind.to_string(),
            color: color.to_string(),
            has_moved: false,
            position,
        }
    }

    #[test]
    fn vocabulary_accepts_any_casing() {
        for spelling in ["rook", "Rook", "ROOK", "rOoK"] {
            let piece = Piece::from_wire(&wire(spelling, "WHITE", None)).unwrap();
            assert_eq!(piece.kind, PieceKind::Rook);
            assert_eq!(piece.color, Color::White);
        }
    }

    #[test]
    fn every_kind_normalizes() {
        let expected = [
            ("Pawn", PieceKind::Pawn),
            ("Knight", PieceKind::Knight),
            ("Bishop", PieceKind::Bishop),
            ("Rook", PieceKind::Rook),
            ("Queen", PieceKind::Queen),
            ("King", PieceKind::King),
        ];
        for (spelling, kind) in expected {
            let piece = Piece::from_wire(&wire(spelling, "black", None)).unwrap();
            assert_eq!(piece.kind, kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = Piece::from_wire(&wire("joker", "white", None)).unwrap_err();
        match err {
            ClientError::UnknownPieceKind { value } => assert_eq!(value, "joker"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_color_is_rejected() {
        let err = Piece::from_wire(&wire("queen", "green", None)).unwrap_err();
        match err {
            ClientError::UnknownColor { value } => assert_eq!(value, "green"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn has_moved_is_copied_verbatim() {
        let mut raw = wire("king", "white", None);
        raw.has_moved = true;
        assert!(Piece::from_wire(&raw).unwrap().has_moved);
        raw.has_moved = false;
        assert!(!Piece::from_wire(&raw).unwrap().has_moved);
    }

    #[test]
    fn indexed_snapshot_keys_become_board_indices() {
        let mut raw = IndexedSnapshot::new();
        raw.insert("4".to_string(), wire("KING", "White", None));
        raw.insert("12".to_string(), wire("pawn", "black", None));

        let board = BoardState::from_indexed(&raw).unwrap();
        assert_eq!(board.indices().collect::<Vec<_>>(), vec![4, 12]);
        assert_eq!(board.piece_at(4).unwrap().kind, PieceKind::King);
        assert_eq!(board.piece_at(12).unwrap().color, Color::Black);
    }

    #[test]
    fn indexed_snapshot_rejects_non_numeric_key() {
        let mut raw = IndexedSnapshot::new();
        raw.insert("four".to_string(), wire("king", "white", None));

        let err = BoardState::from_indexed(&raw).unwrap_err();
        match err {
            ClientError::InvalidIndexKey { key } => assert_eq!(key, "four"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn indexed_snapshot_rejects_keys_colliding_after_parse() {
        // "07" and "7" are distinct map keys but the same board index.
        let mut raw = IndexedSnapshot::new();
        raw.insert("07".to_string(), wire("rook", "white", None));
        raw.insert("7".to_string(), wire("rook", "black", None));

        let err = BoardState::from_indexed(&raw).unwrap_err();
        match err {
            ClientError::DuplicateIndex { index } => assert_eq!(index, 7),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn listed_snapshot_positions_are_authoritative() {
        let raw = vec![
            wire("Rook", "WHITE", Some(0)),
            wire("king", "white", Some(4)),
        ];

        let board = BoardState::from_listed(&raw).unwrap();
        assert_eq!(board.len(), 2);
        let rook = board.piece_at(0).unwrap();
        assert_eq!((rook.kind, rook.color, rook.has_moved), (PieceKind::Rook, Color::White, false));
        let king = board.piece_at(4).unwrap();
        assert_eq!((king.kind, king.color, king.has_moved), (PieceKind::King, Color::White, false));
    }

    #[test]
    fn listed_snapshot_rejects_duplicate_position() {
        let raw = vec![
            wire("knight", "black", Some(7)),
            wire("bishop", "black", Some(7)),
        ];

        let err = BoardState::from_listed(&raw).unwrap_err();
        match err {
            ClientError::DuplicateIndex { index } => assert_eq!(index, 7),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn listed_snapshot_requires_positions() {
        let raw = vec![wire("pawn", "white", None)];
        assert!(matches!(
            BoardState::from_listed(&raw),
            Err(ClientError::MissingPosition)
        ));
    }

    #[test]
    fn empty_snapshots_yield_empty_boards() {
        assert!(BoardState::from_indexed(&IndexedSnapshot::new())
            .unwrap()
            .is_empty());
        assert!(BoardState::from_listed(&Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn canonical_records_normalize_to_themselves() {
        // A canonical piece re-encoded on the wire survives normalization
        // unchanged, so re-assembling an already-canonical snapshot is a no-op.
        let piece = Piece {
            kind: PieceKind::Queen,
            color: Color::Black,
            has_moved: true,
        };
        let bytes = rmp_serde::to_vec_named(&piece).unwrap();
        let raw: WirePiece = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(raw.kind, "queen");
        assert_eq!(raw.color, "black");
        assert_eq!(Piece::from_wire(&raw).unwrap(), piece);
    }
}
