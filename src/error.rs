use thiserror::Error;

/// Boxed error source carried alongside transport and codec failures.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the four client operations.
///
/// Every failure is terminal for the call that produced it: the client
/// performs no retries, and a failed call never yields a partial board.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be delivered or the reply channel died.
    #[error("transport failure: {reason}")]
    Transport {
        /// What went wrong at the channel level.
        reason: String,
        /// Underlying transport error, when one exists.
        #[source]
        source: Option<BoxedError>,
    },
    /// The authority rejected the call (illegal index, move on an empty
    /// square, ...). The message is the authority's, passed through verbatim.
    #[error("authority rejected the request: {reason}")]
    Rejected {
        /// The authority's rejection message.
        reason: String,
    },
    /// A payload failed to encode or a reply failed to decode.
    #[error("codec failure: {reason}")]
    Codec {
        /// What failed to round-trip.
        reason: String,
        /// The serde error that triggered this.
        #[source]
        source: Option<BoxedError>,
    },
    /// A wire piece carried a `type` outside the six-symbol vocabulary.
    #[error("unknown piece type {value:?}")]
    UnknownPieceKind {
        /// The offending wire value.
        value: String,
    },
    /// A wire piece carried a `color` other than black or white.
    #[error("unknown piece color {value:?}")]
    UnknownColor {
        /// The offending wire value.
        value: String,
    },
    /// An index-keyed snapshot contained a key that does not parse as a
    /// board index.
    #[error("snapshot key {key:?} is not a board index")]
    InvalidIndexKey {
        /// The offending map key.
        key: String,
    },
    /// Two records in one snapshot claimed the same square.
    #[error("two pieces claim board index {index}")]
    DuplicateIndex {
        /// The contested board index.
        index: u32,
    },
    /// A record in a listed snapshot carried no `position` field.
    #[error("piece record in a listed snapshot has no position")]
    MissingPosition,
}
