use holochain_conductor_api::ExternalApiWireError;
use holochain_serialized_bytes::SerializedBytesError;
use holochain_websocket::WebsocketError;
use holochain_zome_types::codec::CodecError;
use url2::Url2;

/// Anything that can go wrong when talking to a conductor.
///
/// The variants keep three failure classes apart so callers can branch on
/// them: could not reach the conductor at all ([`ConnectionError`]),
/// the connection worked but died or misbehaved underneath a call
/// ([`WebsocketError`], [`DecodeError`]), and the conductor itself
/// rejected the call ([`ExternalApiWireError`]).
///
/// [`ConnectionError`]: ConductorApiError::ConnectionError
/// [`WebsocketError`]: ConductorApiError::WebsocketError
/// [`DecodeError`]: ConductorApiError::DecodeError
/// [`ExternalApiWireError`]: ConductorApiError::ExternalApiWireError
#[derive(Debug, thiserror::Error)]
pub enum ConductorApiError {
    /// No conductor reachable at the given url. The message is stable;
    /// scripts grep for it. The url renders exactly as dialed, without
    /// the synthetic root path the url parser appends.
    #[error("could not connect to holochain conductor, please check that a conductor service is running and available at {}", .0.as_str().trim_end_matches('/'))]
    ConnectionError(Url2),

    /// The underlying websocket connection failed. This includes
    /// [`WebsocketError::Closed`] when the connection goes away with
    /// calls still in flight.
    #[error(transparent)]
    WebsocketError(#[from] WebsocketError),

    /// A response arrived but could not be decoded into the expected
    /// response type.
    #[error("failed to decode conductor response: {0}")]
    DecodeError(#[from] CodecError),

    /// A request failed to serialize before it could be sent.
    #[error("failed to serialize conductor request: {0}")]
    SerializedBytes(#[from] SerializedBytesError),

    /// The conductor handled the request and explicitly rejected it.
    /// This is a normal outcome to branch on, not a transport failure.
    #[error("conductor returned an error: {0:?}")]
    ExternalApiWireError(ExternalApiWireError),
}

/// Result type for conductor api calls.
pub type ConductorApiResult<T> = Result<T, ConductorApiError>;
