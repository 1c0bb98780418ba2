//! Change-notification messages pushed over the workspace WebSocket.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text frame sent by the client to keep the socket alive.
pub const KEEPALIVE_PING: &str = "ping";
/// Text frame the server answers a ping with.
pub const KEEPALIVE_PONG: &str = "pong";
/// Interval between keep-alive pings.
pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Filesystem change kind reported by the watcher.
pub enum FileChangeKind {
    /// A path was created.
    Created,
    /// A path's content changed.
    Modified,
    /// A path was removed.
    Deleted,
    /// A path was renamed or moved.
    Moved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Change notification payload.
pub struct FileChangeEvent {
    /// What happened.
    pub event: FileChangeKind,
    /// Path relative to the workspace root, when reported.
    #[serde(default)]
    pub path: Option<String>,
    /// Whether the changed path is a directory, when reported.
    #[serde(default)]
    pub is_directory: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded server frame.
pub enum ServerMessage {
    /// Keep-alive reply.
    Pong,
    /// Filesystem change notification.
    Change(FileChangeEvent),
}

impl ServerMessage {
    /// Returns `true` when the frame should invalidate the visible listing.
    pub fn invalidates_listing(&self) -> bool {
        matches!(self, Self::Change(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure decoding a server frame.
pub enum ServerMessageError {
    /// The frame was not a JSON object with an `event` tag.
    #[error("malformed change message: {0}")]
    Json(String),
    /// The `event` tag is not a known change kind.
    #[error("unknown change event `{0}`")]
    UnknownEvent(String),
}

#[derive(Deserialize)]
struct RawEnvelope {
    event: String,
}

/// Decodes one text frame from the change feed.
///
/// # Errors
///
/// Returns [`ServerMessageError::Json`] for frames that are not an `{ "event": ... }` object and
/// [`ServerMessageError::UnknownEvent`] for unrecognized tags.
pub fn parse_server_message(frame: &str) -> Result<ServerMessage, ServerMessageError> {
    if frame == KEEPALIVE_PONG {
        return Ok(ServerMessage::Pong);
    }
    let envelope: RawEnvelope =
        serde_json::from_str(frame).map_err(|e| ServerMessageError::Json(e.to_string()))?;
    match serde_json::from_str::<FileChangeEvent>(frame) {
        Ok(event) => Ok(ServerMessage::Change(event)),
        Err(_) => Err(ServerMessageError::UnknownEvent(envelope.event)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn pong_is_recognized_verbatim() {
        assert_eq!(parse_server_message("pong"), Ok(ServerMessage::Pong));
        assert!(!ServerMessage::Pong.invalidates_listing());
    }

    #[test]
    fn change_events_decode_with_optional_fields() {
        let msg = parse_server_message(r#"{"event":"modified","path":"a.txt","is_directory":false}"#)
            .expect("decode");
        assert_eq!(
            msg,
            ServerMessage::Change(FileChangeEvent {
                event: FileChangeKind::Modified,
                path: Some("a.txt".to_string()),
                is_directory: Some(false),
            })
        );
        assert!(msg.invalidates_listing());

        for tag in ["created", "deleted", "moved"] {
            let frame = format!(r#"{{"event":"{tag}"}}"#);
            assert!(parse_server_message(&frame)
                .expect("decode")
                .invalidates_listing());
        }
    }

    #[test]
    fn unknown_and_malformed_frames_are_typed_errors() {
        assert_eq!(
            parse_server_message(r#"{"event":"unknown"}"#),
            Err(ServerMessageError::UnknownEvent("unknown".to_string()))
        );
        assert!(matches!(
            parse_server_message("not json"),
            Err(ServerMessageError::Json(_))
        ));
        assert!(matches!(
            parse_server_message(r#"{"path":"a"}"#),
            Err(ServerMessageError::Json(_))
        ));
    }
}
