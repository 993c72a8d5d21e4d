//! Socket.IO v4 text frames over Engine.IO v4
//!
//! Only the subset a listening client needs: the handshake, heartbeats,
//! namespace connect/disconnect and event packets. Binary attachments and
//! acknowledgements are not used by the order events.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("Empty frame")]
    Empty,

    #[error("Unknown Engine.IO packet type {0:?}")]
    UnknownEngineType(char),

    #[error("Unknown Socket.IO packet type {0:?}")]
    UnknownSocketType(char),

    #[error("Malformed event packet: {0}")]
    MalformedEvent(String),
}

/// Socket.IO packet carried inside an Engine.IO message.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    /// Namespace connect (client request, or server confirmation with a session payload)
    Connect(Option<Value>),
    Disconnect,
    Event { name: String, payload: Value },
    Ack,
    ConnectError(Option<Value>),
}

/// Engine.IO transport packet.
#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    /// Handshake, carrying session id and heartbeat settings
    Open(Value),
    Close,
    Ping(String),
    Pong(String),
    Message(SocketPacket),
    Upgrade,
    Noop,
}

/// Frame the client sends to join the default namespace.
pub fn connect_frame() -> String {
    "40".to_string()
}

/// Heartbeat answer for a server ping.
pub fn pong_frame(data: &str) -> String {
    format!("3{}", data)
}

pub fn decode_frame(frame: &str) -> Result<EnginePacket, FrameError> {
    let mut chars = frame.chars();
    let kind = chars.next().ok_or(FrameError::Empty)?;
    let rest = chars.as_str();
    match kind {
        '0' => Ok(EnginePacket::Open(parse_optional_json(rest).unwrap_or(Value::Null))),
        '1' => Ok(EnginePacket::Close),
        '2' => Ok(EnginePacket::Ping(rest.to_string())),
        '3' => Ok(EnginePacket::Pong(rest.to_string())),
        '4' => decode_socket_packet(rest).map(EnginePacket::Message),
        '5' => Ok(EnginePacket::Upgrade),
        '6' => Ok(EnginePacket::Noop),
        other => Err(FrameError::UnknownEngineType(other)),
    }
}

fn decode_socket_packet(packet: &str) -> Result<SocketPacket, FrameError> {
    let mut chars = packet.chars();
    let kind = chars.next().ok_or(FrameError::Empty)?;
    let body = strip_namespace(chars.as_str());
    match kind {
        '0' => Ok(SocketPacket::Connect(parse_optional_json(body))),
        '1' => Ok(SocketPacket::Disconnect),
        '2' => decode_event(body),
        '3' => Ok(SocketPacket::Ack),
        '4' => Ok(SocketPacket::ConnectError(parse_optional_json(body))),
        other => Err(FrameError::UnknownSocketType(other)),
    }
}

/// Drops a leading `/namespace,` if present.
fn strip_namespace(body: &str) -> &str {
    if body.starts_with('/') {
        match body.find(',') {
            Some(comma) => &body[comma + 1..],
            None => "",
        }
    } else {
        body
    }
}

fn parse_optional_json(body: &str) -> Option<Value> {
    if body.is_empty() {
        None
    } else {
        serde_json::from_str(body).ok()
    }
}

fn decode_event(body: &str) -> Result<SocketPacket, FrameError> {
    // An acknowledgement id may precede the argument array.
    let args = body.trim_start_matches(|c: char| c.is_ascii_digit());
    let value: Value =
        serde_json::from_str(args).map_err(|e| FrameError::MalformedEvent(e.to_string()))?;
    let Value::Array(mut items) = value else {
        return Err(FrameError::MalformedEvent(
            "arguments are not an array".to_string(),
        ));
    };
    if items.is_empty() {
        return Err(FrameError::MalformedEvent("missing event name".to_string()));
    }
    let name = match items.remove(0) {
        Value::String(name) => name,
        _ => {
            return Err(FrameError::MalformedEvent(
                "event name is not a string".to_string(),
            ));
        }
    };
    let payload = if items.is_empty() {
        Value::Null
    } else {
        items.remove(0)
    };
    Ok(SocketPacket::Event { name, payload })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_handshake_and_heartbeats() {
        let open = decode_frame(r#"0{"sid":"abc","pingInterval":25000,"pingTimeout":20000}"#);
        assert_eq!(
            open,
            Ok(EnginePacket::Open(
                json!({"sid": "abc", "pingInterval": 25000, "pingTimeout": 20000})
            ))
        );
        assert_eq!(decode_frame("2"), Ok(EnginePacket::Ping(String::new())));
        assert_eq!(decode_frame("2probe"), Ok(EnginePacket::Ping("probe".to_string())));
        assert_eq!(decode_frame("1"), Ok(EnginePacket::Close));
        assert_eq!(pong_frame("probe"), "3probe");
    }

    #[test]
    fn decodes_namespace_connect_confirmation() {
        assert_eq!(
            decode_frame(r#"40{"sid":"xyz"}"#),
            Ok(EnginePacket::Message(SocketPacket::Connect(Some(
                json!({"sid": "xyz"})
            ))))
        );
        assert_eq!(
            decode_frame("41"),
            Ok(EnginePacket::Message(SocketPacket::Disconnect))
        );
    }

    #[test]
    fn decodes_event_with_payload() {
        let frame = r#"42["order:new",{"_id":"o1","status":"pending"}]"#;
        assert_eq!(
            decode_frame(frame),
            Ok(EnginePacket::Message(SocketPacket::Event {
                name: "order:new".to_string(),
                payload: json!({"_id": "o1", "status": "pending"}),
            }))
        );
    }

    #[test]
    fn decodes_event_with_namespace_and_ack_id() {
        let frame = r#"42/kitchen,17["order:update",{"_id":"o2"}]"#;
        assert_eq!(
            decode_frame(frame),
            Ok(EnginePacket::Message(SocketPacket::Event {
                name: "order:update".to_string(),
                payload: json!({"_id": "o2"}),
            }))
        );
    }

    #[test]
    fn event_without_payload_carries_null() {
        assert_eq!(
            decode_frame(r#"42["ping:kitchen"]"#),
            Ok(EnginePacket::Message(SocketPacket::Event {
                name: "ping:kitchen".to_string(),
                payload: Value::Null,
            }))
        );
    }

    #[test]
    fn rejects_malformed_frames() {
        assert_eq!(decode_frame(""), Err(FrameError::Empty));
        assert_eq!(decode_frame("9"), Err(FrameError::UnknownEngineType('9')));
        assert_eq!(decode_frame("47"), Err(FrameError::UnknownSocketType('7')));
        assert!(matches!(
            decode_frame("42{not json"),
            Err(FrameError::MalformedEvent(_))
        ));
        assert!(matches!(
            decode_frame("42[]"),
            Err(FrameError::MalformedEvent(_))
        ));
        assert!(matches!(
            decode_frame("42[5, {}]"),
            Err(FrameError::MalformedEvent(_))
        ));
    }
}
