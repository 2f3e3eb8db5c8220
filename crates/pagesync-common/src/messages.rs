//! Tagged messages crossing the port boundary between the page and the
//! host application.
//!
//! Wire shape for both directions: `{"port": "<name>", "payload": <payload>}`.

use serde::{Deserialize, Serialize};

use crate::errors::ProtocolError;
use crate::types::{ScrollCoords, ViewportDimensions};

pub const RECEIVE_WINDOW_SIZE: &str = "receiveWindowSize";
pub const NOTIFY_SCROLLING: &str = "notifyScrolling";
pub const PERFORM_SMOOTH_SCROLL_TO: &str = "performSmoothScrollTo";

/// Notifications sent to the host application. Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "port", content = "payload")]
pub enum OutboundMessage {
    #[serde(rename = "receiveWindowSize")]
    ReceiveWindowSize(ViewportDimensions),
    #[serde(rename = "notifyScrolling")]
    NotifyScrolling {},
}

impl OutboundMessage {
    pub fn port(&self) -> &'static str {
        match self {
            Self::ReceiveWindowSize(_) => RECEIVE_WINDOW_SIZE,
            Self::NotifyScrolling {} => NOTIFY_SCROLLING,
        }
    }

    /// The payload alone, as handed to `app.ports[port].send(..)`.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::ReceiveWindowSize(d) => serde_json::json!({
                "width": d.width,
                "height": d.height,
            }),
            Self::NotifyScrolling {} => serde_json::json!({}),
        }
    }
}

/// Commands issued by the host application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "port", content = "payload")]
pub enum InboundMessage {
    #[serde(rename = "performSmoothScrollTo")]
    PerformSmoothScrollTo(ScrollCoords),
}

#[derive(Deserialize)]
struct Envelope {
    port: String,
    #[serde(default)]
    payload: serde_json::Value,
}

impl InboundMessage {
    /// Decode and validate a raw `{"port", "payload"}` envelope.
    pub fn from_json(raw: &str) -> Result<Self, ProtocolError> {
        let envelope: Envelope =
            serde_json::from_str(raw).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
        Self::from_parts(&envelope.port, envelope.payload)
    }

    /// Validate a port name and its payload.
    pub fn from_parts(port: &str, payload: serde_json::Value) -> Result<Self, ProtocolError> {
        match port {
            PERFORM_SMOOTH_SCROLL_TO => {
                let coords: ScrollCoords =
                    serde_json::from_value(payload).map_err(|e| ProtocolError::InvalidPayload {
                        port: port.to_string(),
                        reason: e.to_string(),
                    })?;
                if !coords.is_finite() {
                    return Err(ProtocolError::InvalidPayload {
                        port: port.to_string(),
                        reason: "coordinates must be finite".into(),
                    });
                }
                Ok(Self::PerformSmoothScrollTo(coords))
            }
            other => Err(ProtocolError::UnknownPort(other.to_string())),
        }
    }

    pub fn port(&self) -> &'static str {
        match self {
            Self::PerformSmoothScrollTo(_) => PERFORM_SMOOTH_SCROLL_TO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_size_wire_shape() {
        let msg = OutboundMessage::ReceiveWindowSize(ViewportDimensions::new(640, 480));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "port": "receiveWindowSize",
                "payload": { "width": 640, "height": 480 }
            })
        );
        assert_eq!(msg.port(), RECEIVE_WINDOW_SIZE);
        assert_eq!(msg.payload(), json["payload"]);
    }

    #[test]
    fn scrolling_notification_has_empty_object_payload() {
        let msg = OutboundMessage::NotifyScrolling {};
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "port": "notifyScrolling", "payload": {} })
        );
        assert_eq!(msg.payload(), serde_json::json!({}));
    }

    #[test]
    fn outbound_deserializes_from_wire() {
        let msg: OutboundMessage =
            serde_json::from_str(r#"{"port":"notifyScrolling","payload":{}}"#).unwrap();
        assert_eq!(msg, OutboundMessage::NotifyScrolling {});
    }

    #[test]
    fn parses_smooth_scroll_command() {
        let msg = InboundMessage::from_json(
            r#"{"port":"performSmoothScrollTo","payload":{"x":100,"y":200.5}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            InboundMessage::PerformSmoothScrollTo(ScrollCoords::new(100.0, 200.5))
        );
        assert_eq!(msg.port(), PERFORM_SMOOTH_SCROLL_TO);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = InboundMessage::from_json("{not json").unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed(_)));
    }

    #[test]
    fn rejects_unknown_port() {
        let err = InboundMessage::from_json(r#"{"port":"openDoor","payload":{}}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownPort(ref p) if p == "openDoor"));
    }

    #[test]
    fn rejects_missing_coordinate() {
        let err = InboundMessage::from_json(r#"{"port":"performSmoothScrollTo","payload":{"x":1}}"#)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidPayload { .. }));
    }

    #[test]
    fn rejects_missing_payload() {
        let err = InboundMessage::from_json(r#"{"port":"performSmoothScrollTo"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidPayload { .. }));
    }

    #[test]
    fn rejects_null_coordinate() {
        let err = InboundMessage::from_parts(
            PERFORM_SMOOTH_SCROLL_TO,
            serde_json::json!({ "x": null, "y": 1 }),
        )
        .unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidPayload { ref port, .. } if port == PERFORM_SMOOTH_SCROLL_TO));
    }
}
