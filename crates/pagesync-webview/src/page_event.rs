//! Validation and decoding of IPC messages posted by the page script.

use pagesync_common::ProtocolError;
use pagesync_core::{MutationKind, MutationRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::ipc::IpcMessage;
use crate::snapshot::DomSnapshot;

// =============================================================================
// IPC ALLOWLIST
// =============================================================================

/// IPC kinds the page script may post. Anything else is rejected.
pub const ALLOWED_IPC_KINDS: &[&str] = &[
    "page_ready",
    "mutations",
    "resize",
    "scroll",
    "app_ready",
    "port",
];

pub fn is_ipc_kind_allowed(kind: &str) -> bool {
    ALLOWED_IPC_KINDS.contains(&kind)
}

// =============================================================================
// EVENTS
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The document finished parsing.
    PageReady { snapshot: DomSnapshot },
    Mutations {
        records: Vec<MutationRecord>,
        snapshot: DomSnapshot,
    },
    Resize { id: String, snapshot: DomSnapshot },
    Scroll { snapshot: DomSnapshot },
    /// The host application was constructed by the page.
    AppReady,
    /// A port message sent by the host application.
    Port {
        port: String,
        payload: serde_json::Value,
    },
}

#[derive(Deserialize)]
struct SnapshotPayload {
    snapshot: DomSnapshot,
}

#[derive(Deserialize)]
struct WireRecord {
    kind: WireKind,
    id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum WireKind {
    Added,
    Removed,
}

#[derive(Deserialize)]
struct MutationsPayload {
    #[serde(default)]
    records: Vec<WireRecord>,
    snapshot: DomSnapshot,
}

#[derive(Deserialize)]
struct ResizePayload {
    id: String,
    snapshot: DomSnapshot,
}

#[derive(Deserialize)]
struct PortPayload {
    port: String,
    #[serde(default)]
    payload: serde_json::Value,
}

impl PageEvent {
    pub fn from_ipc(message: IpcMessage) -> Result<Self, ProtocolError> {
        if !is_ipc_kind_allowed(&message.kind) {
            return Err(ProtocolError::UnknownKind(message.kind));
        }

        let event = match message.kind.as_str() {
            "page_ready" => {
                let p: SnapshotPayload = decode(&message)?;
                Self::PageReady {
                    snapshot: p.snapshot,
                }
            }
            "mutations" => {
                let p: MutationsPayload = decode(&message)?;
                Self::Mutations {
                    records: p.records.into_iter().map(WireRecord::into_record).collect(),
                    snapshot: p.snapshot,
                }
            }
            "resize" => {
                let p: ResizePayload = decode(&message)?;
                Self::Resize {
                    id: p.id,
                    snapshot: p.snapshot,
                }
            }
            "scroll" => {
                let p: SnapshotPayload = decode(&message)?;
                Self::Scroll {
                    snapshot: p.snapshot,
                }
            }
            "app_ready" => Self::AppReady,
            "port" => {
                let p: PortPayload = decode(&message)?;
                Self::Port {
                    port: p.port,
                    payload: p.payload,
                }
            }
            other => return Err(ProtocolError::UnknownKind(other.to_string())),
        };
        Ok(event)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::PageReady { .. } => "page_ready",
            Self::Mutations { .. } => "mutations",
            Self::Resize { .. } => "resize",
            Self::Scroll { .. } => "scroll",
            Self::AppReady => "app_ready",
            Self::Port { .. } => "port",
        }
    }
}

impl WireRecord {
    fn into_record(self) -> MutationRecord {
        MutationRecord {
            kind: match self.kind {
                WireKind::Added => MutationKind::Added,
                WireKind::Removed => MutationKind::Removed,
            },
            element_id: self.id,
        }
    }
}

fn decode<T: DeserializeOwned>(message: &IpcMessage) -> Result<T, ProtocolError> {
    serde_json::from_value(message.payload.clone()).map_err(|e| ProtocolError::InvalidPayload {
        port: message.kind.clone(),
        reason: e.to_string(),
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pagesync_common::ViewportDimensions;

    fn parse(raw: &str) -> Result<PageEvent, ProtocolError> {
        PageEvent::from_ipc(IpcMessage::from_json(raw).unwrap())
    }

    #[test]
    fn ipc_kind_allowed_valid() {
        for kind in ALLOWED_IPC_KINDS {
            assert!(is_ipc_kind_allowed(kind));
        }
    }

    #[test]
    fn ipc_kind_rejected_unknown() {
        assert!(!is_ipc_kind_allowed("eval"));
        assert!(!is_ipc_kind_allowed(""));
        assert!(!is_ipc_kind_allowed("SCROLL"));
        assert!(!is_ipc_kind_allowed("scroll "));
        assert!(matches!(
            parse(r#"{"kind":"exec","payload":{}}"#),
            Err(ProtocolError::UnknownKind(ref k)) if k == "exec"
        ));
    }

    #[test]
    fn decodes_mutations() {
        let event = parse(
            r#"{"kind":"mutations","payload":{
                "records":[{"kind":"added","id":"intro-full-viewport"},{"kind":"removed","id":null}],
                "snapshot":{"window":{"width":800,"height":600},
                            "elements":{"intro-full-viewport":{"width":780,"height":600}}}}}"#,
        )
        .unwrap();

        match event {
            PageEvent::Mutations { records, snapshot } => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].kind, MutationKind::Added);
                assert_eq!(records[0].element_id.as_deref(), Some("intro-full-viewport"));
                assert_eq!(records[1].kind, MutationKind::Removed);
                assert_eq!(records[1].element_id, None);
                assert_eq!(
                    snapshot.element("intro-full-viewport"),
                    Some(ViewportDimensions::new(780, 600))
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn decodes_resize_scroll_and_ready() {
        let snap = r#"{"window":{"width":1,"height":2}}"#;
        let resize = parse(&format!(
            r#"{{"kind":"resize","payload":{{"id":"hero","snapshot":{snap}}}}}"#
        ))
        .unwrap();
        assert!(matches!(resize, PageEvent::Resize { ref id, .. } if id == "hero"));

        let scroll =
            parse(&format!(r#"{{"kind":"scroll","payload":{{"snapshot":{snap}}}}}"#)).unwrap();
        assert_eq!(scroll.kind(), "scroll");

        let ready = parse(&format!(r#"{{"kind":"page_ready","payload":{{"snapshot":{snap}}}}}"#))
            .unwrap();
        assert_eq!(ready.kind(), "page_ready");

        assert_eq!(parse(r#"{"kind":"app_ready"}"#).unwrap(), PageEvent::AppReady);
    }

    #[test]
    fn decodes_port_message() {
        let event = parse(
            r#"{"kind":"port","payload":{"port":"performSmoothScrollTo","payload":{"x":0,"y":10}}}"#,
        )
        .unwrap();
        match event {
            PageEvent::Port { port, payload } => {
                assert_eq!(port, "performSmoothScrollTo");
                assert_eq!(payload["y"], 10);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_snapshot_is_invalid_payload() {
        let err = parse(r#"{"kind":"scroll","payload":{}}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidPayload { ref port, .. } if port == "scroll"));
    }
}
