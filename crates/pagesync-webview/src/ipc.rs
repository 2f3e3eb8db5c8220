//! IPC protocol between Rust and the page script.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: the page script calls
//!   `window.ipc.postMessage(JSON.stringify({kind, payload}))`, which reaches
//!   the `ipc_handler` registered on the WebView.
//! - **Rust -> JS**: Rust evaluates the snippets built by the `js_*`
//!   functions below against `window.pagesync`.

use pagesync_common::{BootFlags, OutboundMessage, PageSyncError, ScrollToOptions};
use serde::{Deserialize, Serialize};

/// A typed IPC message from JavaScript to Rust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type.
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Somewhere to evaluate JavaScript in the page.
pub trait ScriptSink {
    fn evaluate(&self, script: &str) -> Result<(), PageSyncError>;
}

/// Page script installed before any document script runs.
///
/// `__PAGESYNC_TARGET__` is replaced with the JSON-encoded id of the tracked
/// element by [`page_init_script`].
const PAGE_SCRIPT_TEMPLATE: &str = r#"
(function() {
    if (window.pagesync) { return; }

    var tracked = {};
    tracked[__PAGESYNC_TARGET__] = true;

    var mutationObserver = null;
    var resizeObservers = {};
    var scrollHandler = null;
    var app = null;

    function post(kind, payload) {
        window.ipc.postMessage(JSON.stringify({ kind: kind, payload: payload }));
    }

    function box(el) {
        return { width: el.clientWidth, height: el.clientHeight };
    }

    function snapshot() {
        var elements = {};
        Object.keys(tracked).forEach(function(id) {
            var el = document.getElementById(id);
            if (el) { elements[id] = box(el); }
        });
        return {
            window: { width: window.innerWidth, height: window.innerHeight },
            elements: elements
        };
    }

    function records(list) {
        var out = [];
        list.forEach(function(m) {
            m.addedNodes.forEach(function(n) {
                out.push({ kind: "added", id: n.id || null });
            });
            m.removedNodes.forEach(function(n) {
                out.push({ kind: "removed", id: n.id || null });
            });
        });
        return out;
    }

    window.pagesync = {
        setMutations: function(on) {
            if (on && !mutationObserver) {
                mutationObserver = new MutationObserver(function(list) {
                    post("mutations", { records: records(list), snapshot: snapshot() });
                });
                mutationObserver.observe(document.body || document.documentElement,
                                         { attributes: false, childList: true, subtree: true });
                // Anything inserted before the observer existed.
                post("mutations", { records: [], snapshot: snapshot() });
            } else if (!on && mutationObserver) {
                mutationObserver.disconnect();
                mutationObserver = null;
            }
        },

        observeSize: function(id, on) {
            var existing = resizeObservers[id];
            if (on && !existing) {
                var el = document.getElementById(id);
                if (!el) {
                    // Removed since the snapshot that found it: report once
                    // so the window-size fallback still reaches the host.
                    post("resize", { id: id, snapshot: snapshot() });
                    return;
                }
                var observer = new ResizeObserver(function() {
                    post("resize", { id: id, snapshot: snapshot() });
                });
                observer.observe(el);
                resizeObservers[id] = observer;
            } else if (!on && existing) {
                existing.disconnect();
                delete resizeObservers[id];
            }
        },

        setScroll: function(on) {
            if (on && !scrollHandler) {
                scrollHandler = function() { post("scroll", { snapshot: snapshot() }); };
                document.addEventListener("scroll", scrollHandler, { passive: true });
            } else if (!on && scrollHandler) {
                document.removeEventListener("scroll", scrollHandler);
                scrollHandler = null;
            }
        },

        scrollTo: function(options) { window.scrollTo(options); },

        boot: function(flags) {
            if (typeof window.pagesyncBoot !== "function") {
                console.warn("pagesync: window.pagesyncBoot is not defined, host app not started");
                return;
            }
            app = window.pagesyncBoot(flags);
            post("app_ready", {});
        },

        // Host app -> Rust.
        send: function(port, payload) {
            post("port", { port: port, payload: payload === undefined ? null : payload });
        },

        // Rust -> host app.
        _deliver: function(port, payload) {
            if (app && app.ports && app.ports[port]) {
                app.ports[port].send(payload);
            }
        }
    };

    function ready() { post("page_ready", { snapshot: snapshot() }); }
    if (document.readyState === "loading") {
        document.addEventListener("DOMContentLoaded", ready);
    } else {
        ready();
    }
})();
"#;

/// Build the page script tracking `target_id`.
pub fn page_init_script(target_id: &str) -> String {
    PAGE_SCRIPT_TEMPLATE.replace("__PAGESYNC_TARGET__", &js_string(target_id))
}

pub fn js_set_mutations(on: bool) -> String {
    format!("window.pagesync.setMutations({on});")
}

pub fn js_observe_size(id: &str, on: bool) -> String {
    format!("window.pagesync.observeSize({}, {on});", js_string(id))
}

pub fn js_set_scroll(on: bool) -> String {
    format!("window.pagesync.setScroll({on});")
}

pub fn js_scroll_to(options: &ScrollToOptions) -> String {
    format!("window.pagesync.scrollTo({});", js_value(options))
}

pub fn js_boot(flags: &BootFlags) -> String {
    format!("window.pagesync.boot({});", js_value(flags))
}

/// Deliver an outbound message to `app.ports[port].send(payload)`.
pub fn js_deliver(message: &OutboundMessage) -> String {
    format!(
        "window.pagesync._deliver({}, {});",
        js_string(message.port()),
        message.payload()
    )
}

fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

fn js_value<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}
