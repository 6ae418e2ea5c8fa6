//! JSON-RPC 2.0 bridge between the gallery engine and its host page.
//!
//! The page and the engine exchange messages over `postMessage`:
//! - **Requests** carry an `id` and get a response with the same `id`
//! - **Notifications** carry no `id`; page notifications are still executed
//! - **Responses** carry a `result` or an `error`
//!
//! ```text
//! Page (window / parent)  <──postMessage──>  Engine (canvas)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │ <───────────────── Response (with ID) ─┤
//!        │ <────────── Notification (no ID) ──────┤
//! ```
//!
//! ## Requests
//!
//! - `focus_photo {index}` → `{accepted}`: fly to a photo; photos that never
//!   loaded are not accepted
//! - `dismiss_loading` → `{hidden}`: the "continue anyway" control
//! - `set_dark_mode {enabled}` → `{enabled}`: switch background and fog palette
//! - `get_loading_state` → `{ratio, loaded, failed, total, hidden}`
//! - `get_fps` → `{fps}`
//!
//! ## Notifications sent to the page
//!
//! - `loading_progress {ratio, url}` and `loading_error {url}` per asset
//! - `loading_complete {reason}` once, when the loading screen starts hiding
//! - `photo_hover {index | null}` when the hovered photo changes
//! - `photo_focus {index}` when a focus transition starts
//! - `fps_update {fps}` twice a second
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// JSON-RPC 2.0 message types, the page message listener and the request
/// handlers.
pub mod web_rpc;
