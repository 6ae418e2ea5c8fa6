use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::engine::assets::gallery_scene::GalleryScene;
use crate::engine::camera::focus::{FocusPhotoEvent, FocusSource};
use crate::engine::loading::loading_gate::{DismissLoadingEvent, HideReason, LoadingGate};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::theme::SceneTheme;
use crate::engine::systems::fps_tracking::smoothed_fps;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure. Requests without an `id` are handled as
/// notifications and get no response.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing traffic to the host page, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Params of every queued notification named `method`.
    #[cfg(test)]
    pub fn sent(&self, method: &str) -> Vec<&serde_json::Value> {
        self.outgoing_notifications
            .iter()
            .filter(|n| n.method == method)
            .map(|n| &n.params)
            .collect()
    }
}

/// Plugin establishing the postMessage bridge between the page and the engine.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<MessageQueue>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages).chain(),
            )
            .add_systems(Last, send_outgoing_messages);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(message_queue: Res<MessageQueue>) {
    let queue_clone = message_queue.0.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) =
                window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
            }
        }
        None => error!("Window object not available"),
    }

    // Ownership moves to JS so the listener outlives this system.
    closure.forget();
}

/// Raw page messages handed over from the browser event listener.
#[derive(Resource, Default, Clone)]
pub struct MessageQueue(Arc<Mutex<Vec<String>>>);

impl MessageQueue {
    pub fn push(&self, message: impl Into<String>) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(message.into());
        }
    }
}

#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Res<MessageQueue>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let messages = match message_queue.0.lock() {
        Ok(mut queue) => std::mem::take(&mut *queue),
        Err(_) => Vec::new(),
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Engine state a page request may read.
struct RpcTargets<'a> {
    scene: &'a GalleryScene,
    progress: &'a LoadingProgress,
    gate: &'a LoadingGate,
    diagnostics: &'a DiagnosticsStore,
}

/// Changes requested by a batch of page messages, applied after the batch.
#[derive(Default, Debug)]
struct RpcOutbox {
    focus: Vec<usize>,
    dismiss: bool,
    dark_mode: Option<bool>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    scene: Res<GalleryScene>,
    progress: Res<LoadingProgress>,
    gate: Res<LoadingGate>,
    diagnostics: Res<DiagnosticsStore>,
    mut theme: ResMut<SceneTheme>,
    mut focus_events: EventWriter<FocusPhotoEvent>,
    mut dismiss_events: EventWriter<DismissLoadingEvent>,
) {
    let targets = RpcTargets {
        scene: &scene,
        progress: &progress,
        gate: &gate,
        diagnostics: &diagnostics,
    };
    let mut outbox = RpcOutbox::default();

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("RPC request: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &targets, &mut outbox) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Failed to parse RPC message: {}", parse_error);
            }
        }
    }

    for index in outbox.focus {
        focus_events.write(FocusPhotoEvent {
            index,
            source: FocusSource::Host,
        });
    }
    if outbox.dismiss {
        dismiss_events.write(DismissLoadingEvent {
            reason: HideReason::Dismissed,
        });
    }
    if let Some(dark) = outbox.dark_mode {
        if theme.dark != dark {
            theme.dark = dark;
        }
    }
}

/// Run one request. A response is produced only when the request has an id.
fn handle_rpc_request(
    request: &RpcRequest,
    targets: &RpcTargets,
    outbox: &mut RpcOutbox,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "focus_photo" => handle_focus_photo(&request.params, targets, outbox),
        "dismiss_loading" => Ok(handle_dismiss_loading(targets, outbox)),
        "set_dark_mode" => handle_set_dark_mode(&request.params, outbox),
        "get_loading_state" => Ok(loading_state_json(targets.progress, targets.gate)),
        "get_fps" => Ok(handle_get_fps(targets.diagnostics)),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            let id = request.id.clone()?;
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

pub fn parse_focus_params(params: &serde_json::Value) -> Result<usize, RpcError> {
    #[derive(Deserialize)]
    struct FocusParams {
        index: usize,
    }

    serde_json::from_value::<FocusParams>(params.clone())
        .map(|p| p.index)
        .map_err(|_| RpcError::invalid_params("Expected non-negative 'index' parameter"))
}

pub fn parse_dark_mode_params(params: &serde_json::Value) -> Result<bool, RpcError> {
    #[derive(Deserialize)]
    struct DarkModeParams {
        enabled: bool,
    }

    serde_json::from_value::<DarkModeParams>(params.clone())
        .map(|p| p.enabled)
        .map_err(|_| RpcError::invalid_params("Expected boolean 'enabled' parameter"))
}

/// Same path as a click: a photo without a plane is not focusable.
fn handle_focus_photo(
    params: &serde_json::Value,
    targets: &RpcTargets,
    outbox: &mut RpcOutbox,
) -> Result<serde_json::Value, RpcError> {
    let index = parse_focus_params(params)?;
    let accepted = targets.scene.photo_plane(index).is_some();
    if accepted {
        outbox.focus.push(index);
    } else {
        debug!("focus_photo: no photo plane for index {}", index);
    }

    Ok(serde_json::json!({ "accepted": accepted }))
}

/// "Continue anyway". `hidden` reports whether this request closed the
/// indicator rather than finding it already gone.
fn handle_dismiss_loading(targets: &RpcTargets, outbox: &mut RpcOutbox) -> serde_json::Value {
    let hidden = !targets.gate.is_hidden() && !outbox.dismiss;
    outbox.dismiss |= hidden;
    serde_json::json!({ "hidden": hidden })
}

fn handle_set_dark_mode(
    params: &serde_json::Value,
    outbox: &mut RpcOutbox,
) -> Result<serde_json::Value, RpcError> {
    let enabled = parse_dark_mode_params(params)?;
    outbox.dark_mode = Some(enabled);
    Ok(serde_json::json!({ "enabled": enabled }))
}

pub fn loading_state_json(progress: &LoadingProgress, gate: &LoadingGate) -> serde_json::Value {
    serde_json::json!({
        "ratio": progress.ratio(),
        "loaded": progress.loaded(),
        "failed": progress.failed(),
        "total": progress.total(),
        "hidden": gate.is_hidden(),
    })
}

fn handle_get_fps(diagnostics: &DiagnosticsStore) -> serde_json::Value {
    let fps = smoothed_fps(diagnostics).unwrap_or(0.0) as f32;
    serde_json::json!({ "fps": fps })
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Post a serialized message to the parent window, or log it on native.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    // Same-page embeds have no parent; the window itself is the target.
                    let target = window.parent().ok().flatten().unwrap_or(window);
                    if let Err(e) = target.post_message(&JsValue::from_str(&json), "*") {
                        error!("Failed to send message to page: {:?}", e);
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(json) = serde_json::to_string(message) {
            trace!("RPC out: {}", json);
        }
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::loading::loading_screen::LoadingScreen;

    fn rpc_app() -> App {
        let mut app = App::new();
        app.add_plugins(WebRpcPlugin)
            .init_resource::<GalleryScene>()
            .init_resource::<LoadingProgress>()
            .init_resource::<LoadingGate>()
            .init_resource::<LoadingScreen>()
            .init_resource::<SceneTheme>()
            .init_resource::<DiagnosticsStore>()
            .add_event::<FocusPhotoEvent>()
            .add_event::<DismissLoadingEvent>();
        app
    }

    fn send(app: &mut App, message: serde_json::Value) {
        app.world()
            .resource::<MessageQueue>()
            .push(message.to_string());
        app.update();
    }

    #[test]
    fn request_params_default_to_null() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"dismiss_loading"}"#)
                .unwrap_or_else(|e| panic!("{e}"));
        assert!(request.params.is_null());
        assert!(request.id.is_none());
    }

    #[test]
    fn focus_params_require_an_index() {
        assert_eq!(parse_focus_params(&serde_json::json!({ "index": 2 })), Ok(2));
        let err = parse_focus_params(&serde_json::json!({ "index": -1 }));
        assert_eq!(err.map_err(|e| e.code), Err(-32602));
        assert!(parse_focus_params(&serde_json::Value::Null).is_err());
    }

    #[test]
    fn dark_mode_params_require_a_boolean() {
        assert_eq!(
            parse_dark_mode_params(&serde_json::json!({ "enabled": true })),
            Ok(true)
        );
        assert!(parse_dark_mode_params(&serde_json::json!({ "enabled": "null" })).is_err());
    }

    #[test]
    fn set_dark_mode_updates_the_theme() {
        let mut app = rpc_app();
        send(
            &mut app,
            serde_json::json!({
                "jsonrpc": "2.0",
                "method": "set_dark_mode",
                "params": { "enabled": true },
                "id": 1
            }),
        );
        assert!(app.world().resource::<SceneTheme>().dark);
    }

    #[test]
    fn focus_on_missing_photo_sends_no_event() {
        let mut app = rpc_app();
        send(
            &mut app,
            serde_json::json!({
                "jsonrpc": "2.0",
                "method": "focus_photo",
                "params": { "index": 4 }
            }),
        );
        assert!(app.world().resource::<Events<FocusPhotoEvent>>().is_empty());
    }

    #[test]
    fn dismiss_without_id_still_runs() {
        let mut app = rpc_app();
        send(
            &mut app,
            serde_json::json!({ "jsonrpc": "2.0", "method": "dismiss_loading" }),
        );
        assert_eq!(
            app.world().resource::<Events<DismissLoadingEvent>>().len(),
            1
        );
    }

    #[test]
    fn only_the_first_dismiss_in_a_batch_hides() {
        let scene = GalleryScene::default();
        let progress = LoadingProgress::default();
        let gate = LoadingGate::default();
        let diagnostics = DiagnosticsStore::default();
        let targets = RpcTargets {
            scene: &scene,
            progress: &progress,
            gate: &gate,
            diagnostics: &diagnostics,
        };
        let mut outbox = RpcOutbox::default();

        assert_eq!(
            handle_dismiss_loading(&targets, &mut outbox),
            serde_json::json!({ "hidden": true })
        );
        assert_eq!(
            handle_dismiss_loading(&targets, &mut outbox),
            serde_json::json!({ "hidden": false })
        );
        assert!(outbox.dismiss);
    }

    #[test]
    fn loading_state_reports_counts() {
        let mut progress = LoadingProgress::default();
        progress.item_started("a.jpg");
        progress.item_started("b.jpg");
        progress.item_loaded("a.jpg");
        progress.item_failed("b.jpg");
        let state = loading_state_json(&progress, &LoadingGate::default());

        assert_eq!(state["loaded"], 1);
        assert_eq!(state["failed"], 1);
        assert_eq!(state["total"], 2);
        assert_eq!(state["hidden"], false);
    }
}
