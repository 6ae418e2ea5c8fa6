//! Lightweight existence check for the focal model before the full load.
//!
//! Web builds issue an HTTP `HEAD` request for the asset URL; native builds
//! check the file under the asset root. The answer is handed back through a
//! shared slot that the model loader polls each frame.

use bevy::prelude::*;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    Present,
    Absent,
}

#[derive(Clone, Default, Debug)]
pub struct ModelProbe(Arc<Mutex<Option<ProbeResult>>>);

impl ModelProbe {
    /// Begin checking `path`. Native checks resolve immediately.
    pub fn start(path: &str) -> Self {
        let probe = Self::default();

        #[cfg(target_arch = "wasm32")]
        {
            let slot = probe.clone();
            let url = format!("assets/{path}");
            wasm_bindgen_futures::spawn_local(async move {
                let result = match head_request(&url).await {
                    Ok(true) => ProbeResult::Present,
                    Ok(false) => ProbeResult::Absent,
                    Err(err) => {
                        error!("Error checking model file {url}: {err:?}");
                        ProbeResult::Absent
                    }
                };
                slot.resolve(result);
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let full_path = bevy::asset::io::file::FileAssetReader::get_base_path()
                .join("assets")
                .join(path);
            probe.resolve(if full_path.is_file() {
                ProbeResult::Present
            } else {
                ProbeResult::Absent
            });
        }

        probe
    }

    pub fn resolve(&self, result: ProbeResult) {
        if let Ok(mut slot) = self.0.lock() {
            slot.get_or_insert(result);
        }
    }

    pub fn poll(&self) -> Option<ProbeResult> {
        self.0.lock().ok().and_then(|slot| *slot)
    }
}

#[cfg(target_arch = "wasm32")]
async fn head_request(url: &str) -> Result<bool, wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| wasm_bindgen::JsValue::from_str("no window"))?;
    let init = web_sys::RequestInit::new();
    init.set_method("HEAD");
    let request = web_sys::Request::new_with_str_and_init(url, &init)?;
    let response = JsFuture::from(window.fetch_with_request(&request)).await?;
    let response: web_sys::Response = response.dyn_into()?;
    Ok(response.ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_resolution_sticks() {
        let probe = ModelProbe::default();
        assert_eq!(probe.poll(), None);

        let shared = probe.clone();
        shared.resolve(ProbeResult::Absent);
        probe.resolve(ProbeResult::Present);
        assert_eq!(probe.poll(), Some(ProbeResult::Absent));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn missing_native_file_is_absent() {
        let probe = ModelProbe::start("models/does-not-exist.glb");
        assert_eq!(probe.poll(), Some(ProbeResult::Absent));
    }
}
