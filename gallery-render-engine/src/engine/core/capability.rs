use crate::engine::error::{GalleryError, GalleryResult};
use crate::engine::loading::loading_screen::dom;

/// Check the host can run the renderer before building the app.
pub fn detect_render_support() -> GalleryResult<()> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window()
            .ok_or_else(|| GalleryError::MissingCapability("browser window".into()))?;
        let navigator = window.navigator();
        let has_gpu = js_sys::Reflect::has(&navigator, &wasm_bindgen::JsValue::from_str("gpu"))
            .unwrap_or(false);
        if !has_gpu {
            return Err(GalleryError::MissingCapability("WebGPU".into()));
        }
    }

    Ok(())
}

/// Log the failure and get the loading screen out of the way so the rest of
/// the page stays usable. Runs before the log plugin exists, so it writes to
/// the console directly.
pub fn report_startup_failure(err: &GalleryError) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&format!("Gallery disabled: {err}").into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("Gallery disabled: {err}");
    dom::hide_now();
}

/// Any panic after the capability check (adapter or device requests failing
/// inside the render plugin, app construction) still clears the loading
/// screen before the panic is reported.
pub fn install_failure_hook() {
    set_failure_hook(dom::hide_now);
}

fn set_failure_hook<F>(on_failure: F)
where
    F: Fn() + Send + Sync + 'static,
{
    #[cfg(target_arch = "wasm32")]
    let report: Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Send + Sync> =
        Box::new(console_error_panic_hook::hook);
    #[cfg(not(target_arch = "wasm32"))]
    let report = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        on_failure();
        report(info);
    }));
}
