mod engine;
mod rpc;

use engine::core::app_setup::create_app;
use engine::core::capability::{
    detect_render_support, install_failure_hook, report_startup_failure,
};

fn main() {
    if let Err(err) = detect_render_support() {
        report_startup_failure(&err);
        return;
    }
    install_failure_hook();

    let mut app = create_app();

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}
