//! Logo Studio Frontend
//!
//! egui-based editor for 3D text logos, running as a native window or
//! in a browser canvas.

mod app;
pub mod config;
mod download;
mod panels;
mod recorder;
pub mod startup;
mod state;
pub mod unavailable;
mod viewport;

pub use app::LogoStudioApp;

/// Id of the canvas the web build draws into
#[cfg(target_arch = "wasm32")]
const CANVAS_ID: &str = "logo_studio_canvas";

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let startup = startup::create_startup_monitor();
    startup::install_panic_hook(startup.clone());

    let canvas = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CANVAS_ID))
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("canvas element not found"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| wasm_bindgen::JsValue::from_str("element is not a canvas"))?;

    let fallback_anchor: web_sys::Element = canvas.clone().into();
    wasm_bindgen_futures::spawn_local(async move {
        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |cc| Ok(Box::new(LogoStudioApp::new(cc, startup)))),
            )
            .await;

        if let Err(e) = result {
            log::error!("Failed to start Logo Studio: {:?}", e);
            let reason = e.as_string().unwrap_or_else(|| format!("{:?}", e));
            unavailable::show_in_page(&fallback_anchor, &reason);
        }
    });

    Ok(())
}
