#![cfg(target_arch = "wasm32")]
use crate::constants::{CANVAS_ID, JOURNEY_ID, SCENE_CONFIG_ID};
use instant::Instant;
use skyline_core::{
    generate_city, GlowTuning, LightingBridge, SceneConfig, SceneSync, ScrollTracker,
    ViewLifetime,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod bridge;
mod constants;
mod dom;
mod frame;
mod loader;
mod markup;
mod overlay;
mod render;
mod scroll;

/// Everything a mounted page owns. Dropping it ends the lifetime first, so
/// in-flight fetches and the frame loop see the view as gone, then removes
/// the listeners.
struct View {
    lifetime: ViewLifetime,
    _listeners: Vec<dom::Listener>,
    _loader: Option<dom::Interval>,
}

impl Drop for View {
    fn drop(&mut self) {
        self.lifetime.end();
        log::info!("[mount] view unmounted");
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<View>> = const { RefCell::new(None) };
}

fn wire_canvas_resize(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<dom::Listener> {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    dom::Listener::new(window.as_ref(), "resize", move |_| {
        dom::sync_canvas_backing_size(&canvas_resize);
    })
}

fn load_config(document: &web::Document) -> anyhow::Result<SceneConfig> {
    let inline = document
        .get_element_by_id(SCENE_CONFIG_ID)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty());
    match inline {
        Some(text) => Ok(SceneConfig::from_json(&text)?),
        None => {
            let config = SceneConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("skyline-web starting");
    mount();
    Ok(())
}

/// Mount the view on the current page. Ignored while already mounted.
#[wasm_bindgen]
pub fn mount() {
    spawn_local(async move {
        if let Err(e) = mount_view().await {
            log::error!("mount error: {:?}", e);
        }
    });
}

/// Tear the view down: listeners go, pending lighting results are dropped and
/// the frame loop stops at its next tick.
#[wasm_bindgen]
pub fn unmount() {
    let view = MOUNTED.with(|m| m.borrow_mut().take());
    drop(view);
}

async fn mount_view() -> anyhow::Result<()> {
    if MOUNTED.with(|m| m.borrow().is_some()) {
        log::warn!("[mount] already mounted, ignoring");
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, CANVAS_ID)?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let journey = dom::element_by_id(&document, JOURNEY_ID)?;

    let config = load_config(&document)?;
    let layout = config.section_layout()?;
    let path = config.camera_path()?;
    overlay::build_sections(&document, &config)?;

    let lifetime = ViewLifetime::new();
    let (tracker, sections) = ScrollTracker::new(layout);
    let tracker = Rc::new(tracker);
    let (lighting_bridge, lighting) = LightingBridge::new(lifetime.token());

    let listeners = vec![
        scroll::wire_scroll(&journey, tracker.clone(), document.clone())?,
        wire_canvas_resize(&window, &canvas)?,
        // unmount outside the listener so it is not dropped mid-call
        dom::Listener::new(window.as_ref(), "pagehide", |_| {
            spawn_local(async { unmount() });
        })?,
    ];
    let loader = overlay::start_loader(&document);

    bridge::spawn(lighting_bridge, config.lighting.clone(), document.clone());

    let token = lifetime.token();
    MOUNTED.with(|m| {
        *m.borrow_mut() = Some(View {
            lifetime,
            _listeners: listeners,
            _loader: loader,
        })
    });
    log::info!(
        "[mount] {} items, {} waypoints",
        config.items.len(),
        path.len()
    );

    let city = generate_city(&config.landmark_anchors(), config.city_seed);
    let pose = path.sample(tracker.current().progress);
    let gpu = frame::init_gpu(&canvas, &city, pose).await;
    if !token.is_alive() {
        log::info!("[mount] unmounted before the renderer was ready");
        return Ok(());
    }
    if gpu.is_none() {
        log::warn!("[mount] no renderer; overlay only");
        return Ok(());
    }

    let sync = SceneSync::new(
        path,
        config.items.len(),
        GlowTuning::default(),
        sections,
        lighting,
    );
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        gpu,
        sync,
        canvas,
        started: Instant::now(),
        lifetime: token,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
