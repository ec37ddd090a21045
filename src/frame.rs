use crate::render;
use instant::Instant;
use skyline_core::{CameraPose, CityLayout, FrameOutcome, LifetimeToken, SceneSync};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct FrameContext {
    pub gpu: Option<render::GpuState<'static>>,
    pub sync: SceneSync,
    pub canvas: web::HtmlCanvasElement,
    pub started: Instant,
    pub lifetime: LifetimeToken,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        let elapsed = self.started.elapsed().as_secs_f32();
        if self.sync.frame(gpu, elapsed) == FrameOutcome::Skipped {
            gpu.reconfigure();
            return;
        }
        match gpu.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[frame] surface lost, reconfiguring");
                gpu.mark_lost();
            }
            Err(e) => log::error!("[frame] render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    city: &CityLayout,
    pose: CameraPose,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, city, pose).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drive `frame_ctx` from requestAnimationFrame until its view is torn down.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx_tick.borrow().lifetime.is_alive() {
            frame_ctx_tick.borrow_mut().gpu = None;
            // the closure cannot drop itself while running
            let handle = tick_clone.clone();
            spawn_local(async move {
                handle.borrow_mut().take();
            });
            log::info!("[frame] loop stopped");
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
