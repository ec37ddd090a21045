use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn element_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn set_class(element: &web::Element, class: &str, on: bool) {
    let cl = element.class_list();
    _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
}

/// Event listener that is removed again when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!(format!("add {} listener: {:?}", event, e)))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Repeating timer that stops when dropped, or earlier through its handle.
pub struct Interval {
    handle: std::rc::Rc<std::cell::Cell<Option<i32>>>,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    /// `handler` receives a stopper it may call to cancel the timer from
    /// inside the callback.
    pub fn new(
        period_ms: u32,
        mut handler: impl FnMut(&dyn Fn()) + 'static,
    ) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let handle: std::rc::Rc<std::cell::Cell<Option<i32>>> = Default::default();
        let inner = handle.clone();
        let closure = Closure::wrap(Box::new(move || {
            let stop = || {
                if let (Some(h), Some(w)) = (inner.take(), web::window()) {
                    w.clear_interval_with_handle(h);
                }
            };
            handler(&stop);
        }) as Box<dyn FnMut()>);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms as i32,
            )
            .map_err(|e| anyhow::anyhow!(format!("set_interval: {:?}", e)))?;
        handle.set(Some(id));
        Ok(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let (Some(h), Some(w)) = (self.handle.take(), web::window()) {
            w.clear_interval_with_handle(h);
        }
    }
}

/// Run `f` once after `delay_ms`. The callback frees itself after running.
pub fn set_timeout(delay_ms: u32, f: impl FnOnce() + 'static) {
    if let Some(w) = web::window() {
        let cb = Closure::once_into_js(f);
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            delay_ms as i32,
        );
    }
}
