use crate::dom::Listener;
use crate::overlay;
use skyline_core::{ScrollMetrics, ScrollTracker, Section};
use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

pub fn metrics_of(container: &web::Element) -> ScrollMetrics {
    ScrollMetrics::new(
        container.scroll_top() as f64,
        container.scroll_height() as f64,
        container.client_height() as f64,
    )
}

/// Read the container's scroll position once and update the overlay.
pub fn sync_now(container: &web::Element, tracker: &ScrollTracker, document: &web::Document) {
    let state = tracker.on_scroll(metrics_of(container));
    overlay::apply_sections(document, tracker.layout(), &state);
}

/// Feed every scroll event of `container` through the tracker.
pub fn wire_scroll(
    container: &web::Element,
    tracker: Rc<ScrollTracker>,
    document: web::Document,
) -> anyhow::Result<Listener> {
    sync_now(container, &tracker, &document);
    let last_section = Cell::new(tracker.current().section);
    let el = container.clone();
    Listener::new(container.as_ref(), "scroll", move |_| {
        let state = tracker.on_scroll(metrics_of(&el));
        overlay::apply_sections(&document, tracker.layout(), &state);
        if last_section.replace(state.section) != state.section {
            log_section(state.section, state.progress);
        }
    })
}

fn log_section(section: Section, progress: f32) {
    log::debug!("[scroll] {:?} at {:.3}", section, progress);
}
