use crate::constants::{
    HIDDEN_CLASS, LOADER_ID, LOADER_MESSAGES, LOADER_STEP_MS, LOADER_TEXT_ID, SECTIONS_ID,
    TOAST_ID, TOAST_VISIBLE_MS, VISIBLE_CLASS, WEATHER_BADGE_ID,
};
use crate::dom;
use crate::loader::{LoaderSequence, LoaderStep};
use crate::markup;
use instant::Instant;
use skyline_core::{SceneConfig, SectionLayout, SectionState};
use web_sys as web;

const LOADER: LoaderSequence = LoaderSequence::new(&LOADER_MESSAGES, LOADER_STEP_MS);

/// Fill the journey container with one card per section.
pub fn build_sections(document: &web::Document, config: &SceneConfig) -> anyhow::Result<()> {
    let container = dom::element_by_id(document, SECTIONS_ID)?;
    container.set_inner_html(&markup::sections_html(config));
    Ok(())
}

/// Show exactly the cards the current scroll state calls for.
pub fn apply_sections(document: &web::Document, layout: &SectionLayout, state: &SectionState) {
    for (id, visible) in markup::card_visibility(layout, state) {
        if let Some(el) = document.get_element_by_id(&id) {
            dom::set_class(&el, VISIBLE_CLASS, visible);
        }
    }
}

/// Step the loader text on a timer and hide it after the last message.
/// Returns `None` when the page has no loader.
pub fn start_loader(document: &web::Document) -> Option<dom::Interval> {
    let loader = document.get_element_by_id(LOADER_ID)?;
    let text = document.get_element_by_id(LOADER_TEXT_ID);
    let show = move |msg: &str| {
        if let Some(t) = &text {
            t.set_text_content(Some(msg));
        }
    };
    if let LoaderStep::Show(first) = LOADER.step(0) {
        show(first);
    }
    dom::set_class(&loader, HIDDEN_CLASS, false);

    let started = Instant::now();
    let interval = dom::Interval::new(LOADER.step_ms(), move |stop| {
        match LOADER.at_elapsed(started.elapsed().as_secs_f64() * 1000.0) {
            LoaderStep::Show(msg) => show(msg),
            LoaderStep::Hide => {
                dom::set_class(&loader, HIDDEN_CLASS, true);
                log::debug!("[loader] hidden after {} ms", LOADER.total_ms());
                stop();
            }
        }
    });
    match interval {
        Ok(i) => Some(i),
        Err(e) => {
            log::warn!("[loader] timer unavailable: {:?}", e);
            None
        }
    }
}

/// Show a transient notice.
pub fn notify(document: &web::Document, text: &str) {
    let Some(toast) = document.get_element_by_id(TOAST_ID) else {
        log::info!("[toast] {}", text);
        return;
    };
    toast.set_text_content(Some(text));
    dom::set_class(&toast, HIDDEN_CLASS, false);
    dom::set_class(&toast, VISIBLE_CLASS, true);
    dom::set_timeout(TOAST_VISIBLE_MS, move || {
        dom::set_class(&toast, VISIBLE_CLASS, false);
        dom::set_class(&toast, HIDDEN_CLASS, true);
    });
}

pub fn show_weather_badge(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id(WEATHER_BADGE_ID) {
        el.set_text_content(Some(text));
        dom::set_class(&el, HIDDEN_CLASS, false);
    }
}
