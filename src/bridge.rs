use crate::constants::WEATHER_TOAST_TEXT;
use crate::markup;
use crate::overlay;
use skyline_core::{
    local_hour, parse_weather_payload, LightingBridge, LightingReport, LightingSource,
    ReportStep, WeatherReading,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Fetch lighting for the configured location in the background.
pub fn spawn(bridge: LightingBridge, source: LightingSource, document: web::Document) {
    spawn_local(async move {
        run(&bridge, &source, &document).await;
    });
}

async fn run(bridge: &LightingBridge, source: &LightingSource, document: &web::Document) {
    let fetched = match &source.report_url {
        Some(url) => Some(fetch_text(url).await),
        None => None,
    };
    if let ReportStep::Settled(applied) = bridge.accept_fetched_report(fetched) {
        if let Some(report) = applied {
            show_badge(document, &report);
        }
        return;
    }
    if !bridge.is_live() {
        return;
    }

    let reading = fetch_weather(&source.weather_url, document, bridge).await;
    let hour = current_hour(source.utc_offset_minutes);
    if let Some(report) = bridge.accept_weather(&reading, hour) {
        show_badge(document, &report);
    }
}

fn show_badge(document: &web::Document, report: &LightingReport) {
    overlay::show_weather_badge(
        document,
        &markup::weather_badge_text(
            report.temperature,
            &report.condition,
            &report.lighting_description,
        ),
    );
}

async fn fetch_weather(
    url: &str,
    document: &web::Document,
    bridge: &LightingBridge,
) -> WeatherReading {
    match fetch_text(url).await {
        Ok(body) => parse_weather_payload(&body),
        Err(e) => {
            log::warn!("[weather] fetch failed, using fallback: {:?}", e);
            if bridge.is_live() {
                overlay::notify(document, WEATHER_TOAST_TEXT);
            }
            WeatherReading::fallback()
        }
    }
}

fn current_hour(utc_offset_minutes: i32) -> u32 {
    let now = js_sys::Date::new_0();
    local_hour(
        now.get_utc_hours() * 60 + now.get_utc_minutes(),
        utc_offset_minutes,
    )
}

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let opts = web::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web::RequestMode::Cors);
    let request = web::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| anyhow::anyhow!(format!("fetch {}: {:?}", url, e)))?;
    let response: web::Response = response
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !response.ok() {
        anyhow::bail!("{} returned HTTP {}", url, response.status());
    }
    let text = response
        .text()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("{} body is not text", url))
}
