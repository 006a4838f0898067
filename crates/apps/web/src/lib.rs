//! wasm-bindgen surface of the journey map.
//!
//! The page supplies a dataset (inline JSON or a URL), mounts the view on the
//! element whose height forms the scroll track, and reads each frame back as
//! JSON plus packed `Float32Array` buffers for markers and arcs.

use std::cell::RefCell;

use gloo_net::http::Request;
use journey::{CoordinatePolicy, Journey};
use layers::TextureState;
use tracking::{ScrollMetrics, TrackingMode};
use view::{FrameSnapshot, JourneyView, ViewConfig};
use wasm_bindgen::prelude::*;

mod buffers;
mod dto;
mod host;

use buffers::{arc_line_list, as_floats, marker_instances};
use dto::FrameDto;
use host::DomHost;

#[derive(Default)]
struct WebState {
    view: Option<JourneyView>,
    last_frame: Option<FrameSnapshot>,
}

thread_local! {
    static STATE: RefCell<WebState> = RefCell::new(WebState::default());
}

/// Mutable TLS access. Fails instead of panicking once the thread-local is
/// torn down (page unload, hot reload).
fn with_state<F, R>(f: F) -> Result<R, JsValue>
where
    F: FnOnce(&mut WebState) -> Result<R, JsValue>,
{
    STATE
        .try_with(|state| f(&mut state.borrow_mut()))
        .unwrap_or_else(|_| Err(JsValue::from_str("journey state is torn down")))
}

/// Read-only TLS access that yields a default during teardown.
fn read_state<F, R>(f: F) -> R
where
    F: FnOnce(&WebState) -> R,
    R: Default,
{
    STATE.try_with(|state| f(&state.borrow())).unwrap_or_default()
}

fn view_mut(s: &mut WebState) -> Result<&mut JourneyView, JsValue> {
    s.view
        .as_mut()
        .ok_or_else(|| JsValue::from_str("call journey_init first"))
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn report(context: &str, err: &JsValue) {
    web_sys::console::error_1(&JsValue::from_str(&format!("{context}: {err:?}")));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    Ok(())
}

/// Replaces the current dataset. A mounted view is unmounted first.
///
/// Out-of-range coordinates are clamped so a bad record dims the page rather
/// than breaking it; non-finite ones are still an error.
#[wasm_bindgen]
pub fn journey_init(dataset_json: &str, config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => ViewConfig::from_json_str(json).map_err(js_err)?,
        None => ViewConfig::default(),
    };
    let journey = Journey::from_json_str(dataset_json, CoordinatePolicy::Clamp).map_err(js_err)?;
    let view = JourneyView::new(journey, config).map_err(js_err)?;

    let previous = with_state(|s| {
        s.last_frame = None;
        Ok(s.view.replace(view))
    })?;
    // Released outside the borrow so DOM teardown never runs under it.
    drop(previous);
    Ok(())
}

#[wasm_bindgen]
pub async fn journey_load_url(url: String, config_json: Option<String>) -> Result<(), JsValue> {
    let resp = Request::get(&url).send().await.map_err(js_err)?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("GET {url}: HTTP {}", resp.status())));
    }
    let text = resp.text().await.map_err(js_err)?;
    journey_init(&text, config_json)
}

/// Mounts on the element with id `track_id`. With `drive_frames` the view runs
/// its own `requestAnimationFrame` loop; otherwise call [`journey_frame`].
#[wasm_bindgen]
pub fn journey_mount(track_id: &str, drive_frames: bool) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let track = document
        .get_element_by_id(track_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{track_id}")))?;
    let initial = DomHost::measure(&window, &track);
    let mut host = DomHost::new(window, track, drive_frames);

    with_state(|s| {
        let view = view_mut(s)?;
        view.mount(&mut host).map_err(js_err)?;
        if let Some(metrics) = initial {
            view.scroll(metrics).map_err(js_err)?;
        }
        Ok(())
    })
}

/// Returns how many host listeners were released.
#[wasm_bindgen]
pub fn journey_unmount() -> Result<u32, JsValue> {
    with_state(|s| {
        s.last_frame = None;
        let released = view_mut(s)?.unmount().map_err(js_err)?;
        Ok(released as u32)
    })
}

/// Feeds a scroll position directly, for hosts that measure it themselves.
/// Returns the active step.
#[wasm_bindgen]
pub fn journey_scroll(offset_px: f64, viewport_px: f64, track_px: f64) -> Result<u32, JsValue> {
    with_state(|s| {
        let view = view_mut(s)?;
        view.scroll(ScrollMetrics::new(offset_px, viewport_px, track_px))
            .map_err(js_err)?;
        Ok(view.active_step() as u32)
    })
}

/// Advances one frame. Returns the active step.
#[wasm_bindgen]
pub fn journey_frame(dt_s: f64) -> Result<u32, JsValue> {
    with_state(|s| {
        let snap = view_mut(s)?.frame(dt_s).map_err(js_err)?;
        let active = snap.active_step as u32;
        s.last_frame = Some(snap);
        Ok(active)
    })
}

#[wasm_bindgen]
pub fn journey_frame_json() -> Result<String, JsValue> {
    let json = read_state(|s| {
        let snap = s.last_frame.as_ref()?;
        let fov = s.view.as_ref().map_or(35.0, |v| v.config().camera.fov_y_deg);
        Some(serde_json::to_string(&FrameDto::from_snapshot(snap, fov)))
    });
    match json {
        Some(Ok(json)) => Ok(json),
        Some(Err(e)) => Err(js_err(e)),
        None => Err(JsValue::from_str("no frame yet")),
    }
}

/// Marker instances of the last frame, 16 floats each.
#[wasm_bindgen]
pub fn journey_marker_buffer() -> js_sys::Float32Array {
    let floats: Vec<f32> = read_state(|s| {
        s.last_frame
            .as_ref()
            .map(|snap| as_floats(&marker_instances(&snap.markers)).to_vec())
            .unwrap_or_default()
    });
    js_sys::Float32Array::from(floats.as_slice())
}

/// Arc line list of the last frame, 8 floats per vertex.
#[wasm_bindgen]
pub fn journey_arc_buffer() -> js_sys::Float32Array {
    let floats: Vec<f32> = read_state(|s| {
        s.last_frame
            .as_ref()
            .map(|snap| as_floats(&arc_line_list(&snap.arcs)).to_vec())
            .unwrap_or_default()
    });
    js_sys::Float32Array::from(floats.as_slice())
}

/// Column-major view-projection matrix of the current camera; empty before
/// `journey_init`.
#[wasm_bindgen]
pub fn journey_view_proj(aspect: f64) -> js_sys::Float32Array {
    let floats: Vec<f32> = read_state(|s| {
        s.view
            .as_ref()
            .map(|view| {
                let m = view.camera_state().view_proj(aspect, &view.config().camera);
                m.as_flattened().to_vec()
            })
            .unwrap_or_default()
    });
    js_sys::Float32Array::from(floats.as_slice())
}

#[wasm_bindgen]
pub fn journey_set_texture_state(state_name: &str) -> Result<(), JsValue> {
    let texture = match state_name.trim().to_ascii_lowercase().as_str() {
        "pending" | "loading" => TextureState::Pending,
        "ready" | "loaded" => TextureState::Ready,
        "failed" | "error" => TextureState::Failed,
        other => return Err(JsValue::from_str(&format!("unknown texture state: {other}"))),
    };
    with_state(|s| {
        view_mut(s)?.set_texture_state(texture);
        Ok(())
    })
}

/// Swaps between autoplay and the configured scroll policy.
#[wasm_bindgen]
pub fn journey_use_autoplay(enabled: bool) -> Result<(), JsValue> {
    with_state(|s| {
        let view = view_mut(s)?;
        let mode = match (enabled, view.config().tracking.mode) {
            (true, _) => TrackingMode::Autoplay,
            (false, TrackingMode::Autoplay) => TrackingMode::ScrollFraction,
            (false, configured) => configured,
        };
        view.use_mode(mode);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn journey_active_step() -> u32 {
    read_state(|s| s.view.as_ref().map_or(0, |v| v.active_step() as u32))
}

pub(crate) fn on_scroll(metrics: ScrollMetrics) {
    let result = with_state(|s| match s.view.as_mut() {
        Some(view) if view.is_mounted() => view.scroll(metrics).map(|_| ()).map_err(js_err),
        _ => Ok(()),
    });
    if let Err(err) = result {
        report("scroll", &err);
    }
}

pub(crate) fn on_animation_frame(dt_s: f64) {
    if let Err(err) = journey_frame(dt_s) {
        report("frame", &err);
    }
}
