//! Browser side of [`view::ViewHost`]: window scroll/resize listeners and a
//! `requestAnimationFrame` loop, each removable through its release action.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use runtime::ListenerKind;
use tracking::ScrollMetrics;
use view::{Release, ViewHost};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

pub struct DomHost {
    window: Window,
    track: Element,
    drive_frames: bool,
}

impl DomHost {
    pub fn new(window: Window, track: Element, drive_frames: bool) -> Self {
        Self {
            window,
            track,
            drive_frames,
        }
    }

    /// Current scroll position of the track element relative to the viewport.
    pub fn measure(window: &Window, track: &Element) -> Option<ScrollMetrics> {
        let rect = track.get_bounding_client_rect();
        let viewport = window.inner_height().ok()?.as_f64()?;
        Some(ScrollMetrics::new(-rect.top(), viewport, rect.height()))
    }

    fn listen(&self, event: &'static str) -> Release {
        let window = self.window.clone();
        let track = self.track.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            if let Some(metrics) = DomHost::measure(&window, &track) {
                crate::on_scroll(metrics);
            }
        });
        if let Err(err) = self
            .window
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            web_sys::console::error_1(&JsValue::from_str(&format!("listen {event}: {err:?}")));
        }

        let window = self.window.clone();
        Box::new(move || {
            let callback = closure.as_ref().unchecked_ref();
            let _ = window.remove_event_listener_with_callback(event, callback);
            drop(closure);
        })
    }

    fn start_frame_loop(&self) -> Release {
        type FrameCallback = Closure<dyn FnMut(f64)>;

        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let last_ms: Rc<Cell<Option<f64>>> = Rc::new(Cell::new(None));

        {
            let slot_inner = Rc::clone(&slot);
            let handle_inner = Rc::clone(&handle);
            let window = self.window.clone();
            *slot.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
                let dt_s = last_ms
                    .replace(Some(now_ms))
                    .map_or(0.0, |prev| (now_ms - prev) / 1000.0);
                crate::on_animation_frame(dt_s);
                if let Some(cb) = slot_inner.borrow().as_ref() {
                    let next = window.request_animation_frame(cb.as_ref().unchecked_ref());
                    handle_inner.set(next.ok());
                }
            }));
        }
        if let Some(cb) = slot.borrow().as_ref() {
            handle.set(self.window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        }

        let window = self.window.clone();
        Box::new(move || {
            if let Some(id) = handle.take() {
                let _ = window.cancel_animation_frame(id);
            }
            // Breaks the closure <-> slot cycle.
            slot.borrow_mut().take();
        })
    }
}

impl ViewHost for DomHost {
    fn attach(&mut self, kind: ListenerKind) -> Release {
        match kind {
            ListenerKind::Scroll => self.listen("scroll"),
            ListenerKind::Resize => self.listen("resize"),
            ListenerKind::AnimationFrame if self.drive_frames => self.start_frame_loop(),
            ListenerKind::AnimationFrame | ListenerKind::Timer => Box::new(|| {}),
        }
    }
}
