use runtime::ListenerKind;

/// Undo action for one host registration.
pub type Release = Box<dyn FnOnce()>;

/// The environment a view is mounted into (a browser page, a test harness).
///
/// `attach` registers one host listener and returns the action that removes
/// it. The view keeps every returned action and runs them all on unmount.
pub trait ViewHost {
    fn attach(&mut self, kind: ListenerKind) -> Release;
}

/// Listener kinds a mounted view needs from its host.
pub const REQUIRED_LISTENERS: [ListenerKind; 3] = [
    ListenerKind::Scroll,
    ListenerKind::Resize,
    ListenerKind::AnimationFrame,
];
