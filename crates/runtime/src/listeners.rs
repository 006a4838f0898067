//! Scoped registration of host listeners (scroll, resize, frame callbacks).
//!
//! Whatever registers a listener with the host at mount time hands the
//! matching release action to a [`ListenerRegistry`]. Releasing happens on
//! unmount, or when the registry is dropped, so early teardown paths cannot
//! leak host listeners.

use std::collections::BTreeMap;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    Scroll,
    Resize,
    AnimationFrame,
    Timer,
}

impl ListenerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ListenerKind::Scroll => "scroll",
            ListenerKind::Resize => "resize",
            ListenerKind::AnimationFrame => "animation-frame",
            ListenerKind::Timer => "timer",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

struct Registration {
    kind: ListenerKind,
    release: Box<dyn FnOnce()>,
}

#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    live: BTreeMap<ListenerId, Registration>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a live host listener and the action that removes it.
    pub fn register(&mut self, kind: ListenerKind, release: impl FnOnce() + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.live.insert(
            id,
            Registration {
                kind,
                release: Box::new(release),
            },
        );
        id
    }

    /// Releases one listener. Returns `false` if it was already released.
    pub fn release(&mut self, id: ListenerId) -> bool {
        match self.live.remove(&id) {
            Some(reg) => {
                (reg.release)();
                true
            }
            None => false,
        }
    }

    /// Releases every live listener in registration order. Returns how many
    /// were released.
    pub fn release_all(&mut self) -> usize {
        let live = std::mem::take(&mut self.live);
        let count = live.len();
        for (_, reg) in live {
            (reg.release)();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn count_of(&self, kind: ListenerKind) -> usize {
        self.live.values().filter(|r| r.kind == kind).count()
    }
}

impl Drop for ListenerRegistry {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<_> = self.live.values().map(|r| r.kind.as_str()).collect();
        f.debug_struct("ListenerRegistry")
            .field("live", &kinds)
            .finish()
    }
}
