#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

/// Fixed ids of the journey view's layers, in draw order.
impl LayerId {
    pub const GLOBE: LayerId = LayerId(1);
    pub const ARCS: LayerId = LayerId(2);
    pub const MARKERS: LayerId = LayerId(3);
}

/// A render layer. Snapshots are rebuilt from `(journey, active step)` each
/// frame; a layer holds only its style and incidental animation phase.
pub trait Layer {
    fn id(&self) -> LayerId;

    fn name(&self) -> &'static str;
}
