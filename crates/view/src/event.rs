use layers::TextureState;

/// Trace of what happened in a view, stamped with the frame by the
/// [`runtime::EventBus`] it is emitted on.
#[derive(Debug, Clone, PartialEq)]
pub enum JourneyEvent {
    Mounted { listeners: usize },
    Unmounted { released: usize },
    StepChanged { from: usize, to: usize, source: &'static str },
    SourceReplaced { from: &'static str, to: &'static str },
    TextureChanged(TextureState),
}
