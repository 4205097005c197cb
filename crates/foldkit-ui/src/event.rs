/// Result of offering a pointer event to the fold layer or to content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResult {
    /// Event was handled; stop routing.
    Consumed,
    /// Event was not handled; keep routing.
    #[default]
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

impl From<bool> for EventResult {
    fn from(consumed: bool) -> Self {
        if consumed { EventResult::Consumed } else { EventResult::Ignored }
    }
}
