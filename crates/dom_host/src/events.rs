/// Global switch of the event subsystem.
///
/// The commit bracket turns delivery off while the tree is being mutated so
/// that events raised by the host (blur on removal, for instance) never reach
/// handlers attached to a half-updated tree.
pub trait EventDelivery {
    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);
}

#[derive(Debug)]
pub struct EventSwitch {
    enabled: bool,
}

impl EventSwitch {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for EventSwitch {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EventDelivery for EventSwitch {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
