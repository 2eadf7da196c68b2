//! Last-known state of every pin, as driven by `set` over one compilation run.

use crate::pin::{Pin, PinValues, PIN_COUNT};

/// All sixteen pins, off until a `set` says otherwise. One per compilation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinState {
    pins: [bool; PIN_COUNT as usize],
}

impl PinState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the pins present in `values`; others keep their state.
    pub fn merge(&mut self, values: &PinValues) {
        for (pin, on) in values.iter() {
            self.pins[usize::from(pin.number() - 1)] = on;
        }
    }

    pub fn get(&self, pin: Pin) -> bool {
        self.pins[usize::from(pin.number() - 1)]
    }

    /// Full sixteen-entry mapping of the current state.
    pub fn snapshot(&self) -> PinValues {
        Pin::all().map(|pin| (pin, self.get(pin))).collect()
    }

    pub fn mask(&self) -> u16 {
        self.snapshot().mask()
    }
}
