//! Tester pins and pin-value mappings, plus packing a mapping into a 16-bit mask.

use std::collections::BTreeMap;
use std::fmt;

/// Number of addressable pins on the tester.
pub const PIN_COUNT: u8 = 16;

/// A pin identifier in `1..=16`. Pin `n` occupies bit `n - 1` of a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(u8);

impl Pin {
    pub fn new(number: u8) -> Option<Pin> {
        (1..=PIN_COUNT).contains(&number).then_some(Pin(number))
    }

    /// Parse a pin number token. Accepts anything that reads as a base-10 integer in range.
    pub fn parse(token: &str) -> Option<Pin> {
        let n: i64 = token.parse().ok()?;
        u8::try_from(n).ok().and_then(Pin::new)
    }

    /// All sixteen pins in ascending order.
    pub fn all() -> impl Iterator<Item = Pin> {
        (1..=PIN_COUNT).map(Pin)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn bit(self) -> u16 {
        1 << (self.0 - 1)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pin to on/off mapping built for one command. May cover fewer than 16 pins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinValues {
    values: BTreeMap<Pin, bool>,
}

impl PinValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a value, returning the previous one if the pin was already present.
    pub fn insert(&mut self, pin: Pin, on: bool) -> Option<bool> {
        self.values.insert(pin, on)
    }

    pub fn get(&self, pin: Pin) -> Option<bool> {
        self.values.get(&pin).copied()
    }

    pub fn contains(&self, pin: Pin) -> bool {
        self.values.contains_key(&pin)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every one of the sixteen pins has a value.
    pub fn is_complete(&self) -> bool {
        Pin::all().all(|pin| self.contains(pin))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pin, bool)> + '_ {
        self.values.iter().map(|(pin, on)| (*pin, *on))
    }

    /// Pack into a mask: bit `pin - 1` is set iff the pin is on. Absent pins contribute 0.
    pub fn mask(&self) -> u16 {
        self.iter()
            .filter(|(_, on)| *on)
            .fold(0, |mask, (pin, _)| mask | pin.bit())
    }

    /// Expand a mask into a complete sixteen-pin mapping.
    pub fn from_mask(mask: u16) -> Self {
        Pin::all().map(|pin| (pin, mask & pin.bit() != 0)).collect()
    }
}

impl FromIterator<(Pin, bool)> for PinValues {
    fn from_iter<I: IntoIterator<Item = (Pin, bool)>>(iter: I) -> Self {
        PinValues {
            values: iter.into_iter().collect(),
        }
    }
}

/// Pins whose bit is set in `mask`, ascending.
pub fn pins_in_mask(mask: u16) -> impl Iterator<Item = Pin> {
    Pin::all().filter(move |pin| mask & pin.bit() != 0)
}
