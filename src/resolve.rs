//! Resolve an ON/OFF/REST qualified pin list into a pin-value mapping.
//!
//! Tokens are scanned left to right. `on` and `off` set the current qualifier; a pin
//! number takes the current qualifier; `rest` gives the current qualifier to every pin
//! not yet assigned and must be the final token. Nothing is implied when `rest` is absent.

use crate::error::Violation;
use crate::pin::{Pin, PinValues};

pub fn resolve_pins<S: AsRef<str>>(tokens: &[S]) -> Result<PinValues, Violation> {
    let mut pins = PinValues::new();
    let mut qualifier: Option<bool> = None;

    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        match token {
            "on" => qualifier = Some(true),
            "off" => qualifier = Some(false),
            "rest" => {
                if i + 1 < tokens.len() {
                    return Err(Violation::RestNotLast);
                }
                let on = qualifier.ok_or(Violation::MissingQualifier)?;
                for pin in Pin::all() {
                    if !pins.contains(pin) {
                        pins.insert(pin, on);
                    }
                }
            }
            _ => {
                let pin = Pin::parse(token)
                    .ok_or_else(|| Violation::InvalidPinOrValue(token.to_string()))?;
                if pins.contains(pin) {
                    return Err(Violation::DuplicatePin(token.to_string()));
                }
                let on = qualifier.ok_or(Violation::MissingQualifier)?;
                pins.insert(pin, on);
            }
        }
    }

    Ok(pins)
}
