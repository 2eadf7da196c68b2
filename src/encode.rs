//! Per-command validation and encoding.
//!
//! Each encoder takes the command's argument tokens (keyword already consumed) and the
//! 1-based source line. Rule failures are raised as [`Violation`]s and tagged with the
//! command and line as they leave the encoder.

use crate::error::{CtpError, Violation};
use crate::instruction::{Command, Instruction};
use crate::pin::{Pin, PinValues};
use crate::resolve::resolve_pins;
use crate::state::PinState;
use std::num::IntErrorKind;

/// Pins that may be wired to the supply voltage.
pub const VIN_PINS: [&str; 4] = ["5", "14", "15", "16"];
/// Pins that may be wired to ground.
pub const GND_PINS: [&str; 2] = ["8", "12"];

/// Encode one command. `set` reads and updates `state`; nothing else touches it.
pub fn encode<S: AsRef<str>>(
    command: Command,
    args: &[S],
    line: usize,
    state: &mut PinState,
) -> Result<Instruction, CtpError> {
    match command {
        Command::Check => encode_check(args, line),
        Command::Set => encode_set(args, line, state),
        Command::Vin => encode_vin(args, line),
        Command::Gnd => encode_gnd(args, line),
        Command::Delay => encode_delay(args, line),
    }
}

fn at(command: Command, line: usize) -> impl FnOnce(Violation) -> CtpError {
    move |violation| CtpError::Syntax {
        command,
        line,
        violation,
    }
}

/// `check`: every pin must be given a value; encodes the line's own values only.
pub fn encode_check<S: AsRef<str>>(args: &[S], line: usize) -> Result<Instruction, CtpError> {
    check_mask(args)
        .map(|mask| Instruction::new(Command::Check, mask))
        .map_err(at(Command::Check, line))
}

fn check_mask<S: AsRef<str>>(args: &[S]) -> Result<u16, Violation> {
    let pins = resolve_pins(args)?;
    if !pins.is_complete() {
        return Err(Violation::IncompleteCheck);
    }
    Ok(pins.mask())
}

/// `set`: merges the line's values into `state` and encodes the whole resulting state.
pub fn encode_set<S: AsRef<str>>(
    args: &[S],
    line: usize,
    state: &mut PinState,
) -> Result<Instruction, CtpError> {
    let pins = resolve_pins(args).map_err(at(Command::Set, line))?;
    state.merge(&pins);
    Ok(Instruction::new(Command::Set, state.mask()))
}

pub fn encode_vin<S: AsRef<str>>(args: &[S], line: usize) -> Result<Instruction, CtpError> {
    supply_mask(args, &VIN_PINS, Violation::InvalidVinPin)
        .map(|mask| Instruction::new(Command::Vin, mask))
        .map_err(at(Command::Vin, line))
}

pub fn encode_gnd<S: AsRef<str>>(args: &[S], line: usize) -> Result<Instruction, CtpError> {
    supply_mask(args, &GND_PINS, Violation::InvalidGndPin)
        .map(|mask| Instruction::new(Command::Gnd, mask))
        .map_err(at(Command::Gnd, line))
}

/// Tokens are matched literally against `allowed`; every accepted pin is on.
fn supply_mask<S: AsRef<str>>(
    args: &[S],
    allowed: &[&str],
    invalid: fn(String) -> Violation,
) -> Result<u16, Violation> {
    let mut pins = PinValues::new();
    for arg in args {
        let arg = arg.as_ref();
        let pin = allowed
            .contains(&arg)
            .then(|| Pin::parse(arg))
            .flatten()
            .ok_or_else(|| invalid(arg.to_string()))?;
        pins.insert(pin, true);
    }
    Ok(pins.mask())
}

pub fn encode_delay<S: AsRef<str>>(args: &[S], line: usize) -> Result<Instruction, CtpError> {
    delay_millis(args)
        .map(|ms| Instruction::new(Command::Delay, ms))
        .map_err(at(Command::Delay, line))
}

fn delay_millis<S: AsRef<str>>(args: &[S]) -> Result<u16, Violation> {
    let token = match args {
        [] => return Err(Violation::MissingDelay),
        [token] => token.as_ref(),
        _ => return Err(Violation::TooManyDelays),
    };
    let time: i64 = token.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => Violation::DelayTooLarge,
        IntErrorKind::NegOverflow => Violation::DelayNegative,
        _ => Violation::DelayNotNumber(token.to_string()),
    })?;
    if time > i64::from(u16::MAX) {
        return Err(Violation::DelayTooLarge);
    }
    u16::try_from(time).map_err(|_| Violation::DelayNegative)
}
