//! Property-based tests for the protocol compiler.
//!
//! Uses `proptest` to check:
//! - A single qualified pin resolves to exactly that pin and value
//! - Masks have bit `pin - 1` set iff the pin is on
//! - `set` always encodes the merged state of every earlier `set`
//! - Listings recompile to the identical program
//! - Arbitrary text never panics the compiler

use ctp::dump::render_program;
use ctp::{compile, compile_source, resolve_pins, Command, Instruction, Pin, PinValues, Program};
use proptest::prelude::*;

fn pin_strategy() -> impl Strategy<Value = Pin> {
    (1u8..=16).prop_map(|n| Pin::new(n).expect("in range"))
}

fn subset_mask(allowed: &'static [u8]) -> impl Strategy<Value = u16> {
    proptest::sample::subsequence(allowed, 0..=allowed.len()).prop_map(|pins| {
        pins.into_iter()
            .fold(0u16, |mask, n| mask | Pin::new(n).expect("in range").bit())
    })
}

fn instruction_strategy() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        any::<u16>().prop_map(|m| Instruction::new(Command::Check, m)),
        any::<u16>().prop_map(|m| Instruction::new(Command::Set, m)),
        subset_mask(&[5, 14, 15, 16]).prop_map(|m| Instruction::new(Command::Vin, m)),
        subset_mask(&[8, 12]).prop_map(|m| Instruction::new(Command::Gnd, m)),
        any::<u16>().prop_map(|ms| Instruction::new(Command::Delay, ms)),
    ]
}

proptest! {
    #[test]
    fn single_pin_resolves_to_singleton(pin in pin_strategy(), on in any::<bool>()) {
        let qualifier = if on { "on" } else { "off" };
        let number = pin.to_string();
        let values = resolve_pins(&[qualifier, number.as_str()]).expect("resolve");
        prop_assert_eq!(values.len(), 1);
        prop_assert_eq!(values.get(pin), Some(on));
    }

    #[test]
    fn mask_bits_match_values(bits in proptest::collection::vec(proptest::option::of(any::<bool>()), 16)) {
        let values: PinValues = Pin::all()
            .zip(bits.iter())
            .filter_map(|(pin, v)| v.map(|on| (pin, on)))
            .collect();
        let mask = values.mask();
        for (pin, v) in Pin::all().zip(bits.iter()) {
            prop_assert_eq!(mask & pin.bit() != 0, *v == Some(true));
        }
    }

    #[test]
    fn set_encodes_accumulated_state(
        steps in proptest::collection::vec((pin_strategy(), any::<bool>()), 1..40)
    ) {
        let lines: Vec<String> = steps
            .iter()
            .map(|(pin, on)| format!("set {} {}", if *on { "on" } else { "off" }, pin))
            .collect();
        let program = compile(&lines).expect("compile").program;

        let mut expected = 0u16;
        for ((pin, on), instruction) in steps.iter().zip(program.iter()) {
            if *on {
                expected |= pin.bit();
            } else {
                expected &= !pin.bit();
            }
            prop_assert_eq!(instruction.command, Command::Set);
            prop_assert_eq!(instruction.arg, expected);
        }
    }

    #[test]
    fn listing_recompiles_identically(
        instructions in proptest::collection::vec(instruction_strategy(), 0..30)
    ) {
        let program = Program::new(instructions);
        let listing = render_program(&program);
        let again = compile_source(&listing).expect("recompile").program;
        prop_assert_eq!(again, program);
    }

    #[test]
    fn delay_accepts_exactly_u16(ms in 0i64..200_000) {
        let result = compile_source(&format!("delay {}", ms));
        if ms <= 65535 {
            let program = result.expect("in range").program;
            prop_assert_eq!(program.instructions()[0].arg as i64, ms);
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn arbitrary_text_never_panics(src in "\\PC*") {
        let _ = compile_source(&src);
    }
}
