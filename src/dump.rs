//! Render instructions back into protocol source (disassembly listing).

use crate::instruction::{Command, Instruction, Program, INSTRUCTION_LEN};
use crate::pin::{pins_in_mask, PinValues};

/// One source line for `instruction`, without a trailing newline.
///
/// `check` and `set` always cover all pins (`on ... off rest`), so recompiling the
/// line reproduces the same mask.
pub fn render_instruction(instruction: &Instruction) -> String {
    let name = instruction.command.name();
    let mask = instruction.arg;
    match instruction.command {
        Command::Check | Command::Set => match mask {
            0 => format!("{} off rest", name),
            u16::MAX => format!("{} on rest", name),
            _ => {
                let on: Vec<String> = PinValues::from_mask(mask)
                    .iter()
                    .filter(|(_, on)| *on)
                    .map(|(pin, _)| pin.to_string())
                    .collect();
                format!("{} on {} off rest", name, on.join(" "))
            }
        },
        Command::Vin | Command::Gnd => pins_in_mask(mask).fold(name.to_string(), |mut out, pin| {
            out.push_str(&format!(" {}", pin));
            out
        }),
        Command::Delay => format!("{} {}", name, instruction.arg),
    }
}

/// Whole-program listing, one line per instruction.
pub fn render_program(program: &Program) -> String {
    program
        .iter()
        .map(|i| render_instruction(i) + "\n")
        .collect()
}

/// Listing with byte offsets (within the framed artifact) and raw instruction bytes.
pub fn render_program_hex(program: &Program) -> String {
    program
        .iter()
        .enumerate()
        .map(|(i, instruction)| {
            let [op, lo, hi] = instruction.encode();
            let offset = crate::artifact::HEADER.len() + i * INSTRUCTION_LEN;
            format!(
                "{:06x}  {:02x} {:02x} {:02x}  {}\n",
                offset,
                op,
                lo,
                hi,
                render_instruction(instruction)
            )
        })
        .collect()
}
