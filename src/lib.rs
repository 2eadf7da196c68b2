//! # ctp: Component Tester Protocol compiler
//!
//! Compiles a small line-oriented DSL describing a hardware test sequence (pin states,
//! supply/ground wiring, timed delays) into the fixed-width binary instruction stream
//! executed by the component tester.
//!
//! ## DSL
//!
//! One command per line. Case is ignored; blank lines and lines starting with `#` are skipped.
//!
//! - `gnd <pins>`: wire pins to ground (pins 8 and 12 only)
//! - `vin <pins>`: wire pins to the supply (pins 5, 14, 15 and 16 only)
//! - `set on|off <pins> ... [rest]`: drive pins; unmentioned pins keep the value of earlier `set`s
//! - `check on|off <pins> ... [rest]`: expected state of all sixteen pins
//! - `delay <ms>`: wait 0..=65535 milliseconds
//!
//! `rest` gives the current ON/OFF qualifier to every pin not yet named on the line and must
//! come last.
//!
//! ```text
//! # 555 timer smoke test
//! gnd 8
//! vin 16
//! set on 1 2
//! delay 100
//! check on 3 off rest
//! ```
//!
//! ## Binary format
//!
//! `PM1`, then one 3-byte instruction per command (`[opcode: u8][arg: u16 LE]`), then `END`.
//! Opcodes: check=1, set=2, vin=3, gnd=4, delay=5.
//!
//! ## Usage
//!
//! ```no_run
//! let compilation = ctp::compile_source("gnd 8\nvin 16\nset on 1 off rest\n")?;
//! for warning in &compilation.warnings {
//!     eprintln!("{}", warning);
//! }
//! ctp::make_file("out.tst", &compilation.program)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod artifact;
pub mod compiler;
pub mod dump;
pub mod encode;
pub mod error;
pub mod instruction;
pub mod lexer;
pub mod pin;
pub mod resolve;
pub mod state;

pub use artifact::{make_file, read_artifact, read_file, write_artifact};
pub use compiler::{compile, compile_source, Compilation, Compiler, Supply, Warning};
pub use error::{ArtifactError, CtpError, Violation};
pub use instruction::{Command, Instruction, Program};
pub use pin::{Pin, PinValues};
pub use resolve::resolve_pins;
pub use state::PinState;
