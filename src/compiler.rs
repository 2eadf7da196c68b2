//! Drive compilation of a whole protocol: line iteration, dispatch, and warnings.
//!
//! A [`Compiler`] owns all per-run state (the pin accumulator and whether `gnd`/`vin`
//! have been seen), so independent runs never share `set` history. The first error
//! aborts the run; nothing after the failing line is looked at.

use crate::encode::encode;
use crate::error::CtpError;
use crate::instruction::{Command, Instruction, Program};
use crate::lexer::preprocess;
use crate::state::PinState;
use std::fmt;

/// Supply connection a pin-manipulating command was reached without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Supply {
    Gnd,
    Vin,
}

impl fmt::Display for Supply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Supply::Gnd => "gnd",
            Supply::Vin => "vin",
        })
    }
}

/// Advisory, non-fatal finding. Never changes the compiled program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub line: usize,
    pub command: Command,
    pub missing: Supply,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "warning: {}: {}: manipulating pins without specifying {}",
            self.command, self.line, self.missing
        )
    }
}

/// Successful result of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compilation {
    pub program: Program,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Default)]
pub struct Compiler {
    pins: PinState,
    gnd_seen: bool,
    vin_seen: bool,
    gnd_warned: bool,
    vin_warned: bool,
    instructions: Vec<Instruction>,
    warnings: Vec<Warning>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile one source line (`line_no` is 1-based). Returns the instruction it
    /// produced, or `None` for a blank or comment line.
    pub fn compile_line(&mut self, line_no: usize, line: &str) -> Result<Option<Instruction>, CtpError> {
        let tokens = match preprocess(line) {
            Ok(Some(tokens)) => tokens,
            Ok(None) => return Ok(None),
            Err(message) => return Err(CtpError::Malformed { line: line_no, message }),
        };
        let Some((keyword, args)) = tokens.split_first() else {
            return Ok(None);
        };
        let command = Command::from_keyword(keyword).ok_or_else(|| CtpError::UnknownCommand {
            line: line_no,
            token: keyword.clone(),
        })?;

        match command {
            Command::Gnd => self.gnd_seen = true,
            Command::Vin => self.vin_seen = true,
            _ => {}
        }
        if command.manipulates_pins() {
            self.check_supplies(line_no, command);
        }

        let instruction = encode(command, args, line_no, &mut self.pins)?;
        tracing::debug!(line = line_no, command = %command, arg = instruction.arg, "encoded");
        self.instructions.push(instruction);
        Ok(Some(instruction))
    }

    fn check_supplies(&mut self, line: usize, command: Command) {
        if !self.gnd_seen && !self.gnd_warned {
            self.gnd_warned = true;
            self.warn(line, command, Supply::Gnd);
        }
        if !self.vin_seen && !self.vin_warned {
            self.vin_warned = true;
            self.warn(line, command, Supply::Vin);
        }
    }

    fn warn(&mut self, line: usize, command: Command, missing: Supply) {
        tracing::warn!(line, command = %command, "manipulating pins without specifying {}", missing);
        self.warnings.push(Warning {
            line,
            command,
            missing,
        });
    }

    /// Current accumulated pin state, as the next `set` would start from.
    pub fn pin_state(&self) -> &PinState {
        &self.pins
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn finish(self) -> Compilation {
        Compilation {
            program: Program::new(self.instructions),
            warnings: self.warnings,
        }
    }
}

/// Compile a sequence of source lines with a fresh compiler.
pub fn compile<I, S>(lines: I) -> Result<Compilation, CtpError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut compiler = Compiler::new();
    for (i, line) in lines.into_iter().enumerate() {
        compiler.compile_line(i + 1, line.as_ref())?;
    }
    Ok(compiler.finish())
}

/// Compile a whole source text.
pub fn compile_source(source: &str) -> Result<Compilation, CtpError> {
    compile(source.lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gnd_and_vin_first_means_no_warnings() {
        let c = compile(["gnd 8\n", "vin 16\n", "set on 1 2\n"]).unwrap();
        assert!(c.warnings.is_empty());
        assert_eq!(c.program.len(), 3);
    }

    #[test]
    fn warnings_are_independent() {
        let c = compile(["vin 5", "set on 1", "check on rest"]).unwrap();
        assert_eq!(
            c.warnings,
            vec![Warning {
                line: 2,
                command: Command::Set,
                missing: Supply::Gnd
            }]
        );
        assert_eq!(
            c.warnings[0].to_string(),
            "warning: set: 2: manipulating pins without specifying gnd"
        );
    }

    #[test]
    fn each_warning_fires_once_per_run() {
        let c = compile(["check on rest", "set off rest", "gnd 8", "set on 1"]).unwrap();
        let missing: Vec<Supply> = c.warnings.iter().map(|w| w.missing).collect();
        assert_eq!(missing, vec![Supply::Gnd, Supply::Vin]);
        assert!(c.warnings.iter().all(|w| w.line == 1 && w.command == Command::Check));
    }

    #[test]
    fn delay_does_not_warn() {
        let c = compile(["delay 10"]).unwrap();
        assert!(c.warnings.is_empty());
    }

    #[test]
    fn warnings_do_not_change_output() {
        let warned = compile(["set on 1 2", "delay 5"]).unwrap();
        let clean = compile(["gnd 8", "vin 5", "set on 1 2", "delay 5"]).unwrap();
        assert_eq!(warned.program.instructions(), &clean.program.instructions()[2..]);
    }

    #[test]
    fn incremental_compilation() {
        let mut compiler = Compiler::new();
        assert_eq!(compiler.compile_line(1, "# header").unwrap(), None);
        let i = compiler.compile_line(2, "set on 4").unwrap().unwrap();
        assert_eq!(i, Instruction::new(Command::Set, 0x0008));
        assert_eq!(compiler.pin_state().mask(), 0x0008);
        assert_eq!(compiler.warnings().len(), 2);
        assert_eq!(compiler.finish().program.len(), 1);
    }

    #[test]
    fn unknown_command_reports_line_and_token() {
        let err = compile(["gnd 8", "", "blink on 1"]).unwrap_err();
        assert_eq!(
            err,
            CtpError::UnknownCommand {
                line: 3,
                token: "blink".into()
            }
        );
        assert_eq!(err.to_string(), "error: 3: blink is not a command");
    }

    #[test]
    fn compile_source_counts_physical_lines() {
        let err = compile_source("gnd 8\n# note\n\ndelay x\n").unwrap_err();
        assert_eq!(err.to_string(), "delay: 4: delay time must be a number");
    }
}
