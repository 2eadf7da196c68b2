//! Tester instructions: the command/opcode table, 3-byte encoding, and compiled programs.
//!
//! Each instruction is one opcode byte followed by a little-endian `u16` argument
//! (a pin mask, or a millisecond count for `delay`).

use crate::error::ArtifactError;
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{self, Cursor, Write};

/// Encoded size of one instruction.
pub const INSTRUCTION_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Check,
    Set,
    Vin,
    Gnd,
    Delay,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::Check,
        Command::Set,
        Command::Vin,
        Command::Gnd,
        Command::Delay,
    ];

    pub fn opcode(self) -> u8 {
        match self {
            Command::Check => 1,
            Command::Set => 2,
            Command::Vin => 3,
            Command::Gnd => 4,
            Command::Delay => 5,
        }
    }

    pub fn from_opcode(opcode: u8) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.opcode() == opcode)
    }

    /// Look up a command by its already case-folded source keyword.
    pub fn from_keyword(keyword: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.name() == keyword)
    }

    /// Source keyword, lowercase.
    pub fn name(self) -> &'static str {
        match self {
            Command::Check => "check",
            Command::Set => "set",
            Command::Vin => "vin",
            Command::Gnd => "gnd",
            Command::Delay => "delay",
        }
    }

    /// Whether the command drives or samples the pins (and so expects gnd/vin to be set up first).
    pub fn manipulates_pins(self) -> bool {
        matches!(self, Command::Check | Command::Set)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub command: Command,
    pub arg: u16,
}

impl Instruction {
    pub fn new(command: Command, arg: u16) -> Self {
        Instruction { command, arg }
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_u8(self.command.opcode())?;
        w.write_u16::<LittleEndian>(self.arg)
    }

    pub fn encode(&self) -> [u8; INSTRUCTION_LEN] {
        let mut out = [0u8; INSTRUCTION_LEN];
        out[0] = self.command.opcode();
        LittleEndian::write_u16(&mut out[1..], self.arg);
        out
    }

    /// Decode one instruction from the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Instruction, ArtifactError> {
        let mut r = Cursor::new(bytes);
        let opcode = r.read_u8()?;
        let command =
            Command::from_opcode(opcode).ok_or(ArtifactError::UnknownOpcode { opcode, offset: 0 })?;
        let arg = r.read_u16::<LittleEndian>()?;
        Ok(Instruction { command, arg })
    }
}

/// A compiled program: instructions in source order. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Program { instructions }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Encoded instructions, one 3-byte entry each, without artifact framing.
    pub fn encoded(&self) -> Vec<[u8; INSTRUCTION_LEN]> {
        self.iter().map(Instruction::encode).collect()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
