//! Framed `.tst` artifacts: `PM1`, the instruction stream, `END`.

use crate::error::ArtifactError;
use crate::instruction::{Instruction, Program, INSTRUCTION_LEN};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const HEADER: &[u8; 3] = b"PM1";
pub const TRAILER: &[u8; 3] = b"END";

/// Write `program` framed with header and trailer.
pub fn write_artifact<W: Write>(w: &mut W, program: &Program) -> io::Result<()> {
    w.write_all(HEADER)?;
    for instruction in program {
        instruction.write_to(w)?;
    }
    w.write_all(TRAILER)
}

/// Create (or truncate) `path` and write the framed program to it.
pub fn make_file<P: AsRef<Path>>(path: P, program: &Program) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_artifact(&mut w, program)?;
    w.flush()
}

impl Program {
    pub fn to_artifact(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER.len() + self.len() * INSTRUCTION_LEN + TRAILER.len());
        out.extend_from_slice(HEADER);
        for instruction in self {
            out.extend_from_slice(&instruction.encode());
        }
        out.extend_from_slice(TRAILER);
        out
    }
}

/// Parse a framed artifact back into a program.
pub fn read_artifact(bytes: &[u8]) -> Result<Program, ArtifactError> {
    let body = bytes.strip_prefix(HEADER).ok_or(ArtifactError::MissingHeader)?;
    let body = body.strip_suffix(TRAILER).ok_or(ArtifactError::MissingTrailer)?;
    if body.len() % INSTRUCTION_LEN != 0 {
        return Err(ArtifactError::TruncatedInstruction(body.len()));
    }

    let mut instructions = Vec::with_capacity(body.len() / INSTRUCTION_LEN);
    for (i, chunk) in body.chunks_exact(INSTRUCTION_LEN).enumerate() {
        let instruction = Instruction::decode(chunk).map_err(|e| match e {
            ArtifactError::UnknownOpcode { opcode, .. } => ArtifactError::UnknownOpcode {
                opcode,
                offset: HEADER.len() + i * INSTRUCTION_LEN,
            },
            other => other,
        })?;
        instructions.push(instruction);
    }
    Ok(Program::new(instructions))
}

/// Read and parse an artifact file.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Program, ArtifactError> {
    let bytes = std::fs::read(path)?;
    read_artifact(&bytes)
}
