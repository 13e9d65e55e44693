//! Listing renderer: instruction memory → annotated program text.
//!
//! The inverse of the loader, used by the `list` command and the
//! front panel. Output lines parse back through the loader unchanged.

use crate::cpu::decode::{decode, Instruction, Opcode};
use crate::cpu::memory::{Banks, LINES_PER_BANK, NUM_BANKS};

/// Render a full listing of instruction memory, one `#BL: word`
/// line per cell, banks separated by blank lines.
pub fn listing(banks: &Banks) -> String {
    let mut out = String::new();

    for bank in 0..NUM_BANKS as u8 {
        if bank > 0 {
            out.push('\n');
        }
        for line in 0..LINES_PER_BANK as u8 {
            let word = banks.read(bank, line);
            let instr = decode(word);
            out.push_str(&format!(
                "#{}{}: {}  ; {}\n",
                bank,
                line,
                word,
                mnemonic(&instr)
            ));
        }
    }

    out
}

/// Human-readable mnemonic for a decoded instruction.
pub fn mnemonic(instr: &Instruction) -> String {
    match instr.opcode {
        Opcode::Load => {
            if instr.operand == 7 {
                "LOAD RAM".to_string()
            } else {
                format!("LOAD IN_{}", instr.operand)
            }
        }
        Opcode::Nor => "NOR".to_string(),
        Opcode::Store => match instr.operand {
            0 => "STORE OUT0".to_string(),
            1 => "STORE OUT1".to_string(),
            7 => "STORE RAM".to_string(),
            2..=6 => format!("BANK {}", instr.operand - 2),
            _ => unreachable!(),
        },
        Opcode::Jump => format!("JUMP {}", instr.operand),
    }
}
