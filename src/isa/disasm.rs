//! Instruction disassembler.
//!
//! Converts a decoded instruction into a human-readable mnemonic string for
//! the trace output, debug logging, and test diagnostics. Only the stage
//! grid of the trace is contractual; this text is purely informational.

use super::instruction::{Format, Instruction, Opcode};

/// Renders an instruction as assembly text, e.g. `"add x3, x2, x3"`.
///
/// Unrecognised encodings render as `"unknown"`.
pub fn disassemble(inst: &Instruction) -> String {
    let mn = inst.opcode.mnemonic();
    match inst.opcode {
        Opcode::Invalid => mn.to_string(),

        // Loads and JALR use the offset(base) form.
        Opcode::Lb | Opcode::Lh | Opcode::Lw | Opcode::Lbu | Opcode::Lhu | Opcode::Jalr => {
            format!("{mn} x{}, {}(x{})", inst.rd, inst.imm, inst.rs1)
        }

        Opcode::Sb | Opcode::Sh | Opcode::Sw => {
            format!("{mn} x{}, {}(x{})", inst.rs2, inst.imm, inst.rs1)
        }

        Opcode::Lui | Opcode::Auipc => {
            format!("{mn} x{}, {:#x}", inst.rd, (inst.imm as u32) >> 12)
        }

        Opcode::Jal => format!("{mn} x{}, {}", inst.rd, inst.imm),

        _ => match inst.format {
            Format::R => format!("{mn} x{}, x{}, x{}", inst.rd, inst.rs1, inst.rs2),
            Format::I => format!("{mn} x{}, x{}, {}", inst.rd, inst.rs1, inst.imm),
            Format::B => format!("{mn} x{}, x{}, {}", inst.rs1, inst.rs2, inst.imm),
            _ => mn.to_string(),
        },
    }
}
