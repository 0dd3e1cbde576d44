//! RV32I instruction decoder.
//!
//! Turns a raw 32-bit word into an [`Instruction`] record: format, operation
//! tag, register indices and the sign-extended immediate reassembled from its
//! scattered encoding fields.

use super::instruction::{Format, Instruction, InstructionBits, Opcode};
use super::{funct3, funct7, opcodes};

/// Decodes a 32-bit instruction word.
///
/// Pure function: decoding the same word always yields the same record.
/// Reserved or unrecognised encodings come back with `Opcode::Invalid` and
/// whatever register fields their apparent format carries.
pub fn decode(inst: u32) -> Instruction {
    match inst.opcode() {
        opcodes::OP_REG => Instruction {
            raw: inst,
            opcode: decode_op_reg(inst.funct3(), inst.funct7()),
            format: Format::R,
            rd: inst.rd(),
            rs1: inst.rs1(),
            rs2: inst.rs2(),
            imm: 0,
        },

        opcodes::OP_IMM => Instruction {
            raw: inst,
            opcode: decode_op_imm(inst.funct3(), inst.funct7()),
            format: Format::I,
            rd: inst.rd(),
            rs1: inst.rs1(),
            rs2: 0,
            imm: imm_i(inst),
        },

        opcodes::OP_LOAD => Instruction {
            raw: inst,
            opcode: match inst.funct3() {
                funct3::LB => Opcode::Lb,
                funct3::LH => Opcode::Lh,
                funct3::LW => Opcode::Lw,
                funct3::LBU => Opcode::Lbu,
                funct3::LHU => Opcode::Lhu,
                _ => Opcode::Invalid,
            },
            format: Format::I,
            rd: inst.rd(),
            rs1: inst.rs1(),
            rs2: 0,
            imm: imm_i(inst),
        },

        opcodes::OP_STORE => Instruction {
            raw: inst,
            opcode: match inst.funct3() {
                funct3::SB => Opcode::Sb,
                funct3::SH => Opcode::Sh,
                funct3::SW => Opcode::Sw,
                _ => Opcode::Invalid,
            },
            format: Format::S,
            rd: 0,
            rs1: inst.rs1(),
            rs2: inst.rs2(),
            imm: imm_s(inst),
        },

        opcodes::OP_BRANCH => Instruction {
            raw: inst,
            opcode: match inst.funct3() {
                funct3::BEQ => Opcode::Beq,
                funct3::BNE => Opcode::Bne,
                funct3::BLT => Opcode::Blt,
                funct3::BGE => Opcode::Bge,
                funct3::BLTU => Opcode::Bltu,
                funct3::BGEU => Opcode::Bgeu,
                _ => Opcode::Invalid,
            },
            format: Format::B,
            rd: 0,
            rs1: inst.rs1(),
            rs2: inst.rs2(),
            imm: imm_b(inst),
        },

        opcodes::OP_LUI => Instruction {
            raw: inst,
            opcode: Opcode::Lui,
            format: Format::U,
            rd: inst.rd(),
            rs1: 0,
            rs2: 0,
            imm: imm_u(inst),
        },

        opcodes::OP_AUIPC => Instruction {
            raw: inst,
            opcode: Opcode::Auipc,
            format: Format::U,
            rd: inst.rd(),
            rs1: 0,
            rs2: 0,
            imm: imm_u(inst),
        },

        opcodes::OP_JAL => Instruction {
            raw: inst,
            opcode: Opcode::Jal,
            format: Format::J,
            rd: inst.rd(),
            rs1: 0,
            rs2: 0,
            imm: imm_j(inst),
        },

        opcodes::OP_JALR => Instruction {
            raw: inst,
            opcode: if inst.funct3() == 0 {
                Opcode::Jalr
            } else {
                Opcode::Invalid
            },
            format: Format::I,
            rd: inst.rd(),
            rs1: inst.rs1(),
            rs2: 0,
            imm: imm_i(inst),
        },

        _ => Instruction {
            raw: inst,
            ..Instruction::default()
        },
    }
}

fn decode_op_reg(f3: u32, f7: u32) -> Opcode {
    match (f3, f7) {
        (funct3::ADD_SUB, funct7::DEFAULT) => Opcode::Add,
        (funct3::ADD_SUB, funct7::SUB) => Opcode::Sub,
        (funct3::SLL, funct7::DEFAULT) => Opcode::Sll,
        (funct3::SLT, funct7::DEFAULT) => Opcode::Slt,
        (funct3::SLTU, funct7::DEFAULT) => Opcode::Sltu,
        (funct3::XOR, funct7::DEFAULT) => Opcode::Xor,
        (funct3::SRL_SRA, funct7::DEFAULT) => Opcode::Srl,
        (funct3::SRL_SRA, funct7::SRA) => Opcode::Sra,
        (funct3::OR, funct7::DEFAULT) => Opcode::Or,
        (funct3::AND, funct7::DEFAULT) => Opcode::And,
        _ => Opcode::Invalid,
    }
}

fn decode_op_imm(f3: u32, f7: u32) -> Opcode {
    match f3 {
        funct3::ADD_SUB => Opcode::Addi,
        funct3::SLT => Opcode::Slti,
        funct3::SLTU => Opcode::Sltiu,
        funct3::XOR => Opcode::Xori,
        funct3::OR => Opcode::Ori,
        funct3::AND => Opcode::Andi,
        funct3::SLL => Opcode::Slli,
        funct3::SRL_SRA => match f7 {
            funct7::DEFAULT => Opcode::Srli,
            funct7::SRA => Opcode::Srai,
            _ => Opcode::Invalid,
        },
        _ => Opcode::Invalid,
    }
}

/// I-type: bits[31:20], sign-extended from bit 11.
fn imm_i(inst: u32) -> i32 {
    (inst as i32) >> 20
}

/// S-type: bits[31:25] || bits[11:7], sign-extended from bit 11.
fn imm_s(inst: u32) -> i32 {
    let low = (inst >> 7) & 0x1F;
    let high = (inst >> 25) & 0x7F;
    let combined = (high << 5) | low;
    (combined as i32) << 20 >> 20
}

/// B-type: bit[31] || bit[7] || bits[30:25] || bits[11:8] || 0,
/// sign-extended from bit 12.
fn imm_b(inst: u32) -> i32 {
    let bit_11 = (inst >> 7) & 1;
    let bits_4_1 = (inst >> 8) & 0xF;
    let bits_10_5 = (inst >> 25) & 0x3F;
    let bit_12 = (inst >> 31) & 1;
    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    (combined as i32) << 19 >> 19
}

/// U-type: bits[31:12] || 12 zero bits.
fn imm_u(inst: u32) -> i32 {
    (inst & 0xFFFF_F000) as i32
}

/// J-type: bit[31] || bits[19:12] || bit[20] || bits[30:21] || 0,
/// sign-extended from bit 20.
fn imm_j(inst: u32) -> i32 {
    let bits_19_12 = (inst >> 12) & 0xFF;
    let bit_11 = (inst >> 20) & 1;
    let bits_10_1 = (inst >> 21) & 0x3FF;
    let bit_20 = (inst >> 31) & 1;
    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    (combined as i32) << 11 >> 11
}
