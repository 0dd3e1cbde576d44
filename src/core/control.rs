//! Pipeline control signals and the control generator.
//!
//! The control bundle is derived purely from the decoded instruction record
//! during the Decode stage and travels with the instruction through the
//! remaining stages. A bundle with every signal false is a nop as far as the
//! datapath is concerned; that is what `Invalid` instructions carry.

use crate::isa::instruction::{Format, Instruction, Opcode};

/// ALU operation selector.
///
/// Covers the arithmetic, logical and shift operations of RV32I plus the
/// comparison operations the branch datapath evaluates (`Seq`, `Sne`, `Sge`,
/// `Sgeu`; `Slt`/`Sltu` double as BLT/BLTU).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    #[default]
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    Seq,
    Sne,
    Sge,
    Sgeu,
}

/// Control signals for one instruction.
///
/// Seven booleans plus the ALU operation tag:
///
/// * `reg_write` - writeback commits a value into `rd`.
/// * `mem_read` / `mem_write` - the Memory stage performs a load / store.
/// * `mem_to_reg` - writeback takes the loaded data rather than the ALU result.
/// * `alu_src` - ALU operand 2 is the immediate rather than `read_data2`.
/// * `branch` - conditional branch (resolved early, in Decode).
/// * `jump` - unconditional transfer (JAL/JALR, also resolved in Decode).
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlSignals {
    pub reg_write: bool,
    pub mem_read: bool,
    pub mem_write: bool,
    pub mem_to_reg: bool,
    pub alu_src: bool,
    pub branch: bool,
    pub jump: bool,
    pub alu_op: AluOp,
}

/// Derives the control bundle for a decoded instruction.
///
/// Pure function of the record. `Invalid` instructions get the all-false
/// bundle and therefore retire without architectural effect.
pub fn generate(inst: &Instruction) -> ControlSignals {
    let mut c = ControlSignals::default();

    if inst.opcode == Opcode::Invalid {
        return c;
    }

    match inst.format {
        Format::R => {
            c.reg_write = true;
            c.alu_op = alu_op_for(inst.opcode);
        }
        Format::I => {
            if inst.opcode == Opcode::Jalr {
                c.reg_write = true;
                c.jump = true;
            } else if inst.opcode.is_load() {
                c.reg_write = true;
                c.alu_src = true;
                c.mem_read = true;
                c.mem_to_reg = true;
            } else {
                c.reg_write = true;
                c.alu_src = true;
                c.alu_op = alu_op_for(inst.opcode);
            }
        }
        Format::S => {
            c.alu_src = true;
            c.mem_write = true;
        }
        Format::B => {
            c.branch = true;
            c.alu_op = alu_op_for(inst.opcode);
        }
        Format::U => {
            // LUI and AUIPC: the Execute stage substitutes the PC-relative
            // or upper-immediate result directly.
            c.reg_write = true;
            c.alu_src = true;
        }
        Format::J => {
            c.reg_write = true;
            c.jump = true;
        }
    }

    c
}

fn alu_op_for(opcode: Opcode) -> AluOp {
    match opcode {
        Opcode::Add | Opcode::Addi => AluOp::Add,
        Opcode::Sub => AluOp::Sub,
        Opcode::Sll | Opcode::Slli => AluOp::Sll,
        Opcode::Slt | Opcode::Slti | Opcode::Blt => AluOp::Slt,
        Opcode::Sltu | Opcode::Sltiu | Opcode::Bltu => AluOp::Sltu,
        Opcode::Xor | Opcode::Xori => AluOp::Xor,
        Opcode::Srl | Opcode::Srli => AluOp::Srl,
        Opcode::Sra | Opcode::Srai => AluOp::Sra,
        Opcode::Or | Opcode::Ori => AluOp::Or,
        Opcode::And | Opcode::Andi => AluOp::And,
        Opcode::Beq => AluOp::Seq,
        Opcode::Bne => AluOp::Sne,
        Opcode::Bge => AluOp::Sge,
        Opcode::Bgeu => AluOp::Sgeu,
        _ => AluOp::Add,
    }
}
