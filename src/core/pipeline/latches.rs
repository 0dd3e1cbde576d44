//! Pipeline latch structures for inter-stage communication.
//!
//! Each latch carries a full copy of the instruction record and control
//! bundle rather than a reference; no latch aliases another latch's storage.
//! A latch with `valid == false` is a bubble and must produce no
//! architectural side effect downstream.

use crate::core::control::ControlSignals;
use crate::core::units::alu::AluResult;
use crate::isa::instruction::Instruction;

/// IF/ID latch (Fetch to Decode).
#[derive(Clone, Default, Debug)]
pub struct IfId {
    /// Program counter of the fetched instruction.
    pub pc: u32,
    /// Decoded instruction record.
    pub inst: Instruction,
    /// False marks a bubble.
    pub valid: bool,
}

/// ID/EX latch (Decode to Execute).
#[derive(Clone, Default, Debug)]
pub struct IdEx {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction record.
    pub inst: Instruction,
    /// Register-file read of rs1.
    pub read_data1: u32,
    /// Register-file read of rs2.
    pub read_data2: u32,
    /// Sign-extended immediate.
    pub imm: i32,
    /// Control signals generated in Decode.
    pub ctrl: ControlSignals,
    /// False marks a bubble.
    pub valid: bool,
}

impl IdEx {
    /// The bubble inserted while the Decode stage is stalled.
    pub fn bubble() -> Self {
        Self::default()
    }
}

/// EX/MEM latch (Execute to Memory).
#[derive(Clone, Default, Debug)]
pub struct ExMem {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction record.
    pub inst: Instruction,
    /// ALU output with zero/negative flags.
    pub alu: AluResult,
    /// rs2 value for stores, after forwarding.
    pub store_data: u32,
    /// Branch target, kept for bookkeeping (transfers are effected in Decode).
    pub branch_target: u32,
    /// Branch comparison outcome, bookkeeping only.
    pub branch_taken: bool,
    /// Control signals.
    pub ctrl: ControlSignals,
    /// False marks a bubble.
    pub valid: bool,
}

/// MEM/WB latch (Memory to Writeback).
#[derive(Clone, Default, Debug)]
pub struct MemWb {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction record.
    pub inst: Instruction,
    /// ALU result (writeback value for non-loads).
    pub alu_result: u32,
    /// Data loaded from memory (writeback value when `mem_to_reg`).
    pub read_data: u32,
    /// Control signals.
    pub ctrl: ControlSignals,
    /// False marks a bubble.
    pub valid: bool,
}
