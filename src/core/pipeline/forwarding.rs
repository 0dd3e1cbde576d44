//! Operand forwarding unit.
//!
//! Routes a not-yet-written-back result from a later pipeline latch to the
//! Execute stage's operand inputs. For each source register the younger
//! producer wins: EX/MEM (the instruction one ahead, now in Memory) before
//! MEM/WB (two ahead, now in Writeback), and only then the value read from
//! the register file into the ID/EX latch.

use crate::core::pipeline::latches::{ExMem, IdEx, MemWb};

/// Where an Execute-stage operand comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Forward {
    /// The register-file value carried in the ID/EX latch.
    Register,
    /// The ALU result in the EX/MEM latch.
    FromExMem,
    /// The writeback value in the MEM/WB latch.
    FromMemWb,
}

/// Chooses the data source for one source register.
pub fn select(rs: usize, ex_mem: &ExMem, mem_wb: &MemWb) -> Forward {
    if rs == 0 {
        return Forward::Register;
    }
    if ex_mem.valid && ex_mem.ctrl.reg_write && ex_mem.inst.rd != 0 && ex_mem.inst.rd == rs {
        return Forward::FromExMem;
    }
    if mem_wb.valid && mem_wb.ctrl.reg_write && mem_wb.inst.rd != 0 && mem_wb.inst.rd == rs {
        return Forward::FromMemWb;
    }
    Forward::Register
}

/// The writeback value a MEM/WB latch would commit: loaded data for loads,
/// the ALU result otherwise.
pub fn wb_value(mem_wb: &MemWb) -> u32 {
    if mem_wb.ctrl.mem_to_reg {
        mem_wb.read_data
    } else {
        mem_wb.alu_result
    }
}

/// Resolves both Execute-stage operands for the instruction in ID/EX.
///
/// Returns `(rs1_value, rs2_value)`. The rs2 value is also the store-data
/// path: for stores it overrides the `read_data2` carried into EX/MEM.
pub fn forward_operands(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb) -> (u32, u32) {
    let a = match select(id_ex.inst.rs1, ex_mem, mem_wb) {
        Forward::FromExMem => ex_mem.alu.result,
        Forward::FromMemWb => wb_value(mem_wb),
        Forward::Register => id_ex.read_data1,
    };
    let b = match select(id_ex.inst.rs2, ex_mem, mem_wb) {
        Forward::FromExMem => ex_mem.alu.result,
        Forward::FromMemWb => wb_value(mem_wb),
        Forward::Register => id_ex.read_data2,
    };
    (a, b)
}
