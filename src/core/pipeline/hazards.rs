//! Hazard detection.
//!
//! Decides when the Fetch and Decode stages must stall for a data hazard.
//! The unit runs inside Decode, after the Execute and Memory stages of the
//! current cycle have advanced their latches: `id_ex` still holds the
//! instruction Execute consumed this cycle, while `ex_mem` and `mem_wb`
//! describe the instructions that will occupy Memory and Writeback next
//! cycle. An instruction performing its writeback this cycle never stalls a
//! reader, because the register file is written in the first half of the
//! cycle and read in the second.

use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::isa::instruction::{Format, Instruction, Opcode};

/// Whether the instruction actually reads rs1.
pub fn uses_rs1(inst: &Instruction) -> bool {
    inst.rs1 != 0 && inst.format != Format::U && inst.format != Format::J
}

/// Whether the instruction actually reads rs2.
pub fn uses_rs2(inst: &Instruction) -> bool {
    inst.rs2 != 0
        && matches!(inst.format, Format::R | Format::B | Format::S)
}

/// Control transfers resolve in Decode, so they consume their source
/// registers a stage earlier than everything else.
pub fn is_branch_or_jump(inst: &Instruction) -> bool {
    inst.format == Format::B || inst.format == Format::J || inst.opcode == Opcode::Jalr
}

/// Decides whether the instruction in IF/ID must stall this cycle.
///
/// With forwarding enabled only three cases stall:
/// a load in Execute whose destination feeds this instruction (load-use),
/// a Decode-resolved transfer whose source is a load about to write back,
/// and a Decode-resolved transfer whose source is still being computed in
/// Execute.
///
/// With forwarding disabled, any in-flight writer of a used source register
/// stalls the reader; re-evaluation on the following cycles naturally bounds
/// the stall at two cycles.
pub fn need_stall(
    if_id: &IfId,
    id_ex: &IdEx,
    ex_mem: &ExMem,
    mem_wb: &MemWb,
    forwarding: bool,
) -> bool {
    if !if_id.valid {
        return false;
    }

    let inst = &if_id.inst;
    let rs1 = inst.rs1;
    let rs2 = inst.rs2;
    let use1 = uses_rs1(inst);
    let use2 = uses_rs2(inst);
    let early_reader = is_branch_or_jump(inst);

    let matches = |rd: usize| (use1 && rd == rs1) || (use2 && rd == rs2);

    if forwarding {
        // Load-use: the load in Execute has not reached memory yet.
        if id_ex.valid && id_ex.ctrl.mem_read && id_ex.inst.rd != 0 && matches(id_ex.inst.rd) {
            return true;
        }
        // A load one writeback away cannot reach a Decode-stage consumer.
        if early_reader
            && mem_wb.valid
            && mem_wb.ctrl.mem_read
            && mem_wb.inst.rd != 0
            && matches(mem_wb.inst.rd)
        {
            return true;
        }
        // An Execute-stage result does not exist yet at Decode time.
        if early_reader
            && id_ex.valid
            && id_ex.ctrl.reg_write
            && id_ex.inst.rd != 0
            && matches(id_ex.inst.rd)
        {
            return true;
        }
        return false;
    }

    if id_ex.valid && id_ex.ctrl.reg_write && id_ex.inst.rd != 0 && matches(id_ex.inst.rd) {
        return true;
    }
    if ex_mem.valid && ex_mem.ctrl.reg_write && ex_mem.inst.rd != 0 && matches(ex_mem.inst.rd) {
        return true;
    }
    if mem_wb.valid && mem_wb.ctrl.reg_write && mem_wb.inst.rd != 0 && matches(mem_wb.inst.rd) {
        return true;
    }

    false
}
