use crate::core::cpu::Processor;
use crate::isa::instruction::{Format, Opcode};
use crate::trace::StageLabel;

/// Writeback.
///
/// Commits the writeback value into the register file. This runs first in
/// the cycle, so a Decode-stage register read in the same cycle observes
/// the committed value.
pub fn wb_stage(cpu: &mut Processor) {
    if !cpu.mem_wb.valid {
        return;
    }
    let wb = cpu.mem_wb.clone();

    cpu.recorder.record(wb.pc, cpu.stats.cycles, StageLabel::Wb);

    let val = if wb.ctrl.mem_to_reg {
        wb.read_data
    } else {
        wb.alu_result
    };

    if wb.ctrl.reg_write && wb.inst.rd != 0 {
        if cpu.trace {
            eprintln!("WB  pc={:#x} x{} <= {:#x}", wb.pc, wb.inst.rd, val);
        }
        cpu.regs.write(wb.inst.rd, val);
    } else if cpu.trace {
        eprintln!("WB  pc={:#x}", wb.pc);
    }

    cpu.stats.instructions_retired += 1;
    if wb.ctrl.mem_read {
        cpu.stats.inst_load += 1;
    } else if wb.ctrl.mem_write {
        cpu.stats.inst_store += 1;
    } else if wb.inst.format == Format::B {
        cpu.stats.inst_branch += 1;
    } else if wb.inst.format == Format::J || wb.inst.opcode == Opcode::Jalr {
        cpu.stats.inst_jump += 1;
    } else if wb.inst.opcode != Opcode::Invalid {
        cpu.stats.inst_alu += 1;
    }
}
