use crate::core::cpu::Processor;
use crate::core::pipeline::forwarding;
use crate::core::pipeline::latches::ExMem;
use crate::core::units::alu::{Alu, AluResult};
use crate::isa::instruction::Opcode;
use crate::trace::StageLabel;

/// Execute.
///
/// Runs the forwarding unit, selects the ALU operands and computes the
/// result. Forwarding sources are the EX/MEM latch as it stood at the start
/// of the cycle (the instruction now in Memory) and the writeback snapshot
/// (the instruction now in Writeback, whose load data is already available).
pub fn execute_stage(cpu: &mut Processor) {
    if !cpu.id_ex.valid {
        cpu.ex_mem = ExMem::default();
        return;
    }
    let id = cpu.id_ex.clone();

    cpu.recorder.record(id.pc, cpu.stats.cycles, StageLabel::Ex);
    if cpu.trace {
        eprintln!("EX  pc={:#x}", id.pc);
    }

    let (fwd_a, fwd_b) = if cpu.forwarding {
        forwarding::forward_operands(&id, &cpu.ex_mem, &cpu.wb_latch)
    } else {
        (id.read_data1, id.read_data2)
    };

    let op_a = fwd_a;
    let op_b = if id.ctrl.alu_src {
        id.imm as u32
    } else {
        fwd_b
    };

    let alu = match id.inst.opcode {
        // Jumps write back the return address.
        Opcode::Jal | Opcode::Jalr => AluResult::of(id.pc.wrapping_add(4)),
        Opcode::Lui => AluResult::of(id.imm as u32),
        Opcode::Auipc => AluResult::of(id.pc.wrapping_add(id.imm as u32)),
        _ => Alu::execute(id.ctrl.alu_op, op_a, op_b),
    };

    // Bookkeeping only: transfers were already effected in Decode, which
    // also cleared `branch`/`jump` for taken ones.
    let branch_target = id.pc.wrapping_add(id.imm as u32);
    let branch_taken = id.ctrl.branch && alu.result != 0;

    cpu.ex_mem = ExMem {
        pc: id.pc,
        inst: id.inst,
        alu,
        store_data: fwd_b,
        branch_target,
        branch_taken,
        ctrl: id.ctrl,
        valid: true,
    };
}
