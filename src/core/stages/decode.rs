use crate::core::control;
use crate::core::cpu::Processor;
use crate::core::pipeline::forwarding;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::IdEx;
use crate::core::units::alu::Alu;
use crate::isa::instruction::Opcode;
use crate::trace::StageLabel;

/// What the Decode stage tells the engine about this cycle.
#[derive(Debug, Default)]
pub struct DecodeOutcome {
    /// Fetch must be held and a bubble was driven into ID/EX.
    pub stall: bool,
    /// A taken branch or jump resolved here; the PC must be overwritten and
    /// the speculatively fetched successor squashed.
    pub redirect: Option<u32>,
}

/// Instruction Decode.
///
/// Reads the register file, generates control signals, consults the hazard
/// detection unit, and resolves all control transfers (branches, JAL, JALR)
/// right here rather than in Execute.
pub fn decode_stage(cpu: &mut Processor) -> DecodeOutcome {
    let mut out = DecodeOutcome::default();

    if !cpu.if_id.valid {
        cpu.id_ex = IdEx::bubble();
        return out;
    }

    let pc = cpu.if_id.pc;
    let inst = cpu.if_id.inst.clone();

    cpu.recorder.record(pc, cpu.stats.cycles, StageLabel::Id);

    if hazards::need_stall(&cpu.if_id, &cpu.id_ex, &cpu.ex_mem, &cpu.mem_wb, cpu.forwarding) {
        // The frozen fetch slot keeps its IF label while the hazard clears.
        cpu.recorder.record(cpu.pc, cpu.stats.cycles, StageLabel::If);
        cpu.id_ex = IdEx::bubble();
        out.stall = true;
        return out;
    }

    if cpu.trace {
        eprintln!(
            "ID  pc={:#x} inst={:#010x} rd=x{} rs1=x{} rs2=x{} imm={}",
            pc, inst.raw, inst.rd, inst.rs1, inst.rs2, inst.imm
        );
    }

    let mut ctrl = control::generate(&inst);

    if hazards::is_branch_or_jump(&inst) {
        let rv1 = id_operand(cpu, inst.rs1);
        let rv2 = id_operand(cpu, inst.rs2);

        let (taken, target) = match inst.opcode {
            Opcode::Jal => (true, pc.wrapping_add(inst.imm as u32)),
            Opcode::Jalr => (true, rv1.wrapping_add(inst.imm as u32) & !1),
            // A reserved branch encoding never takes.
            Opcode::Invalid => (false, 0),
            _ => {
                let cmp = Alu::execute(ctrl.alu_op, rv1, rv2);
                (cmp.result != 0, pc.wrapping_add(inst.imm as u32))
            }
        };

        if taken {
            // The transfer is effected here; clearing these keeps the
            // downstream stages from applying a second PC update.
            ctrl.branch = false;
            ctrl.jump = false;
            out.redirect = Some(target);
        }
    }

    cpu.id_ex = IdEx {
        pc,
        read_data1: cpu.regs.read(inst.rs1),
        read_data2: cpu.regs.read(inst.rs2),
        imm: inst.imm,
        inst,
        ctrl,
        valid: true,
    };

    out
}

/// Resolves a source register for the early branch datapath.
///
/// With forwarding enabled the value may come from EX/MEM or MEM/WB; the
/// hazard detection unit has already stalled every case these paths cannot
/// cover. With forwarding disabled the stall logic guarantees the register
/// file is current.
fn id_operand(cpu: &Processor, rs: usize) -> u32 {
    if rs == 0 {
        return 0;
    }
    if cpu.forwarding {
        let ex_mem = &cpu.ex_mem;
        if ex_mem.valid && ex_mem.ctrl.reg_write && ex_mem.inst.rd == rs {
            return ex_mem.alu.result;
        }
        let mem_wb = &cpu.mem_wb;
        if mem_wb.valid && mem_wb.ctrl.reg_write && mem_wb.inst.rd == rs {
            return forwarding::wb_value(mem_wb);
        }
    }
    cpu.regs.read(rs)
}
