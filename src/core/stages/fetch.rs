use crate::core::cpu::Processor;
use crate::core::pipeline::latches::IfId;
use crate::isa::decoder;
use crate::trace::StageLabel;

/// Instruction Fetch.
///
/// Reads the word at the current PC, decodes it into the IF/ID latch and
/// advances the PC by 4. Past the end of the program the fetch slot drains
/// to a bubble and the PC holds. Not called on a stall cycle; the PC and
/// IF/ID are simply held.
pub fn fetch_stage(cpu: &mut Processor) {
    // A misaligned PC (a JALR target with bit 1 set) has no instruction
    // slot; the fetch drains to bubbles without diagnosis.
    if cpu.pc % 4 != 0 {
        cpu.if_id = IfId::default();
        return;
    }

    let word = match cpu.imem.read(cpu.pc) {
        Some(w) => w,
        None => {
            cpu.if_id = IfId::default();
            return;
        }
    };

    if cpu.trace {
        eprintln!("IF  pc={:#x} inst={:#010x}", cpu.pc, word);
    }
    cpu.recorder.record(cpu.pc, cpu.stats.cycles, StageLabel::If);

    cpu.if_id = IfId {
        pc: cpu.pc,
        inst: decoder::decode(word),
        valid: true,
    };
    cpu.pc = cpu.pc.wrapping_add(4);
}
