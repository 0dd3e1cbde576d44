use crate::core::cpu::Processor;
use crate::core::pipeline::latches::MemWb;
use crate::isa::instruction::Opcode;
use crate::trace::StageLabel;

/// Memory access.
///
/// Loads sign- or zero-extend sub-word data according to the opcode; stores
/// write the forwarded rs2 value. The ALU result is the byte address.
pub fn mem_stage(cpu: &mut Processor) {
    if !cpu.ex_mem.valid {
        cpu.mem_wb = MemWb::default();
        return;
    }
    let ex = cpu.ex_mem.clone();

    cpu.recorder.record(ex.pc, cpu.stats.cycles, StageLabel::Mem);

    let addr = ex.alu.result;
    let mut read_data = 0;

    if ex.ctrl.mem_read {
        if cpu.trace {
            eprintln!("MEM pc={:#x} LOAD addr={:#x}", ex.pc, addr);
        }
        read_data = match ex.inst.opcode {
            Opcode::Lb => cpu.dmem.read(addr, 1) as u8 as i8 as i32 as u32,
            Opcode::Lh => cpu.dmem.read(addr, 2) as u16 as i16 as i32 as u32,
            Opcode::Lw => cpu.dmem.read(addr, 4),
            Opcode::Lbu => cpu.dmem.read(addr, 1),
            Opcode::Lhu => cpu.dmem.read(addr, 2),
            _ => 0,
        };
    } else if ex.ctrl.mem_write {
        if cpu.trace {
            eprintln!(
                "MEM pc={:#x} STORE addr={:#x} data={:#x}",
                ex.pc, addr, ex.store_data
            );
        }
        match ex.inst.opcode {
            Opcode::Sb => cpu.dmem.write(addr, ex.store_data, 1),
            Opcode::Sh => cpu.dmem.write(addr, ex.store_data, 2),
            Opcode::Sw => cpu.dmem.write(addr, ex.store_data, 4),
            _ => {}
        }
    } else if cpu.trace {
        eprintln!("MEM pc={:#x}", ex.pc);
    }

    cpu.mem_wb = MemWb {
        pc: ex.pc,
        inst: ex.inst,
        alu_result: ex.alu.result,
        read_data,
        ctrl: ex.ctrl,
        valid: true,
    };
}
