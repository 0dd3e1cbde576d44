use crate::config::Config;
use crate::core::arch::Gpr;
use crate::core::pipeline::{ExMem, IdEx, IfId, MemWb};
use crate::core::stages;
use crate::isa::{decoder, disasm};
use crate::mem::{DataMem, InstrMem};
use crate::stats::SimStats;
use crate::trace::TraceRecorder;

/// The processor aggregate: architectural state, memories, the four
/// inter-stage latches and the bookkeeping units. Owns every component;
/// there is no state outside this struct.
pub struct Processor {
    pub pc: u32,
    pub regs: Gpr,
    pub imem: InstrMem,
    pub dmem: DataMem,

    /// Operand forwarding enabled. Fixed for the lifetime of the run; the
    /// stall behavior of the hazard unit depends on it.
    pub forwarding: bool,
    /// Per-stage logging to stderr.
    pub trace: bool,

    pub if_id: IfId,
    pub id_ex: IdEx,
    pub ex_mem: ExMem,
    pub mem_wb: MemWb,
    /// Start-of-cycle snapshot of MEM/WB, taken before the Memory stage
    /// replaces it. The Execute stage forwards from this: it is the
    /// instruction performing its writeback in the current cycle.
    pub wb_latch: MemWb,

    pub recorder: TraceRecorder,
    pub stats: SimStats,
}

impl Processor {
    /// Builds a processor around a loaded program.
    ///
    /// Every program word is registered with the trace recorder up front,
    /// in program order, so the emitted grid always covers the whole
    /// program even for instructions never reached.
    pub fn new(program: Vec<u32>, config: &Config) -> Self {
        let imem = InstrMem::new(program);

        let mut recorder = TraceRecorder::new();
        for (addr, word) in imem.iter() {
            let inst = decoder::decode(word);
            recorder.register(addr, word, disasm::disassemble(&inst));
        }

        Self {
            pc: 0,
            regs: Gpr::new(),
            imem,
            dmem: DataMem::new(config.memory.data_mem_bytes),
            forwarding: config.general.forwarding,
            trace: config.general.trace_instructions,
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            wb_latch: MemWb::default(),
            recorder,
            stats: SimStats::default(),
        }
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// Stages run in reverse order (WB, MEM, EX, ID, IF) so each consumes
    /// the previous cycle's output of the stage behind it; this ordering is
    /// what encodes the synchronous-latch semantics and is a correctness
    /// requirement, not a convenience. PC control for transfers resolved in
    /// Decode is applied after all stages have run.
    pub fn tick(&mut self) {
        self.stats.cycles += 1;

        stages::write_back::wb_stage(self);

        self.wb_latch = self.mem_wb.clone();

        stages::memory_access::mem_stage(self);
        stages::execute::execute_stage(self);

        let outcome = stages::decode::decode_stage(self);
        if outcome.stall {
            self.stats.stalls_data += 1;
        } else {
            stages::fetch::fetch_stage(self);
        }

        if let Some(target) = outcome.redirect {
            // Taken transfer: overwrite the PC and squash the one
            // speculatively fetched successor.
            self.pc = target;
            self.if_id = IfId::default();
            self.stats.stalls_control += 1;
        }
    }

    /// Runs the pipeline for a fixed number of cycles. Trailing cycles
    /// after the program has drained simply flow bubbles.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.tick();
        }
    }

    /// Dumps the PC and register file to stdout.
    pub fn dump_state(&self) {
        println!("PC = {:#010x}", self.pc);
        self.regs.dump();
    }
}
