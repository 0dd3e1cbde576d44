//! Pipeline trace recording.
//!
//! Maintains one row per static instruction, keyed by address, holding a
//! dense vector of stage labels indexed by cycle. Stages write their label
//! as they execute; cells with no activity render as `-`. The text grid is
//! the simulator's contractual output; the CSV and terminal forms carry the
//! same data.

use std::collections::HashMap;
use std::io::{self, Write};

/// Stage label for one (instruction, cycle) cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageLabel {
    If,
    Id,
    Ex,
    Mem,
    Wb,
}

impl StageLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StageLabel::If => "IF",
            StageLabel::Id => "ID",
            StageLabel::Ex => "EX",
            StageLabel::Mem => "MEM",
            StageLabel::Wb => "WB",
        }
    }
}

/// Empty-cell marker.
const NO_ACTIVITY: &str = "-";

/// Trace row for one static instruction.
pub struct InstructionTrace {
    pub address: u32,
    pub raw: u32,
    pub disassembly: String,
    stages: Vec<Option<StageLabel>>,
}

impl InstructionTrace {
    /// Label at a 1-based cycle number.
    pub fn label_at(&self, cycle: u64) -> &'static str {
        let idx = (cycle - 1) as usize;
        match self.stages.get(idx) {
            Some(Some(label)) => label.as_str(),
            _ => NO_ACTIVITY,
        }
    }
}

/// Per-(instruction, cycle) stage-label recorder.
pub struct TraceRecorder {
    entries: Vec<InstructionTrace>,
    by_addr: HashMap<u32, usize>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_addr: HashMap::new(),
        }
    }

    /// Registers an instruction row. The first registration of an address
    /// wins; rows keep program order.
    pub fn register(&mut self, address: u32, raw: u32, disassembly: String) {
        if self.by_addr.contains_key(&address) {
            return;
        }
        self.by_addr.insert(address, self.entries.len());
        self.entries.push(InstructionTrace {
            address,
            raw,
            disassembly,
            stages: Vec::new(),
        });
    }

    /// Writes a stage label for the instruction at `address` at a 1-based
    /// cycle. Unregistered addresses are ignored.
    pub fn record(&mut self, address: u32, cycle: u64, label: StageLabel) {
        let idx = match self.by_addr.get(&address) {
            Some(&idx) => idx,
            None => return,
        };
        let cell = (cycle - 1) as usize;
        let stages = &mut self.entries[idx].stages;
        if stages.len() <= cell {
            stages.resize(cell + 1, None);
        }
        stages[cell] = Some(label);
    }

    pub fn entries(&self) -> &[InstructionTrace] {
        &self.entries
    }

    /// The full label row for one instruction, padded to `cycles` cells.
    pub fn stage_row(&self, address: u32, cycles: u64) -> Vec<&'static str> {
        match self.by_addr.get(&address) {
            Some(&idx) => {
                let entry = &self.entries[idx];
                (1..=cycles).map(|c| entry.label_at(c)).collect()
            }
            None => vec![NO_ACTIVITY; cycles as usize],
        }
    }

    /// Plain-text grid: one line per instruction,
    /// `disassembly;label;label;...`.
    pub fn write_text<W: Write>(&self, w: &mut W, cycles: u64) -> io::Result<()> {
        for entry in &self.entries {
            write!(w, "{};", entry.disassembly)?;
            let labels: Vec<&str> = (1..=cycles).map(|c| entry.label_at(c)).collect();
            writeln!(w, "{}", labels.join(";"))?;
        }
        Ok(())
    }

    /// CSV grid with a header row and cycle-numbered columns.
    pub fn write_csv<W: Write>(&self, w: &mut W, cycles: u64) -> io::Result<()> {
        write!(w, "PC,Instruction")?;
        for c in 1..=cycles {
            write!(w, ",Cycle {}", c)?;
        }
        writeln!(w)?;

        for entry in &self.entries {
            write!(w, "{:#x},{}", entry.address, entry.disassembly)?;
            for c in 1..=cycles {
                write!(w, ",{}", entry.label_at(c))?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    /// Boxed table on stdout for interactive inspection.
    pub fn print_table(&self, cycles: u64) {
        let rule = || {
            print!("+------------+------------------+");
            for _ in 0..cycles {
                print!("-----+");
            }
            println!();
        };

        rule();
        print!("| PC         |   Instruction    |");
        for c in 1..=cycles {
            print!(" C{:<2} |", c);
        }
        println!();
        rule();

        for entry in &self.entries {
            print!(
                "| {:#010x} | {:<16} |",
                entry.address, entry.disassembly
            );
            for c in 1..=cycles {
                print!(" {:<3} |", entry.label_at(c));
            }
            println!();
        }
        rule();
    }
}

impl Default for TraceRecorder {
    fn default() -> Self {
        Self::new()
    }
}
