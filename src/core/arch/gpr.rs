//! General-purpose register file.
//!
//! Contains the 32 architectural registers (x0-x31) and enforces the
//! invariant that register x0 is hardwired to zero.

/// General-purpose register file.
pub struct Gpr {
    regs: [u32; 32],
}

impl Gpr {
    /// Creates a register file with all registers initialised to zero.
    pub fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads a register. x0 always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs[idx]
        }
    }

    /// Writes a register. Writes to x0 are silently discarded.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Dumps all registers to stdout, two per line.
    pub fn dump(&self) {
        for i in (0..32).step_by(2) {
            println!(
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.read(i),
                i + 1,
                self.read(i + 1)
            );
        }
    }
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}
