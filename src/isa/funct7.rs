//! RV32I function codes (funct7).
//!
//! The `funct7` field (bits 31-25) distinguishes between R-type operations
//! that share the same `funct3` (e.g., ADD vs SUB), and between the logical
//! and arithmetic right shifts in both their register and immediate forms.

/// Default operation (ADD, SRL, etc.).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate operation (SUB, SRA).
pub const SUB: u32 = 0b0100000;
/// Alias for SUB (used for Shift Right Arithmetic).
pub const SRA: u32 = 0b0100000;
