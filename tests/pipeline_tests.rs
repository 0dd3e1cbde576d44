//! End-to-end pipeline tests: stage grids, hazard timing, transfers,
//! memory behavior and trace serialisation.

mod common;

use common::*;

/// Straight-line independent arithmetic with forwarding: no stalls, one
/// instruction completing per cycle once the pipe is full.
#[test]
fn test_straight_line_arithmetic_grid() {
    let program = [0x00500113, 0x00A00193, 0x003101B3];
    let cpu = run_program(&program, 8, true);

    assert_eq!(
        grid(&cpu, 0, 8),
        ["IF", "ID", "EX", "MEM", "WB", "-", "-", "-"]
    );
    assert_eq!(
        grid(&cpu, 4, 8),
        ["-", "IF", "ID", "EX", "MEM", "WB", "-", "-"]
    );
    assert_eq!(
        grid(&cpu, 8, 8),
        ["-", "-", "IF", "ID", "EX", "MEM", "WB", "-"]
    );

    assert_eq!(cpu.regs.read(2), 5);
    assert_eq!(cpu.regs.read(3), 15);
    assert_eq!(cpu.stats.stalls_data, 0);
}

/// A dependent ALU instruction immediately after a non-load producer incurs
/// no stall when forwarding is on.
#[test]
fn test_alu_dependency_no_stall_with_forwarding() {
    let program = [addi(1, 0, 5), addi(2, 1, 3)];
    let cpu = run_program(&program, 7, true);

    assert_eq!(
        grid(&cpu, 4, 7),
        ["-", "IF", "ID", "EX", "MEM", "WB", "-"]
    );
    assert_eq!(cpu.regs.read(2), 8);
    assert_eq!(cpu.stats.stalls_data, 0);
}

/// The same dependent pair stalls exactly twice without forwarding.
#[test]
fn test_alu_dependency_two_stalls_without_forwarding() {
    let program = [addi(1, 0, 5), addi(2, 1, 3)];
    let cpu = run_program(&program, 9, false);

    assert_eq!(
        grid(&cpu, 4, 9),
        ["-", "IF", "ID", "ID", "ID", "EX", "MEM", "WB", "-"]
    );
    assert_eq!(cpu.regs.read(2), 8);
    assert_eq!(cpu.stats.stalls_data, 2);
}

/// Load-use hazard with forwarding: exactly one stall cycle.
#[test]
fn test_load_use_one_stall_with_forwarding() {
    let program = [0x00002103, 0x00210193];
    let cpu = run_program(&program, 7, true);

    assert_eq!(
        grid(&cpu, 0, 7),
        ["IF", "ID", "EX", "MEM", "WB", "-", "-"]
    );
    assert_eq!(
        grid(&cpu, 4, 7),
        ["-", "IF", "ID", "ID", "EX", "MEM", "WB"]
    );

    // Data memory is zeroed, so the load produces 0 and the addi 2.
    assert_eq!(cpu.regs.read(2), 0);
    assert_eq!(cpu.regs.read(3), 2);
    assert_eq!(cpu.stats.stalls_data, 1);
}

/// The same load-use pair stalls twice without forwarding.
#[test]
fn test_load_use_two_stalls_without_forwarding() {
    let program = [0x00002103, 0x00210193];
    let cpu = run_program(&program, 8, false);

    assert_eq!(
        grid(&cpu, 0, 8),
        ["IF", "ID", "EX", "MEM", "WB", "-", "-", "-"]
    );
    assert_eq!(
        grid(&cpu, 4, 8),
        ["-", "IF", "ID", "ID", "ID", "EX", "MEM", "WB"]
    );
    assert_eq!(cpu.regs.read(3), 2);
    assert_eq!(cpu.stats.stalls_data, 2);
}

/// A branch depending on the immediately preceding ALU result stalls one
/// cycle, then resolves in Decode. Here the branch is not taken.
#[test]
fn test_branch_after_alu_stalls_once() {
    let program = [0x00110313, 0x00030463];
    let cpu = run_program(&program, 7, true);

    assert_eq!(
        grid(&cpu, 0, 7),
        ["IF", "ID", "EX", "MEM", "WB", "-", "-"]
    );
    assert_eq!(
        grid(&cpu, 4, 7),
        ["-", "IF", "ID", "ID", "EX", "MEM", "WB"]
    );

    // x2 starts at 0, so x6 = 1 and `beq x6, x0` falls through.
    assert_eq!(cpu.regs.read(6), 1);
    assert_eq!(cpu.stats.stalls_data, 1);
    assert_eq!(cpu.stats.stalls_control, 0);
}

/// JAL: the return address is the following instruction, the target is
/// PC-relative, and exactly one speculatively fetched instruction is
/// squashed.
#[test]
fn test_jal_redirect_and_squash() {
    let program = [0x008000EF, NOP, NOP];
    let cpu = run_program(&program, 8, true);

    assert_eq!(
        grid(&cpu, 0, 8),
        ["IF", "ID", "EX", "MEM", "WB", "-", "-", "-"]
    );
    // The successor at 4 was fetched and then squashed: IF only.
    assert_eq!(
        grid(&cpu, 4, 8),
        ["-", "IF", "-", "-", "-", "-", "-", "-"]
    );
    // The target at 8 enters the pipe one cycle after the redirect.
    assert_eq!(
        grid(&cpu, 8, 8),
        ["-", "-", "IF", "ID", "EX", "MEM", "WB", "-"]
    );

    assert_eq!(cpu.regs.read(1), 4, "x1 holds the return address");
    assert_eq!(cpu.stats.stalls_control, 1);
}

/// A taken branch behaves like JAL: redirect plus a single squash.
#[test]
fn test_taken_branch_squashes_one() {
    let program = [beq(0, 0, 8), NOP, NOP];
    let cpu = run_program(&program, 8, true);

    assert_eq!(
        grid(&cpu, 4, 8),
        ["-", "IF", "-", "-", "-", "-", "-", "-"]
    );
    assert_eq!(
        grid(&cpu, 8, 8),
        ["-", "-", "IF", "ID", "EX", "MEM", "WB", "-"]
    );
    assert_eq!(cpu.stats.stalls_control, 1);
}

/// JALR: stalls on its address register, clears the low target bit, and
/// writes the return address.
#[test]
fn test_jalr_target_and_return_address() {
    let program = [addi(1, 0, 13), jalr(2, 1, 0), NOP, NOP];
    let cpu = run_program(&program, 10, true);

    // Target is (13 + 0) & !1 = 12, the last nop.
    assert_eq!(
        grid(&cpu, 12, 10),
        ["-", "-", "-", "-", "IF", "ID", "EX", "MEM", "WB", "-"]
    );
    // The jalr sits at 4, so the return address is 8.
    assert_eq!(cpu.regs.read(2), 8);
    assert_eq!(cpu.stats.stalls_data, 1, "jalr waits for x1");
    assert_eq!(cpu.stats.stalls_control, 1);
}

/// Unsigned branch comparison: 1 < 0xFFFF_FFFF unsigned, so BLTU takes.
#[test]
fn test_bltu_unsigned_comparison() {
    let program = [addi(1, 0, -1), addi(2, 0, 1), bltu(2, 1, 8), NOP, NOP];
    let cpu = run_program(&program, 10, true);

    // The branch at 8 waits one cycle for x2, then takes to 16.
    assert_eq!(cpu.stats.stalls_data, 1);
    assert_eq!(cpu.stats.stalls_control, 1);
    // The instruction at 12 is held in IF through the stall, fetched, then
    // squashed by the taken branch: two IF labels and nothing more.
    assert_eq!(
        grid(&cpu, 12, 10),
        ["-", "-", "-", "IF", "IF", "-", "-", "-", "-", "-"]
    );
    // The target at 16 runs to completion.
    assert_eq!(
        grid(&cpu, 16, 10),
        ["-", "-", "-", "-", "-", "IF", "ID", "EX", "MEM", "WB"]
    );
}

/// Store-data forwarding and a store→load round trip through data memory.
#[test]
fn test_store_load_round_trip() {
    let program = [addi(1, 0, 42), sw(1, 0, 0), lw(2, 0, 0)];
    let cpu = run_program(&program, 8, true);

    assert_eq!(cpu.dmem.read(0, 4), 42);
    assert_eq!(cpu.regs.read(2), 42);
    assert_eq!(cpu.stats.stalls_data, 0, "sw takes x1 via the EX forward");
}

/// A load feeding a store's data stalls once, then forwards the loaded
/// value into the store.
#[test]
fn test_load_to_store_forwarding() {
    // Memory starts zeroed; seed a value first.
    let program = [
        addi(1, 0, 99),
        sw(1, 0, 0),
        lw(2, 0, 0),
        sw(2, 0, 8),
    ];
    let cpu = run_program(&program, 10, true);

    assert_eq!(cpu.stats.stalls_data, 1, "sw waits one cycle for the load");
    assert_eq!(cpu.dmem.read(8, 4), 99);
}

/// Sub-word loads: LB sign-extends, LBU zero-extends.
#[test]
fn test_byte_load_extension() {
    let program = [addi(1, 0, -1), sb(1, 0, 0), lb(2, 0, 0), lbu(3, 0, 0)];
    let cpu = run_program(&program, 9, true);

    assert_eq!(cpu.regs.read(2), 0xFFFF_FFFF);
    assert_eq!(cpu.regs.read(3), 0xFF);
}

/// Out-of-range data accesses read zero and drop writes.
#[test]
fn test_out_of_range_memory_is_inert() {
    let program = [addi(1, 0, 7), sw(1, 0, 2000), lw(2, 0, 2000)];
    let cpu = run_program(&program, 8, true);

    assert_eq!(cpu.regs.read(2), 0);
}

/// Writes to x0 are discarded on every path.
#[test]
fn test_x0_never_written() {
    let program = [addi(0, 0, 5), r_type(0x00, 0, 0, 0b000, 1)];
    let cpu = run_program(&program, 7, true);

    assert_eq!(cpu.regs.read(0), 0);
    assert_eq!(cpu.regs.read(1), 0, "x1 = x0 + x0 with no phantom forward");
}

/// An all-zero word decodes as unknown and flows through as a nop.
#[test]
fn test_invalid_word_flows_as_nop() {
    let program = [0x0000_0000];
    let cpu = run_program(&program, 6, true);

    assert_eq!(grid(&cpu, 0, 6), ["IF", "ID", "EX", "MEM", "WB", "-"]);
    for r in 0..32 {
        assert_eq!(cpu.regs.read(r), 0);
    }
    assert_eq!(cpu.dmem.read(0, 4), 0);
    assert_eq!(cpu.recorder.entries()[0].disassembly, "unknown");
}

/// Trailing cycles after the program drains produce only empty cells.
#[test]
fn test_trailing_cycles_are_empty() {
    let program = [addi(1, 0, 1)];
    let cpu = run_program(&program, 12, true);

    assert_eq!(
        grid(&cpu, 0, 12),
        ["IF", "ID", "EX", "MEM", "WB", "-", "-", "-", "-", "-", "-", "-"]
    );
    assert_eq!(cpu.stats.instructions_retired, 1);
}

/// When forwarding is disabled, Decode picks up a value committed in the
/// first half of the same cycle (two stalls, never three).
#[test]
fn test_no_forwarding_reads_same_cycle_writeback() {
    let program = [addi(1, 0, 9), addi(2, 1, 1)];
    let cpu = run_program(&program, 9, false);

    assert_eq!(cpu.regs.read(2), 10);
    assert_eq!(cpu.stats.stalls_data, 2);
}

/// With two producers of the same register in flight, the younger wins.
#[test]
fn test_forwarding_picks_youngest_producer() {
    let program = [addi(1, 0, 1), addi(1, 0, 2), r_type(0x00, 1, 1, 0b000, 2)];
    let cpu = run_program(&program, 8, true);

    assert_eq!(cpu.regs.read(2), 4, "add x2, x1, x1 must see x1 = 2");
}

/// The text serialisation is `disassembly;label;...;label`, one line per
/// static instruction in program order.
#[test]
fn test_trace_text_format() {
    let program = [0x00500113, 0x00A00193, 0x003101B3];
    let cpu = run_program(&program, 8, true);

    let mut buf = Vec::new();
    cpu.recorder.write_text(&mut buf, 8).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "addi x2, x0, 5;IF;ID;EX;MEM;WB;-;-;-");
    assert_eq!(lines[1], "addi x3, x0, 10;-;IF;ID;EX;MEM;WB;-;-");
    assert_eq!(lines[2], "add x3, x2, x3;-;-;IF;ID;EX;MEM;WB;-");
}

/// The CSV serialisation carries a header row and cycle-numbered columns.
#[test]
fn test_trace_csv_format() {
    let program = [0x00500113];
    let cpu = run_program(&program, 5, true);

    let mut buf = Vec::new();
    cpu.recorder.write_csv(&mut buf, 5).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "PC,Instruction,Cycle 1,Cycle 2,Cycle 3,Cycle 4,Cycle 5");
    assert_eq!(lines[1], "0x0,addi x2, x0, 5,IF,ID,EX,MEM,WB");
}
