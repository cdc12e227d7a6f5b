//! # Statistics Verification
//!
//! Instruction mix, bus traffic and wait-cycle accounting for small programs
//! whose cycle counts are known exactly.

use pretty_assertions::assert_eq;
use rv32mc_core::config::Config;
use rv32mc_core::stats::SimStats;

use crate::common::builder::instruction::inst;
use crate::common::harness::TestContext;

#[test]
fn fresh_stats_are_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.cpi(), 0.0);
}

#[test]
fn alu_program_runs_at_three_cpi() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[inst().addi(1, 0, 5).build(), inst().addi(2, 1, 3).build(), inst().halt().build()],
    );
    let _ = ctx.run_until_halt().unwrap();
    let s = &ctx.sim.stats;
    assert_eq!(s.cycles, 9);
    assert_eq!(s.instructions_retired, 3);
    assert_eq!(s.cpi(), 3.0);
    assert_eq!(s.inst_alu, 2);
    assert_eq!(s.inst_jump, 1);
    assert_eq!(s.bus_reads, 3);
    assert_eq!(s.bus_writes, 0);
    assert_eq!(s.wait_fetch, 0);
}

#[test]
fn memory_instruction_mix() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[inst().sw(0, 0, 0x100).build(), inst().lw(1, 0, 0x100).build(), inst().halt().build()],
    );
    let _ = ctx.run_until_halt().unwrap();
    let s = &ctx.sim.stats;
    assert_eq!(s.cycles, 11);
    assert_eq!(s.inst_store, 1);
    assert_eq!(s.inst_load, 1);
    assert_eq!(s.bus_reads, 4);
    assert_eq!(s.bus_writes, 1);
}

#[test]
fn wait_cycles_by_access() {
    let mut config = Config::default();
    config.memory.wait_states = 2;
    let mut ctx = TestContext::with_config(&config).load_program(
        0,
        &[inst().sw(0, 0, 0x100).build(), inst().lw(1, 0, 0x100).build(), inst().halt().build()],
    );
    let _ = ctx.run_until_halt().unwrap();
    let s = &ctx.sim.stats;
    assert_eq!(s.wait_fetch, 6);
    assert_eq!(s.wait_store, 2);
    assert_eq!(s.wait_load, 2);
    assert_eq!(s.cycles, 11 + 10);
}

#[test]
fn branches_and_conditions() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            inst().beq(0, 0, 8).build(),
            0xFFFF_FFFF,
            inst().bne(0, 0, 8).build(),
            inst().fence().build(),
            inst().ecall().build(),
            inst().halt().build(),
        ],
    );
    let _ = ctx.run_until_halt().unwrap();
    let s = &ctx.sim.stats;
    assert_eq!(s.inst_branch, 2);
    assert_eq!(s.branches_taken, 1);
    assert_eq!(s.inst_system, 2);
    assert_eq!(s.inst_unimplemented, 0);
}

#[test]
fn report_has_sections() {
    let mut ctx = TestContext::with_wait_states(1).load_program(0, &[inst().halt().build()]);
    let _ = ctx.run_until_halt().unwrap();
    let text = ctx.sim.stats.to_string();
    assert!(text.contains("sim_cpi                  4.0000"), "{text}");
    assert!(text.contains("INSTRUCTION MIX"), "{text}");
    assert!(text.contains("wait.fetch"), "{text}");
}
