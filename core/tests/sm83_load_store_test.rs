use olivine_core::cpu::Sm83;
mod common;
use common::TestBus;

// --- LD r, r' matrix ---

#[test]
fn test_ld_b_c() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.c = 0x55;
    bus.load(0x0100, &[0x41]); // LD B, C

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 4);
    assert_eq!(cpu.b, 0x55);
    assert_eq!(cpu.pc, 0x0101);
}

#[test]
fn test_ld_a_l() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.l = 0x99;
    bus.load(0x0100, &[0x7D]); // LD A, L

    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x99);
}

#[test]
fn test_ld_r_to_itself() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.d = 0x77;
    bus.load(0x0100, &[0x52]); // LD D, D

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 4);
    assert_eq!(cpu.d, 0x77);
}

#[test]
fn test_ld_r_from_hl() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.set_hl(0xC123);
    bus.memory[0xC123] = 0xAB;
    bus.load(0x0100, &[0x46]); // LD B, (HL)

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 8);
    assert_eq!(cpu.b, 0xAB);
}

#[test]
fn test_ld_hl_r_stores_to_memory() {
    // The store goes to memory at HL; the register pair itself is untouched.
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.set_hl(0xC000);
    cpu.b = 0x42;
    bus.load(0x0100, &[0x70]); // LD (HL), B

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 8);
    assert_eq!(bus.memory[0xC000], 0x42);
    assert_eq!(cpu.get_hl(), 0xC000);
}

#[test]
fn test_ld_hl_a_stores_to_memory() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.set_hl(0xD000);
    cpu.a = 0x5A;
    bus.load(0x0100, &[0x77]); // LD (HL), A

    cpu.step(&mut bus);
    assert_eq!(bus.memory[0xD000], 0x5A);
    assert_eq!(cpu.get_hl(), 0xD000);
}

// --- LD r, n ---

#[test]
fn test_ld_r_n_each_register() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    bus.load(
        0x0100,
        &[0x06, 0x11, 0x0E, 0x22, 0x16, 0x33, 0x1E, 0x44, 0x26, 0x55, 0x2E, 0x66, 0x3E, 0x77],
    );

    for _ in 0..7 {
        let cycles = cpu.step(&mut bus);
        assert_eq!(cycles, 8);
    }
    assert_eq!(cpu.b, 0x11);
    assert_eq!(cpu.c, 0x22);
    assert_eq!(cpu.d, 0x33);
    assert_eq!(cpu.e, 0x44);
    assert_eq!(cpu.h, 0x55);
    assert_eq!(cpu.l, 0x66);
    assert_eq!(cpu.a, 0x77);
}

#[test]
fn test_ld_hl_n() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.set_hl(0xC800);
    bus.load(0x0100, &[0x36, 0xFE]); // LD (HL), 0xFE

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 12);
    assert_eq!(bus.memory[0xC800], 0xFE);
}

// --- LD rr, nn ---

#[test]
fn test_ld_rr_nn() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    bus.load(
        0x0100,
        &[0x01, 0x34, 0x12, 0x11, 0x78, 0x56, 0x21, 0xBC, 0x9A, 0x31, 0xF0, 0xDE],
    );

    for _ in 0..4 {
        let cycles = cpu.step(&mut bus);
        assert_eq!(cycles, 12);
    }
    assert_eq!(cpu.get_bc(), 0x1234);
    assert_eq!(cpu.get_de(), 0x5678);
    assert_eq!(cpu.get_hl(), 0x9ABC);
    assert_eq!(cpu.sp, 0xDEF0);
}

// --- Indirect A loads/stores ---

#[test]
fn test_ld_bc_indirect_a() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.a = 0x33;
    cpu.set_bc(0xC100);
    bus.load(0x0100, &[0x02]); // LD (BC), A

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 8);
    assert_eq!(bus.memory[0xC100], 0x33);
}

#[test]
fn test_ld_a_de_indirect() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.set_de(0xC200);
    bus.memory[0xC200] = 0x99;
    bus.load(0x0100, &[0x1A]); // LD A, (DE)

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 8);
    assert_eq!(cpu.a, 0x99);
}

#[test]
fn test_ld_hli_a_post_increments() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.a = 0xAA;
    cpu.set_hl(0xC000);
    bus.load(0x0100, &[0x22]); // LD (HL+), A

    cpu.step(&mut bus);
    assert_eq!(bus.memory[0xC000], 0xAA);
    assert_eq!(cpu.get_hl(), 0xC001);
}

#[test]
fn test_ld_hld_a_post_decrements() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.a = 0xBB;
    cpu.set_hl(0xC000);
    bus.load(0x0100, &[0x32]); // LD (HL-), A

    cpu.step(&mut bus);
    assert_eq!(bus.memory[0xC000], 0xBB);
    assert_eq!(cpu.get_hl(), 0xBFFF);
}

#[test]
fn test_ld_a_hli_post_increments() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.set_hl(0xC010);
    bus.memory[0xC010] = 0x12;
    bus.load(0x0100, &[0x2A]); // LD A, (HL+)

    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x12);
    assert_eq!(cpu.get_hl(), 0xC011);
}

#[test]
fn test_ld_a_hld_wraps() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.set_hl(0x0000);
    bus.memory[0x0000] = 0x34;
    bus.load(0x0100, &[0x3A]); // LD A, (HL-)

    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x34);
    assert_eq!(cpu.get_hl(), 0xFFFF);
}

// --- High-memory accessors ---

#[test]
fn test_ldh_n_a() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.a = 0x91;
    bus.load(0x0100, &[0xE0, 0x40]); // LDH (0x40), A

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 12);
    assert_eq!(bus.memory[0xFF40], 0x91);
}

#[test]
fn test_ldh_a_n() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    bus.memory[0xFF47] = 0xE4;
    bus.load(0x0100, &[0xF0, 0x47]); // LDH A, (0x47)

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 12);
    assert_eq!(cpu.a, 0xE4);
}

#[test]
fn test_ld_ff00_c_a() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.a = 0x7E;
    cpu.c = 0x80;
    bus.load(0x0100, &[0xE2]); // LD (FF00+C), A

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 8);
    assert_eq!(bus.memory[0xFF80], 0x7E);
}

#[test]
fn test_ld_a_ff00_c() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.c = 0x81;
    bus.memory[0xFF81] = 0x3C;
    bus.load(0x0100, &[0xF2]); // LD A, (FF00+C)

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 8);
    assert_eq!(cpu.a, 0x3C);
}

// --- Absolute A loads/stores ---

#[test]
fn test_ld_nn_a() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.a = 0x66;
    bus.load(0x0100, &[0xEA, 0x34, 0xC2]); // LD (0xC234), A

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 16);
    assert_eq!(bus.memory[0xC234], 0x66);
    assert_eq!(cpu.pc, 0x0103);
}

#[test]
fn test_ld_a_nn() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    bus.memory[0xC345] = 0x88;
    bus.load(0x0100, &[0xFA, 0x45, 0xC3]); // LD A, (0xC345)

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 16);
    assert_eq!(cpu.a, 0x88);
}

// --- LD (nn), SP ---

#[test]
fn test_ld_nn_sp_writes_low_then_high() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.sp = 0xBEEF;
    bus.load(0x0100, &[0x08, 0x00, 0xC4]); // LD (0xC400), SP

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 20);
    assert_eq!(bus.memory[0xC400], 0xEF, "low byte at nn");
    assert_eq!(bus.memory[0xC401], 0xBE, "high byte at nn+1");
}

// --- SP/HL transfers ---

#[test]
fn test_ld_sp_hl() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.set_hl(0xD123);
    bus.load(0x0100, &[0xF9]); // LD SP, HL

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 8);
    assert_eq!(cpu.sp, 0xD123);
}

#[test]
fn test_ld_hl_sp_e() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.sp = 0xFFF8;
    bus.load(0x0100, &[0xF8, 0x08]); // LD HL, SP+8

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 12);
    assert_eq!(cpu.get_hl(), 0x0000);
    assert_eq!(cpu.f(), 0x30, "H and C from low-byte adds, Z stays 0");
    assert_eq!(cpu.sp, 0xFFF8, "SP itself is unchanged");
}

#[test]
fn test_ld_hl_sp_negative_e() {
    let mut cpu = Sm83::new();
    let mut bus = TestBus::new();
    cpu.sp = 0x0005;
    bus.load(0x0100, &[0xF8, 0xFB]); // LD HL, SP-5

    cpu.step(&mut bus);
    assert_eq!(cpu.get_hl(), 0x0000);
}
