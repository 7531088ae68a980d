use super::*;

struct TestBus {
    memory: [u8; 0x10000],
    ticked: u32,
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
            ticked: 0,
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    fn tick(&mut self, cycles: u32) {
        self.ticked += cycles;
    }
}

/// Zeroed CPU with `program` at `origin` and PC pointing at it.
fn setup_at(origin: u16, program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    let start = origin as usize;
    bus.memory[start..start + program.len()].copy_from_slice(program);
    // Joypad lines idle high.
    bus.memory[JOYPAD_ADDR as usize] = 0xFF;

    let mut cpu = Cpu::with_boot_state(BootState::Zeroed);
    cpu.regs.pc = origin;
    cpu.regs.sp = 0xFFFE;
    (cpu, bus)
}

fn setup(program: &[u8]) -> (Cpu, TestBus) {
    setup_at(0x0000, program)
}

#[test]
fn dmg_boot_state_matches_post_boot_registers() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime());
    assert_eq!(cpu.state(), RunState::Running);
}

#[test]
fn reset_restores_boot_state_and_unlocks() {
    let (mut cpu, mut bus) = setup(&[0xD3]);
    assert!(cpu.step(&mut bus).is_err());
    assert!(cpu.is_locked());

    cpu.reset();
    assert!(!cpu.is_locked());
    assert_eq!(cpu.regs, Registers::default());
}

#[test]
fn register_pairs_alias_their_halves() {
    let mut regs = Registers::default();
    regs.set_bc(0x1234);
    assert_eq!((regs.b, regs.c), (0x12, 0x34));

    regs.h = 0xAB;
    regs.l = 0xCD;
    assert_eq!(regs.hl(), 0xABCD);

    regs.set_af(0x12FF);
    assert_eq!(regs.a, 0x12);
    assert_eq!(regs.af(), 0x12F0);
}

#[test]
fn add_sets_zero_half_and_carry() {
    // ADD A,B
    let (mut cpu, mut bus) = setup(&[0x80]);
    cpu.regs.a = 0x3A;
    cpu.regs.b = 0xC6;

    let cycles = cpu.step(&mut bus).unwrap();

    assert_eq!(cycles, 4);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::H | Flags::C);
    assert_eq!(cpu.regs.pc, 0x0001);
}

#[test]
fn sub_sets_subtract_and_borrow() {
    // SUB d8 twice.
    let (mut cpu, mut bus) = setup(&[0xD6, 0x3E, 0xD6, 0x40]);
    cpu.regs.a = 0x3E;

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::N);

    cpu.regs.a = 0x3E;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0xFE);
    assert_eq!(cpu.regs.f, Flags::N | Flags::C);
}

#[test]
fn sbc_borrows_through_the_carry_in() {
    // SBC A,B with A=0x10, B=0x0F, C=1: 0x10 - 0x0F - 1 = 0.
    let (mut cpu, mut bus) = setup(&[0x98]);
    cpu.regs.a = 0x10;
    cpu.regs.b = 0x0F;
    cpu.regs.f = Flags::C;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::N | Flags::H);
}

#[test]
fn zero_flag_follows_result() {
    // XOR A ; INC A ; OR A
    let (mut cpu, mut bus) = setup(&[0xAF, 0x3C, 0xB7]);
    cpu.regs.a = 0x5A;
    cpu.regs.f = Flags::C;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0);
    assert_eq!(cpu.regs.f, Flags::Z);

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.regs.flag(Flags::Z));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.f, Flags::empty());
}

#[test]
fn cp_only_touches_flags() {
    // CP (HL)
    let (mut cpu, mut bus) = setup(&[0xBE]);
    cpu.regs.a = 0x42;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x42;

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::N);
}

#[test]
fn inc_and_dec_preserve_carry() {
    // INC B ; DEC C
    let (mut cpu, mut bus) = setup(&[0x04, 0x0D]);
    cpu.regs.b = 0xFF;
    cpu.regs.c = 0x01;
    cpu.regs.f = Flags::C;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0x00);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::H | Flags::C);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.c, 0x00);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::N | Flags::C);
}

#[test]
fn inc_hl_indirect_goes_through_memory() {
    // INC (HL)
    let (mut cpu, mut bus) = setup(&[0x34]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x0F;

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(bus.memory[0xC000], 0x10);
    assert_eq!(cpu.regs.f, Flags::H);
}

#[test]
fn daa_adjusts_bcd_addition() {
    // LD A,0x15 ; ADD A,0x27 ; DAA
    let (mut cpu, mut bus) = setup(&[0x3E, 0x15, 0xC6, 0x27, 0x27]);

    for _ in 0..3 {
        cpu.step(&mut bus).unwrap();
    }

    assert_eq!(cpu.regs.a, 0x42);
    assert!(!cpu.regs.flag(Flags::C));
}

#[test]
fn add_hl_keeps_zero_and_sets_carries() {
    // ADD HL,DE
    let (mut cpu, mut bus) = setup(&[0x19]);
    cpu.regs.set_hl(0x8FFF);
    cpu.regs.set_de(0x7001);
    cpu.regs.f = Flags::Z;

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.hl(), 0x0000);
    assert_eq!(cpu.regs.f, Flags::Z | Flags::H | Flags::C);
}

#[test]
fn add_sp_negative_offset_uses_low_byte_carries() {
    // ADD SP,-1
    let (mut cpu, mut bus) = setup(&[0xE8, 0xFF]);
    cpu.regs.sp = 0x0001;

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.sp, 0x0000);
    assert_eq!(cpu.regs.f, Flags::H | Flags::C);
}

#[test]
fn ld_hl_sp_offset_leaves_sp_alone() {
    // LD HL,SP+2
    let (mut cpu, mut bus) = setup(&[0xF8, 0x02]);
    cpu.regs.sp = 0xFFF8;

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.hl(), 0xFFFA);
    assert_eq!(cpu.regs.sp, 0xFFF8);
    assert_eq!(cpu.regs.f, Flags::empty());
}

#[test]
fn ld_hl_increment_and_decrement_step_hl() {
    // LD (HL+),A ; LD A,(HL-)
    let (mut cpu, mut bus) = setup(&[0x22, 0x3A]);
    cpu.regs.set_hl(0xC000);
    cpu.regs.a = 0x42;
    bus.memory[0xC001] = 0x99;

    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.memory[0xC000], 0x42);
    assert_eq!(cpu.regs.hl(), 0xC001);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x99);
    assert_eq!(cpu.regs.hl(), 0xC000);
}

#[test]
fn ld_high_page_forms() {
    // LDH (0x80),A ; LD A,(C)
    let (mut cpu, mut bus) = setup(&[0xE0, 0x80, 0xF2]);
    cpu.regs.a = 0x12;
    cpu.regs.c = 0x81;
    bus.memory[0xFF81] = 0x34;

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(bus.memory[0xFF80], 0x12);

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.a, 0x34);
    assert_eq!(cpu.regs.pc, 0x0003);
}

#[test]
fn ld_absolute_sp_stores_little_endian() {
    // LD (0xC000),SP
    let (mut cpu, mut bus) = setup(&[0x08, 0x00, 0xC0]);
    cpu.regs.sp = 0xFFF8;

    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    assert_eq!(bus.memory[0xC000], 0xF8);
    assert_eq!(bus.memory[0xC001], 0xFF);
    assert_eq!(cpu.regs.pc, 0x0003);
}

#[test]
fn push_pop_round_trip() {
    // LD BC,0x1234 ; PUSH BC ; POP DE
    let (mut cpu, mut bus) = setup(&[0x01, 0x34, 0x12, 0xC5, 0xD1]);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFD], 0x12);
    assert_eq!(bus.memory[0xFFFC], 0x34);

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.de(), 0x1234);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn pop_af_masks_low_nibble_of_f() {
    // POP AF
    let (mut cpu, mut bus) = setup(&[0xF1]);
    cpu.regs.sp = 0xC000;
    bus.memory[0xC000] = 0xFF;
    bus.memory[0xC001] = 0x12;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.af(), 0x12F0);
    assert_eq!(cpu.regs.f.bits() & 0x0F, 0);
}

#[test]
fn swap_twice_restores_value() {
    // SWAP A ; SWAP A
    let (mut cpu, mut bus) = setup(&[0xCB, 0x37, 0xCB, 0x37]);
    cpu.regs.a = 0xF1;

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.a, 0x1F);
    assert_eq!(cpu.regs.f, Flags::empty());

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0xF1);
    assert_eq!(cpu.regs.pc, 0x0004);
}

#[test]
fn swap_zero_sets_zero_flag() {
    let (mut cpu, mut bus) = setup(&[0xCB, 0x37]);
    cpu.regs.a = 0x00;
    cpu.regs.f = Flags::C;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.f, Flags::Z);
}

#[test]
fn cb00_is_rlc_b_not_nop() {
    assert_eq!(lookup(0x0000).name, "NOP");
    assert_eq!(lookup(0xCB00).name, "RLC");
    assert_eq!(lookup(0xCB00).mnemonic(), "RLC B");

    let (mut cpu, mut bus) = setup(&[0xCB, 0x00]);
    cpu.regs.b = 0x85;

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.b, 0x0B);
    assert_eq!(cpu.regs.f, Flags::C);
    assert_eq!(cpu.regs.pc, 0x0002);
}

#[test]
fn bit_7_of_a() {
    // BIT 7,A twice.
    let (mut cpu, mut bus) = setup(&[0xCB, 0x7F, 0xCB, 0x7F]);
    cpu.regs.a = 0x80;
    cpu.regs.f = Flags::C;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.f, Flags::H | Flags::C);
    assert_eq!(cpu.regs.a, 0x80);

    cpu.regs.a = 0x7F;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.f, Flags::Z | Flags::H | Flags::C);
}

#[test]
fn res_and_set_on_hl_indirect() {
    // RES 0,(HL) ; SET 7,(HL)
    let (mut cpu, mut bus) = setup(&[0xCB, 0x86, 0xCB, 0xFE]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x01;
    cpu.regs.f = Flags::Z;

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(bus.memory[0xC000], 0x00);

    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.memory[0xC000], 0x80);
    assert_eq!(cpu.regs.f, Flags::Z);
}

#[test]
fn bit_on_hl_indirect_costs_twelve_cycles() {
    let (mut cpu, mut bus) = setup(&[0xCB, 0x46]);
    cpu.regs.set_hl(0xC000);

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert!(cpu.regs.flag(Flags::Z));
}

#[test]
fn accumulator_rotates_clear_zero() {
    // RLCA with A=0 keeps A=0 but Z stays clear.
    let (mut cpu, mut bus) = setup(&[0x07, 0x17]);
    cpu.regs.a = 0x00;
    cpu.regs.f = Flags::Z;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.f, Flags::empty());

    // RLA shifts the old carry in.
    cpu.regs.a = 0x80;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::C);
}

#[test]
fn jp_nz_taken_and_not_taken() {
    let (mut cpu, mut bus) = setup(&[0xC2, 0x00, 0x02]);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.pc, 0x0200);

    let (mut cpu, mut bus) = setup(&[0xC2, 0x00, 0x02]);
    cpu.regs.f = Flags::Z;

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.pc, 0x0003);
}

#[test]
fn jp_hl_jumps_to_register_value() {
    let (mut cpu, mut bus) = setup(&[0xE9]);
    cpu.regs.set_hl(0x4000);

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.regs.pc, 0x4000);
}

#[test]
fn jr_offsets_from_next_instruction() {
    // JR -2 spins on itself; JR +3 skips ahead.
    let (mut cpu, mut bus) = setup_at(0x0010, &[0x18, 0xFE]);
    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.pc, 0x0010);

    let (mut cpu, mut bus) = setup_at(0x0010, &[0x18, 0x03]);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0015);
}

#[test]
fn jr_c_not_taken_costs_eight() {
    let (mut cpu, mut bus) = setup(&[0x38, 0x10]);

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.pc, 0x0002);
}

#[test]
fn call_then_ret_returns_after_call() {
    let (mut cpu, mut bus) = setup_at(0x0200, &[0xCD, 0x00, 0x03]);
    bus.memory[0x0300] = 0xC9;

    assert_eq!(cpu.step(&mut bus).unwrap(), 24);
    assert_eq!(cpu.regs.pc, 0x0300);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFD], 0x02);
    assert_eq!(bus.memory[0xFFFC], 0x03);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.pc, 0x0203);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn conditional_call_and_ret_costs() {
    // CALL Z,0x0300 (not taken) ; CALL NZ,0x0300 (taken)
    let (mut cpu, mut bus) = setup(&[0xCC, 0x00, 0x03, 0xC4, 0x00, 0x03]);
    // RET Z (not taken) ; RET NZ (taken)
    bus.memory[0x0300] = 0xC8;
    bus.memory[0x0301] = 0xC0;

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.step(&mut bus).unwrap(), 24);
    assert_eq!(cpu.regs.pc, 0x0300);
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.pc, 0x0301);
    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    assert_eq!(cpu.regs.pc, 0x0006);
}

#[test]
fn rst_pushes_and_jumps_to_vector() {
    let (mut cpu, mut bus) = setup_at(0x1234, &[0xFF]);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.pc, 0x0038);
    assert_eq!(bus.memory[0xFFFD], 0x12);
    assert_eq!(bus.memory[0xFFFC], 0x35);
}

#[test]
fn reti_enables_interrupts() {
    let (mut cpu, mut bus) = setup(&[0xD9]);
    cpu.regs.sp = 0xC000;
    bus.memory[0xC000] = 0x50;
    bus.memory[0xC001] = 0x01;

    cpu.step(&mut bus).unwrap();

    assert!(cpu.ime());
    assert_eq!(cpu.regs.pc, 0x0150);
    assert_eq!(cpu.regs.sp, 0xC002);
}

#[test]
fn ei_and_di_take_effect_immediately() {
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3]);

    cpu.step(&mut bus).unwrap();
    assert!(cpu.ime());

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.ime());
}

#[test]
fn invalid_opcode_faults_and_locks() {
    let (mut cpu, mut bus) = setup_at(0x0150, &[0xD3]);

    let err = cpu.step(&mut bus).unwrap_err();
    assert_eq!(
        err,
        CpuError::DecodeFault {
            address: 0x0150,
            opcode: 0x00D3
        }
    );
    assert_eq!(cpu.regs.pc, 0x0150);
    assert_eq!(bus.ticked, 0);

    let err = cpu.step(&mut bus).unwrap_err();
    assert_eq!(
        err,
        CpuError::Locked {
            address: 0x0150,
            opcode: 0x00D3
        }
    );
    assert_eq!(cpu.fault(), Some(CpuError::DecodeFault { address: 0x0150, opcode: 0x00D3 }));
}

#[test]
fn unknown_stop_variant_is_a_decode_fault() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x01]);

    let err = cpu.step(&mut bus).unwrap_err();

    assert_eq!(
        err,
        CpuError::DecodeFault {
            address: 0x0000,
            opcode: 0x1001
        }
    );
    assert_eq!(cpu.state(), RunState::Running);
}

#[test]
fn halt_idles_until_an_enabled_interrupt_is_requested() {
    // HALT ; NOP
    let (mut cpu, mut bus) = setup(&[0x76, 0x00]);

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.state(), RunState::Halted);
    assert_eq!(cpu.regs.pc, 0x0001);

    // Requested but not enabled: keep idling.
    bus.memory[IF_ADDR as usize] = 0x04;
    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(cpu.state(), RunState::Halted);

    // Enabled as well: wake with IME clear and run the NOP.
    bus.memory[IE_ADDR as usize] = 0x04;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.state(), RunState::Running);
    assert_eq!(cpu.regs.pc, 0x0002);
    assert_eq!(bus.ticked, 12);
}

#[test]
fn stop_waits_for_a_joypad_line() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x00, 0x00]);

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.state(), RunState::Stopped);
    assert_eq!(cpu.regs.pc, 0x0002);
    let ticked = bus.ticked;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.state(), RunState::Stopped);
    assert_eq!(bus.ticked, ticked);

    bus.memory[JOYPAD_ADDR as usize] = 0xFE;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.state(), RunState::Running);
    assert_eq!(cpu.regs.pc, 0x0002);
}

#[test]
fn service_interrupt_picks_lowest_pending_source() {
    let (mut cpu, mut bus) = setup_at(0x0123, &[0x00]);
    cpu.set_ime(true);
    bus.memory[IE_ADDR as usize] = 0x1F;
    bus.memory[IF_ADDR as usize] = 0x14;

    assert_eq!(cpu.service_interrupt(&mut bus), Some(20));

    assert_eq!(cpu.regs.pc, 0x0050);
    assert!(!cpu.ime());
    assert_eq!(bus.memory[IF_ADDR as usize], 0x10);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFD], 0x01);
    assert_eq!(bus.memory[0xFFFC], 0x23);
}

#[test]
fn service_interrupt_requires_ime_and_enable() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    assert_eq!(cpu.service_interrupt(&mut bus), None);

    cpu.set_ime(true);
    bus.memory[IE_ADDR as usize] = 0x02;
    assert_eq!(cpu.service_interrupt(&mut bus), None);
    assert_eq!(cpu.regs.pc, 0x0000);
}

#[test]
fn service_interrupt_wakes_halted_cpu() {
    let (mut cpu, mut bus) = setup(&[0xFB, 0x76]);
    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.state(), RunState::Halted);

    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;
    assert_eq!(cpu.service_interrupt(&mut bus), Some(20));

    assert_eq!(cpu.state(), RunState::Running);
    assert_eq!(cpu.regs.pc, 0x0040);
    // Return address is the instruction after HALT.
    assert_eq!(bus.memory[0xFFFC], 0x02);
}

#[test]
fn primary_table_leaves_only_holes_and_prefixes_undefined() {
    let expected: Vec<u16> = vec![
        0x10, 0xCB, 0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
    ];
    let undefined: Vec<u16> = (0..=0xFFu16)
        .filter(|&code| !lookup(code).is_implemented())
        .collect();
    assert_eq!(undefined, expected);
}

#[test]
fn extended_table_is_complete() {
    for low in 0..=0xFFu16 {
        let code = 0xCB00 | low;
        let descriptor = lookup(code);
        assert!(descriptor.is_implemented(), "0x{code:04X} missing");
        assert_eq!(descriptor.opcode, code);
        assert_eq!(descriptor.length, 2);
    }
}

#[test]
fn descriptors_carry_their_own_code() {
    for code in 0..=0xFFu16 {
        assert_eq!(lookup(code).opcode, code);
    }
    assert_eq!(lookup(0x1000).name, "STOP");
    assert_eq!(lookup(0x1000).length, 2);
    assert!(!lookup(0x1001).is_implemented());
    assert!(!lookup(0xDD00).is_implemented());
}

#[test]
fn lengths_follow_immediates() {
    assert_eq!(lookup(0x00).length, 1);
    assert_eq!(lookup(0x3E).length, 2);
    assert_eq!(lookup(0x01).length, 3);
    assert_eq!(lookup(0xE0).length, 2);
    assert_eq!(lookup(0xEA).length, 3);
    assert_eq!(lookup(0xF8).length, 2);
}

#[test]
fn mnemonics_render_operands() {
    assert_eq!(lookup(0x7E).mnemonic(), "LD A, (HL)");
    assert_eq!(lookup(0x22).mnemonic(), "LD (HL+), A");
    assert_eq!(lookup(0x90).mnemonic(), "SUB B");
    assert_eq!(lookup(0xCB7C).mnemonic(), "BIT 7, H");
    assert_eq!(lookup(0xE0).mnemonic(), "LDH (FF00+a8), A");
    assert_eq!(lookup(0x20).mnemonic(), "JR NZ, r8");
    assert_eq!(lookup(0xEF).mnemonic(), "RST 28H");
    assert_eq!(lookup(0xD3).to_string(), INVALID);
}

#[test]
fn step_ticks_the_bus_once_per_instruction() {
    // NOP ; LD BC,d16 ; JP a16
    let (mut cpu, mut bus) = setup(&[0x00, 0x01, 0x00, 0x00, 0xC3, 0x00, 0x00]);

    let total: u32 = (0..3).map(|_| cpu.step(&mut bus).unwrap()).sum();

    assert_eq!(total, 4 + 12 + 16);
    assert_eq!(bus.ticked, total);
}
