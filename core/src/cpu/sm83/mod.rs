mod alu;
mod bit;
mod branch;
mod load_store;
mod stack;

use crate::core::Bus;
use crate::cpu::{
    Cpu,
    state::{CpuStateTrait, Sm83State},
};

/// The value of PC after the boot ROM has run.
const AFTER_BOOT_PC: u16 = 0x0100;

/// The value of SP after the boot ROM has run.
const AFTER_BOOT_SP: u16 = 0xFFFE;

#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum Flag {
    C = 0x10, // Carry
    H = 0x20, // Half Carry
    N = 0x40, // Subtract
    Z = 0x80, // Zero
}

/// The Sharp SM83, the CPU core of the DMG. A Z80 derivative with its own
/// flag layout (Z/N/H/C in the F high nibble), no shadow or index registers,
/// and the 0xFF00-page load instructions.
pub struct Sm83 {
    // Registers
    pub a: u8,
    f: u8, // low nibble always zero; mutated only via flags and set_af/set_f
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,

    // Internal state
    pub ime: bool,
    pub halted: bool,

    /// T-cycles committed since power-on. Never decreases.
    pub cycles: u64,

    /// The most recent opcode that reached the decoder without a handler.
    /// Execution continues past it; this is kept for diagnostic display.
    pub illegal_opcode: Option<u8>,
}

impl Default for Sm83 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sm83 {
    /// Create an SM83 in the post-boot-ROM DMG state.
    pub fn new() -> Self {
        Self {
            a: 0x01,
            f: 0xB0,
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            sp: AFTER_BOOT_SP,
            pc: AFTER_BOOT_PC,
            ime: false,
            halted: false,
            cycles: 0,
            illegal_opcode: None,
        }
    }

    // --- Flags ---

    pub fn flag(&self, flag: Flag) -> bool {
        (self.f & flag as u8) != 0
    }

    pub fn set_flag(&mut self, flag: Flag, set: bool) {
        if set {
            self.f |= flag as u8;
        } else {
            self.f &= !(flag as u8);
        }
    }

    pub fn f(&self) -> u8 {
        self.f
    }

    /// Replace F wholesale. The low nibble is forced to zero; the hardware
    /// has no storage for it.
    pub fn set_f(&mut self, val: u8) {
        self.f = val & 0xF0;
    }

    // --- 16-bit register pairs ---

    pub fn get_bc(&self) -> u16 { ((self.b as u16) << 8) | self.c as u16 }
    pub fn set_bc(&mut self, val: u16) { self.b = (val >> 8) as u8; self.c = val as u8; }

    pub fn get_de(&self) -> u16 { ((self.d as u16) << 8) | self.e as u16 }
    pub fn set_de(&mut self, val: u16) { self.d = (val >> 8) as u8; self.e = val as u8; }

    pub fn get_hl(&self) -> u16 { ((self.h as u16) << 8) | self.l as u16 }
    pub fn set_hl(&mut self, val: u16) { self.h = (val >> 8) as u8; self.l = val as u8; }

    pub fn get_af(&self) -> u16 { ((self.a as u16) << 8) | self.f as u16 }
    pub fn set_af(&mut self, val: u16) { self.a = (val >> 8) as u8; self.f = (val as u8) & 0xF0; }

    /// Return HL, then increment it (the HL+ addressing mode).
    pub(crate) fn hl_postinc(&mut self) -> u16 {
        let hl = self.get_hl();
        self.set_hl(hl.wrapping_add(1));
        hl
    }

    /// Return HL, then decrement it (the HL- addressing mode).
    pub(crate) fn hl_postdec(&mut self) -> u16 {
        let hl = self.get_hl();
        self.set_hl(hl.wrapping_sub(1));
        hl
    }

    /// Get 16-bit register pair by index (0=BC, 1=DE, 2=HL, 3=SP).
    pub(crate) fn get_rp(&self, index: u8) -> u16 {
        match index {
            0 => self.get_bc(),
            1 => self.get_de(),
            2 => self.get_hl(),
            3 => self.sp,
            _ => unreachable!("get_rp called with index {}", index),
        }
    }

    /// Set 16-bit register pair by index (0=BC, 1=DE, 2=HL, 3=SP).
    pub(crate) fn set_rp(&mut self, index: u8, val: u16) {
        match index {
            0 => self.set_bc(val),
            1 => self.set_de(val),
            2 => self.set_hl(val),
            3 => self.sp = val,
            _ => unreachable!("set_rp called with index {}", index),
        }
    }

    /// Get 8-bit register by SM83 encoding index (0=B, 1=C, 2=D, 3=E, 4=H,
    /// 5=L, 7=A). Index 6 is NOT handled here — callers handle (HL).
    pub fn get_r8(&self, index: u8) -> u8 {
        match index {
            0 => self.b,
            1 => self.c,
            2 => self.d,
            3 => self.e,
            4 => self.h,
            5 => self.l,
            7 => self.a,
            _ => unreachable!("get_r8 called with index {}", index),
        }
    }

    pub fn set_r8(&mut self, index: u8, val: u8) {
        match index {
            0 => self.b = val,
            1 => self.c = val,
            2 => self.d = val,
            3 => self.e = val,
            4 => self.h = val,
            5 => self.l = val,
            7 => self.a = val,
            _ => unreachable!("set_r8 called with index {}", index),
        }
    }

    // --- Fetch ---

    pub(crate) fn fetch_byte<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u8 {
        let val = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        val
    }

    pub(crate) fn fetch_word<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u16 {
        let low = self.fetch_byte(bus);
        let high = self.fetch_byte(bus);
        u16::from_le_bytes([low, high])
    }

    /// Execute one instruction to completion and return its T-cycle cost.
    ///
    /// While halted, each step costs 4 T-cycles and performs no fetch.
    pub fn step<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        if self.halted {
            self.cycles += 4;
            return 4;
        }

        let opcode = self.fetch_byte(bus);
        let t = self.execute(opcode, bus);
        self.cycles += u64::from(t);
        t
    }

    /// Primary opcode dispatch. Returns committed T-cycles.
    fn execute<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        match opcode {
            // NOP — 4 T
            0x00 => 4,

            // STOP — 4 T. Executed as NOP at this layer.
            0x10 => 4,

            // HALT — 4 T. Subsequent steps cost 4 T each with no fetch.
            0x76 => {
                self.halted = true;
                4
            }

            // CB prefix — dispatches a second byte
            0xCB => self.execute_cb(bus),

            // DI / EI — 4 T
            0xF3 => self.op_di(),
            0xFB => self.op_ei(),

            // --- Load/Store ---

            // LD (BC)/(DE)/(HL+)/(HL-), A — 8 T
            0x02 | 0x12 | 0x22 | 0x32 => self.op_ld_rr_a(opcode, bus),
            // LD A, (BC)/(DE)/(HL+)/(HL-) — 8 T
            0x0A | 0x1A | 0x2A | 0x3A => self.op_ld_a_rr(opcode, bus),
            // LD (nn), SP — 20 T
            0x08 => self.op_ld_nn_sp(bus),
            // LDH (n), A / LDH A, (n) — 12 T
            0xE0 => self.op_ldh_n_a(bus),
            0xF0 => self.op_ldh_a_n(bus),
            // LD (FF00+C), A / LD A, (FF00+C) — 8 T
            0xE2 => self.op_ld_c_a(bus),
            0xF2 => self.op_ld_a_c(bus),
            // LD (nn), A / LD A, (nn) — 16 T
            0xEA => self.op_ld_nn_a(bus),
            0xFA => self.op_ld_a_nn(bus),
            // LD HL, SP+e — 12 T
            0xF8 => self.op_ld_hl_sp_e(bus),
            // LD SP, HL — 8 T
            0xF9 => self.op_ld_sp_hl(),

            // LD rr, nn (0x01/0x11/0x21/0x31) — 12 T
            op if (op & 0xCF) == 0x01 => self.op_ld_rr_nn(op, bus),
            // LD r, n (0x06, 0x0E, ... 0x3E) — 8 T, LD (HL), n — 12 T
            op if (op & 0xC7) == 0x06 => self.op_ld_r_n(op, bus),
            // LD r, r' (0x40-0x7F excluding 0x76) — 4/8 T
            op if (op & 0xC0) == 0x40 => self.op_ld_r_r(op, bus),

            // --- Stack ---

            // PUSH rr (0xC5/D5/E5/F5) — 16 T
            op if (op & 0xCF) == 0xC5 => self.op_push(op, bus),
            // POP rr (0xC1/D1/E1/F1) — 12 T
            op if (op & 0xCF) == 0xC1 => self.op_pop(op, bus),

            // --- ALU ---

            // ALU A, r (0x80 - 0xBF) — 4 T (reg) or 8 T ((HL))
            op if (op & 0xC0) == 0x80 => self.op_alu_r(op, bus),
            // ALU A, n (0xC6, 0xCE, ... 0xFE) — 8 T
            op if (op & 0xC7) == 0xC6 => self.op_alu_n(op, bus),

            // INC r (0x04, 0x0C...) — 4 T (reg) or 12 T ((HL))
            op if (op & 0xC7) == 0x04 => self.op_inc_dec_r(op, bus),
            // DEC r (0x05, 0x0D...) — 4 T (reg) or 12 T ((HL))
            op if (op & 0xC7) == 0x05 => self.op_inc_dec_r(op, bus),

            // ADD HL,rr (0x09/0x19/0x29/0x39) — 8 T
            op if (op & 0xCF) == 0x09 => self.op_add_hl_rr(op),
            // INC rr (0x03/0x13/0x23/0x33) — 8 T
            op if (op & 0xCF) == 0x03 => self.op_inc_dec_rr(op),
            // DEC rr (0x0B/0x1B/0x2B/0x3B) — 8 T
            op if (op & 0xCF) == 0x0B => self.op_inc_dec_rr(op),
            // ADD SP, e — 16 T
            0xE8 => self.op_add_sp_e(bus),

            // Accumulator rotates — 4 T (Z forced clear, unlike the CB forms)
            0x07 => self.op_rlca(),
            0x0F => self.op_rrca(),
            0x17 => self.op_rla(),
            0x1F => self.op_rra(),

            // Misc ALU — 4 T
            0x27 => self.op_daa(),
            0x2F => self.op_cpl(),
            0x37 => self.op_scf(),
            0x3F => self.op_ccf(),

            // --- Branch/Control Flow ---

            // JP nn — 16 T
            0xC3 => self.op_jp_nn(bus),
            // JP HL — 4 T
            0xE9 => self.op_jp_hl(),
            // JR e — 12 T
            0x18 => self.op_jr_e(bus),
            // CALL nn — 24 T
            0xCD => self.op_call_nn(bus),
            // RET — 16 T
            0xC9 => self.op_ret(bus),
            // RETI — 16 T
            0xD9 => self.op_reti(bus),

            // JR cc,e — 12/8 T
            op if (op & 0xE7) == 0x20 => self.op_jr_cc_e(op, bus),
            // JP cc,nn — 16/12 T
            op if (op & 0xE7) == 0xC2 => self.op_jp_cc_nn(op, bus),
            // CALL cc,nn — 24/12 T
            op if (op & 0xE7) == 0xC4 => self.op_call_cc_nn(op, bus),
            // RET cc — 20/8 T
            op if (op & 0xE7) == 0xC0 => self.op_ret_cc(op, bus),
            // RST p — 16 T
            op if (op & 0xC7) == 0xC7 => self.op_rst(op, bus),

            // Unhandled encodings (0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC,
            // 0xED, 0xF4, 0xFC, 0xFD): record and keep going — 4 T
            op => {
                self.illegal_opcode = Some(op);
                4
            }
        }
    }
}

impl std::fmt::Debug for Sm83 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sm83 {{ ")?;

        write!(f, "A:{:02X} ", self.a)?;

        write!(f, "c:{:01} ", self.flag(Flag::C) as usize)?;
        write!(f, "h:{:01} ", self.flag(Flag::H) as usize)?;
        write!(f, "n:{:01} ", self.flag(Flag::N) as usize)?;
        write!(f, "z:{:01} ", self.flag(Flag::Z) as usize)?;

        write!(f, "BC:{:04X} ", self.get_bc())?;
        write!(f, "DE:{:04X} ", self.get_de())?;
        write!(f, "HL:{:04X} ", self.get_hl())?;

        write!(f, "SP:{:04X} ", self.sp)?;
        write!(f, "PC:{:04X} ", self.pc)?;

        if let Some(op) = self.illegal_opcode {
            write!(f, "unk:{:02X} ", op)?;
        }

        write!(f, "}}")
    }
}

impl Cpu for Sm83 {
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn is_sleeping(&self) -> bool {
        self.halted
    }
}

impl CpuStateTrait for Sm83 {
    type Snapshot = Sm83State;

    fn snapshot(&self) -> Sm83State {
        Sm83State {
            a: self.a,
            f: self.f,
            b: self.b,
            c: self.c,
            d: self.d,
            e: self.e,
            h: self.h,
            l: self.l,
            sp: self.sp,
            pc: self.pc,
            ime: self.ime,
            halted: self.halted,
            cycles: self.cycles,
        }
    }
}
