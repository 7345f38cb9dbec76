use crate::core::Bus;
use crate::cpu::sm83::{Flag, Sm83};

impl Sm83 {
    /// Evaluate a condition code (2 bits from opcode bits 4-3).
    /// 0=NZ, 1=Z, 2=NC, 3=C
    pub(crate) fn eval_cond(&self, cc: u8) -> bool {
        match cc {
            0 => !self.flag(Flag::Z), // NZ
            1 => self.flag(Flag::Z),  // Z
            2 => !self.flag(Flag::C), // NC
            3 => self.flag(Flag::C),  // C
            _ => unreachable!("eval_cond called with cc {}", cc),
        }
    }

    /// JP nn — 16 T
    pub(crate) fn op_jp_nn<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        self.pc = self.fetch_word(bus);
        16
    }

    /// JP cc,nn — 16 T taken / 12 T not taken.
    /// The target is consumed before the condition is applied, so a
    /// not-taken branch leaves PC at the following instruction.
    pub(crate) fn op_jp_cc_nn<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let cc = (opcode >> 3) & 0x03;
        let addr = self.fetch_word(bus);
        if self.eval_cond(cc) {
            self.pc = addr;
            16
        } else {
            12
        }
    }

    /// JP HL — 4 T
    pub(crate) fn op_jp_hl(&mut self) -> u32 {
        self.pc = self.get_hl();
        4
    }

    /// JR e — 12 T. The displacement is signed and applied after the
    /// operand byte has been consumed.
    pub(crate) fn op_jr_e<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        let disp = self.fetch_byte(bus) as i8;
        self.pc = self.pc.wrapping_add(disp as i16 as u16);
        12
    }

    /// JR cc,e — 12 T taken / 8 T not taken
    pub(crate) fn op_jr_cc_e<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let cc = (opcode >> 3) & 0x03;
        let disp = self.fetch_byte(bus) as i8;
        if self.eval_cond(cc) {
            self.pc = self.pc.wrapping_add(disp as i16 as u16);
            12
        } else {
            8
        }
    }

    /// CALL nn — 24 T. Pushes the post-operand PC.
    pub(crate) fn op_call_nn<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch_word(bus);
        self.push_word(bus, self.pc);
        self.pc = addr;
        24
    }

    /// CALL cc,nn — 24 T taken / 12 T not taken.
    /// When not taken, both address bytes are still consumed.
    pub(crate) fn op_call_cc_nn<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let cc = (opcode >> 3) & 0x03;
        let addr = self.fetch_word(bus);
        if self.eval_cond(cc) {
            self.push_word(bus, self.pc);
            self.pc = addr;
            24
        } else {
            12
        }
    }

    /// RET — 16 T
    pub(crate) fn op_ret<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        self.pc = self.pop_word(bus);
        16
    }

    /// RET cc — 20 T taken / 8 T not taken
    pub(crate) fn op_ret_cc<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let cc = (opcode >> 3) & 0x03;
        if self.eval_cond(cc) {
            self.pc = self.pop_word(bus);
            20
        } else {
            8
        }
    }

    /// RETI — 16 T. Pops PC and re-enables the interrupt master flag.
    pub(crate) fn op_reti<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        self.pc = self.pop_word(bus);
        self.ime = true;
        16
    }

    /// RST p — 16 T. Pushes the post-opcode PC and jumps to one of the
    /// eight fixed vectors; target = opcode & 0x38.
    pub(crate) fn op_rst<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let target = (opcode & 0x38) as u16;
        self.push_word(bus, self.pc);
        self.pc = target;
        16
    }

    /// DI — 4 T. Clear the interrupt master flag.
    pub(crate) fn op_di(&mut self) -> u32 {
        self.ime = false;
        4
    }

    /// EI — 4 T. Set the interrupt master flag.
    pub(crate) fn op_ei(&mut self) -> u32 {
        self.ime = true;
        4
    }
}
