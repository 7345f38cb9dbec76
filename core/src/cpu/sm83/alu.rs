use crate::core::Bus;
use crate::cpu::sm83::{Flag, Sm83};

impl Sm83 {
    // --- Flag Helpers ---

    fn do_add(&mut self, val: u8, with_carry: bool) {
        let a = self.a;
        let carry = if with_carry && self.flag(Flag::C) { 1u8 } else { 0 };
        let result16 = a as u16 + val as u16 + carry as u16;
        let result = result16 as u8;

        let mut f = 0;
        if result == 0 {
            f |= Flag::Z as u8;
        }
        // H: ((A & 0xF) + (val & 0xF) + c) > 0xF
        if (a & 0xF) + (val & 0xF) + carry > 0xF {
            f |= Flag::H as u8;
        }
        // N: 0
        if result16 > 0xFF {
            f |= Flag::C as u8;
        }

        self.a = result;
        self.f = f;
    }

    fn do_sub(&mut self, val: u8, with_carry: bool) {
        let a = self.a;
        let carry = if with_carry && self.flag(Flag::C) { 1u16 } else { 0 };
        let result16 = (a as u16).wrapping_sub(val as u16).wrapping_sub(carry);
        let result = result16 as u8;

        let mut f = Flag::N as u8;
        if result == 0 {
            f |= Flag::Z as u8;
        }
        // H: (A & 0xF) < ((val & 0xF) + c). The right-hand side can reach
        // 0x10, so it is computed in u16.
        if ((a & 0xF) as u16) < (val & 0xF) as u16 + carry {
            f |= Flag::H as u8;
        }
        // C: full borrow
        if (a as u16) < val as u16 + carry {
            f |= Flag::C as u8;
        }

        self.a = result;
        self.f = f;
    }

    fn do_cp(&mut self, val: u8) {
        let a = self.a;
        let result = a.wrapping_sub(val);

        let mut f = Flag::N as u8;
        if result == 0 {
            f |= Flag::Z as u8;
        }
        if (a & 0xF) < (val & 0xF) {
            f |= Flag::H as u8;
        }
        if a < val {
            f |= Flag::C as u8;
        }

        self.f = f;
    }

    fn update_flags_logic(&mut self, result: u8, is_and: bool) {
        let mut f = 0;
        if result == 0 {
            f |= Flag::Z as u8;
        }
        if is_and {
            f |= Flag::H as u8; // AND sets H, OR/XOR clear it
        }
        // N is 0, C is 0
        self.f = f;
    }

    fn perform_alu_op(&mut self, op: u8, val: u8) {
        match op {
            0 => self.do_add(val, false), // ADD
            1 => self.do_add(val, true),  // ADC
            2 => self.do_sub(val, false), // SUB
            3 => self.do_sub(val, true),  // SBC
            4 => {
                self.a &= val;
                self.update_flags_logic(self.a, true); // AND
            }
            5 => {
                self.a ^= val;
                self.update_flags_logic(self.a, false); // XOR
            }
            6 => {
                self.a |= val;
                self.update_flags_logic(self.a, false); // OR
            }
            7 => self.do_cp(val), // CP
            _ => unreachable!(),
        }
    }

    // --- Instructions ---

    /// ALU A, r
    /// ADD, ADC, SUB, SBC, AND, XOR, OR, CP
    /// Opcode mask: 10 xxx zzz
    pub(crate) fn op_alu_r<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let alu_op = (opcode >> 3) & 0x07;
        let r = opcode & 0x07;

        if r == 6 {
            // ALU A, (HL) — 8 T
            let val = bus.read(self.get_hl());
            self.perform_alu_op(alu_op, val);
            8
        } else {
            // ALU A, r — 4 T
            let val = self.get_r8(r);
            self.perform_alu_op(alu_op, val);
            4
        }
    }

    /// ALU A, n — 8 T
    /// Opcode mask: 11 xxx 110
    pub(crate) fn op_alu_n<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let alu_op = (opcode >> 3) & 0x07;
        let val = self.fetch_byte(bus);
        self.perform_alu_op(alu_op, val);
        8
    }

    /// INC/DEC r — 4 T (reg), 12 T ((HL) read-modify-write)
    /// Opcode mask: 00 rrr 10x
    pub(crate) fn op_inc_dec_r<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let r = (opcode >> 3) & 0x07;
        let is_dec = (opcode & 0x01) != 0;

        if r == 6 {
            let addr = self.get_hl();
            let val = bus.read(addr);
            let result = if is_dec {
                self.calc_dec_flags(val)
            } else {
                self.calc_inc_flags(val)
            };
            bus.write(addr, result);
            12
        } else {
            let val = self.get_r8(r);
            let result = if is_dec {
                self.calc_dec_flags(val)
            } else {
                self.calc_inc_flags(val)
            };
            self.set_r8(r, result);
            4
        }
    }

    fn calc_inc_flags(&mut self, val: u8) -> u8 {
        let result = val.wrapping_add(1);
        let mut f = self.f & Flag::C as u8; // Preserve C
        if result == 0 {
            f |= Flag::Z as u8;
        }
        if (val & 0xF) == 0xF {
            f |= Flag::H as u8;
        }
        // N is 0
        self.f = f;
        result
    }

    fn calc_dec_flags(&mut self, val: u8) -> u8 {
        let result = val.wrapping_sub(1);
        let mut f = (self.f & Flag::C as u8) | Flag::N as u8; // Preserve C, set N
        if result == 0 {
            f |= Flag::Z as u8;
        }
        if (val & 0xF) == 0x0 {
            f |= Flag::H as u8; // Borrow from bit 4
        }
        self.f = f;
        result
    }

    /// ADD HL, rr — 8 T. Z preserved; N=0; H/C from bit 11/15 carries.
    /// Opcode mask: 00 rr1 001
    pub(crate) fn op_add_hl_rr(&mut self, opcode: u8) -> u32 {
        let rr = self.get_rp((opcode >> 4) & 0x03);
        let hl = self.get_hl();
        let result = hl as u32 + rr as u32;

        let mut f = self.f & Flag::Z as u8; // Preserve Z
        if (hl & 0x0FFF) + (rr & 0x0FFF) > 0x0FFF {
            f |= Flag::H as u8;
        }
        if result > 0xFFFF {
            f |= Flag::C as u8;
        }
        self.f = f;

        self.set_hl(result as u16);
        8
    }

    /// INC/DEC rr — 8 T. No flags.
    /// Opcode mask: 00 rr0 011 (INC) / 00 rr1 011 (DEC)
    pub(crate) fn op_inc_dec_rr(&mut self, opcode: u8) -> u32 {
        let rp = (opcode >> 4) & 0x03;
        let is_dec = (opcode & 0x08) != 0;
        let val = self.get_rp(rp);
        let result = if is_dec {
            val.wrapping_sub(1)
        } else {
            val.wrapping_add(1)
        };
        self.set_rp(rp, result);
        8
    }

    /// Compute SP + signed displacement, setting the four flags.
    /// Z=0, N=0; H and C come from the unsigned low-nibble/low-byte adds.
    /// Shared by ADD SP,e and LD HL,SP+e.
    pub(crate) fn sp_plus_offset(&mut self, e: u8) -> u16 {
        let sp = self.sp;
        let mut f = 0;
        if (sp & 0xF) + (e as u16 & 0xF) > 0xF {
            f |= Flag::H as u8;
        }
        if (sp & 0xFF) + e as u16 > 0xFF {
            f |= Flag::C as u8;
        }
        self.f = f;

        sp.wrapping_add(e as i8 as i16 as u16)
    }

    /// ADD SP, e — 16 T
    pub(crate) fn op_add_sp_e<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        let e = self.fetch_byte(bus);
        self.sp = self.sp_plus_offset(e);
        16
    }

    /// DAA — 4 T. Adjust A back to BCD after an add or subtract, driven by
    /// N, H and C. C is set when the adjustment crossed 0x99; H is cleared.
    pub(crate) fn op_daa(&mut self) -> u32 {
        let mut adjust = 0u8;
        let mut carry = self.flag(Flag::C);

        if !self.flag(Flag::N) {
            if self.flag(Flag::H) || (self.a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if carry || self.a > 0x99 {
                adjust |= 0x60;
                carry = true;
            }
            self.a = self.a.wrapping_add(adjust);
        } else {
            if self.flag(Flag::H) {
                adjust |= 0x06;
            }
            if carry {
                adjust |= 0x60;
            }
            self.a = self.a.wrapping_sub(adjust);
        }

        let mut f = self.f & Flag::N as u8; // Preserve N
        if self.a == 0 {
            f |= Flag::Z as u8;
        }
        if carry {
            f |= Flag::C as u8;
        }
        self.f = f;
        4
    }

    /// CPL — 4 T. A ← !A; N=1; H=1.
    pub(crate) fn op_cpl(&mut self) -> u32 {
        self.a = !self.a;
        self.f |= Flag::N as u8 | Flag::H as u8;
        4
    }

    /// SCF — 4 T. C=1; N=0; H=0.
    pub(crate) fn op_scf(&mut self) -> u32 {
        let mut f = self.f & Flag::Z as u8;
        f |= Flag::C as u8;
        self.f = f;
        4
    }

    /// CCF — 4 T. C toggled; N=0; H=0.
    pub(crate) fn op_ccf(&mut self) -> u32 {
        let mut f = self.f & Flag::Z as u8;
        if !self.flag(Flag::C) {
            f |= Flag::C as u8;
        }
        self.f = f;
        4
    }

    // Accumulator rotates. Same shifters as the CB forms, but Z is forced
    // clear — 4 T each.

    pub(crate) fn op_rlca(&mut self) -> u32 {
        self.a = self.do_rotate_shift(0, self.a);
        self.set_flag(Flag::Z, false);
        4
    }

    pub(crate) fn op_rrca(&mut self) -> u32 {
        self.a = self.do_rotate_shift(1, self.a);
        self.set_flag(Flag::Z, false);
        4
    }

    pub(crate) fn op_rla(&mut self) -> u32 {
        self.a = self.do_rotate_shift(2, self.a);
        self.set_flag(Flag::Z, false);
        4
    }

    pub(crate) fn op_rra(&mut self) -> u32 {
        self.a = self.do_rotate_shift(3, self.a);
        self.set_flag(Flag::Z, false);
        4
    }
}
