use crate::core::Bus;
use crate::cpu::sm83::Sm83;

impl Sm83 {
    /// LD r, r' — 4 T (register-register)
    /// LD r, (HL) / LD (HL), r — 8 T
    /// Opcode mask: 01 dst src (0x76 is HALT, handled by the dispatcher)
    pub(crate) fn op_ld_r_r<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let src = opcode & 0x07;
        let dst = (opcode >> 3) & 0x07;

        if src == 6 {
            // LD r, (HL)
            let val = bus.read(self.get_hl());
            self.set_r8(dst, val);
            8
        } else if dst == 6 {
            // LD (HL), r — a store to memory at HL, not a register write
            bus.write(self.get_hl(), self.get_r8(src));
            8
        } else {
            self.set_r8(dst, self.get_r8(src));
            4
        }
    }

    /// LD r, n — 8 T; LD (HL), n — 12 T
    /// Opcode mask: 00 rrr 110
    pub(crate) fn op_ld_r_n<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let dst = (opcode >> 3) & 0x07;
        let val = self.fetch_byte(bus);

        if dst == 6 {
            bus.write(self.get_hl(), val);
            12
        } else {
            self.set_r8(dst, val);
            8
        }
    }

    /// LD rr, nn — 12 T
    /// Opcode mask: 00 rr0 001 (rr: 0=BC, 1=DE, 2=HL, 3=SP)
    pub(crate) fn op_ld_rr_nn<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let val = self.fetch_word(bus);
        self.set_rp((opcode >> 4) & 0x03, val);
        12
    }

    /// LD (BC)/(DE)/(HL+)/(HL-), A — 8 T
    pub(crate) fn op_ld_rr_a<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let addr = match opcode {
            0x02 => self.get_bc(),
            0x12 => self.get_de(),
            0x22 => self.hl_postinc(),
            0x32 => self.hl_postdec(),
            _ => unreachable!(),
        };
        bus.write(addr, self.a);
        8
    }

    /// LD A, (BC)/(DE)/(HL+)/(HL-) — 8 T
    pub(crate) fn op_ld_a_rr<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> u32 {
        let addr = match opcode {
            0x0A => self.get_bc(),
            0x1A => self.get_de(),
            0x2A => self.hl_postinc(),
            0x3A => self.hl_postdec(),
            _ => unreachable!(),
        };
        self.a = bus.read(addr);
        8
    }

    /// LD (nn), SP — 20 T. Low byte to nn, high byte to nn+1.
    pub(crate) fn op_ld_nn_sp<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch_word(bus);
        bus.write_word(addr, self.sp);
        20
    }

    /// LDH (n), A — 12 T. Store A to 0xFF00 + n.
    pub(crate) fn op_ldh_n_a<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch_byte(bus);
        bus.write(0xFF00 | offset as u16, self.a);
        12
    }

    /// LDH A, (n) — 12 T. Load A from 0xFF00 + n.
    pub(crate) fn op_ldh_a_n<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch_byte(bus);
        self.a = bus.read(0xFF00 | offset as u16);
        12
    }

    /// LD (FF00+C), A — 8 T
    pub(crate) fn op_ld_c_a<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        bus.write(0xFF00 | self.c as u16, self.a);
        8
    }

    /// LD A, (FF00+C) — 8 T
    pub(crate) fn op_ld_a_c<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        self.a = bus.read(0xFF00 | self.c as u16);
        8
    }

    /// LD (nn), A — 16 T
    pub(crate) fn op_ld_nn_a<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch_word(bus);
        bus.write(addr, self.a);
        16
    }

    /// LD A, (nn) — 16 T
    pub(crate) fn op_ld_a_nn<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch_word(bus);
        self.a = bus.read(addr);
        16
    }

    /// LD HL, SP+e — 12 T. Same flag rules as ADD SP,e.
    pub(crate) fn op_ld_hl_sp_e<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        let e = self.fetch_byte(bus);
        let val = self.sp_plus_offset(e);
        self.set_hl(val);
        12
    }

    /// LD SP, HL — 8 T
    pub(crate) fn op_ld_sp_hl(&mut self) -> u32 {
        self.sp = self.get_hl();
        8
    }
}
