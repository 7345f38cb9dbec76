use crate::core::Bus;
use crate::cpu::sm83::{Flag, Sm83};

impl Sm83 {
    /// Perform a CB rotate/shift operation on a value.
    /// op: 0=RLC, 1=RRC, 2=RL, 3=RR, 4=SLA, 5=SRA, 6=SWAP, 7=SRL.
    /// Writes all four flags: Z per result, N=0, H=0, C from the shifted-out
    /// bit (SWAP clears C). Returns the result.
    pub(crate) fn do_rotate_shift(&mut self, op: u8, val: u8) -> u8 {
        let (result, carry) = match op {
            0 => {
                // RLC: rotate left circular
                let c = (val >> 7) & 1;
                ((val << 1) | c, c)
            }
            1 => {
                // RRC: rotate right circular
                let c = val & 1;
                ((val >> 1) | (c << 7), c)
            }
            2 => {
                // RL: rotate left through carry
                let old_c = if self.flag(Flag::C) { 1 } else { 0 };
                let c = (val >> 7) & 1;
                ((val << 1) | old_c, c)
            }
            3 => {
                // RR: rotate right through carry
                let old_c = if self.flag(Flag::C) { 0x80 } else { 0 };
                let c = val & 1;
                ((val >> 1) | old_c, c)
            }
            4 => {
                // SLA: shift left arithmetic
                let c = (val >> 7) & 1;
                (val << 1, c)
            }
            5 => {
                // SRA: shift right arithmetic (preserves sign)
                let c = val & 1;
                (((val as i8) >> 1) as u8, c)
            }
            6 => {
                // SWAP: exchange nibbles (SM83 replaces Z80's SLL here)
                ((val << 4) | (val >> 4), 0)
            }
            7 => {
                // SRL: shift right logical
                let c = val & 1;
                (val >> 1, c)
            }
            _ => unreachable!(),
        };

        let mut f = 0;
        if result == 0 {
            f |= Flag::Z as u8;
        }
        if carry != 0 {
            f |= Flag::C as u8;
        }
        // H = 0, N = 0
        self.f = f;

        result
    }

    /// BIT b — Z ← tested bit is clear; N=0; H=1; C preserved.
    fn bit_test(&mut self, bit: u8, val: u8) {
        let mut f = (self.f & Flag::C as u8) | Flag::H as u8;
        if val & (1 << bit) == 0 {
            f |= Flag::Z as u8;
        }
        self.f = f;
    }

    /// Fetch and execute a CB-prefixed instruction. Returns total T-cycles
    /// including the prefix fetch.
    ///
    /// Sub-opcode layout: xx yyy zzz — xx selects rotate/shift, BIT, RES or
    /// SET; yyy is the shifter index or bit number; zzz the operand register
    /// (6 = (HL)).
    ///
    /// Register ops: 8 T. (HL) read-modify-write: 16 T. BIT b,(HL): 12 T.
    pub(crate) fn execute_cb<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        let op = self.fetch_byte(bus);
        let xx = (op >> 6) & 0x03; // 0=rot/shift, 1=BIT, 2=RES, 3=SET
        let yyy = (op >> 3) & 0x07; // bit number or shift operation
        let zzz = op & 0x07; // register index

        if zzz == 6 {
            if xx == 1 {
                // BIT b,(HL) — read only, no writeback — 12 T
                let val = bus.read(self.get_hl());
                self.bit_test(yyy, val);
                12
            } else {
                // Rotate/shift/RES/SET (HL) — read-modify-write — 16 T
                let addr = self.get_hl();
                let val = bus.read(addr);
                let result = match xx {
                    0 => self.do_rotate_shift(yyy, val),
                    2 => val & !(1 << yyy), // RES — no flag changes
                    3 => val | (1 << yyy),  // SET — no flag changes
                    _ => unreachable!(),
                };
                bus.write(addr, result);
                16
            }
        } else {
            // Register operations — 8 T
            let val = self.get_r8(zzz);
            match xx {
                0 => {
                    let result = self.do_rotate_shift(yyy, val);
                    self.set_r8(zzz, result);
                }
                1 => self.bit_test(yyy, val),
                2 => self.set_r8(zzz, val & !(1 << yyy)),
                3 => self.set_r8(zzz, val | (1 << yyy)),
                _ => unreachable!(),
            }
            8
        }
    }
}
