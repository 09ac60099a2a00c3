//! Operand encoders.
//!
//! Each encoder turns one run of operands into a packed bitfield for the
//! template applier, appending a [`Fixup`] (and returning a zero
//! placeholder) when the run carries an unresolved expression. Field
//! layouts in the comments are the *encoder output* bits; the template's
//! spans place that output in the instruction word.
//!
//! Operand mismatches here are upstream bugs (bad selection or a corrupt
//! template table) and abort with a diagnostic naming the opcode and
//! operand index — a wrong operand must never be silently encoded as
//! zero.

use alloc::vec::Vec;

use crate::am::{self, AmSubMode, ShiftOp};
use crate::emitter::Emitter;
use crate::fixup::{Fixup, FixupKind};
use crate::ir::{Cond, Expr, ExprKind, HalfSel, Inst, Operand};
use crate::reg::{Reg, RegClass};
use crate::template::{EncoderId, PostEncoder};

impl Emitter<'_> {
    /// Dispatch one operand plan entry to its encoder.
    pub(crate) fn encode_group(
        &mut self,
        inst: &Inst,
        encoder: EncoderId,
        first: usize,
        count: usize,
        fixups: &mut Vec<Fixup>,
    ) -> u32 {
        match encoder {
            EncoderId::Machine => self.machine_operand(inst, first),
            EncoderId::SoImm => self.so_imm_value(inst, first),
            EncoderId::T2SoImm => self.t2_so_imm_value(inst, first),
            EncoderId::SoRegReg => self.so_reg_reg_value(inst, first),
            EncoderId::SoRegImm => self.so_reg_imm_value(inst, first),
            EncoderId::T2SoReg => self.t2_so_reg_value(inst, first),

            EncoderId::CondBranch => {
                if self.subtarget.is_thumb2() {
                    self.branch_target(inst, first, FixupKind::T2CondBranch, fixups)
                } else {
                    self.arm_branch_target(inst, first, fixups)
                }
            }
            EncoderId::ArmBranch => self.arm_branch_target(inst, first, fixups),
            EncoderId::T2UncondBranch => self.t2_uncond_branch_target(inst, first, fixups),
            EncoderId::ThumbBl => {
                self.branch_target(inst, first, FixupKind::ArmThumbBl, fixups)
            }
            EncoderId::ThumbBlx => {
                self.branch_target(inst, first, FixupKind::ArmThumbBlx, fixups)
            }
            EncoderId::ThumbBr => {
                self.branch_target(inst, first, FixupKind::ArmThumbBr, fixups)
            }
            EncoderId::ThumbBcc => {
                self.branch_target(inst, first, FixupKind::ArmThumbBcc, fixups)
            }
            EncoderId::ThumbCb => {
                self.branch_target(inst, first, FixupKind::ArmThumbCb, fixups)
            }
            EncoderId::ThumbCp => {
                self.branch_target(inst, first, FixupKind::ArmThumbCp, fixups)
            }
            EncoderId::AdrLabel => {
                self.expect_expr(inst, first);
                self.branch_target(inst, first, FixupKind::ArmAdrPcrel12, fixups)
            }
            EncoderId::T2AdrLabel => {
                self.expect_expr(inst, first);
                self.branch_target(inst, first, FixupKind::T2AdrPcrel12, fixups)
            }
            EncoderId::ThumbAdrLabel => {
                self.expect_expr(inst, first);
                self.branch_target(inst, first, FixupKind::ThumbAdrPcrel10, fixups)
            }

            EncoderId::AddrModeImm12 => self.addrmode_imm12_value(inst, first, fixups),
            EncoderId::T2AddrModeImm8s4 => self.t2_addrmode_imm8s4_value(inst, first, fixups),
            EncoderId::AddrMode5 => self.addrmode5_value(inst, first, fixups),
            EncoderId::LdStSoReg => self.ldst_so_reg_value(inst, first),
            EncoderId::AddrMode2 => self.addrmode2_value(inst, first),
            EncoderId::AddrMode2Offset => self.addrmode2_offset_value(inst, first),
            EncoderId::PostIdxReg => self.postidx_reg_value(inst, first),
            EncoderId::AddrMode3 => self.addrmode3_value(inst, first),
            EncoderId::AddrMode3Offset => self.addrmode3_offset_value(inst, first),
            EncoderId::ThumbAddrModeSp => self.thumb_sp_value(inst, first),
            EncoderId::ThumbAddrModeIs => self.thumb_is_value(inst, first),
            EncoderId::ThumbAddrModeRr => self.thumb_rr_value(inst, first),
            EncoderId::T2AddrModeSoReg => self.t2_addrmode_so_reg_value(inst, first),
            EncoderId::T2AddrModeImm8 => self.t2_addrmode_imm8_value(inst, first),
            EncoderId::T2AddrModeImm8Offset => self.t2_addrmode_imm8_offset_value(inst, first),
            EncoderId::T2AddrModeImm12Offset => self.t2_addrmode_imm12_offset_value(inst, first),

            EncoderId::AddrMode6 => self.addrmode6_value(inst, first, Align6::Standard),
            EncoderId::AddrMode6OneLane32 => self.addrmode6_value(inst, first, Align6::OneLane32),
            EncoderId::AddrMode6Dup => self.addrmode6_value(inst, first, Align6::Dup),
            EncoderId::AddrMode6Offset => self.addrmode6_offset_value(inst, first),

            EncoderId::HiLo16 => self.hi_lo16_value(inst, first, fixups),
            EncoderId::BitfieldInvMask => self.bitfield_inv_mask_value(inst, first),
            EncoderId::Msb => self.msb_value(inst, first),
            EncoderId::VcvtFixedPoint => (64 - self.imm_at(inst, first)) as u32,
            EncoderId::ShiftRight8 => (8 - self.imm_at(inst, first)) as u32,
            EncoderId::ShiftRight16 => (16 - self.imm_at(inst, first)) as u32,
            EncoderId::ShiftRight32 => (32 - self.imm_at(inst, first)) as u32,
            EncoderId::ShiftRight64 => (64 - self.imm_at(inst, first)) as u32,
            EncoderId::CCOut => u32::from(self.reg_at(inst, first) == Reg::Cpsr),
            EncoderId::LdStmMode => self.ldstm_mode_value(inst, first),
            EncoderId::RegList => self.reg_list_value(inst, first, count),
        }
    }

    // ── Operand accessors ────────────────────────────────────────────────

    #[cold]
    fn bad_operand(&self, inst: &Inst, idx: usize, expected: &str) -> ! {
        panic!(
            "opcode {}: operand {} is {}, expected {}",
            inst.opcode,
            idx,
            inst.operand(idx),
            expected
        )
    }

    fn reg_at(&self, inst: &Inst, idx: usize) -> Reg {
        match inst.operand(idx) {
            Operand::Reg(r) => *r,
            _ => self.bad_operand(inst, idx, "a register"),
        }
    }

    fn regno_at(&self, inst: &Inst, idx: usize) -> u32 {
        match inst.operand(idx) {
            Operand::Reg(r) if !matches!(r, Reg::None) => u32::from(self.regs.regno(*r)),
            _ => self.bad_operand(inst, idx, "a register"),
        }
    }

    fn imm_at(&self, inst: &Inst, idx: usize) -> i64 {
        match inst.operand(idx) {
            Operand::Imm(v) => *v,
            _ => self.bad_operand(inst, idx, "an immediate"),
        }
    }

    fn expect_expr(&self, inst: &Inst, idx: usize) {
        if !matches!(inst.operand(idx), Operand::Expr(_)) {
            self.bad_operand(inst, idx, "a label expression");
        }
    }

    // ── Generic operand ──────────────────────────────────────────────────

    /// Register number, immediate, or FP immediate bits. Expressions are
    /// handled by the specific addressing-mode and branch encoders, never
    /// here.
    fn machine_operand(&self, inst: &Inst, idx: usize) -> u32 {
        match inst.operand(idx) {
            Operand::Reg(r) => {
                let regno = u32::from(self.regs.regno(*r));
                // Q registers encode as 2x their register number.
                if self.regs.class_contains(RegClass::Qpr, *r) {
                    2 * regno
                } else {
                    regno
                }
            }
            Operand::Imm(v) => *v as u32,
            Operand::FpImm(v) => (v.to_bits() >> 32) as u32,
            Operand::Expr(_) => self.bad_operand(inst, idx, "a resolved operand"),
        }
    }

    // ── Branch targets ───────────────────────────────────────────────────

    /// Shared branch-target rule: a resolved immediate is returned as-is;
    /// an expression records one fixup of the chosen kind and returns 0.
    fn branch_target(
        &mut self,
        inst: &Inst,
        idx: usize,
        kind: FixupKind,
        fixups: &mut Vec<Fixup>,
    ) -> u32 {
        match inst.operand(idx) {
            Operand::Imm(v) => *v as u32,
            Operand::Expr(e) => {
                fixups.push(Fixup::at_start(e.clone(), kind));
                0
            }
            _ => self.bad_operand(inst, idx, "a branch target"),
        }
    }

    /// Whether the instruction carries a non-always predicate: an
    /// (immediate, register) operand pair where the register is the
    /// absent placeholder or the flags register and the immediate is not
    /// the "always" condition.
    fn has_conditional_branch(&self, inst: &Inst) -> bool {
        for pair in inst.operands.windows(2) {
            if let [Operand::Imm(cc), Operand::Reg(reg)] = pair {
                if matches!(reg, Reg::None | Reg::Cpsr) && *cc != i64::from(Cond::Al.bits()) {
                    return true;
                }
            }
        }
        false
    }

    fn arm_branch_target(&mut self, inst: &Inst, idx: usize, fixups: &mut Vec<Fixup>) -> u32 {
        let kind = if self.has_conditional_branch(inst) {
            FixupKind::ArmCondBranch
        } else {
            FixupKind::ArmUncondBranch
        };
        self.branch_target(inst, idx, kind, fixups)
    }

    /// Thumb2 24-bit unconditional branch. The raw value carries
    /// `I`(b23), `J1`(b22), `J2`(b21); the stored J bits share the sign
    /// with I: set J so that `I XOR J` equals the raw bit.
    fn t2_uncond_branch_target(
        &mut self,
        inst: &Inst,
        idx: usize,
        fixups: &mut Vec<Fixup>,
    ) -> u32 {
        let mut val = self.branch_target(inst, idx, FixupKind::T2UncondBranch, fixups);
        let i = val & 0x0080_0000 != 0;
        let j1 = val & 0x0040_0000 != 0;
        let j2 = val & 0x0020_0000 != 0;
        if i ^ j1 {
            val &= !0x0040_0000;
        } else {
            val |= 0x0040_0000;
        }
        if i ^ j2 {
            val &= !0x0020_0000;
        } else {
            val |= 0x0020_0000;
        }
        val
    }

    // ── Modified immediates and shifted registers ────────────────────────

    /// ARM modified immediate: rot4 in {11:8}, imm8 in {7:0}.
    fn so_imm_value(&self, inst: &Inst, idx: usize) -> u32 {
        let value = self.imm_at(inst, idx) as u32;
        match am::so_imm_encode(value) {
            Some(packed) => u32::from(packed),
            None => panic!(
                "opcode {}: operand {}: {:#x} is not an ARM modified immediate",
                inst.opcode, idx, value
            ),
        }
    }

    /// Thumb2 modified immediate.
    fn t2_so_imm_value(&self, inst: &Inst, idx: usize) -> u32 {
        let value = self.imm_at(inst, idx) as u32;
        match am::t2_so_imm_encode(value) {
            Some(packed) => u32::from(packed),
            None => panic!(
                "opcode {}: operand {}: {:#x} is not a Thumb2 modified immediate",
                inst.opcode, idx, value
            ),
        }
    }

    /// Register shifted by register: `[Rm, Rs, shift]`.
    ///
    /// {11:8} = Rs, {7} = 0, {6:5} = type, {4} = 1 — so the shift field
    /// reads LSL=0001, LSR=0011, ASR=0101, ROR=0111.
    fn so_reg_reg_value(&self, inst: &Inst, idx: usize) -> u32 {
        let rm = self.regno_at(inst, idx);
        let rs = self.regno_at(inst, idx + 1);
        let opc = self.imm_at(inst, idx + 2);
        let sbits: u32 = match am::so_reg_shift(opc) {
            ShiftOp::Lsl => 0x1,
            ShiftOp::Lsr => 0x3,
            ShiftOp::Asr => 0x5,
            ShiftOp::Ror => 0x7,
            ShiftOp::Rrx => panic!(
                "opcode {}: operand {}: rrx is not a register-shift operation",
                inst.opcode, idx
            ),
        };
        assert!(
            am::so_reg_amount(opc) == 0,
            "opcode {}: register shift carries an immediate amount",
            inst.opcode
        );
        rm | (sbits << 4) | (rs << 8)
    }

    /// Register shifted by immediate: `[Rm, shift]`.
    ///
    /// {11:7} = imm5, {6:5} = type, {4} = 0. RRX is ROR with a zero
    /// amount: 0x60 OR-ed with Rm.
    fn so_reg_imm_value(&self, inst: &Inst, idx: usize) -> u32 {
        let rm = self.regno_at(inst, idx);
        let opc = self.imm_at(inst, idx + 1);
        let shift = am::so_reg_shift(opc);
        if matches!(shift, ShiftOp::Rrx) {
            return rm | 0x60;
        }
        rm | (shift.type_bits() << 5) | (am::so_reg_amount(opc) << 7)
    }

    /// Thumb2 shifted register: like [`Self::so_reg_imm_value`] without
    /// the RRX pseudo-shift.
    fn t2_so_reg_value(&self, inst: &Inst, idx: usize) -> u32 {
        let rm = self.regno_at(inst, idx);
        let opc = self.imm_at(inst, idx + 1);
        let shift = am::so_reg_shift(opc);
        if matches!(shift, ShiftOp::Rrx) {
            panic!(
                "opcode {}: operand {}: rrx is not a Thumb2 shift operation",
                inst.opcode, idx
            );
        }
        rm | (shift.type_bits() << 5) | (am::so_reg_amount(opc) << 7)
    }

    // ── Register + immediate addressing modes ────────────────────────────

    /// Split a `[register, signed immediate]` pair into
    /// `(Rn, magnitude, add)`. The magnitude is always non-negative; the
    /// add flag carries the direction. `#-0` (the most-negative sentinel)
    /// is a zero magnitude with subtraction.
    fn reg_imm_pair(&self, inst: &Inst, idx: usize) -> (u32, u32, bool) {
        let rn = self.regno_at(inst, idx);
        let simm = self.imm_at(inst, idx + 1) as i32;
        if simm == am::NEG_ZERO {
            return (rn, 0, false);
        }
        if simm < 0 {
            (rn, simm.unsigned_abs(), false)
        } else {
            (rn, simm as u32, true)
        }
    }

    /// `[Rn, #±imm12]`: {17:13} = Rn, {12} = U, {11:0} = imm12.
    ///
    /// A non-register first operand is a literal-pool reference: base is
    /// PC, offset 0, U clear (the fixup supplies sign and magnitude).
    fn addrmode_imm12_value(&mut self, inst: &Inst, idx: usize, fixups: &mut Vec<Fixup>) -> u32 {
        let (rn, imm12, add) = match inst.operand(idx) {
            Operand::Expr(e) => {
                let kind = if self.subtarget.is_thumb2() {
                    FixupKind::T2LdstPcrel12
                } else {
                    FixupKind::ArmLdstPcrel12
                };
                fixups.push(Fixup::at_start(e.clone(), kind));
                self.cp_relocations += 1;
                (u32::from(self.regs.regno(Reg::PC)), 0, false)
            }
            Operand::Reg(_) => self.reg_imm_pair(inst, idx),
            _ => self.bad_operand(inst, idx, "a base register or literal reference"),
        };
        let mut word = imm12 & 0xfff;
        if add {
            word |= 1 << 12;
        }
        word | (rn << 13)
    }

    /// Thumb2 `[Rn, #±imm8 << 2]`: {12:9} = Rn, {8} = U, {7:0} = imm8.
    ///
    /// The literal form shares the VFP word-offset fixup.
    fn t2_addrmode_imm8s4_value(
        &mut self,
        inst: &Inst,
        idx: usize,
        fixups: &mut Vec<Fixup>,
    ) -> u32 {
        let (rn, imm, add) = match inst.operand(idx) {
            Operand::Expr(e) => {
                fixups.push(Fixup::at_start(e.clone(), FixupKind::ArmPcrel10));
                self.cp_relocations += 1;
                (u32::from(self.regs.regno(Reg::PC)), 0, false)
            }
            Operand::Reg(_) => self.reg_imm_pair(inst, idx),
            _ => self.bad_operand(inst, idx, "a base register or literal reference"),
        };
        let mut word = (imm >> 2) & 0xff;
        if add {
            word |= 1 << 8;
        }
        word | (rn << 9)
    }

    /// VFP `[Rn, #±imm8]` (word counts): {12:9} = Rn, {8} = U,
    /// {7:0} = imm8.
    fn addrmode5_value(&mut self, inst: &Inst, idx: usize, fixups: &mut Vec<Fixup>) -> u32 {
        let (rn, imm8, add) = match inst.operand(idx) {
            Operand::Expr(e) => {
                let kind = if self.subtarget.is_thumb2() {
                    FixupKind::T2Pcrel10
                } else {
                    FixupKind::ArmPcrel10
                };
                fixups.push(Fixup::at_start(e.clone(), kind));
                self.cp_relocations += 1;
                (u32::from(self.regs.regno(Reg::PC)), 0, false)
            }
            Operand::Reg(_) => {
                let rn = self.regno_at(inst, idx);
                let opc = self.imm_at(inst, idx + 1);
                (rn, am::am5_offset(opc), am::am5_is_add(opc))
            }
            _ => self.bad_operand(inst, idx, "a base register or literal reference"),
        };
        let mut word = imm8;
        if add {
            word |= 1 << 8;
        }
        word | (rn << 9)
    }

    // ── Register + shifted-register addressing modes ─────────────────────

    /// Load/store `[Rn, ±Rm, shift #imm]`: {16:13} = Rn, {12} = U,
    /// {11:7} = imm, {6:5} = type, {4} = 0, {3:0} = Rm.
    fn ldst_so_reg_value(&self, inst: &Inst, idx: usize) -> u32 {
        let rn = self.regno_at(inst, idx);
        let rm = self.regno_at(inst, idx + 1);
        let opc = self.imm_at(inst, idx + 2);
        let mut word = rm | (rn << 13);
        word |= am::am2_shift(opc).type_bits() << 5;
        word |= am::am2_offset(opc) << 7;
        if am::am2_is_add(opc) {
            word |= 1 << 12;
        }
        word
    }

    /// `[Rn, offset]`: {17:14} = Rn, low 14 bits as in
    /// [`Self::addrmode2_offset_value`].
    fn addrmode2_value(&self, inst: &Inst, idx: usize) -> u32 {
        let rn = self.regno_at(inst, idx);
        self.addrmode2_offset_value(inst, idx + 1) | (rn << 14)
    }

    /// addrmode2 offset: {13} = isReg, {12} = U, {11:0} = imm12 or
    /// shifted Rm.
    fn addrmode2_offset_value(&self, inst: &Inst, idx: usize) -> u32 {
        let offset_reg = self.reg_at(inst, idx);
        let opc = self.imm_at(inst, idx + 1);
        let is_reg = !matches!(offset_reg, Reg::None);
        let mut word = am::am2_offset(opc);
        if is_reg {
            // Register offset: the am2 magnitude is the shift amount.
            word <<= 7;
            word |= am::am2_shift(opc).type_bits() << 5;
            word |= self.regno_at(inst, idx);
        }
        word | (u32::from(am::am2_is_add(opc)) << 12) | (u32::from(is_reg) << 13)
    }

    /// Post-indexed register offset: {4} = U, {3:0} = Rm.
    fn postidx_reg_value(&self, inst: &Inst, idx: usize) -> u32 {
        let rm = self.regno_at(inst, idx);
        let opc = self.imm_at(inst, idx + 1);
        rm | (u32::from(am::am3_is_add(opc)) << 4)
    }

    /// `[Rn, ±Rm]` or `[Rn, #±imm8]`: {13} = isImm, {12:9} = Rn,
    /// {8} = U, {7:0} = imm8 or Rm.
    fn addrmode3_value(&self, inst: &Inst, idx: usize) -> u32 {
        let rn = self.regno_at(inst, idx);
        let offset_reg = self.reg_at(inst, idx + 1);
        let opc = self.imm_at(inst, idx + 2);
        let is_imm = matches!(offset_reg, Reg::None);
        let low = if is_imm {
            am::am3_offset(opc)
        } else {
            self.regno_at(inst, idx + 1)
        };
        (rn << 9) | low | (u32::from(am::am3_is_add(opc)) << 8) | (u32::from(is_imm) << 13)
    }

    /// addrmode3 offset alone: {9} = isImm, {8} = U, {7:0} = imm8 or Rm.
    fn addrmode3_offset_value(&self, inst: &Inst, idx: usize) -> u32 {
        let offset_reg = self.reg_at(inst, idx);
        let opc = self.imm_at(inst, idx + 1);
        let is_imm = matches!(offset_reg, Reg::None);
        let low = if is_imm {
            am::am3_offset(opc)
        } else {
            self.regno_at(inst, idx)
        };
        low | (u32::from(am::am3_is_add(opc)) << 8) | (u32::from(is_imm) << 9)
    }

    // ── Thumb 16-bit addressing modes ────────────────────────────────────

    /// `[sp, #imm8]`: {7:0} = imm8 (already scaled upstream).
    fn thumb_sp_value(&self, inst: &Inst, idx: usize) -> u32 {
        let base = self.reg_at(inst, idx);
        if base != Reg::SP {
            self.bad_operand(inst, idx, "the stack pointer");
        }
        (self.imm_at(inst, idx + 1) as u32) & 0xff
    }

    /// `[Rn, #imm5]`: {7:3} = imm5, {2:0} = Rn.
    fn thumb_is_value(&self, inst: &Inst, idx: usize) -> u32 {
        let rn = self.regno_at(inst, idx);
        let imm5 = self.imm_at(inst, idx + 1) as u32;
        ((imm5 & 0x1f) << 3) | rn
    }

    /// `[Rn, Rm]`: {5:3} = Rm, {2:0} = Rn.
    fn thumb_rr_value(&self, inst: &Inst, idx: usize) -> u32 {
        let rn = self.regno_at(inst, idx);
        let rm = self.regno_at(inst, idx + 1);
        (rm << 3) | rn
    }

    // ── Thumb2 addressing modes ──────────────────────────────────────────

    /// Thumb2 `[Rn, Rm, lsl #imm2]`: Rn << 6 | Rm << 2 | imm2.
    fn t2_addrmode_so_reg_value(&self, inst: &Inst, idx: usize) -> u32 {
        let rn = self.regno_at(inst, idx);
        let rm = self.regno_at(inst, idx + 1);
        let imm2 = self.imm_at(inst, idx + 2) as u32;
        (((rn << 4) | rm) << 2) | (imm2 & 0x3)
    }

    /// Thumb2 `[Rn, #±imm8]`: Rn << 9, bit 8 set for addition, |imm| in
    /// the low byte.
    fn t2_addrmode_imm8_value(&self, inst: &Inst, idx: usize) -> u32 {
        let rn = self.regno_at(inst, idx);
        (rn << 9) | self.t2_signed_offset(inst, idx + 1, 8)
    }

    /// Thumb2 ±imm8 offset alone.
    fn t2_addrmode_imm8_offset_value(&self, inst: &Inst, idx: usize) -> u32 {
        self.t2_signed_offset(inst, idx, 8)
    }

    /// Thumb2 ±imm12 offset alone.
    fn t2_addrmode_imm12_offset_value(&self, inst: &Inst, idx: usize) -> u32 {
        self.t2_signed_offset(inst, idx, 12)
    }

    /// Signed offset as add-bit + magnitude: bit `bits` set for a
    /// non-negative offset, |imm| in the low `bits` bits.
    fn t2_signed_offset(&self, inst: &Inst, idx: usize, bits: u32) -> u32 {
        let imm = self.imm_at(inst, idx) as i32;
        let mut word = 0;
        let mag = if imm < 0 {
            imm.unsigned_abs()
        } else {
            word |= 1 << bits;
            imm as u32
        };
        word | (mag & ((1 << bits) - 1))
    }

    // ── NEON addrmode6 ───────────────────────────────────────────────────

    /// `[Rn:align]`: {N:4} = align code, {3:0} = Rn. The alignment table
    /// differs per instruction family.
    fn addrmode6_value(&self, inst: &Inst, idx: usize, table: Align6) -> u32 {
        let rn = self.regno_at(inst, idx);
        let align = self.imm_at(inst, idx + 1);
        let bits: u32 = match table {
            Align6::Standard => match align {
                2 | 4 | 8 => 0b01,
                16 => 0b10,
                32 => 0b11,
                _ => 0,
            },
            // VLD1/VST1 one-lane with size 32 only distinguishes 32-bit
            // alignment.
            Align6::OneLane32 => match align {
                32 => 0b11,
                _ => 0,
            },
            Align6::Dup => match align {
                2 | 4 | 8 => 0b01,
                16 => 0b11,
                _ => 0,
            },
        };
        rn | (bits << 4)
    }

    /// addrmode6 post-index offset: the absent register means "no
    /// writeback register" and encodes as 0x0D.
    fn addrmode6_offset_value(&self, inst: &Inst, idx: usize) -> u32 {
        match self.reg_at(inst, idx) {
            Reg::None => 0x0D,
            reg => u32::from(self.regs.regno(reg)),
        }
    }

    // ── movw/movt halves ─────────────────────────────────────────────────

    /// Half-immediate for movw/movt. Already-split immediates pass
    /// through; `:lower16:`/`:upper16:` expressions select one of eight
    /// fixup kinds by {half} × {ISA mode} × {PC-relative}.
    fn hi_lo16_value(&mut self, inst: &Inst, idx: usize, fixups: &mut Vec<Fixup>) -> u32 {
        let expr = match inst.operand(idx) {
            Operand::Imm(v) => return *v as u32,
            Operand::Expr(e) => e,
            _ => self.bad_operand(inst, idx, "an immediate or half-immediate expression"),
        };
        match &**expr {
            Expr::Half(sel, sub) => {
                let pcrel = !self.subtarget.is_darwin() && expr_is_pcrel(sub);
                let t2 = self.subtarget.is_thumb2();
                let kind = match (*sel, t2, pcrel) {
                    (HalfSel::Upper16, true, true) => FixupKind::T2MovtHi16Pcrel,
                    (HalfSel::Upper16, true, false) => FixupKind::T2MovtHi16,
                    (HalfSel::Upper16, false, true) => FixupKind::ArmMovtHi16Pcrel,
                    (HalfSel::Upper16, false, false) => FixupKind::ArmMovtHi16,
                    (HalfSel::Lower16, true, true) => FixupKind::T2MovwLo16Pcrel,
                    (HalfSel::Lower16, true, false) => FixupKind::T2MovwLo16,
                    (HalfSel::Lower16, false, true) => FixupKind::ArmMovwLo16Pcrel,
                    (HalfSel::Lower16, false, false) => FixupKind::ArmMovwLo16,
                };
                fixups.push(Fixup::at_start(sub.clone(), kind));
                0
            }
            _ => self.bad_operand(inst, idx, "a :lower16:/:upper16: expression"),
        }
    }

    // ── Small numeric encoders ───────────────────────────────────────────

    /// BFC/BFI mask operand (complement of the live mask) → lsb | msb<<5.
    fn bitfield_inv_mask_value(&self, inst: &Inst, idx: usize) -> u32 {
        let mask = !(self.imm_at(inst, idx) as u32);
        assert!(
            mask != 0,
            "opcode {}: operand {}: empty bitfield mask",
            inst.opcode,
            idx
        );
        let lsb = mask.trailing_zeros();
        let msb = 31 - mask.leading_zeros();
        lsb | (msb << 5)
    }

    /// Width operand of `[lsb, width]` → msb.
    fn msb_value(&self, inst: &Inst, idx: usize) -> u32 {
        let lsb = self.imm_at(inst, idx) as u32;
        let width = self.imm_at(inst, idx + 1) as u32;
        assert!(
            width != 0,
            "opcode {}: operand {}: zero bitfield width",
            inst.opcode,
            idx + 1
        );
        let msb = lsb + width - 1;
        assert!(
            msb < 32,
            "opcode {}: operand {}: bitfield {}..{} exceeds the word",
            inst.opcode,
            idx + 1,
            lsb,
            msb
        );
        msb
    }

    /// Load/store-multiple mode field: da=0, ia=1, db=2, ib=3.
    fn ldstm_mode_value(&self, inst: &Inst, idx: usize) -> u32 {
        let imm = self.imm_at(inst, idx);
        match AmSubMode::from_imm(imm) {
            Some(mode) => mode as u32,
            None => panic!(
                "opcode {}: operand {}: unknown load/store multiple submode {}",
                inst.opcode, idx, imm
            ),
        }
    }

    // ── Register lists ───────────────────────────────────────────────────

    /// Register list. VLDM/VSTM lists (S or D registers) encode as
    /// {12:8} = first register, {7:0} = register count (doubled for D
    /// registers); GPR lists encode as a 16-bit membership bitmask.
    fn reg_list_value(&self, inst: &Inst, first: usize, count: usize) -> u32 {
        let end = if count == 0 {
            inst.operands.len()
        } else {
            first + count
        };
        let lead = self.reg_at(inst, first);
        let spr = self.regs.class_contains(RegClass::Spr, lead);
        let dpr = self.regs.class_contains(RegClass::Dpr, lead);

        if spr || dpr {
            let vd = u32::from(self.regs.regno(lead)) & 0x1f;
            let nregs = ((end - first) & 0xff) as u32;
            (vd << 8) | if spr { nregs } else { nregs * 2 }
        } else {
            let mut mask = 0;
            for idx in first..end {
                mask |= 1 << self.regno_at(inst, idx);
            }
            mask
        }
    }

    // ── Post-encoders ────────────────────────────────────────────────────

    /// Rewrite a classic-ARM VFP/NEON encoding into its Thumb2 form.
    /// No-op outside Thumb2 mode.
    pub(crate) fn post_encode(&self, post: PostEncoder, word: u32) -> u32 {
        if !self.subtarget.is_thumb2() {
            return word;
        }
        match post {
            // Bit 24 moves to bit 12 of the high halfword (bit 28);
            // bits 27:24 become 1111.
            PostEncoder::NeonDataProcessing => {
                let bit24 = word & 0x0100_0000;
                let bit28 = bit24 << 4;
                (word & 0xEFFF_FFFF) | bit28 | 0x0F00_0000
            }
            PostEncoder::NeonLoadStore => (word & 0xF0FF_FFFF) | 0x0900_0000,
            PostEncoder::NeonDup => (word & 0x00FF_FFFF) | 0xEE00_0000,
            PostEncoder::Vfp => (word & 0x0FFF_FFFF) | 0xE000_0000,
        }
    }
}

/// Alignment code table selector for addrmode6.
#[derive(Clone, Copy)]
enum Align6 {
    Standard,
    OneLane32,
    Dup,
}

/// Whether an expression below a half-immediate selector should use the
/// PC-relative fixup variant. Any binary expression is treated as
/// PC-relative; strictly that holds only when a subexpression is itself
/// PC-relative, but the object writers expect exactly this rule.
fn expr_is_pcrel(expr: &Expr) -> bool {
    match expr.kind() {
        ExprKind::SymbolRef => false,
        ExprKind::Binary => true,
        _ => panic!("unexpected expression {} below a half-immediate selector", expr),
    }
}
