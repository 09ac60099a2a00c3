//! Shared test fixtures: a small opcode table with real ARM/Thumb2
//! encodings, standing in for the generated instruction-description
//! tables a production assembler links in.
//!
//! Base patterns and field positions follow the ARM Architecture
//! Reference Manual; ARM-mode templates bake the AL condition into the
//! base unless the opcode takes a predicate operand.

#![allow(dead_code)]

use arm_emit::{
    ArmRegisterInfo, BitSpan, EncoderId, Form, Opcode, OpSlice, PlanEntry, PostEncoder,
    SortedTemplateTable, Template,
};

pub static REGS: ArmRegisterInfo = ArmRegisterInfo;

// ARM mode
pub const ADD_RI: Opcode = Opcode(0);
pub const B: Opcode = Opcode(1);
pub const BL: Opcode = Opcode(2);
pub const BX: Opcode = Opcode(3);
pub const LDR_I12: Opcode = Opcode(4);
pub const STR_I12: Opcode = Opcode(5);
pub const LDM_UPD: Opcode = Opcode(6);
pub const MOVW: Opcode = Opcode(7);
pub const MOVT: Opcode = Opcode(8);
pub const BFC: Opcode = Opcode(9);
// VFP / NEON (shared ARM/Thumb2 encodings, post-encoded)
pub const VLDR_S: Opcode = Opcode(10);
pub const VADD_I32: Opcode = Opcode(11);
pub const VLD1_LN32: Opcode = Opcode(12);
// Thumb / Thumb2
pub const T2_B: Opcode = Opcode(13);
pub const T2_MOVW: Opcode = Opcode(14);
pub const T_BL: Opcode = Opcode(15);
pub const T_LDR_I5: Opcode = Opcode(16);
// Pseudo
pub const COPY: Opcode = Opcode(17);

fn entry(ops: OpSlice, encoder: EncoderId, spans: Vec<BitSpan>) -> PlanEntry {
    PlanEntry::new(ops, encoder, spans)
}

pub fn table() -> SortedTemplateTable {
    SortedTemplateTable::new(vec![
        // ADD Rd, Rn, #modimm (cond AL): 0xE28 | Rn | Rd | rot:imm8
        (
            ADD_RI,
            Template {
                base: 0xE280_0000,
                form: Form::Size(4),
                plan: vec![
                    entry(OpSlice::new(0, 1), EncoderId::Machine, vec![BitSpan::at(12, 4)]),
                    entry(OpSlice::new(1, 1), EncoderId::Machine, vec![BitSpan::at(16, 4)]),
                    entry(OpSlice::new(2, 1), EncoderId::SoImm, vec![BitSpan::at(0, 12)]),
                ],
                post: vec![],
            },
        ),
        // B<cc> target: cond | 101 0 | imm24. Operands: target, cond, ccreg.
        (
            B,
            Template {
                base: 0x0A00_0000,
                form: Form::Size(4),
                plan: vec![
                    entry(OpSlice::new(0, 1), EncoderId::ArmBranch, vec![BitSpan::at(0, 24)]),
                    entry(OpSlice::new(1, 1), EncoderId::Machine, vec![BitSpan::at(28, 4)]),
                ],
                post: vec![],
            },
        ),
        // BL<cc> target
        (
            BL,
            Template {
                base: 0x0B00_0000,
                form: Form::Size(4),
                plan: vec![
                    entry(OpSlice::new(0, 1), EncoderId::ArmBranch, vec![BitSpan::at(0, 24)]),
                    entry(OpSlice::new(1, 1), EncoderId::Machine, vec![BitSpan::at(28, 4)]),
                ],
                post: vec![],
            },
        ),
        // BX Rm (cond AL)
        (
            BX,
            Template {
                base: 0xE12F_FF10,
                form: Form::Size(4),
                plan: vec![entry(
                    OpSlice::new(0, 1),
                    EncoderId::Machine,
                    vec![BitSpan::at(0, 4)],
                )],
                post: vec![],
            },
        ),
        // LDR Rt, [Rn, #±imm12] (cond AL): 0xE51 + U
        (
            LDR_I12,
            Template {
                base: 0xE510_0000,
                form: Form::Size(4),
                plan: vec![
                    entry(OpSlice::new(0, 1), EncoderId::Machine, vec![BitSpan::at(12, 4)]),
                    entry(
                        OpSlice::new(1, 2),
                        EncoderId::AddrModeImm12,
                        vec![
                            BitSpan::part(0, 0, 12),
                            BitSpan::part(23, 12, 1),
                            BitSpan::part(16, 13, 4),
                        ],
                    ),
                ],
                post: vec![],
            },
        ),
        // STR Rt, [Rn, #±imm12] (cond AL)
        (
            STR_I12,
            Template {
                base: 0xE500_0000,
                form: Form::Size(4),
                plan: vec![
                    entry(OpSlice::new(0, 1), EncoderId::Machine, vec![BitSpan::at(12, 4)]),
                    entry(
                        OpSlice::new(1, 2),
                        EncoderId::AddrModeImm12,
                        vec![
                            BitSpan::part(0, 0, 12),
                            BitSpan::part(23, 12, 1),
                            BitSpan::part(16, 13, 4),
                        ],
                    ),
                ],
                post: vec![],
            },
        ),
        // LDM<mode> Rn!, {regs} (cond AL): 100 P U 0 W=1 L=1.
        // Operands: Rn, submode, regs…
        (
            LDM_UPD,
            Template {
                base: 0xE830_0000,
                form: Form::Size(4),
                plan: vec![
                    entry(OpSlice::new(0, 1), EncoderId::Machine, vec![BitSpan::at(16, 4)]),
                    entry(OpSlice::new(1, 1), EncoderId::LdStmMode, vec![BitSpan::at(23, 2)]),
                    entry(OpSlice::rest(2), EncoderId::RegList, vec![BitSpan::at(0, 16)]),
                ],
                post: vec![],
            },
        ),
        // MOVW Rd, #imm16 (cond AL): 0xE30 | imm4 | Rd | imm12
        (
            MOVW,
            Template {
                base: 0xE300_0000,
                form: Form::Size(4),
                plan: vec![
                    entry(OpSlice::new(0, 1), EncoderId::Machine, vec![BitSpan::at(12, 4)]),
                    entry(
                        OpSlice::new(1, 1),
                        EncoderId::HiLo16,
                        vec![BitSpan::part(0, 0, 12), BitSpan::part(16, 12, 4)],
                    ),
                ],
                post: vec![],
            },
        ),
        // MOVT Rd, #imm16 (cond AL)
        (
            MOVT,
            Template {
                base: 0xE340_0000,
                form: Form::Size(4),
                plan: vec![
                    entry(OpSlice::new(0, 1), EncoderId::Machine, vec![BitSpan::at(12, 4)]),
                    entry(
                        OpSlice::new(1, 1),
                        EncoderId::HiLo16,
                        vec![BitSpan::part(0, 0, 12), BitSpan::part(16, 12, 4)],
                    ),
                ],
                post: vec![],
            },
        ),
        // BFC Rd, #lsb, #width (cond AL): 0111110 msb Rd lsb 001 1111.
        // Operands: Rd, inverted mask.
        (
            BFC,
            Template {
                base: 0xE7C0_001F,
                form: Form::Size(4),
                plan: vec![
                    entry(OpSlice::new(0, 1), EncoderId::Machine, vec![BitSpan::at(12, 4)]),
                    entry(
                        OpSlice::new(1, 1),
                        EncoderId::BitfieldInvMask,
                        vec![BitSpan::part(7, 0, 5), BitSpan::part(16, 5, 5)],
                    ),
                ],
                post: vec![],
            },
        ),
        // VLDR Sd, [Rn, #±imm8] / VLDR Sd, literal: 1101 U D 01 Rn Vd 1010 imm8
        (
            VLDR_S,
            Template {
                base: 0xED10_0A00,
                form: Form::Size(4),
                plan: vec![
                    entry(
                        OpSlice::new(0, 1),
                        EncoderId::Machine,
                        vec![BitSpan::part(12, 1, 4), BitSpan::part(22, 0, 1)],
                    ),
                    entry(
                        OpSlice::new(1, 2),
                        EncoderId::AddrMode5,
                        vec![
                            BitSpan::part(0, 0, 8),
                            BitSpan::part(23, 8, 1),
                            BitSpan::part(16, 9, 4),
                        ],
                    ),
                ],
                post: vec![PostEncoder::Vfp],
            },
        ),
        // VADD.I32 Dd, Dn, Dm: 1111 0010 0 D 10 Rn Vd 1000 N 0 M 0 Rm
        (
            VADD_I32,
            Template {
                base: 0xF220_0800,
                form: Form::Size(4),
                plan: vec![
                    entry(
                        OpSlice::new(0, 1),
                        EncoderId::Machine,
                        vec![BitSpan::part(12, 0, 4), BitSpan::part(22, 4, 1)],
                    ),
                    entry(
                        OpSlice::new(1, 1),
                        EncoderId::Machine,
                        vec![BitSpan::part(16, 0, 4), BitSpan::part(7, 4, 1)],
                    ),
                    entry(
                        OpSlice::new(2, 1),
                        EncoderId::Machine,
                        vec![BitSpan::part(0, 0, 4), BitSpan::part(5, 4, 1)],
                    ),
                ],
                post: vec![PostEncoder::NeonDataProcessing],
            },
        ),
        // VLD1.32 {Dd[x]}, [Rn:align]: 1111 0100 1 D 10 Rn Vd 1000 idx_align Rm
        // Operands: Dd, Rn, align, lane.
        (
            VLD1_LN32,
            Template {
                base: 0xF4A0_080F,
                form: Form::Size(4),
                plan: vec![
                    entry(
                        OpSlice::new(0, 1),
                        EncoderId::Machine,
                        vec![BitSpan::part(12, 0, 4), BitSpan::part(22, 4, 1)],
                    ),
                    entry(
                        OpSlice::new(1, 2),
                        EncoderId::AddrMode6OneLane32,
                        vec![BitSpan::part(16, 0, 4), BitSpan::part(4, 4, 2)],
                    ),
                    entry(OpSlice::new(3, 1), EncoderId::Machine, vec![BitSpan::at(7, 1)]),
                ],
                post: vec![PostEncoder::NeonLoadStore],
            },
        ),
        // B.W target: 11110 S imm10 | 10 J1 1 J2 imm11
        (
            T2_B,
            Template {
                base: 0xF000_9000,
                form: Form::Size(4),
                plan: vec![entry(
                    OpSlice::new(0, 1),
                    EncoderId::T2UncondBranch,
                    vec![
                        BitSpan::part(26, 23, 1),
                        BitSpan::part(16, 11, 10),
                        BitSpan::part(13, 22, 1),
                        BitSpan::part(11, 21, 1),
                        BitSpan::part(0, 0, 11),
                    ],
                )],
                post: vec![],
            },
        ),
        // MOVW Rd, #imm16 (Thumb2): 11110 i 100100 imm4 | 0 imm3 Rd imm8
        (
            T2_MOVW,
            Template {
                base: 0xF240_0000,
                form: Form::Size(4),
                plan: vec![
                    entry(OpSlice::new(0, 1), EncoderId::Machine, vec![BitSpan::at(8, 4)]),
                    entry(
                        OpSlice::new(1, 1),
                        EncoderId::HiLo16,
                        vec![
                            BitSpan::part(0, 0, 8),
                            BitSpan::part(12, 8, 3),
                            BitSpan::part(26, 11, 1),
                            BitSpan::part(16, 12, 4),
                        ],
                    ),
                ],
                post: vec![],
            },
        ),
        // BL target (Thumb)
        (
            T_BL,
            Template {
                base: 0xF000_D000,
                form: Form::Size(4),
                plan: vec![entry(
                    OpSlice::new(0, 1),
                    EncoderId::ThumbBl,
                    vec![BitSpan::at(0, 11)],
                )],
                post: vec![],
            },
        ),
        // LDR Rt, [Rn, #imm5] (Thumb 16-bit): 01101 imm5 Rn Rt
        (
            T_LDR_I5,
            Template {
                base: 0x6800,
                form: Form::Size(2),
                plan: vec![
                    entry(OpSlice::new(0, 1), EncoderId::Machine, vec![BitSpan::at(0, 3)]),
                    entry(
                        OpSlice::new(1, 2),
                        EncoderId::ThumbAddrModeIs,
                        vec![BitSpan::at(3, 8)],
                    ),
                ],
                post: vec![],
            },
        ),
        // Register-allocation copy placeholder, never encoded.
        (
            COPY,
            Template {
                base: 0,
                form: Form::Pseudo,
                plan: vec![],
                post: vec![],
            },
        ),
    ])
}
