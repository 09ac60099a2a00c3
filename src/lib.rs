//! # arm-emit — ARM Machine-Code Emitter
//!
//! `arm-emit` turns symbolic, fully-resolved ARM/Thumb/Thumb2
//! instructions into the exact little-endian byte stream the
//! architecture defines, recording *relocation fixups* for operands
//! whose final value is not yet known (branch targets, literal-pool
//! loads, `:lower16:`/`:upper16:` halves).
//!
//! ## Quick Start
//!
//! ```rust
//! use arm_emit::{
//!     ArmRegisterInfo, BitSpan, Emitter, EncoderId, Form, Inst, IsaMode, Opcode, OpSlice,
//!     Operand, OsTag, PlanEntry, Reg, SortedTemplateTable, Subtarget, Template,
//! };
//!
//! // One-opcode table: ADD Rd, Rn, #modimm (condition AL baked into the
//! // base pattern). Real tables come from an instruction-description
//! // generator.
//! const ADD_RI: Opcode = Opcode(0);
//! let table = SortedTemplateTable::new(vec![(
//!     ADD_RI,
//!     Template {
//!         base: 0xE280_0000,
//!         form: Form::Size(4),
//!         plan: vec![
//!             PlanEntry::new(OpSlice::new(0, 1), EncoderId::Machine, vec![BitSpan::at(12, 4)]),
//!             PlanEntry::new(OpSlice::new(1, 1), EncoderId::Machine, vec![BitSpan::at(16, 4)]),
//!             PlanEntry::new(OpSlice::new(2, 1), EncoderId::SoImm, vec![BitSpan::at(0, 12)]),
//!         ],
//!         post: vec![],
//!     },
//! )]);
//!
//! let regs = ArmRegisterInfo;
//! let mut emitter = Emitter::new(&table, &regs, Subtarget::new(IsaMode::Arm, OsTag::Linux));
//!
//! // add r1, r2, #0xFF00
//! let inst = Inst::new(
//!     ADD_RI,
//!     vec![
//!         Operand::reg(Reg::R(1)),
//!         Operand::reg(Reg::R(2)),
//!         Operand::imm(0xFF00),
//!     ],
//! );
//! let mut bytes = Vec::new();
//! let mut fixups = Vec::new();
//! emitter.encode_instruction(&inst, &mut bytes, &mut fixups);
//! assert_eq!(bytes, vec![0xFF, 0x0C, 0x82, 0xE2]);
//! assert!(fixups.is_empty());
//! ```
//!
//! ## Features
//!
//! - **Pure Rust** — no C/C++ FFI, no system assembler.
//! - **Table-driven** — opcodes map to bit patterns plus per-operand
//!   encoder selections; the emitter owns only the encoding engine.
//! - **ARM, Thumb, Thumb2** — including the Thumb2 high-halfword-first
//!   storage order and the shared VFP/NEON encodings rewritten for
//!   Thumb2 by post-encoders.
//! - **`no_std` + `alloc`** — embeddable in firmware and kernels.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
// ── Pedantic lint policy ─────────────────────────────────────────────────
// An instruction encoder intentionally performs many narrowing /
// sign-changing casts between integer widths (i64→u32, u32→u8) and uses
// dense hex literals without separators (0xEFFFFFFF, 0x0F000000). The
// lints below are expected and acceptable in this context.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::unreadable_literal,
    clippy::match_same_arms,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_panics_doc,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::return_self_not_must_use
)]

extern crate alloc;

/// Addressing-mode sub-operand packing (offset direction, barrel shifts,
/// modified immediates).
pub mod am;
mod encode;
mod emitter;
/// Relocation fixups: kinds and records.
pub mod fixup;
/// Symbolic instructions, operands and expressions.
pub mod ir;
/// Register model and the register database interface.
pub mod reg;
/// Subtarget state: ISA mode and target OS.
pub mod subtarget;
/// Opcode encoding templates and the template table interface.
pub mod template;

// Re-exports
pub use am::{AmSubMode, ShiftOp};
pub use emitter::{ByteSink, Emitter, InstrBytes};
pub use fixup::{Fixup, FixupKind};
pub use ir::{Cond, Expr, ExprKind, HalfSel, Inst, Operand};
pub use reg::{ArmRegisterInfo, Reg, RegClass, RegisterInfo};
pub use subtarget::{IsaMode, OsTag, Subtarget};
pub use template::{
    BitSpan, EncoderId, Form, Opcode, OpSlice, PlanEntry, PostEncoder, SortedTemplateTable,
    Template, TemplateTable,
};
