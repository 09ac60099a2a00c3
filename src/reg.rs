//! ARM register model and the register database interface.
//!
//! The emitter never hard-codes hardware register numbers; it asks a
//! [`RegisterInfo`] for them. [`ArmRegisterInfo`] is the canonical
//! database covering the core and extension register files:
//!
//! - GPRs `r0`–`r12`, `sp`, `lr`, `pc` (numbered 0–15)
//! - VFP single-precision `s0`–`s31`
//! - VFP/NEON double-precision `d0`–`d31`
//! - NEON quad `q0`–`q15`
//!
//! Quad registers have no hardware numbering of their own: the binary
//! encoding of `Qn` is `2n` (the number of its low D half). That doubling
//! is applied by the operand encoder, not here — the database reports the
//! logical number.

use core::fmt;

/// One ARM register, or the absent-register placeholder.
///
/// `Reg::None` stands for an optional register operand that is not
/// present (e.g. the register-offset slot of an immediate-offset
/// addressing mode, or the alignment-only offset of a NEON post-index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reg {
    /// Absent optional register operand.
    None,
    /// General-purpose register `r0`–`r15`.
    R(u8),
    /// VFP single-precision register `s0`–`s31`.
    S(u8),
    /// VFP/NEON double-precision register `d0`–`d31`.
    D(u8),
    /// NEON quad register `q0`–`q15`.
    Q(u8),
    /// The flags register (carries the set-flags / predication marker in
    /// condition-code and `s`-suffix operand positions).
    Cpsr,
}

impl Reg {
    /// Stack pointer (`r13`).
    pub const SP: Reg = Reg::R(13);
    /// Link register (`r14`).
    pub const LR: Reg = Reg::R(14);
    /// Program counter (`r15`).
    pub const PC: Reg = Reg::R(15);
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reg::None => write!(f, "<none>"),
            Reg::R(13) => write!(f, "sp"),
            Reg::R(14) => write!(f, "lr"),
            Reg::R(15) => write!(f, "pc"),
            Reg::R(n) => write!(f, "r{}", n),
            Reg::S(n) => write!(f, "s{}", n),
            Reg::D(n) => write!(f, "d{}", n),
            Reg::Q(n) => write!(f, "q{}", n),
            Reg::Cpsr => write!(f, "cpsr"),
        }
    }
}

/// Register classes the encoders query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegClass {
    /// General-purpose registers.
    Gpr,
    /// VFP single-precision registers.
    Spr,
    /// VFP/NEON double-precision registers.
    Dpr,
    /// NEON quad registers.
    Qpr,
}

/// Read-only register database.
///
/// Implementations must be immutable after construction; the emitter only
/// ever reads through this trait.
pub trait RegisterInfo {
    /// Hardware number of `reg` within its register class.
    ///
    /// # Panics
    ///
    /// Panics when asked for a register with no hardware number
    /// (`Reg::None`, `Reg::Cpsr`) — such registers never reach a numeric
    /// encoding field.
    fn regno(&self, reg: Reg) -> u16;

    /// Whether `reg` belongs to `class`.
    fn class_contains(&self, class: RegClass, reg: Reg) -> bool;
}

/// The canonical ARM register database.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArmRegisterInfo;

impl RegisterInfo for ArmRegisterInfo {
    fn regno(&self, reg: Reg) -> u16 {
        match reg {
            Reg::R(n) => {
                assert!(n < 16, "r{} is not an ARM general-purpose register", n);
                u16::from(n)
            }
            Reg::S(n) => {
                assert!(n < 32, "s{} is not a VFP single-precision register", n);
                u16::from(n)
            }
            Reg::D(n) => {
                assert!(n < 32, "d{} is not a double-precision register", n);
                u16::from(n)
            }
            Reg::Q(n) => {
                assert!(n < 16, "q{} is not a NEON quad register", n);
                u16::from(n)
            }
            Reg::None | Reg::Cpsr => {
                panic!("register {} has no hardware number", reg)
            }
        }
    }

    fn class_contains(&self, class: RegClass, reg: Reg) -> bool {
        matches!(
            (class, reg),
            (RegClass::Gpr, Reg::R(_))
                | (RegClass::Spr, Reg::S(_))
                | (RegClass::Dpr, Reg::D(_))
                | (RegClass::Qpr, Reg::Q(_))
        )
    }
}
