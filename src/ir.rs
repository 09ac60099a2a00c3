//! Symbolic instruction representation consumed by the emitter.
//!
//! An [`Inst`] is an opcode plus a flat, ordered operand sequence. Every
//! operand is already fully resolved by earlier passes except for
//! [`Expr`] operands, whose final values the object writer computes from
//! the fixups this crate records.
//!
//! Compound addressing modes are represented as runs of consecutive
//! operands (base register, offset register, packed offset immediate —
//! see [`crate::am`] for the packing helpers). The opcode's encoding
//! template says which operand runs feed which encoder.

use alloc::rc::Rc;
use core::fmt;

use crate::reg::Reg;
use crate::template::Opcode;

/// ARM condition codes as they appear in predicate operand pairs
/// (condition immediate followed by the flags register).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Cond {
    Eq = 0x0,
    Ne = 0x1,
    Hs = 0x2,
    Lo = 0x3,
    Mi = 0x4,
    Pl = 0x5,
    Vs = 0x6,
    Vc = 0x7,
    Hi = 0x8,
    Ls = 0x9,
    Ge = 0xA,
    Lt = 0xB,
    Gt = 0xC,
    Le = 0xD,
    /// Always — the "no condition" predicate.
    Al = 0xE,
}

impl Cond {
    /// The 4-bit encoding placed in the condition field.
    #[inline]
    pub fn bits(self) -> u32 {
        self as u32
    }
}

/// Selector of a target-specific half-immediate expression
/// (`:lower16:` / `:upper16:` in assembly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HalfSel {
    /// `:lower16:` — low half of a 32-bit value (`movw`).
    Lower16,
    /// `:upper16:` — high half of a 32-bit value (`movt`).
    Upper16,
}

/// Coarse expression classification, mirroring what the encoders need to
/// know about an expression without evaluating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    Constant,
    SymbolRef,
    Binary,
    Unary,
    TargetSpecific,
}

/// An unresolved expression attached to an operand.
///
/// Nodes are shared via `Rc` so that recording a fixup is a refcount
/// bump, not a deep clone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// A constant.
    Num(i64),
    /// A reference to a symbol.
    Symbol(Rc<str>),
    /// Sum of two subexpressions.
    Add(Rc<Expr>, Rc<Expr>),
    /// Difference of two subexpressions (`sym - .` and friends).
    Sub(Rc<Expr>, Rc<Expr>),
    /// Negation.
    Neg(Rc<Expr>),
    /// A `:lower16:` / `:upper16:` half-immediate selector wrapping a
    /// subexpression.
    Half(HalfSel, Rc<Expr>),
}

impl Expr {
    /// Build a symbol reference.
    pub fn symbol(name: &str) -> Rc<Expr> {
        Rc::new(Expr::Symbol(Rc::from(name)))
    }

    /// Classify this expression node.
    pub fn kind(&self) -> ExprKind {
        match self {
            Expr::Num(_) => ExprKind::Constant,
            Expr::Symbol(_) => ExprKind::SymbolRef,
            Expr::Add(..) | Expr::Sub(..) => ExprKind::Binary,
            Expr::Neg(_) => ExprKind::Unary,
            Expr::Half(..) => ExprKind::TargetSpecific,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{}", n),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::Add(l, r) => write!(f, "({} + {})", l, r),
            Expr::Sub(l, r) => write!(f, "({} - {})", l, r),
            Expr::Neg(e) => write!(f, "-{}", e),
            Expr::Half(HalfSel::Lower16, e) => write!(f, ":lower16:{}", e),
            Expr::Half(HalfSel::Upper16, e) => write!(f, ":upper16:{}", e),
        }
    }
}

/// One instruction operand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    /// A register (or the absent-register placeholder).
    Reg(Reg),
    /// An immediate. For compound addressing modes this may be a packed
    /// sub-operand value built by the [`crate::am`] helpers.
    Imm(i64),
    /// A floating-point immediate (VFP/NEON `vmov`).
    FpImm(f64),
    /// An unresolved expression — encoded as a zero placeholder plus a
    /// recorded fixup.
    Expr(Rc<Expr>),
}

impl Operand {
    /// Register operand.
    #[inline]
    pub fn reg(reg: Reg) -> Operand {
        Operand::Reg(reg)
    }

    /// Immediate operand.
    #[inline]
    pub fn imm(value: i64) -> Operand {
        Operand::Imm(value)
    }

    /// Floating-point immediate operand.
    #[inline]
    pub fn fp_imm(value: f64) -> Operand {
        Operand::FpImm(value)
    }

    /// Expression operand.
    #[inline]
    pub fn expr(expr: Rc<Expr>) -> Operand {
        Operand::Expr(expr)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(r) => write!(f, "{}", r),
            Operand::Imm(v) => {
                if *v < 0 {
                    write!(f, "#-0x{:X}", v.wrapping_neg())
                } else {
                    write!(f, "#0x{:X}", v)
                }
            }
            Operand::FpImm(v) => write!(f, "#{}", v),
            Operand::Expr(e) => write!(f, "{}", e),
        }
    }
}

/// A symbolic machine instruction, ready for encoding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inst {
    /// Opcode identifier, resolved against the template table.
    pub opcode: Opcode,
    /// Operands in template-declared order.
    pub operands: alloc::vec::Vec<Operand>,
}

impl Inst {
    /// Create an instruction.
    pub fn new(opcode: Opcode, operands: alloc::vec::Vec<Operand>) -> Self {
        Self { opcode, operands }
    }

    /// Operand at `idx`.
    ///
    /// # Panics
    ///
    /// Panics with an opcode-identifying message when the template plan
    /// references an operand the instruction does not have.
    #[inline]
    pub fn operand(&self, idx: usize) -> &Operand {
        match self.operands.get(idx) {
            Some(op) => op,
            None => panic!(
                "opcode {}: operand {} out of range ({} operands)",
                self.opcode,
                idx,
                self.operands.len()
            ),
        }
    }
}
