//! Subtarget description: ISA mode and target OS.
//!
//! The emitter is constructed for one fixed subtarget and never mutates
//! it. Two emitters with different subtargets can encode the same
//! instruction stream into different byte sequences (ARM vs Thumb2
//! encodings of VFP/NEON, different fixup kinds for branches).

use core::fmt;

/// Instruction-set mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsaMode {
    /// Classic ARM: 32-bit fixed-width instructions.
    Arm,
    /// Thumb (v4T/v5/v6): 16-bit instructions only.
    Thumb,
    /// Thumb2: mixed 16/32-bit, wide instructions stored as two
    /// halfwords, high halfword first.
    Thumb2,
}

impl fmt::Display for IsaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsaMode::Arm => write!(f, "ARM"),
            IsaMode::Thumb => write!(f, "Thumb"),
            IsaMode::Thumb2 => write!(f, "Thumb2"),
        }
    }
}

/// Target operating system, as far as the emitter cares.
///
/// Only the Darwin family changes behavior (movw/movt fixup selection);
/// everything else is equivalent to `Linux`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OsTag {
    Darwin,
    MacOsx,
    Ios,
    Linux,
    Other,
}

impl OsTag {
    /// Whether this OS is part of the Darwin family.
    #[inline]
    pub fn is_darwin(self) -> bool {
        matches!(self, OsTag::Darwin | OsTag::MacOsx | OsTag::Ios)
    }
}

/// Immutable subtarget state queried during encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subtarget {
    mode: IsaMode,
    os: OsTag,
}

impl Subtarget {
    /// Create a subtarget for the given ISA mode and OS.
    #[inline]
    pub fn new(mode: IsaMode, os: OsTag) -> Self {
        Self { mode, os }
    }

    /// The ISA mode.
    #[inline]
    pub fn mode(self) -> IsaMode {
        self.mode
    }

    /// In any Thumb mode (16-bit-only or Thumb2)?
    #[inline]
    pub fn is_thumb(self) -> bool {
        !matches!(self.mode, IsaMode::Arm)
    }

    /// In Thumb2 mode?
    #[inline]
    pub fn is_thumb2(self) -> bool {
        matches!(self.mode, IsaMode::Thumb2)
    }

    /// Targeting a Darwin-family OS?
    #[inline]
    pub fn is_darwin(self) -> bool {
        self.os.is_darwin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumb2_implies_thumb() {
        let st = Subtarget::new(IsaMode::Thumb2, OsTag::Linux);
        assert!(st.is_thumb());
        assert!(st.is_thumb2());
    }

    #[test]
    fn thumb_is_not_thumb2() {
        let st = Subtarget::new(IsaMode::Thumb, OsTag::Linux);
        assert!(st.is_thumb());
        assert!(!st.is_thumb2());
    }

    #[test]
    fn darwin_family() {
        assert!(Subtarget::new(IsaMode::Arm, OsTag::Darwin).is_darwin());
        assert!(Subtarget::new(IsaMode::Arm, OsTag::Ios).is_darwin());
        assert!(Subtarget::new(IsaMode::Arm, OsTag::MacOsx).is_darwin());
        assert!(!Subtarget::new(IsaMode::Arm, OsTag::Linux).is_darwin());
        assert!(!Subtarget::new(IsaMode::Arm, OsTag::Other).is_darwin());
    }
}
