//! How annotations may appear in a modifier list.
//!
//! Every call site that parses modifiers names one [`AnnotationMode`].
//! The modes form a closed set; their effects are spelled out as
//! [`AnnotationFlags`].

use bitflags::bitflags;

bitflags! {
    /// Effects of an annotation mode.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub(crate) struct AnnotationFlags: u8 {
        /// A bare identifier may be an annotation without `@`.
        const ALLOW_SHORT = 1 << 0;
        /// Annotations here apply to the file and take a `file:` target.
        const FILE = 1 << 1;
        /// Member-introducing soft keywords end the list.
        const MEMBER_START = 1 << 2;
        /// Annotations are parsed at all.
        const ALLOWED = 1 << 3;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum AnnotationMode {
    FileAnnotationsBeforePackage,
    FileAnnotationsPackageOmitted,
    /// Only `@`-prefixed annotations.
    EscapedOnly,
    UnescapedAllowed,
    UnescapedAllowedAtMember,
    PrimaryConstructorModifiers,
    PrimaryConstructorModifiersLocal,
    NoAnnotations,
}

impl AnnotationMode {
    pub(crate) const fn flags(self) -> AnnotationFlags {
        use AnnotationFlags as F;
        match self {
            Self::FileAnnotationsBeforePackage | Self::FileAnnotationsPackageOmitted => {
                F::FILE.union(F::ALLOWED)
            }
            Self::EscapedOnly | Self::PrimaryConstructorModifiersLocal => F::ALLOWED,
            Self::UnescapedAllowed | Self::PrimaryConstructorModifiers => {
                F::ALLOW_SHORT.union(F::ALLOWED)
            }
            Self::UnescapedAllowedAtMember => F::ALLOW_SHORT.union(F::MEMBER_START).union(F::ALLOWED),
            Self::NoAnnotations => F::empty(),
        }
    }

    #[inline]
    pub(crate) fn allows_short(self) -> bool {
        self.flags().contains(AnnotationFlags::ALLOW_SHORT)
    }

    #[inline]
    pub(crate) fn is_file(self) -> bool {
        self.flags().contains(AnnotationFlags::FILE)
    }

    #[inline]
    pub(crate) fn stops_at_member_start(self) -> bool {
        self.flags().contains(AnnotationFlags::MEMBER_START)
    }

    #[inline]
    pub(crate) fn allows_annotations(self) -> bool {
        self.flags().contains(AnnotationFlags::ALLOWED)
    }
}

#[cfg(test)]
mod tests {
    use super::{AnnotationFlags as F, AnnotationMode as M};

    #[test]
    fn mode_table() {
        let table = [
            (M::FileAnnotationsBeforePackage, false, true, false, true),
            (M::FileAnnotationsPackageOmitted, false, true, false, true),
            (M::EscapedOnly, false, false, false, true),
            (M::UnescapedAllowed, true, false, false, true),
            (M::UnescapedAllowedAtMember, true, false, true, true),
            (M::PrimaryConstructorModifiers, true, false, false, true),
            (M::PrimaryConstructorModifiersLocal, false, false, false, true),
            (M::NoAnnotations, false, false, false, false),
        ];
        for (mode, short, file, member, allowed) in table {
            assert_eq!(mode.allows_short(), short, "{mode:?}");
            assert_eq!(mode.is_file(), file, "{mode:?}");
            assert_eq!(mode.stops_at_member_start(), member, "{mode:?}");
            assert_eq!(mode.allows_annotations(), allowed, "{mode:?}");
        }
    }

    #[test]
    fn every_annotating_mode_allows_annotations() {
        for mode in [M::UnescapedAllowed, M::UnescapedAllowedAtMember, M::FileAnnotationsBeforePackage] {
            assert!(mode.flags().contains(F::ALLOWED));
        }
        assert!(M::NoAnnotations.flags().is_empty());
    }
}
