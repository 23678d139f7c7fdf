//! Styles, list kinds and decorators a rich text block may use.
//!
//! Each set is a bitflag so a block definition can be written as
//! `BlockStyles::NORMAL | BlockStyles::H2`, while documents and serialised schemas
//! use the platform's string values (`"normal"`, `"h2"`, `"blockquote"`, ...).

use bitflags::bitflags;
use serde::{Serialize, Serializer};

/// Maps each flag to the string stored in documents, and back.
macro_rules! mark_values {
    ($ty:ident { $($flag:ident => $value:literal),+ $(,)? }) => {
        impl $ty {
            const VALUES: &'static [(Self, &'static str)] = &[$((Self::$flag, $value)),+];

            /// Parses a single platform value such as `"h2"`; unknown values yield `None`.
            #[must_use]
            pub fn from_value(value: &str) -> Option<Self> {
                Self::VALUES.iter().find(|(_, v)| *v == value).map(|(flag, _)| *flag)
            }

            /// Platform values of the contained flags, in declaration order.
            pub fn values(self) -> impl Iterator<Item = &'static str> {
                Self::VALUES.iter().filter(move |(flag, _)| self.contains(*flag)).map(|(_, v)| *v)
            }

            /// Whether `value` names a flag in this set.
            #[must_use]
            pub fn allows(self, value: &str) -> bool {
                Self::from_value(value).is_some_and(|flag| self.contains(flag))
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.collect_seq(self.values())
            }
        }
    };
}

bitflags! {
    /// Paragraph styles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BlockStyles: u16 {
        const NORMAL = 1 << 0;
        const H1 = 1 << 1;
        const H2 = 1 << 2;
        const H3 = 1 << 3;
        const H4 = 1 << 4;
        const H5 = 1 << 5;
        const H6 = 1 << 6;
        const BLOCKQUOTE = 1 << 7;
    }
}

bitflags! {
    /// List kinds a block may belong to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ListStyles: u8 {
        const BULLET = 1 << 0;
        const NUMBER = 1 << 1;
    }
}

bitflags! {
    /// Inline decorators applied to spans.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Decorators: u8 {
        const STRONG = 1 << 0;
        const EM = 1 << 1;
        const CODE = 1 << 2;
        const UNDERLINE = 1 << 3;
        const STRIKE_THROUGH = 1 << 4;
    }
}

mark_values!(BlockStyles {
    NORMAL => "normal",
    H1 => "h1",
    H2 => "h2",
    H3 => "h3",
    H4 => "h4",
    H5 => "h5",
    H6 => "h6",
    BLOCKQUOTE => "blockquote",
});

mark_values!(ListStyles { BULLET => "bullet", NUMBER => "number" });

mark_values!(Decorators {
    STRONG => "strong",
    EM => "em",
    CODE => "code",
    UNDERLINE => "underline",
    STRIKE_THROUGH => "strike-through",
});

impl BlockStyles {
    /// What a bare `block` member allows.
    pub const PLATFORM_DEFAULT: Self = Self::all();
    /// Normal text, H2–H4 and quotes, as used by article bodies.
    pub const EDITORIAL: Self = Self::NORMAL
        .union(Self::H2)
        .union(Self::H3)
        .union(Self::H4)
        .union(Self::BLOCKQUOTE);
}

impl ListStyles {
    pub const PLATFORM_DEFAULT: Self = Self::all();
}

impl Decorators {
    pub const PLATFORM_DEFAULT: Self = Self::all();
    pub const EDITORIAL: Self = Self::STRONG.union(Self::EM).union(Self::UNDERLINE);
}
