//! Trivia categories skipped between tokens.

use bitflags::bitflags;

bitflags! {
    /// Selects which trivia categories the tokenizer skips.
    ///
    /// A category that is not in the mask is returned as a token instead,
    /// which lets the value parser see the newline that ends a `#define`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SkipMask: u8 {
        const NEWLINE = 1 << 0;
        const WHITESPACE = 1 << 1;
        const LINE_COMMENT = 1 << 2;
        const BLOCK_COMMENT = 1 << 3;

        const COMMENTS = Self::LINE_COMMENT.bits() | Self::BLOCK_COMMENT.bits();
        const ALL = Self::NEWLINE.bits()
            | Self::WHITESPACE.bits()
            | Self::LINE_COMMENT.bits()
            | Self::BLOCK_COMMENT.bits();
    }
}

impl Default for SkipMask {
    fn default() -> Self {
        SkipMask::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_skips_everything() {
        let mask = SkipMask::default();
        assert!(mask.contains(SkipMask::NEWLINE));
        assert!(mask.contains(SkipMask::COMMENTS));
    }

    #[test]
    fn test_clearing_newline_keeps_others() {
        let mask = SkipMask::default() - SkipMask::NEWLINE;
        assert!(!mask.contains(SkipMask::NEWLINE));
        assert!(mask.contains(SkipMask::WHITESPACE | SkipMask::COMMENTS));
    }
}
