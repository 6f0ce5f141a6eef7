//! Property-based tests for the font attribute set.
//!
//! 1. Difference and intersection partition a set.
//! 2. Truncation never produces unnamed bits.
//! 3. Style equality agrees with field-wise equality.

use ansidoc_style::{Color, FontAttributes, Style};
use proptest::prelude::*;

fn attrs_strategy() -> impl Strategy<Value = FontAttributes> {
    any::<u16>().prop_map(FontAttributes::from_bits_truncate)
}

fn color_strategy() -> impl Strategy<Value = Color> {
    prop_oneof![
        Just(Color::Default),
        (0u8..8).prop_map(|i| Color::standard(i).unwrap()),
        (0u8..8).prop_map(|i| Color::bright(i).unwrap()),
        any::<u8>().prop_map(Color::Palette),
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::rgb(r, g, b)),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Difference and intersection partition a set
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn difference_and_intersection_partition(a in attrs_strategy(), b in attrs_strategy()) {
        let kept = a & b;
        let dropped = a.without(b);
        prop_assert_eq!(kept | dropped, a);
        prop_assert!((kept & dropped).is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Truncation never produces unnamed bits
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn truncation_only_named_bits(bits in any::<u16>()) {
        let attrs = FontAttributes::from_bits_truncate(bits);
        prop_assert_eq!(attrs.bits() & !FontAttributes::all().bits(), 0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Style equality is field-wise
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn style_equality_fieldwise(
        fg1 in color_strategy(), bg1 in color_strategy(), a1 in attrs_strategy(),
        fg2 in color_strategy(), bg2 in color_strategy(), a2 in attrs_strategy(),
    ) {
        let s1 = Style::new().fg(fg1).bg(bg1).attrs(a1);
        let s2 = Style::new().fg(fg2).bg(bg2).attrs(a2);
        prop_assert_eq!(s1 == s2, fg1 == fg2 && bg1 == bg2 && a1 == a2);
    }
}
