//! Property tests for version ordering and unit assembly

use proptest::prelude::*;
use stepwise_core::discovery::UnitAssembler;
use stepwise_core::model::{parse_filename, FileParse};
use stepwise_core::Version;
use std::cmp::Ordering;

fn version_token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,8}",
        "[0-9]{14}",
        "[a-z][a-z0-9]{0,6}",
    ]
}

proptest! {
    #[test]
    fn prop_ordering_is_total_and_transitive(a in version_token(), b in version_token(), c in version_token()) {
        let (a, b, c) = (Version::new(a), Version::new(b), Version::new(c));

        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn prop_zero_padding_preserves_numeric_order(x in 0u64..1_000_000, y in 0u64..1_000_000) {
        let a = Version::new(format!("{:06}", x));
        let b = Version::new(format!("{:06}", y));
        prop_assert_eq!(a.cmp(&b), x.cmp(&y));
    }

    #[test]
    fn prop_unpadded_numbers_order_by_value(x in 0u64..1_000_000_000, y in 0u64..1_000_000_000) {
        prop_assume!(x != y);
        let a = Version::new(x.to_string());
        let b = Version::new(y.to_string());
        prop_assert_eq!(a.cmp(&b), x.cmp(&y));
    }

    #[test]
    fn prop_assembled_units_are_ascending(numbers in proptest::collection::btree_set(0u32..100_000, 0..30)) {
        let mut assembler = UnitAssembler::new();
        // Feed in descending order to make sure sorting does not depend on input order
        for n in numbers.iter().rev() {
            let file_name = format!("{:06}_unit.up.sql", n);
            let FileParse::Parsed(parsed) = parse_filename(&file_name) else {
                panic!("{} should parse", file_name);
            };
            assembler.add(parsed, &file_name, format!("SELECT {};", n)).unwrap();
        }

        let units = assembler.finish();
        prop_assert_eq!(units.len(), numbers.len());
        for pair in units.windows(2) {
            prop_assert!(pair[0].version() < pair[1].version());
        }
    }
}
