/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Everything but the unreserved characters `A-Z a-z 0-9 - _ . ~`
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub(super) fn percent_encode(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, UNRESERVED).to_string()
}

#[cfg(test)]
mod test {
    use super::percent_encode;
    use proptest::proptest;

    #[test]
    fn unreserved_characters_pass_through() {
        assert_eq!("AZaz09-_.~", percent_encode("AZaz09-_.~"));
        assert_eq!("a%20b%2Fc%3D", percent_encode("a b/c="));
        assert_eq!("%E2%9C%93", percent_encode("✓"));
    }

    proptest! {
        #[test]
        fn encoded_output_is_unreserved_or_escape(s: String) {
            let encoded = percent_encode(&s);
            assert!(encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "-_.~%".contains(c)));
        }
    }
}
