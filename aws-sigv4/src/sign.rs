/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Functions to create signing keys and calculate signatures.

use crate::date_fmt::format_date;
use chrono::{DateTime, Utc};
use hmac::{digest::FixedOutput, Hmac, Mac};
use sha2::{Digest, Sha256};

/// HashedPayload = Lowercase(HexEncode(Hash(requestPayload)))
pub fn sha256_hex_string(bytes: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize_fixed())
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> impl AsRef<[u8]> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize_fixed()
}

/// Calculates a Sigv4 signature
pub fn calculate_signature(signing_key: impl AsRef<[u8]>, string_to_sign: &[u8]) -> String {
    hex::encode(hmac_sha256(signing_key.as_ref(), string_to_sign))
}

/// Generates a signing key for Sigv4
pub fn generate_signing_key(
    secret: &str,
    date: DateTime<Utc>,
    region: &str,
    service: &str,
) -> impl AsRef<[u8]> {
    // kSecret = your secret access key
    // kDate = HMAC("AWS4" + kSecret, Date)
    // kRegion = HMAC(kDate, Region)
    // kService = HMAC(kRegion, Service)
    // kSigning = HMAC(kService, "aws4_request")
    let secret = format!("AWS4{}", secret);
    let tag = hmac_sha256(secret.as_bytes(), format_date(&date).as_bytes());
    let tag = hmac_sha256(tag.as_ref(), region.as_bytes());
    let tag = hmac_sha256(tag.as_ref(), service.as_bytes());
    hmac_sha256(tag.as_ref(), b"aws4_request")
}

#[cfg(test)]
mod tests {
    use super::{calculate_signature, generate_signing_key, sha256_hex_string};
    use crate::date_fmt::parse_date_time;

    #[test]
    fn test_signing_key() {
        let date = parse_date_time("20120215T000000Z").unwrap();
        let key = generate_signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            date,
            "us-east-1",
            "iam",
        );
        assert_eq!(
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d",
            hex::encode(key)
        );
    }

    #[test]
    fn sign_payload_empty_string() {
        let expected = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        assert_eq!(expected, sha256_hex_string(b""));
    }

    #[test]
    fn test_calculate_signature() {
        let date = parse_date_time("20150830T123600Z").unwrap();
        let string_to_sign = "AWS4-HMAC-SHA256\n\
                              20150830T123600Z\n\
                              20150830/us-east-1/service/aws4_request\n\
                              bb579772317eb040ac9ed261061d46c1f17a8133879d6129b6e1c25292927e63";
        let key = generate_signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            date,
            "us-east-1",
            "service",
        );
        assert_eq!(
            "5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31",
            calculate_signature(key, string_to_sign.as_bytes())
        );
    }
}
