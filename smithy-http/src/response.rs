/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Response parsing traits implemented by every operation's response handler

use bytes::Bytes;
use http::Response;

/// Parse an operation's output (or error) out of an HTTP response
///
/// Parsing happens in up to two phases. `parse_unloaded` sees the response before its body is
/// read and may finish early; if it returns `None` the caller reads the whole body and hands the
/// result to `parse_loaded`.
pub trait ParseHttpResponse<B> {
    /// Usually `Result<SomeOperationOutput, SomeOperationError>`
    type Output;

    fn parse_unloaded(&self, response: &mut Response<B>) -> Option<Self::Output>;

    fn parse_loaded(&self, response: &Response<Bytes>) -> Self::Output;
}

/// Parse a response whose body is always read in full first
///
/// Every JSON operation is parsed this way. Implementors get [`ParseHttpResponse`] for free.
pub trait ParseStrictResponse {
    type Output;

    fn parse(&self, response: &Response<Bytes>) -> Self::Output;
}

impl<B, T> ParseHttpResponse<B> for T
where
    T: ParseStrictResponse,
{
    type Output = T::Output;

    fn parse_unloaded(&self, _response: &mut Response<B>) -> Option<Self::Output> {
        None
    }

    fn parse_loaded(&self, response: &Response<Bytes>) -> Self::Output {
        self.parse(response)
    }
}

#[cfg(test)]
mod test {
    use crate::body::SdkBody;
    use crate::response::{ParseHttpResponse, ParseStrictResponse};
    use bytes::Bytes;
    use http::Response;

    struct StatusCode;

    impl ParseStrictResponse for StatusCode {
        type Output = u16;

        fn parse(&self, response: &Response<Bytes>) -> u16 {
            response.status().as_u16()
        }
    }

    #[test]
    fn strict_parsers_always_wait_for_the_body() {
        let mut unloaded = Response::builder()
            .status(404)
            .body(SdkBody::empty())
            .unwrap();
        assert_eq!(
            ParseHttpResponse::<SdkBody>::parse_unloaded(&StatusCode, &mut unloaded),
            None
        );
        let loaded = Response::builder().status(404).body(Bytes::new()).unwrap();
        assert_eq!(
            ParseHttpResponse::<SdkBody>::parse_loaded(&StatusCode, &loaded),
            404
        );
    }
}
