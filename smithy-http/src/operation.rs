/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::body::SdkBody;
use crate::property_bag::PropertyBag;
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Clone, Debug)]
pub struct Metadata {
    operation: Cow<'static, str>,
    service: Cow<'static, str>,
}

impl Metadata {
    pub fn name(&self) -> &str {
        &self.operation
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn new(
        operation: impl Into<Cow<'static, str>>,
        service: impl Into<Cow<'static, str>>,
    ) -> Self {
        Metadata {
            operation: operation.into(),
            service: service.into(),
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct Parts<H, R> {
    pub response_handler: H,
    pub retry_policy: R,
    pub metadata: Option<Metadata>,
}

/// An error occurred attempting to build an `Operation` from an input.
///
/// These are almost always due to user error caused by limited validation of requests.
#[derive(Debug)]
pub enum BuildError {
    /// A field contained an invalid value
    InvalidField {
        field: &'static str,
        details: String,
    },
    /// A field was missing
    MissingField {
        field: &'static str,
        details: &'static str,
    },
    /// The serializer could not serialize the input
    SerializationError(BoxError),

    /// The built URI was not valid
    InvalidUri(http::uri::InvalidUri),

    /// An error occurred request construction
    Other(BoxError),
}

impl BuildError {
    /// Shorthand for the `MissingField` variant used by generated input builders.
    pub fn missing_field(field: &'static str, details: &'static str) -> Self {
        BuildError::MissingField { field, details }
    }
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidField { field, details } => {
                write!(f, "Invalid field: {}: {}", field, details)
            }
            BuildError::MissingField { field, details } => {
                write!(f, "{} was missing. {}", field, details)
            }
            BuildError::SerializationError(inner) => {
                write!(f, "failed to serialize input: {}", inner)
            }
            BuildError::InvalidUri(inner) => write!(f, "generated URI was invalid: {}", inner),
            BuildError::Other(inner) => write!(f, "error during request construction: {}", inner),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BuildError::SerializationError(inner) | BuildError::Other(inner) => {
                Some(inner.as_ref())
            }
            BuildError::InvalidUri(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<http::uri::InvalidUri> for BuildError {
    fn from(err: http::uri::InvalidUri) -> Self {
        BuildError::InvalidUri(err)
    }
}

#[derive(Debug)]
pub struct Operation<H, R> {
    request: Request,
    parts: Parts<H, R>,
}

impl<H, R> Operation<H, R> {
    pub fn into_request_response(self) -> (Request, Parts<H, R>) {
        (self.request, self.parts)
    }

    pub fn from_parts(request: Request, parts: Parts<H, R>) -> Self {
        Self { request, parts }
    }

    pub fn properties_mut(&mut self) -> MutexGuard<'_, PropertyBag> {
        self.request.properties_mut()
    }

    pub fn properties(&self) -> MutexGuard<'_, PropertyBag> {
        self.request.properties()
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.parts.metadata.as_ref()
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.parts.metadata = Some(metadata);
        self
    }

    pub fn with_retry_policy<R2>(self, retry_policy: R2) -> Operation<H, R2> {
        Operation {
            request: self.request,
            parts: Parts {
                response_handler: self.parts.response_handler,
                retry_policy,
                metadata: self.parts.metadata,
            },
        }
    }

    pub fn retry_policy(&self) -> &R {
        &self.parts.retry_policy
    }

    pub fn try_clone(&self) -> Option<Self>
    where
        H: Clone,
        R: Clone,
    {
        let request = self.request.try_clone()?;
        Some(Self {
            request,
            parts: self.parts.clone(),
        })
    }
}

impl<H> Operation<H, ()> {
    pub fn new(request: Request, response_handler: H) -> Self {
        Operation {
            request,
            parts: Parts {
                response_handler,
                retry_policy: (),
                metadata: None,
            },
        }
    }
}

/// Operation request type that associates a property bag with an underlying HTTP request.
///
/// The property bag is shared between clones of the request (for example, the copies made
/// for each retry attempt) so configuration written by middleware on one attempt is visible
/// on the next.
#[derive(Debug)]
pub struct Request {
    /// The underlying HTTP Request
    inner: http::Request<SdkBody>,

    /// Property bag of configuration options
    ///
    /// Middleware can read and write from the property bag and use its
    /// contents to augment the request (see [`Request::augment`](Request::augment))
    properties: Arc<Mutex<PropertyBag>>,
}

impl Request {
    pub fn new(base: http::Request<SdkBody>) -> Self {
        Request {
            inner: base,
            properties: Arc::new(Mutex::new(PropertyBag::new())),
        }
    }

    /// Create a request from parts previously returned by [`into_parts`](Request::into_parts).
    pub fn from_parts(inner: http::Request<SdkBody>, properties: Arc<Mutex<PropertyBag>>) -> Self {
        Request { inner, properties }
    }

    /// Transform the HTTP request while holding mutable access to the property bag.
    pub fn augment<T>(
        self,
        f: impl FnOnce(
            http::Request<SdkBody>,
            &mut PropertyBag,
        ) -> Result<http::Request<SdkBody>, T>,
    ) -> Result<Request, T> {
        let inner = {
            let properties: &mut PropertyBag = &mut lock(&self.properties);
            f(self.inner, properties)?
        };
        Ok(Request {
            inner,
            properties: self.properties,
        })
    }

    pub fn properties_mut(&mut self) -> MutexGuard<'_, PropertyBag> {
        lock(&self.properties)
    }

    pub fn properties(&self) -> MutexGuard<'_, PropertyBag> {
        lock(&self.properties)
    }

    pub fn http(&self) -> &http::Request<SdkBody> {
        &self.inner
    }

    pub fn http_mut(&mut self) -> &mut http::Request<SdkBody> {
        &mut self.inner
    }

    /// Attempt to clone this request
    ///
    /// Returns `None` when the body cannot be cloned (for example, a streaming body that
    /// has already been consumed).
    pub fn try_clone(&self) -> Option<Request> {
        let cloned_body = self.inner.body().try_clone()?;
        let mut cloned_request = http::Request::builder()
            .uri(self.inner.uri().clone())
            .method(self.inner.method())
            .version(self.inner.version())
            .body(cloned_body)
            .ok()?;
        *cloned_request.headers_mut() = self.inner.headers().clone();
        Some(Request {
            inner: cloned_request,
            properties: self.properties.clone(),
        })
    }

    pub fn into_parts(self) -> (http::Request<SdkBody>, Arc<Mutex<PropertyBag>>) {
        (self.inner, self.properties)
    }
}

// A stage that panicked while holding the lock leaves the bag in whatever state it was in.
// The request pipeline never leaves it half-written, so the poison flag is ignored.
fn lock(properties: &Mutex<PropertyBag>) -> MutexGuard<'_, PropertyBag> {
    properties
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod test {
    use crate::body::SdkBody;
    use crate::operation::{BuildError, Metadata, Operation, Request};
    use http::header::{AUTHORIZATION, CONTENT_LENGTH};
    use http::Uri;
    use std::error::Error;

    fn request() -> Request {
        Request::new(
            http::Request::builder()
                .uri(Uri::from_static("http://www.amazon.com"))
                .method("POST")
                .header(CONTENT_LENGTH, 456)
                .header(AUTHORIZATION, "Token: hello")
                .body(SdkBody::from("hello world!"))
                .expect("valid request"),
        )
    }

    #[test]
    fn try_clone_clones_all_data() {
        let mut request = request();
        request.properties_mut().insert("hello");
        let cloned = request.try_clone().expect("request is cloneable");

        let (request, config) = cloned.into_parts();
        assert_eq!(request.uri(), &Uri::from_static("http://www.amazon.com"));
        assert_eq!(request.method(), "POST");
        assert_eq!(request.headers().len(), 2);
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Token: hello"
        );
        assert_eq!(request.headers().get(CONTENT_LENGTH).unwrap(), "456");
        assert_eq!(request.body().bytes().unwrap(), "hello world!".as_bytes());
        assert_eq!(config.lock().unwrap().get::<&str>(), Some(&"hello"));
    }

    #[test]
    fn clones_share_properties() {
        let request = request();
        let mut cloned = request.try_clone().expect("request is cloneable");
        cloned.properties_mut().insert(42u32);
        assert_eq!(request.properties().get::<u32>(), Some(&42));
    }

    #[test]
    fn augment_can_fail() {
        let request = request();
        let result = request.augment(|_req, _props| Err("nope"));
        assert_eq!(result.err(), Some("nope"));
    }

    #[test]
    fn operation_carries_metadata_and_policy() {
        let op = Operation::new(request(), ())
            .with_metadata(Metadata::new("ListPipelines", "datapipeline"))
            .with_retry_policy(5u8);
        assert_eq!(op.metadata().map(|m| m.name()), Some("ListPipelines"));
        assert_eq!(op.metadata().map(|m| m.service()), Some("datapipeline"));
        assert_eq!(op.retry_policy(), &5u8);
        let cloned = op.try_clone().expect("in-memory body");
        assert_eq!(cloned.retry_policy(), &5u8);
    }

    #[test]
    fn missing_field_display() {
        let err = BuildError::missing_field("name", "name is required");
        assert_eq!(format!("{}", err), "name was missing. name is required");
        assert!(err.source().is_none());
    }
}
