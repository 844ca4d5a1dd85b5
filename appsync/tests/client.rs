/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use appsync::error::GetGraphqlApiErrorKind;
use appsync::{Client, Config, Credentials, Region, SdkError};
use aws_hyper::retry::RetryConfig;
use aws_hyper::test_connection::TestConnection;
use http::header::AUTHORIZATION;
use protocol_test_helpers::{
    assert_ok, forbid_query_params, require_query_params, validate_headers, validate_query_string,
};
use smithy_http::body::SdkBody;
use smithy_http::result::FailureKind;

fn config() -> Config {
    Config::builder()
        .region(Region::new("us-west-2"))
        .credentials_provider(Credentials::from_keys("ANOTREAL", "notrealsecret", None))
        .retry_config(RetryConfig::default().with_static_base(|| 1_f64))
        .build()
}

fn expected(method: &str, uri: &'static str) -> http::Request<SdkBody> {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(SdkBody::empty())
        .unwrap()
}

fn response(status: u16, body: &'static str) -> http::Response<&'static str> {
    http::Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .header("x-amzn-requestid", "0b1b6c0f-0000-0000-0000-000000000000")
        .body(body)
        .unwrap()
}

#[tokio::test]
async fn get_graphql_api() {
    let conn = TestConnection::new(vec![(
        expected(
            "GET",
            "https://appsync.us-west-2.amazonaws.com/v1/apis/abc123",
        ),
        response(
            200,
            r#"{"graphqlApi": {"name": "orders", "apiId": "abc123", "authenticationType": "AWS_IAM"}}"#,
        ),
    )]);
    let client = Client::from_conf_conn(config(), conn.clone());
    let output = client
        .get_graphql_api()
        .api_id("abc123")
        .send()
        .await
        .expect("success");
    let api = output.graphql_api.expect("api is present");
    assert_eq!(api.name.as_deref(), Some("orders"));

    conn.assert_requests_match(&[]);
    let requests = conn.requests();
    let actual = &requests[0].actual;
    assert_eq!(actual.method(), http::Method::GET);
    let auth = actual.headers()[AUTHORIZATION].to_str().unwrap();
    assert!(auth.contains("/us-west-2/appsync/aws4_request"), "{}", auth);
}

#[tokio::test]
async fn list_graphql_apis_query() {
    let conn = TestConnection::new(vec![
        (
            expected(
                "GET",
                "https://appsync.us-west-2.amazonaws.com/v1/apis?maxResults=5",
            ),
            response(200, r#"{"graphqlApis": [], "nextToken": "page/2"}"#),
        ),
        (
            expected(
                "GET",
                "https://appsync.us-west-2.amazonaws.com/v1/apis?nextToken=page%2F2",
            ),
            response(200, r#"{"graphqlApis": [{"apiId": "abc123"}]}"#),
        ),
    ]);
    let client = Client::from_conf_conn(config(), conn.clone());
    let first = client
        .list_graphql_apis()
        .max_results(5)
        .send()
        .await
        .expect("first page");
    assert_eq!(first.next_token.as_deref(), Some("page/2"));
    let second = client
        .list_graphql_apis()
        .set_next_token(first.next_token)
        .send()
        .await
        .expect("second page");
    assert_eq!(second.next_token, None);
    assert_eq!(second.graphql_apis.map(|apis| apis.len()), Some(1));

    conn.assert_requests_match(&[]);
    let requests = conn.requests();
    assert_ok(require_query_params(&requests[0].actual, &["maxResults"]));
    assert_ok(forbid_query_params(&requests[0].actual, &["nextToken"]));
    assert_ok(validate_query_string(
        &requests[1].actual,
        &["nextToken=page%2F2"],
    ));
}

#[tokio::test]
async fn create_api_key() {
    let conn = TestConnection::new(vec![(
        http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .uri("https://appsync.us-west-2.amazonaws.com/v1/apis/abc123/apikeys")
            .body(SdkBody::from(r#"{"description": "ci"}"#))
            .unwrap(),
        response(
            200,
            r#"{"apiKey": {"id": "da2-example", "description": "ci", "expires": 1700006400}}"#,
        ),
    )]);
    let client = Client::from_conf_conn(config(), conn.clone());
    let key = client
        .create_api_key()
        .api_id("abc123")
        .description("ci")
        .send()
        .await
        .expect("success")
        .api_key
        .expect("key is returned");
    assert_eq!(key.id.as_deref(), Some("da2-example"));
    assert_eq!(key.expires, Some(1700006400));
    conn.assert_requests_match(&[]);
    assert_ok(validate_headers(
        &conn.requests()[0].actual,
        &[("content-type", "application/json"), ("content-length", "20")],
    ));
}

#[tokio::test]
async fn missing_labels_are_never_sent() {
    let conn = TestConnection::<&'static str>::new(vec![]);
    let client = Client::from_conf_conn(config(), conn.clone());
    let err = client
        .get_graphql_api()
        .send()
        .await
        .expect_err("api id is required");
    assert_eq!(err.kind(), FailureKind::MissingParameter);
    let err = client
        .delete_graphql_api()
        .api_id("")
        .send()
        .await
        .expect_err("api id cannot be empty");
    assert_eq!(err.kind(), FailureKind::MissingParameter);
    let err = client
        .create_api_key()
        .description("no api")
        .send()
        .await
        .expect_err("api id is required");
    assert_eq!(err.kind(), FailureKind::MissingParameter);
    assert!(conn.requests().is_empty());
}

#[tokio::test]
async fn not_found() {
    let conn = TestConnection::new(vec![(
        expected(
            "DELETE",
            "https://appsync.us-west-2.amazonaws.com/v1/apis/gone",
        ),
        http::Response::builder()
            .status(404)
            .header("x-amzn-errortype", "NotFoundException")
            .body(r#"{"message": "GraphQL API gone not found."}"#)
            .unwrap(),
    )]);
    let client = Client::from_conf_conn(config(), conn.clone());
    let err = client
        .delete_graphql_api()
        .api_id("gone")
        .send()
        .await
        .expect_err("api does not exist");
    assert_eq!(err.kind(), FailureKind::Service);
    assert!(err
        .service_error()
        .map(|err| err.is_not_found_exception())
        .unwrap_or(false));
    assert_eq!(conn.requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn internal_failures_are_retried_until_attempts_run_out() {
    let failure = r#"{"__type": "InternalFailureException", "message": "internal failure"}"#;
    let req = || {
        expected(
            "GET",
            "https://appsync.us-west-2.amazonaws.com/v1/apis/abc123",
        )
    };
    let conn = TestConnection::new(vec![
        (req(), response(500, failure)),
        (req(), response(500, failure)),
        (req(), response(500, failure)),
    ]);
    let client = Client::from_conf_conn(config(), conn.clone());
    let err = client
        .get_graphql_api()
        .api_id("abc123")
        .send()
        .await
        .expect_err("every attempt fails");
    match err {
        SdkError::ServiceError { err, .. } => assert!(matches!(
            err.kind,
            GetGraphqlApiErrorKind::InternalFailureException(_)
        )),
        other => panic!("expected a service error, got {:?}", other),
    }
    conn.assert_requests_match(&[]);
}

#[tokio::test]
async fn fips_endpoint() {
    let conn = TestConnection::new(vec![(
        expected(
            "GET",
            "https://appsync-fips.us-west-2.amazonaws.com/v1/apis/abc123",
        ),
        response(200, "{}"),
    )]);
    let conf = Config::builder()
        .region(Region::new("us-west-2"))
        .credentials_provider(Credentials::from_keys("ANOTREAL", "notrealsecret", None))
        .use_fips(true)
        .build();
    Client::from_conf_conn(conf, conn.clone())
        .get_graphql_api()
        .api_id("abc123")
        .send()
        .await
        .expect("success");
    conn.assert_requests_match(&[]);
}
