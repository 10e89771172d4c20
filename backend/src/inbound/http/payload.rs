//! Request body decoding shared by the form-style endpoints.
//!
//! Clients post either JSON or `application/x-www-form-urlencoded`; anything
//! that is not declared as JSON is decoded as a form.

use actix_web::HttpRequest;
use actix_web::http::header::{CONTENT_TYPE, HeaderMap};
use actix_web::web;
use serde::de::DeserializeOwned;

use crate::domain::Error;

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("application/json"))
}

/// Decode `body` as JSON or as a form. An empty body yields `T::default()`.
pub(crate) fn decode_body<T>(req: &HttpRequest, body: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned + Default,
{
    let malformed = |reason: String| Error::invalid_request(format!("malformed request body: {reason}"));
    if body.is_empty() {
        return Ok(T::default());
    }
    if is_json(req.headers()) {
        return serde_json::from_slice(body).map_err(|err| malformed(err.to_string()));
    }
    let text = std::str::from_utf8(body).map_err(|err| malformed(err.to_string()))?;
    web::Query::<T>::from_query(text)
        .map(web::Query::into_inner)
        .map_err(|err| malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default)]
        name: Option<String>,
    }

    #[rstest]
    #[case::json("application/json", r#"{"name":"a b"}"#, Some("a b"))]
    #[case::json_with_charset("application/json; charset=utf-8", r#"{"name":"x"}"#, Some("x"))]
    #[case::form("application/x-www-form-urlencoded", "name=a+b", Some("a b"))]
    #[case::undeclared("text/plain", "name=a%20b", Some("a b"))]
    #[case::empty("application/json", "", None)]
    fn decodes_by_content_type(
        #[case] content_type: &str,
        #[case] body: &str,
        #[case] expected: Option<&str>,
    ) {
        let req = TestRequest::default()
            .insert_header((CONTENT_TYPE, content_type))
            .to_http_request();

        let decoded: Sample = decode_body(&req, body.as_bytes()).expect("decodes");

        assert_eq!(decoded.name.as_deref(), expected);
    }

    #[rstest]
    fn malformed_json_is_invalid_request() {
        let req = TestRequest::default()
            .insert_header((CONTENT_TYPE, "application/json"))
            .to_http_request();

        let err = decode_body::<Sample>(&req, b"{").expect_err("rejects");

        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    }
}
