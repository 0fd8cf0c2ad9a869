//! Method Override
//!
//! HTML forms can only send GET and POST. A POST carrying
//! `?_method=PUT` (or `DELETE`, `PATCH`) is rewritten to that method before
//! routing.

use axum::extract::{Query, Request};
use axum::http::Method;
use serde::Deserialize;

#[derive(Deserialize)]
struct Override {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// Rewrite the method of an overridden POST
///
/// Use with `tower::util::MapRequestLayer` around the whole router; a layer
/// added with `Router::layer` runs after routing and is too late.
pub fn method_override(mut req: Request) -> Request {
    if req.method() != Method::POST {
        return req;
    }

    let Ok(Query(Override {
        method: Some(method),
    })) = Query::<Override>::try_from_uri(req.uri())
    else {
        return req;
    };

    let method = match method.to_ascii_uppercase().as_str() {
        "PUT" => Method::PUT,
        "DELETE" => Method::DELETE,
        "PATCH" => Method::PATCH,
        _ => return req,
    };

    tracing::debug!(path = req.uri().path(), %method, "Method overridden");
    *req.method_mut() = method;
    req
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn post(uri: &str) -> Request {
        axum::http::Request::post(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_overrides_post() {
        assert_eq!(
            method_override(post("/edit-post/1?_method=PUT")).method(),
            Method::PUT
        );
        assert_eq!(
            method_override(post("/delete-post/1?_method=delete")).method(),
            Method::DELETE
        );
    }

    #[test]
    fn test_leaves_other_requests() {
        assert_eq!(method_override(post("/add-post")).method(), Method::POST);
        assert_eq!(
            method_override(post("/add-post?_method=TRACE")).method(),
            Method::POST
        );

        let get = axum::http::Request::get("/post/1?_method=DELETE")
            .body(Body::empty())
            .unwrap();
        assert_eq!(method_override(get).method(), Method::GET);
    }
}
