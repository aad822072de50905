#![allow(dead_code)]

use super::headers::header_value;
use http::HeaderMap;

pub fn assert_header_eq(headers: &HeaderMap, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name),
        Some(expected),
        "header `{name}` mismatch"
    );
}

pub fn assert_header_absent(headers: &HeaderMap, name: &str) {
    assert!(
        !headers.contains_key(name),
        "header `{name}` should be absent, found {:?}",
        headers.get(name)
    );
}
