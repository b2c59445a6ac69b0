use mimebody::{
    boundary_param, charset_param, decode_charset, decode_transfer, parse_headers,
    split_entity, split_multipart,
};

#[test]
fn test_split_on_crlf_blank_line() {
    let (head, body) = split_entity("A: 1\r\nB: 2\r\n\r\nhello\r\nworld");
    assert_eq!(head, "A: 1\r\nB: 2");
    assert_eq!(body, "hello\r\nworld");
}

#[test]
fn test_split_on_lf_blank_line() {
    let (head, body) = split_entity("A: 1\n\nbody");
    assert_eq!(head, "A: 1");
    assert_eq!(body, "body");
}

#[test]
fn test_no_blank_line_is_all_body() {
    let (head, body) = split_entity("just some text without headers");
    assert_eq!(head, "");
    assert_eq!(body, "just some text without headers");
}

#[test]
fn test_header_names_lowercased() {
    let headers = parse_headers("Content-Type: text/plain\r\nX-Custom: Value");
    assert_eq!(headers.get("content-type"), Some("text/plain"));
    assert_eq!(headers.get("Content-Type"), Some("text/plain"));
    assert_eq!(headers.get("x-custom"), Some("Value"));
    assert_eq!(headers.len(), 2);
}

#[test]
fn test_continuation_lines_fold() {
    let headers = parse_headers("Content-Type: multipart/mixed;\n boundary=xyz");
    assert_eq!(
        headers.get("content-type"),
        Some("multipart/mixed; boundary=xyz")
    );
}

#[test]
fn test_duplicate_header_first_wins() {
    let headers = parse_headers("Subject: first\r\nSubject: second");
    assert_eq!(headers.get("subject"), Some("first"));
}

#[test]
fn test_malformed_lines_skipped() {
    let headers = parse_headers("this line has no colon\nX-Ok: yes");
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("x-ok"), Some("yes"));
}

#[test]
fn test_boundary_param_forms() {
    assert_eq!(
        boundary_param(r#"multipart/alternative; boundary="b-1""#).as_deref(),
        Some("b-1")
    );
    assert_eq!(
        boundary_param("multipart/mixed; boundary=simple; charset=utf-8").as_deref(),
        Some("simple")
    );
    assert_eq!(boundary_param("text/plain"), None);
}

#[test]
fn test_charset_param_forms() {
    assert_eq!(
        charset_param(r#"text/plain; charset="ISO-8859-1""#).as_deref(),
        Some("ISO-8859-1")
    );
    assert_eq!(
        charset_param("text/html; charset=utf-8").as_deref(),
        Some("utf-8")
    );
    assert_eq!(charset_param("text/html"), None);
}

#[test]
fn test_identity_encoding_unchanged() {
    let body = "already decoded text";
    assert_eq!(decode_transfer(body, ""), body.as_bytes());
    assert_eq!(decode_transfer(body, "7bit"), body.as_bytes());
    assert_eq!(decode_transfer(body, "8BIT"), body.as_bytes());
}

#[test]
fn test_base64_round_trip() {
    // "Hello, world" in standard base64
    let bytes = decode_transfer("SGVsbG8sIHdvcmxk", "base64");
    assert_eq!(decode_charset(&bytes, None), "Hello, world");
}

#[test]
fn test_base64_ignores_line_wrapping() {
    let bytes = decode_transfer("SGVs\r\nbG8s\r\nIHdv\r\ncmxk", "BASE64");
    assert_eq!(decode_charset(&bytes, None), "Hello, world");
}

#[test]
fn test_bad_base64_falls_back_to_original() {
    let body = "!!! definitely not base64 !!!";
    assert_eq!(decode_transfer(body, "base64"), body.as_bytes());
}

#[test]
fn test_quoted_printable_escapes_and_soft_breaks() {
    let bytes = decode_transfer("Caf=C3=A9 say=\r\ns =48ello", "quoted-printable");
    assert_eq!(decode_charset(&bytes, None), "Café says Hello");
}

#[test]
fn test_quoted_printable_malformed_escape_kept() {
    let bytes = decode_transfer("100=ZZ done", "quoted-printable");
    assert_eq!(decode_charset(&bytes, None), "100=ZZ done");
}

#[test]
fn test_charset_latin1() {
    // 0xE9 is é in ISO-8859-1
    assert_eq!(decode_charset(&[0x63, 0x61, 0x66, 0xE9], Some("iso-8859-1")), "café");
}

#[test]
fn test_charset_utf8_passthrough() {
    let text = "déjà vu";
    assert_eq!(decode_charset(text.as_bytes(), Some("UTF-8")), text);
    assert_eq!(decode_charset(text.as_bytes(), Some("us-ascii")), text);
    assert_eq!(decode_charset(text.as_bytes(), None), text);
}

#[test]
fn test_unknown_charset_falls_back_to_utf8() {
    assert_eq!(decode_charset(b"plain text", Some("x-klingon")), "plain text");
}

#[test]
fn test_multipart_split_basic() {
    let body = "preamble ignored\r\n\
                --b1\r\n\
                part one\r\n\
                --b1\r\n\
                part two\r\n\
                --b1--\r\n\
                epilogue ignored";
    let parts = split_multipart(body, "b1");
    assert_eq!(parts, vec!["part one", "part two"]);
}

#[test]
fn test_multipart_missing_terminator_flushes_tail() {
    let parts = split_multipart("--b\nonly part, truncated", "b");
    assert_eq!(parts, vec!["only part, truncated"]);
}

#[test]
fn test_multipart_no_delimiter_yields_nothing() {
    assert!(split_multipart("no delimiters anywhere", "b").is_empty());
}
