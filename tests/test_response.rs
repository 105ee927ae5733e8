use spindle::http::response::{Response, ResponseBuilder, StatusCode};
use spindle::http::writer::{serialize_response, ResponseWriter};

#[test]
fn test_status_codes() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
}

#[test]
fn test_build_sets_length_and_close() {
    let response = ResponseBuilder::new(StatusCode::Ok).body("hello\n").build();

    assert_eq!(response.headers.get("Content-Length").map(String::as_str), Some("6"));
    assert_eq!(response.headers.get("Connection").map(String::as_str), Some("close"));
}

#[test]
fn test_build_keeps_explicit_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "0")
        .body("ignored")
        .build();

    assert_eq!(response.headers.get("Content-Length").map(String::as_str), Some("0"));
}

#[test]
fn test_serialize_ok() {
    let bytes = serialize_response(&Response::ok("hello\n"));
    let text = std::str::from_utf8(&bytes).unwrap();

    assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
    assert!(text.contains("Content-Length: 6\r\n"));
    assert!(text.contains("Content-Type: text/plain\r\n"));
    assert!(text.contains("Connection: close\r\n"));
    assert!(text.ends_with("\r\n\r\nhello\n"));
}

#[test]
fn test_serialize_bad_request() {
    let bytes = serialize_response(&Response::bad_request());
    let text = std::str::from_utf8(&bytes).unwrap();

    assert!(text.starts_with("HTTP/1.0 400 Bad Request\r\n"));
    assert!(text.ends_with("400 Bad Request\n"));
}

#[tokio::test]
async fn test_writer_writes_everything() {
    let response = Response::internal_error();
    let expected = serialize_response(&response);

    let mut writer = ResponseWriter::new(&response);
    let mut out: Vec<u8> = Vec::new();
    writer.write_to(&mut out).await.unwrap();

    assert_eq!(writer.remaining(), 0);
    assert_eq!(out, expected.as_ref());
}
