//! Minimal HTTP/1.1 plumbing for the scoring service.
//!
//! The service speaks a deliberately small slice of HTTP: one request per
//! connection, request line plus headers, an optional `Content-Length` body,
//! and JSON responses that close the connection. That is all the endpoints
//! need, and it keeps the wire layer as a few screens of code instead of a
//! framework.

use crate::error::ServingResult;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on the request head (request line plus headers).
const MAX_HEAD_BYTES: usize = 16 * 1024;

/// A parsed inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method, uppercased.
    pub method: String,
    /// Request path with any query string stripped.
    pub path: String,
    /// Raw body bytes; empty when the request carried no `Content-Length`.
    pub body: Vec<u8>,
}

/// Outcome of reading one request off a connection.
#[derive(Debug)]
pub enum ReadOutcome {
    /// A complete, parseable request.
    Request(Request),
    /// The peer closed the connection before sending anything.
    Closed,
    /// The declared body exceeds the configured cap.
    BodyTooLarge,
    /// The bytes on the wire were not parseable HTTP.
    Malformed,
}

/// Read and parse one request, enforcing `max_body_bytes`.
pub async fn read_request<R>(stream: &mut R, max_body_bytes: usize) -> ServingResult<ReadOutcome>
where
    R: AsyncRead + Unpin,
{
    let mut buf: Vec<u8> = Vec::with_capacity(1024);
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = find_head_end(&buf) {
            break pos;
        }
        if buf.len() > MAX_HEAD_BYTES {
            return Ok(ReadOutcome::Malformed);
        }
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(if buf.is_empty() {
                ReadOutcome::Closed
            } else {
                ReadOutcome::Malformed
            });
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.split("\r\n");

    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let (method, target) = match (parts.next(), parts.next()) {
        (Some(method), Some(target)) => (method.to_ascii_uppercase(), target.to_string()),
        _ => return Ok(ReadOutcome::Malformed),
    };

    let mut content_length = 0usize;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = match value.trim().parse() {
                    Ok(length) => length,
                    Err(_) => return Ok(ReadOutcome::Malformed),
                };
            }
        }
    }

    if content_length > max_body_bytes {
        return Ok(ReadOutcome::BodyTooLarge);
    }

    let mut body: Vec<u8> = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(ReadOutcome::Malformed);
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    let path = target.split('?').next().unwrap_or("").to_string();

    Ok(ReadOutcome::Request(Request { method, path, body }))
}

/// Write a JSON response and flush.
///
/// Responses always carry `Connection: close`; the caller drops the stream
/// after this returns.
pub async fn write_json<W>(stream: &mut W, status: u16, body: &str) -> ServingResult<()>
where
    W: AsyncWrite + Unpin,
{
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        status_text(status),
        body.len()
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(body.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

/// Write a temporary redirect with an empty body.
pub async fn write_redirect<W>(stream: &mut W, location: &str) -> ServingResult<()>
where
    W: AsyncWrite + Unpin,
{
    let head = format!(
        "HTTP/1.1 307 Temporary Redirect\r\nLocation: {location}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    );
    stream.write_all(head.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        307 => "Temporary Redirect",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn parse(raw: &[u8]) -> ReadOutcome {
        let (mut client, mut server) = tokio::io::duplex(64 * 1024);
        client.write_all(raw).await.unwrap();
        drop(client); // close the peer so short reads terminate
        read_request(&mut server, 64 * 1024).await.unwrap()
    }

    #[tokio::test]
    async fn test_parse_get_request() {
        let outcome = parse(b"GET /health HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
        match outcome {
            ReadOutcome::Request(request) => {
                assert_eq!(request.method, "GET");
                assert_eq!(request.path, "/health");
                assert!(request.body.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_parse_post_with_body() {
        let body = br#"{"x":1}"#;
        let raw = format!(
            "POST /predict HTTP/1.1\r\nHost: x\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
            body.len()
        );
        let mut bytes = raw.into_bytes();
        bytes.extend_from_slice(body);

        match parse(&bytes).await {
            ReadOutcome::Request(request) => {
                assert_eq!(request.method, "POST");
                assert_eq!(request.path, "/predict");
                assert_eq!(request.body, body);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_query_string_is_stripped() {
        match parse(b"GET /docs?format=json HTTP/1.1\r\n\r\n").await {
            ReadOutcome::Request(request) => assert_eq!(request.path, "/docs"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lowercase_method_is_uppercased() {
        match parse(b"get / HTTP/1.1\r\n\r\n").await {
            ReadOutcome::Request(request) => assert_eq!(request.method, "GET"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_oversize_body_is_flagged() {
        let (mut client, mut server) = tokio::io::duplex(1024);
        client
            .write_all(b"POST /predict HTTP/1.1\r\nContent-Length: 100\r\n\r\n")
            .await
            .unwrap();
        drop(client);

        let outcome = read_request(&mut server, 10).await.unwrap();
        assert!(matches!(outcome, ReadOutcome::BodyTooLarge));
    }

    #[tokio::test]
    async fn test_empty_connection_reports_closed() {
        let outcome = parse(b"").await;
        assert!(matches!(outcome, ReadOutcome::Closed));
    }

    #[tokio::test]
    async fn test_garbage_reports_malformed() {
        let outcome = parse(b"\r\n\r\n").await;
        assert!(matches!(outcome, ReadOutcome::Malformed));

        let outcome = parse(b"GET /x HTTP/1.1\r\nContent-Length: abc\r\n\r\n").await;
        assert!(matches!(outcome, ReadOutcome::Malformed));
    }

    #[tokio::test]
    async fn test_truncated_body_reports_malformed() {
        let outcome = parse(b"POST /p HTTP/1.1\r\nContent-Length: 50\r\n\r\n{\"x\"").await;
        assert!(matches!(outcome, ReadOutcome::Malformed));
    }

    #[tokio::test]
    async fn test_write_json_frames_response() {
        let (mut client, mut server) = tokio::io::duplex(1024);
        write_json(&mut server, 200, r#"{"status":"ok"}"#).await.unwrap();
        drop(server);

        let mut raw = Vec::new();
        client.read_to_end(&mut raw).await.unwrap();
        let text = String::from_utf8(raw).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: application/json\r\n"));
        assert!(text.contains("Content-Length: 15\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with(r#"{"status":"ok"}"#));
    }

    #[tokio::test]
    async fn test_write_redirect_sets_location() {
        let (mut client, mut server) = tokio::io::duplex(1024);
        write_redirect(&mut server, "/docs").await.unwrap();
        drop(server);

        let mut raw = Vec::new();
        client.read_to_end(&mut raw).await.unwrap();
        let text = String::from_utf8(raw).unwrap();

        assert!(text.starts_with("HTTP/1.1 307 Temporary Redirect\r\n"));
        assert!(text.contains("Location: /docs\r\n"));
    }
}
