//! Loopback HTTP listener receiving the OAuth authorization redirect.

use std::time::Duration;

use reqwest::Url;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use super::error::{GoogleError, Result};

const SUCCESS_PAGE: &str = "<!DOCTYPE html><html><head><title>Authorization complete</title></head>\
<body><h1>Authorization complete</h1><p>You can close this window.</p></body></html>";

/// Parameters carried by the redirect request.
#[derive(Debug, Default, PartialEq, Eq)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

pub struct CallbackListener {
    listener: TcpListener,
    port: u16,
}

impl CallbackListener {
    /// Bind to an ephemeral port on 127.0.0.1.
    pub async fn bind() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| oauth_error("bind_failed", e.to_string()))?;
        let port = listener
            .local_addr()
            .map_err(|e| oauth_error("bind_failed", e.to_string()))?
            .port();
        Ok(Self { listener, port })
    }

    pub fn redirect_uri(&self) -> String {
        format!("http://127.0.0.1:{}/", self.port)
    }

    /// Wait for one redirect and return its authorization code.
    ///
    /// The `state` parameter must equal `expected_state`.
    pub async fn wait_for_code(&self, expected_state: &str, timeout: Duration) -> Result<String> {
        let (mut stream, _) = tokio::time::timeout(timeout, self.listener.accept())
            .await
            .map_err(|_| GoogleError::CallbackTimeout)?
            .map_err(|e| oauth_error("callback_failed", e.to_string()))?;

        let (reader, mut writer) = stream.split();
        let mut reader = BufReader::new(reader);
        let mut request_line = String::new();
        reader
            .read_line(&mut request_line)
            .await
            .map_err(|e| oauth_error("callback_failed", e.to_string()))?;
        drain_headers(&mut reader).await;

        let outcome = check_params(parse_request_line(&request_line), expected_state);
        let response = match &outcome {
            Ok(_) => format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{SUCCESS_PAGE}",
                SUCCESS_PAGE.len()
            ),
            Err(_) => "HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_string(),
        };
        // The browser only sees a courtesy page; the outcome does not depend on it.
        let _ = writer.write_all(response.as_bytes()).await;

        outcome
    }
}

/// Consume header lines so closing the socket does not reset the connection.
async fn drain_headers(reader: &mut (impl AsyncBufReadExt + Unpin)) {
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) | Err(_) => break,
            Ok(_) if line.trim().is_empty() => break,
            Ok(_) => {}
        }
    }
}

fn parse_request_line(line: &str) -> CallbackParams {
    let Some(target) = line.split_whitespace().nth(1) else {
        return CallbackParams::default();
    };
    let Ok(url) = Url::parse(&format!("http://127.0.0.1{target}")) else {
        return CallbackParams::default();
    };

    let mut params = CallbackParams::default();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => params.code = Some(value.into_owned()),
            "state" => params.state = Some(value.into_owned()),
            "error" => params.error = Some(value.into_owned()),
            _ => {}
        }
    }
    params
}

fn check_params(params: CallbackParams, expected_state: &str) -> Result<String> {
    if let Some(error) = params.error {
        return Err(oauth_error(&error, "authorization was denied or failed".to_string()).into());
    }
    if params.state.as_deref() != Some(expected_state) {
        return Err(oauth_error("state_mismatch", "state parameter mismatch".to_string()).into());
    }
    params
        .code
        .ok_or_else(|| oauth_error("missing_code", "no authorization code in callback".to_string()).into())
}

fn oauth_error(error: &str, description: String) -> GoogleError {
    GoogleError::OAuth {
        error: error.to_string(),
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpStream;

    #[rstest]
    #[case::code_and_state(
        "GET /?state=abc&code=4%2F0Ab HTTP/1.1\r\n",
        CallbackParams { code: Some("4/0Ab".into()), state: Some("abc".into()), error: None }
    )]
    #[case::error(
        "GET /?error=access_denied&state=abc HTTP/1.1\r\n",
        CallbackParams { code: None, state: Some("abc".into()), error: Some("access_denied".into()) }
    )]
    #[case::no_query("GET / HTTP/1.1\r\n", CallbackParams::default())]
    #[case::garbage("garbage", CallbackParams::default())]
    fn test_parse_request_line(#[case] line: &str, #[case] expected: CallbackParams) {
        assert_eq!(parse_request_line(line), expected);
    }

    #[test]
    fn check_params_rejects_state_mismatch() {
        let params = CallbackParams {
            code: Some("code".into()),
            state: Some("other".into()),
            error: None,
        };
        let err = check_params(params, "expected").unwrap_err();
        assert!(err.to_string().contains("state_mismatch"));
    }

    #[test]
    fn check_params_requires_code() {
        let params = CallbackParams {
            code: None,
            state: Some("s".into()),
            error: None,
        };
        let err = check_params(params, "s").unwrap_err();
        assert!(err.to_string().contains("missing_code"));
    }

    #[tokio::test]
    async fn wait_for_code_receives_redirect() {
        let listener = CallbackListener::bind().await.unwrap();
        let addr = listener.redirect_uri().replace("http://", "").replace('/', "");

        let browser = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream
                .write_all(b"GET /?code=auth-code&state=xyz HTTP/1.1\r\nHost: localhost\r\n\r\n")
                .await
                .unwrap();
            let mut response = String::new();
            stream.read_to_string(&mut response).await.unwrap();
            response
        });

        let code = listener
            .wait_for_code("xyz", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(code, "auth-code");

        let response = browser.await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
    }

    #[tokio::test]
    async fn wait_for_code_times_out() {
        let listener = CallbackListener::bind().await.unwrap();
        let err = listener
            .wait_for_code("xyz", Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GoogleError>(),
            Some(GoogleError::CallbackTimeout)
        ));
    }
}
