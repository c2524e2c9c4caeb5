//! Blocking HTTP client for the Dropbox v2 files API

use std::env;
use std::fmt;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::json;

use super::error::{ApiError, ApiResult};
use super::{ExportFormat, FileService};
use crate::error::{Error, Result};
use crate::types::Page;
use crate::utils::format_file_size;

/// Environment variable holding the bearer token
pub const ACCESS_TOKEN_ENV: &str = "DROPBOX_ACCESS_TOKEN";

const LIST_FOLDER_URL: &str = "https://api.dropboxapi.com/2/files/list_folder";
const LIST_FOLDER_CONTINUE_URL: &str = "https://api.dropboxapi.com/2/files/list_folder/continue";
const EXPORT_URL: &str = "https://content.dropboxapi.com/2/files/export";

/// Bearer credential for the Dropbox API
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// Read the token from `DROPBOX_ACCESS_TOKEN`
    pub fn from_env() -> Result<Self> {
        Self::from_value(env::var(ACCESS_TOKEN_ENV).ok())
    }

    /// Build a token from an optional raw value; blank counts as missing
    pub fn from_value(value: Option<String>) -> Result<Self> {
        match value {
            Some(token) if !token.trim().is_empty() => Ok(Self(token.trim().to_string())),
            _ => Err(Error::MissingCredential(ACCESS_TOKEN_ENV.to_string())),
        }
    }

    fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Dropbox API client
pub struct DropboxClient {
    client: Client,
    token: AccessToken,
}

impl DropboxClient {
    /// Create a new client authenticated with `token`.
    ///
    /// Exports of large documents can take a while, so requests never time out.
    pub fn new(token: AccessToken) -> ApiResult<Self> {
        let client = Client::builder().timeout(None).build()?;
        Ok(Self { client, token })
    }

    fn rpc_request(&self, url: &str, body: &serde_json::Value) -> RequestBuilder {
        self.client
            .post(url)
            .bearer_auth(self.token.secret())
            .json(body)
    }

    fn export_request(&self, id: &str, format: ExportFormat) -> ApiResult<RequestBuilder> {
        #[derive(Serialize)]
        struct ExportArg<'a> {
            path: &'a str,
            export_format: String,
        }

        let arg = header_safe_json(&ExportArg {
            path: id,
            export_format: format.to_string(),
        })?;

        debug!(
            "Sending export request to {} with Dropbox-API-Arg: {}",
            EXPORT_URL, arg
        );

        Ok(self
            .client
            .post(EXPORT_URL)
            .bearer_auth(self.token.secret())
            .header("Dropbox-API-Arg", arg))
    }

    /// POST a JSON argument to an RPC endpoint and decode the page it returns
    fn rpc_page(&self, url: &str, body: &serde_json::Value) -> ApiResult<Page> {
        debug!("Sending request to {} with body {}", url, body);

        let response = self.rpc_request(url, body).send()?;
        let response = check_status(response)?;

        let bytes = response.bytes()?;
        debug!("Received listing of {}", format_file_size(bytes.len() as u64));

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl FileService for DropboxClient {
    fn list_folder(&self, path: &str, recursive: bool) -> ApiResult<Page> {
        self.rpc_page(
            LIST_FOLDER_URL,
            &json!({ "path": path, "recursive": recursive }),
        )
    }

    fn list_folder_continue(&self, cursor: &str) -> ApiResult<Page> {
        self.rpc_page(LIST_FOLDER_CONTINUE_URL, &json!({ "cursor": cursor }))
    }

    fn export(&self, id: &str, format: ExportFormat) -> ApiResult<Vec<u8>> {
        let response = self.export_request(id, format)?.send()?;
        let response = check_status(response)?;

        let bytes = response.bytes()?;
        debug!(
            "Exported file content length: {}",
            format_file_size(bytes.len() as u64)
        );

        Ok(bytes.to_vec())
    }
}

/// Turn a non-success response into an error carrying its body
fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    debug!("Received response with status: {}", status);

    if status.is_success() {
        return Ok(response);
    }

    Err(status_error(
        status,
        response
            .text()
            .unwrap_or_else(|_| "Unable to read error message".to_string()),
    ))
}

fn status_error(status: StatusCode, body: String) -> ApiError {
    ApiError::Status {
        status: status.as_u16(),
        body,
    }
}

/// Serialize `value` as JSON that is safe to send in an HTTP header.
///
/// Header values must be ASCII, so every non-ASCII character is written as a
/// `\uXXXX` escape (surrogate pairs outside the BMP).
pub fn header_safe_json<T: Serialize>(value: &T) -> ApiResult<String> {
    let raw = serde_json::to_string(value)?;
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_from_value() {
        assert!(AccessToken::from_value(Some("sl.abc".to_string())).is_ok());

        let missing = AccessToken::from_value(None).unwrap_err();
        assert!(matches!(missing, Error::MissingCredential(ref name) if name == ACCESS_TOKEN_ENV));

        let blank = AccessToken::from_value(Some("   ".to_string())).unwrap_err();
        assert!(matches!(blank, Error::MissingCredential(_)));
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::from_value(Some("sl.secret".to_string())).unwrap();
        let printed = format!("{:?}", token);
        assert!(!printed.contains("sl.secret"));
    }

    fn test_client() -> DropboxClient {
        let token = AccessToken::from_value(Some("sl.test".to_string())).unwrap();
        DropboxClient::new(token).unwrap()
    }

    fn header<'a>(request: &'a reqwest::blocking::Request, name: &str) -> &'a str {
        request.headers()[name].to_str().unwrap()
    }

    #[test]
    fn test_export_request_headers() {
        let request = test_client()
            .export_request("id:a1b2", ExportFormat::Markdown)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().as_str(), EXPORT_URL);
        assert_eq!(header(&request, "authorization"), "Bearer sl.test");
        assert_eq!(
            header(&request, "Dropbox-API-Arg"),
            r#"{"path":"id:a1b2","export_format":"markdown"}"#
        );
    }

    #[test]
    fn test_list_folder_request_body() {
        let request = test_client()
            .rpc_request(
                LIST_FOLDER_URL,
                &json!({ "path": "/Migrated Paper Docs", "recursive": true }),
            )
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), LIST_FOLDER_URL);
        assert_eq!(header(&request, "authorization"), "Bearer sl.test");
        assert_eq!(header(&request, "content-type"), "application/json");

        let body: serde_json::Value =
            serde_json::from_slice(request.body().unwrap().as_bytes().unwrap()).unwrap();
        assert_eq!(body["path"], "/Migrated Paper Docs");
        assert_eq!(body["recursive"], true);
    }

    #[test]
    fn test_status_error_keeps_body() {
        let err = status_error(
            StatusCode::CONFLICT,
            r#"{"error_summary": "path/not_found/"}"#.to_string(),
        );

        assert!(matches!(
            &err,
            ApiError::Status { status: 409, body } if body.contains("path/not_found")
        ));
        assert!(err.to_string().starts_with("API returned status 409"));
    }

    #[test]
    fn test_header_safe_json_ascii_passthrough() {
        let arg = header_safe_json(&json!({ "path": "id:a1b2", "export_format": "markdown" }))
            .unwrap();
        assert!(arg.contains(r#""path":"id:a1b2""#));
        assert!(arg.contains(r#""export_format":"markdown""#));
    }

    #[test]
    fn test_header_safe_json_escapes_non_ascii() {
        let arg = header_safe_json(&json!({ "path": "/Café/😀.paper" })).unwrap();
        assert!(arg.is_ascii());
        assert_eq!(arg, r#"{"path":"/Caf\u00e9/\ud83d\ude00.paper"}"#);

        // Escapes decode back to the original value
        let decoded: serde_json::Value = serde_json::from_str(&arg).unwrap();
        assert_eq!(decoded["path"], "/Café/😀.paper");
    }
}
