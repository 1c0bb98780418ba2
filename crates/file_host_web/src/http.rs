//! `reqwest`-backed [`FileApi`] talking to the workspace file endpoints.

use file_host::{
    BackendEndpoint, DirectoryListing, FileApi, FileApiError, FileApiFuture, FileContent,
    FileMutationResult, UploadFile, UploadResult, UserInfo,
};
use reqwest::multipart::{Form, Part};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;

#[derive(Debug, Clone)]
/// HTTP client for `/api/files` and `/api/user/me`.
pub struct HttpFileApi {
    client: reqwest::Client,
    endpoint: BackendEndpoint,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Builds an error for a non-success response, preferring the backend `detail` text.
pub fn error_from_body(status: u16, reason: Option<&str>, body: &str) -> FileApiError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| match b.detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .filter(|text| !text.is_empty());
    let message = detail
        .or_else(|| reason.map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());
    FileApiError::Http { status, message }
}

fn transport(err: reqwest::Error) -> FileApiError {
    FileApiError::Transport(err.to_string())
}

async fn decode<T: DeserializeOwned>(
    response: Result<reqwest::Response, reqwest::Error>,
) -> Result<T, FileApiError> {
    let response = response.map_err(transport)?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(error_from_body(
            status.as_u16(),
            status.canonical_reason(),
            &body,
        ));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| FileApiError::Decode(e.to_string()))
}

impl HttpFileApi {
    /// Creates a client for an absolute endpoint (see [`BackendEndpoint::anchored`]).
    pub fn new(endpoint: BackendEndpoint) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &BackendEndpoint {
        &self.endpoint
    }
}

impl FileApi for HttpFileApi {
    fn list_dir<'a>(
        &'a self,
        path: &'a str,
    ) -> FileApiFuture<'a, Result<DirectoryListing, FileApiError>> {
        Box::pin(async move {
            decode(self.client.get(self.endpoint.list_url(path)).send().await).await
        })
    }

    fn read_file<'a>(
        &'a self,
        path: &'a str,
    ) -> FileApiFuture<'a, Result<FileContent, FileApiError>> {
        Box::pin(async move {
            decode(self.client.get(self.endpoint.file_url(path)).send().await).await
        })
    }

    fn update_file<'a>(
        &'a self,
        path: &'a str,
        content: &'a str,
    ) -> FileApiFuture<'a, Result<FileMutationResult, FileApiError>> {
        Box::pin(async move {
            let request = self
                .client
                .put(self.endpoint.file_url(path))
                .json(&json!({ "content": content }));
            decode(request.send().await).await
        })
    }

    fn delete_path<'a>(
        &'a self,
        path: &'a str,
    ) -> FileApiFuture<'a, Result<FileMutationResult, FileApiError>> {
        Box::pin(async move {
            decode(self.client.delete(self.endpoint.file_url(path)).send().await).await
        })
    }

    fn upload_files<'a>(
        &'a self,
        dir: &'a str,
        files: Vec<UploadFile>,
    ) -> FileApiFuture<'a, Result<UploadResult, FileApiError>> {
        Box::pin(async move {
            let form = files
                .into_iter()
                .fold(Form::new().text("path", dir.to_string()), |form, file| {
                    form.part("files", Part::bytes(file.bytes).file_name(file.name))
                });
            let request = self.client.post(self.endpoint.upload_url()).multipart(form);
            decode(request.send().await).await
        })
    }

    fn current_user<'a>(&'a self) -> FileApiFuture<'a, Result<UserInfo, FileApiError>> {
        Box::pin(async move {
            decode(self.client.get(self.endpoint.user_url()).send().await).await
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn backend_detail_becomes_message() {
        assert_eq!(
            error_from_body(404, Some("Not Found"), r#"{"detail":"Directory not found"}"#),
            FileApiError::Http {
                status: 404,
                message: "Directory not found".to_string(),
            }
        );
    }

    #[test]
    fn missing_detail_falls_back_to_reason() {
        assert_eq!(
            error_from_body(502, Some("Bad Gateway"), "<html>upstream</html>"),
            FileApiError::Http {
                status: 502,
                message: "Bad Gateway".to_string(),
            }
        );
        assert_eq!(
            error_from_body(599, None, ""),
            FileApiError::Http {
                status: 599,
                message: "request failed".to_string(),
            }
        );
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let err = error_from_body(422, None, r#"{"detail":[{"loc":["body"]}]}"#);
        assert_eq!(err.status(), Some(422));
        assert!(err.to_string().contains("loc"));
    }
}
