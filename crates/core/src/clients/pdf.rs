use baliquote_primitives::error::ApiError;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use std::time::Duration;

/// Headless-browser render service that turns an HTML document into a PDF.
#[derive(Clone)]
pub struct PdfClient {
    http: Client,
    base_url: Url,
}

impl PdfClient {
    pub fn new(http: Client, base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|_| ApiError::Internal("Invalid PDF render URL".into()))?;
        Ok(Self { http, base_url })
    }

    pub async fn render_html(&self, html: String) -> Result<Vec<u8>, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Internal("Invalid PDF render URL path".into()))?
            .pop_if_empty()
            .extend(["forms", "chromium", "convert", "html"]);

        let page = Part::bytes(html.into_bytes())
            .file_name("index.html")
            .mime_str("text/html")?;

        let form = Form::new()
            .part("files", page)
            .text("printBackground", "true")
            .text("preferCssPageSize", "true");

        let resp = self
            .http
            .post(url)
            .timeout(Duration::from_secs(60))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("PDF renderer unreachable: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Upstream(format!(
                "PDF renderer returned {}",
                status
            )));
        }

        let bytes = resp.bytes().await?;
        if bytes.is_empty() {
            return Err(ApiError::Upstream("PDF renderer returned an empty document".into()));
        }

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_document_to_chromium_route() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/forms/chromium/convert/html"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let client = PdfClient::new(Client::new(), &server.uri()).unwrap();
        let pdf = client.render_html("<html></html>".into()).await.unwrap();

        assert!(pdf.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn renderer_errors_surface_as_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = PdfClient::new(Client::new(), &server.uri()).unwrap();
        let err = client.render_html("<html></html>".into()).await.unwrap_err();

        assert!(matches!(err, ApiError::Upstream(_)));
    }
}
