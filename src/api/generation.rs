//! AI question generation from uploaded PDFs.

use super::models::{GenerationJobStatus, GenerationRun, GenerationRunRequest, GenerationUpload};
use super::{ApiClient, Auth, encode_segment};
use crate::error::{ApiError, ValidationError};
use crate::forms;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

const PDF_MIME: &str = "application/pdf";

impl ApiClient {
    /// Upload a PDF as multipart form data (field `file`).
    ///
    /// The file name must end in `.pdf`; the part is always sent as
    /// `application/pdf`.
    pub async fn upload_pdf(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<GenerationUpload, ApiError> {
        forms::validate_pdf_upload(file_name, None, bytes.len())?;
        let form = Form::new().part("file", pdf_part(file_name, bytes)?);

        self.send(
            Method::POST,
            "/api/generation/upload",
            Auth::Stored,
            |req| req.multipart(form),
        )
        .await
    }

    /// Run generation synchronously; the response carries the questions.
    pub async fn run_generation(
        &self,
        request: &GenerationRunRequest,
    ) -> Result<GenerationRun, ApiError> {
        self.post("/api/generation/run", request).await
    }

    pub async fn generation_status(&self, job_id: &str) -> Result<GenerationJobStatus, ApiError> {
        let path = format!("/api/generation/{}", encode_segment(job_id));
        self.get(&path).await
    }
}

/// The `file` part of an upload, typed as a PDF.
fn pdf_part(file_name: &str, bytes: Vec<u8>) -> Result<Part, ValidationError> {
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(PDF_MIME)
        .map_err(|e| ValidationError::field("file", format!("Invalid PDF upload: {}", e)))
}
