//! fetch によるバックエンド呼び出し
//!
//! - `/api/process-job-description`: multipart（file）
//! - `/api/process-cv`: multipart（file, job_description）
//! - `/api/schedule-interviews`: JSON

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

use hire_wizard_common::api::{
    api_error, schedule_error, HiringApi, CV_ENDPOINT, JOB_DESCRIPTION_ENDPOINT, SCHEDULE_ENDPOINT,
};
use hire_wizard_common::{
    CvAnalysis, Error, JobDescription, Result, ScheduleRequest, ScheduleResponse, UploadedFile,
    WizardConfig,
};

/// ブラウザの fetch を使うバックエンド
#[derive(Debug, Clone)]
pub struct FetchApi {
    config: WizardConfig,
}

impl FetchApi {
    pub fn new(config: WizardConfig) -> Self {
        Self { config }
    }

    /// POSTして本文を返す（非2xxは本文を `reject` でエラーにする）
    async fn post(
        &self,
        path: &str,
        body: &JsValue,
        content_type: Option<&str>,
        fallback: &str,
        reject: fn(&str, &str) -> Error,
    ) -> Result<String> {
        let url = self.config.endpoint(path);

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(body);

        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
        if let Some(content_type) = content_type {
            request
                .headers()
                .set("Content-Type", content_type)
                .map_err(js_error)?;
        }

        let window = web_sys::window().ok_or_else(|| Error::Transport("window not available".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let text = read_text(&resp).await.unwrap_or_default();
        if !resp.ok() {
            log::error!("{} failed with status {}", path, resp.status());
            return Err(reject(&text, fallback));
        }
        Ok(text)
    }
}

impl HiringApi for FetchApi {
    async fn process_job_description(&self, file: &UploadedFile) -> Result<JobDescription> {
        let form = FormData::new().map_err(js_error)?;
        append_file(&form, file)?;

        let text = self
            .post(
                JOB_DESCRIPTION_ENDPOINT,
                &form.into(),
                None,
                "Failed to process job description",
                api_error,
            )
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn process_cv(&self, file: &UploadedFile, job_description_json: &str) -> Result<CvAnalysis> {
        let form = FormData::new().map_err(js_error)?;
        append_file(&form, file)?;
        form.append_with_str("job_description", job_description_json)
            .map_err(js_error)?;

        let text = self
            .post(CV_ENDPOINT, &form.into(), None, "Failed to process CV", api_error)
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn schedule_interviews(&self, request: &ScheduleRequest) -> Result<ScheduleResponse> {
        let body = serde_json::to_string(request)?;

        let text = self
            .post(
                SCHEDULE_ENDPOINT,
                &JsValue::from_str(&body),
                Some("application/json"),
                "Failed to schedule interviews",
                schedule_error,
            )
            .await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// multipart の `file` フィールドを追加
fn append_file(form: &FormData, file: &UploadedFile) -> Result<()> {
    let bytes = js_sys::Uint8Array::from(&file.data[..]);
    let parts = js_sys::Array::of1(&bytes);

    let options = BlobPropertyBag::new();
    options.set_type(&file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;

    form.append_with_blob_and_filename("file", &blob, &file.name)
        .map_err(js_error)
}

async fn read_text(resp: &Response) -> Option<String> {
    let promise = resp.text().ok()?;
    JsFuture::from(promise).await.ok()?.as_string()
}

pub(crate) fn js_error(value: JsValue) -> Error {
    let message = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Transport(message)
}
