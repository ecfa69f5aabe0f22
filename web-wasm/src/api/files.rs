//! ブラウザの File をアップロード用データに変換

use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileList};

use hire_wizard_common::{Result, UploadedFile};

use super::backend::js_error;

/// ファイル選択・ドロップで受け付ける形式
pub const DOCUMENT_ACCEPT: &str = ".pdf,.doc,.docx";

pub fn file_list_to_vec(files: &FileList) -> Vec<File> {
    (0..files.length()).filter_map(|i| files.get(i)).collect()
}

/// ファイル内容を読み込む（再送できるようにバイト列で保持）
pub async fn read_upload(file: &File) -> Result<UploadedFile> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_error)?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(UploadedFile::new(file.name(), file.type_(), bytes))
}
