//! バックエンドAPI連携（fetch）

pub mod backend;
pub mod files;

pub use backend::FetchApi;
pub use files::{file_list_to_vec, read_upload};
