pub mod cv_upload;
pub mod header;
pub mod interviews;
pub mod job_description;
pub mod notification;
pub mod progress_bar;
pub mod results;
pub mod success;
pub mod upload_area;
