pub mod children;
pub mod record;
pub mod upload;

pub use record::RecordService;
pub use upload::UploadService;
