pub mod event;
pub mod handler;
pub mod recorder;
pub mod response;

pub use event::parse_upload_event;
pub use handler::handle_event;
pub use recorder::{ContentTypeLookup, UploadRecorder};
pub use response::{RecordResponse, ResponseBody};
