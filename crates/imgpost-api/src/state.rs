//! Application state shared by handlers.

use imgpost_processing::UploadPipeline;

use crate::image_type::ImageType;

pub struct AppState {
    pub pipeline: UploadPipeline<ImageType>,
}
