use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use imgpost_processing::UploadRequest;
use serde::Deserialize;

use crate::error::HttpAppError;
use crate::image_type::ImageType;
use crate::state::AppState;

const IMAGE_DATA_FIELD: &str = "imageData";
const IMAGE_TYPE_FIELD: &str = "imageType";

#[derive(Debug, Default, Deserialize)]
pub struct ImageUploadQuery {
    #[serde(rename = "imageType")]
    pub image_type: Option<String>,
}

/// Upload image handler
///
/// Accepts a multipart form with the file in `imageData` and the kind in
/// `imageType` (query string or form field). Responds with the generated
/// file name as plain text.
#[tracing::instrument(
    skip_all,
    fields(operation = "upload_image", image_type = tracing::field::Empty)
)]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImageUploadQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let mut multipart = multipart?;
    let mut data: Option<Bytes> = None;
    let mut content_type = String::new();
    let mut image_type = query.image_type;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(IMAGE_DATA_FIELD) if data.is_none() => {
                content_type = field.content_type().unwrap_or_default().to_string();
                data = Some(field.bytes().await?);
            }
            Some(IMAGE_TYPE_FIELD) if image_type.is_none() => {
                image_type = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let image_type = image_type
        .ok_or_else(|| HttpAppError::bad_request("imageType is required"))?
        .parse::<ImageType>()
        .map_err(HttpAppError::bad_request)?;

    tracing::Span::current().record("image_type", tracing::field::display(image_type));

    let receipt = state
        .pipeline
        .upload(UploadRequest::new(data, content_type, image_type))
        .await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        receipt.file_name,
    )
        .into_response())
}
