use crate::services::CoverCache;
use crate::types::CoverId;
use actix_web::web::{Data, Path};
use actix_web::{HttpResponse, Responder};
use std::sync::Arc;
use tracing::{debug, warn};

const NO_IMAGE_BODY: &str = "No image available";

pub(crate) async fn latest_album_cover(cover_cache: Data<Arc<CoverCache>>) -> impl Responder {
    match cover_cache.latest() {
        Some(image) => {
            debug!("Serving the latest album cover");
            HttpResponse::Ok()
                .content_type(image.format.content_type())
                .body(image.bytes)
        }
        None => {
            warn!("No image available to serve as the latest album cover");
            not_found()
        }
    }
}

pub(crate) async fn album_cover(
    path: Path<String>,
    cover_cache: Data<Arc<CoverCache>>,
) -> impl Responder {
    let cover_id = CoverId::from(path.into_inner());

    match cover_cache.get(&cover_id) {
        Some(image) => {
            debug!(%cover_id, "Serving album cover");
            HttpResponse::Ok()
                .content_type(image.format.content_type())
                .body(image.bytes)
        }
        None => {
            warn!(%cover_id, "Album cover not found");
            not_found()
        }
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/plain")
        .body(NO_IMAGE_BODY)
}
