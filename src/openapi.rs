use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::catalog::list_resources,
        crate::handlers::resource::list_records,
        crate::handlers::resource::submit_record,
        crate::handlers::resource::get_record,
        crate::handlers::resource::update_record,
        crate::handlers::resource::delete_record,
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::response::MessageResponse,
            crate::handlers::catalog::ResourceSummary,
            crate::handlers::catalog::FieldSummary,
            crate::handlers::catalog::FileSlotSummary,
            crate::handlers::catalog::CollectionSummary,
        )
    ),
    tags(
        (name = "health", description = "Service status"),
        (name = "resources", description = "Content records: gallery, events, clubs, faculty, placement, recruiters, testimonials, banners, edutour, recruit-and-partner"),
    )
)]
pub struct ApiDoc;
