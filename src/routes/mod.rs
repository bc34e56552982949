use crate::config::{AppConfig, ServerConfig};
use crate::handlers::{self, resource::EntryPoint};
use crate::middleware::json_headers_middleware;
use crate::openapi::ApiDoc;
use crate::resources::{
    BANNERS, CLUBS, EDU_TOURS, EVENTS, FACULTY, GALLERY, PLACEMENT, RECRUITERS,
    RECRUIT_AND_PARTNER, TESTIMONIALS,
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{self, MethodRouter},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const fn entry(schema: &'static crate::resources::ResourceSchema) -> EntryPoint {
    EntryPoint {
        schema,
        requires_resource_param: false,
    }
}

/// Legacy script paths kept so existing admin front-ends keep working.
static ENTRY_SCRIPTS: [(&str, EntryPoint); 10] = [
    ("/index.php", entry(&GALLERY)),
    (
        "/index2.php",
        EntryPoint {
            schema: &EVENTS,
            requires_resource_param: true,
        },
    ),
    (
        "/index3.php",
        EntryPoint {
            schema: &CLUBS,
            requires_resource_param: true,
        },
    ),
    ("/indexFaculty.php", entry(&FACULTY)),
    ("/indexPlacement.php", entry(&PLACEMENT)),
    ("/indexRecruiter.php", entry(&RECRUITERS)),
    ("/indexTestimonial.php", entry(&TESTIMONIALS)),
    ("/indexBanner.php", entry(&BANNERS)),
    ("/indexEdutour.php", entry(&EDU_TOURS)),
    ("/indexRecruitAndPartner.php", entry(&RECRUIT_AND_PARTNER)),
];

fn collection_methods() -> MethodRouter {
    use handlers::resource::*;

    routing::get(list_records)
        .post(submit_record)
        .put(collection_by_query_id)
        .delete(collection_by_query_id)
        .options(preflight)
        .fallback(method_not_allowed)
}

fn item_methods() -> MethodRouter {
    use handlers::resource::*;

    routing::get(get_record)
        .post(update_record)
        .put(update_record)
        .delete(delete_record)
        .options(preflight)
        .fallback(method_not_allowed)
}

/// OPTIONS answers before the body is read; everything else goes through
/// the entry script's dispatcher.
fn entry_methods(entry: EntryPoint) -> MethodRouter {
    routing::options(handlers::resource::preflight)
        .fallback(handlers::resource::entry_script)
        .layer(Extension(entry))
}

/// JSON routes: the path-style API plus the legacy entry scripts.
pub fn create_routes() -> Router {
    let api = Router::new()
        .route(
            "/api/v1/resources",
            routing::get(handlers::catalog::list_resources),
        )
        .route("/api/v1/{resource}", collection_methods())
        .route("/api/v1/{resource}/{id}", item_methods());

    let legacy = ENTRY_SCRIPTS
        .iter()
        .fold(Router::new(), |router, (path, entry)| {
            router.route(path, entry_methods(*entry))
        });

    api.merge(legacy)
        .layer(middleware::from_fn(json_headers_middleware))
}

fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-requested-with"),
        ]);

    if config.cors_origins.trim() == "*" {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// The whole application with shared state attached.
pub fn create_app(db: DatabaseConnection, config: &AppConfig) -> Router {
    Router::new()
        .route("/", routing::get(handlers::health_check))
        .merge(create_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service("/uploads", ServeDir::new(&config.upload.upload_dir))
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.server))
        .layer(Extension(db))
        .layer(Extension(config.upload.clone()))
}
