//! JSON endpoints for the three flows.

use crate::{
    config::Config,
    error::VogueError,
    flows::Flows,
    logger,
    models::{AnalyzeClothingImageInput, CompositeClothingOnModelInput, GenerateAiModelInput},
};
use actix_web::{
    get, http::StatusCode, middleware::Logger, post, web, App, HttpResponse, HttpServer,
    Responder, ResponseError,
};

/// Uploaded photos arrive inline as Base64, so bodies are large.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

pub struct AppState {
    pub flows: Flows,
}

impl ResponseError for VogueError {
    fn status_code(&self) -> StatusCode {
        match self {
            VogueError::Validation(_) => StatusCode::BAD_REQUEST,
            VogueError::ModelInvocation(_) => StatusCode::BAD_GATEWAY,
            VogueError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        }))
    }
}

#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy"
    }))
}

#[post("/api/analyze-clothing")]
pub async fn analyze_clothing(
    state: web::Data<AppState>,
    body: web::Json<AnalyzeClothingImageInput>,
) -> Result<HttpResponse, VogueError> {
    let analysis = state
        .flows
        .analyze_clothing_image(body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(analysis))
}

#[post("/api/generate-model")]
pub async fn generate_model(
    state: web::Data<AppState>,
    body: web::Json<GenerateAiModelInput>,
) -> Result<HttpResponse, VogueError> {
    let output = state.flows.generate_ai_model(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(output))
}

#[post("/api/composite")]
pub async fn composite(
    state: web::Data<AppState>,
    body: web::Json<CompositeClothingOnModelInput>,
) -> Result<HttpResponse, VogueError> {
    let output = state
        .flows
        .composite_clothing_on_model(body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(output))
}

/// Reports unreadable bodies as validation failures in the shared error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| VogueError::Validation(err.to_string()).into())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(analyze_clothing)
        .service(generate_model)
        .service(composite);
}

pub async fn run(config: Config, flows: Flows) -> std::io::Result<()> {
    let host = config.host().to_string();
    let port = config.port();
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &host, port);

    let state = web::Data::new(AppState { flows });
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(json_config())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
