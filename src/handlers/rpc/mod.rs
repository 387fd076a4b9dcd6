pub mod presentations;
pub mod slides;

use actix_web::{
    web, Error, HttpResponse, ResponseError,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use sqlx::PgPool;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureKind {
    Query,
    Mutation,
}

/// Every callable procedure and whether it reads or writes.
pub const PROCEDURES: &[(&str, ProcedureKind)] = &[
    ("healthcheck", ProcedureKind::Query),
    ("getPresentations", ProcedureKind::Query),
    ("getPresentationWithSlides", ProcedureKind::Query),
    ("incrementViewCount", ProcedureKind::Mutation),
    ("createPresentation", ProcedureKind::Mutation),
    ("updatePresentation", ProcedureKind::Mutation),
    ("getSlidesByPresentation", ProcedureKind::Query),
    ("createSlide", ProcedureKind::Mutation),
    ("updateSlide", ProcedureKind::Mutation),
    ("deleteSlide", ProcedureKind::Mutation),
];

pub fn procedure_kind(name: &str) -> Option<ProcedureKind> {
    PROCEDURES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, kind)| *kind)
}

#[derive(Serialize)]
struct RpcResponse {
    result: RpcData,
}

#[derive(Serialize)]
struct RpcData {
    data: Value,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub input: Option<String>,
}

fn parse_input<T: DeserializeOwned>(name: &str, input: Value) -> Result<T, AppError> {
    serde_json::from_value(input)
        .map_err(|e| AppError::BadRequest(format!("invalid input for {name}: {e}")))
}

fn to_data<T: Serialize>(value: T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(value)?)
}

/// Run a procedure by name against decoded JSON input.
pub async fn call(pool: &PgPool, name: &str, input: Value) -> Result<Value, AppError> {
    use self::presentations as p;
    use self::slides as s;

    match name {
        "healthcheck" => to_data(Health {
            status: "ok",
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
        "getPresentations" => to_data(p::get_presentations(pool).await?),
        "getPresentationWithSlides" => {
            to_data(p::get_presentation_with_slides(pool, parse_input(name, input)?).await?)
        }
        "incrementViewCount" => {
            to_data(p::increment_view_count(pool, parse_input(name, input)?).await?)
        }
        "createPresentation" => {
            to_data(p::create_presentation(pool, parse_input(name, input)?).await?)
        }
        "updatePresentation" => {
            to_data(p::update_presentation(pool, parse_input(name, input)?).await?)
        }
        "getSlidesByPresentation" => {
            to_data(s::get_slides_by_presentation(pool, parse_input(name, input)?).await?)
        }
        "createSlide" => to_data(s::create_slide(pool, parse_input(name, input)?).await?),
        "updateSlide" => to_data(s::update_slide(pool, parse_input(name, input)?).await?),
        "deleteSlide" => to_data(s::delete_slide(pool, parse_input(name, input)?).await?),
        _ => Err(AppError::NotFound(format!("no procedure named '{name}'"))),
    }
}

fn resolve(name: &str, method: &str, allowed: &[ProcedureKind]) -> Result<(), AppError> {
    match procedure_kind(name) {
        None => Err(AppError::NotFound(format!("no procedure named '{name}'"))),
        Some(kind) if allowed.contains(&kind) => Ok(()),
        Some(_) => Err(AppError::MethodNotSupported(format!(
            "{name} cannot be called with {method}"
        ))),
    }
}

async fn respond(pool: &PgPool, name: &str, input: Value) -> Result<HttpResponse, AppError> {
    let data = call(pool, name, input).await?;
    Ok(HttpResponse::Ok().json(RpcResponse { result: RpcData { data } }))
}

/// GET /trpc/{procedure}?input=<json> - queries only.
pub async fn query(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    params: web::Query<QueryParams>,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();
    resolve(&name, "GET", &[ProcedureKind::Query])?;

    let input = match params.input.as_deref() {
        Some(raw) if !raw.is_empty() => serde_json::from_str(raw)
            .map_err(|e| AppError::BadRequest(format!("input is not valid JSON: {e}")))?,
        _ => Value::Null,
    };

    respond(&pool, &name, input).await
}

/// POST /trpc/{procedure} - mutations, and queries with a JSON body.
pub async fn mutation(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();
    resolve(&name, "POST", &[ProcedureKind::Query, ProcedureKind::Mutation])?;

    let input = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("body is not valid JSON: {e}")))?
    };

    respond(&pool, &name, input).await
}

/// Rejects POST requests that don't have Content-Type: application/json.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if req.method() == actix_web::http::Method::POST {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let response = AppError::BadRequest(
                "Content-Type must be application/json for POST requests".to_string(),
            )
            .error_response();
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Configure the RPC endpoint under `/trpc`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/trpc")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("/{procedure}", web::get().to(query))
            .route("/{procedure}", web::post().to(mutation)),
    );
}
