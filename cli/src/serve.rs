#![deny(missing_docs)]

//! # Serve Command
//!
//! Exposes comparisons over HTTP:
//! `GET /api/comparison/compare?old=<URL>&new=<URL>` answers with the JSON
//! findings array. Only `http(s)` URLs are accepted; local paths are
//! rejected so callers cannot make the server read its own files.

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{get, web, App, HttpResponse, HttpServer, ResponseError};
use derive_more::{Display, From};
use serde::Deserialize;
use specguard_core::{compare_sources, AppError, DocumentFetcher, SourceLocator};
use tracing::{info, warn};

use crate::error::CliResult;

/// The fetcher shared by every worker.
pub type SharedFetcher = Arc<dyn DocumentFetcher + Send + Sync>;

/// Arguments for the serve command.
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on.
    #[clap(long, env = "SPECGUARD_BIND", default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Timeout for each HTTP fetch, in seconds.
    #[clap(long, env = "SPECGUARD_TIMEOUT", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Query string of the compare route.
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    /// Baseline URL.
    pub old: String,
    /// Candidate URL.
    pub new: String,
}

/// Failures of the compare route.
///
/// Only the error kind and the locator reach the response body; the
/// underlying reason is logged.
#[derive(Debug, Display, From)]
pub enum ApiError {
    /// The caller passed something other than an `http(s)` URL.
    #[from(ignore)]
    #[display("'{_0}' is not an http(s) URL")]
    NotRemote(String),

    /// Fetching or comparing failed.
    #[display("{_0}")]
    App(AppError),
}

impl ApiError {
    fn public_message(&self) -> String {
        match self {
            ApiError::NotRemote(_) => self.to_string(),
            ApiError::App(AppError::Locator { input, .. }) => {
                format!("'{}' is not a usable document locator", input)
            }
            ApiError::App(AppError::Fetch { location, .. }) => {
                format!("failed to fetch '{}'", location)
            }
            ApiError::App(AppError::Parse { location, .. }) => {
                format!("'{}' is not a valid OpenAPI document", location)
            }
            ApiError::App(_) => "comparison failed".to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotRemote(_) | ApiError::App(AppError::Locator { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::App(AppError::Fetch { .. }) => StatusCode::BAD_GATEWAY,
            ApiError::App(AppError::Parse { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::App(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.public_message() }))
    }
}

/// Parses a query value, accepting remote URLs only.
fn remote_locator(raw: &str) -> Result<SourceLocator, ApiError> {
    let checked = match raw.parse::<SourceLocator>() {
        Ok(locator @ SourceLocator::Remote(_)) => Ok(locator),
        Ok(SourceLocator::File(_)) => Err(ApiError::NotRemote(raw.to_string())),
        Err(e) => Err(ApiError::from(e)),
    };
    checked.inspect_err(|e| warn!(error = %e, "locator rejected"))
}

#[get("/api/comparison/compare")]
async fn compare(
    fetcher: web::Data<dyn DocumentFetcher + Send + Sync>,
    query: web::Query<CompareQuery>,
) -> Result<HttpResponse, ApiError> {
    let fetcher = fetcher.into_inner();
    let old = remote_locator(&query.old)?;
    let new = remote_locator(&query.new)?;

    let cases = web::block(move || compare_sources(fetcher.as_ref(), &old, &new))
        .await
        .map_err(|e| AppError::General(e.to_string()))?
        .inspect_err(|e| warn!(error = %e, "comparison request failed"))?;

    Ok(HttpResponse::Ok().json(cases))
}

/// Registers the comparison routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(compare);
}

/// Builds the server on an already bound listener.
pub fn build_server(
    listener: TcpListener,
    fetcher: SharedFetcher,
) -> std::io::Result<actix_web::dev::Server> {
    let data = web::Data::from(fetcher);
    Ok(
        HttpServer::new(move || App::new().app_data(data.clone()).configure(routes))
            .listen(listener)?
            .run(),
    )
}

/// Runs the server until it is stopped.
pub fn execute(args: &ServeArgs, fetcher: SharedFetcher) -> CliResult<()> {
    let listener = TcpListener::bind(&args.bind)?;
    info!(addr = %listener.local_addr()?, "listening");

    actix_rt::System::new().block_on(async move { build_server(listener, fetcher)?.await })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use specguard_core::{AppResult, FileFetcher};
    use std::collections::HashMap;
    use std::fs;

    struct MemoryFetcher(HashMap<&'static str, &'static str>);

    impl DocumentFetcher for MemoryFetcher {
        fn fetch_text(&self, locator: &SourceLocator) -> AppResult<String> {
            let key = locator.to_string();
            self.0
                .get(key.as_str())
                .map(|text| text.to_string())
                .ok_or_else(|| AppError::fetch(key, "HTTP status 404"))
        }
    }

    const OLD_URL: &str = "http://old.local/v3/api-docs";
    const NEW_URL: &str = "http://new.local/v3/api-docs";
    const SECRET_URL: &str = "http://secret.local/v3/api-docs";
    const MISSING_URL: &str = "http://missing.local/v3/api-docs";

    const OLD: &str = r#"
openapi: 3.0.1
paths:
  /api/books: {get: {responses: {'200': {description: OK}}}}
  /api/authors: {get: {responses: {'200': {description: OK}}}}
"#;

    const NEW: &str = r#"
openapi: 3.0.1
paths:
  /api/books: {get: {responses: {'200': {description: OK}}}}
"#;

    fn uri(old: &str, new: &str) -> String {
        format!("/api/comparison/compare?old={}&new={}", old, new)
    }

    fn fetcher() -> web::Data<dyn DocumentFetcher + Send + Sync> {
        let fetcher: SharedFetcher = Arc::new(MemoryFetcher(HashMap::from([
            (OLD_URL, OLD),
            (NEW_URL, NEW),
            (SECRET_URL, "DB_PASSWORD=hunter2"),
        ])));
        web::Data::from(fetcher)
    }

    #[actix_web::test]
    async fn test_compare_returns_findings() {
        let app = test::init_service(App::new().app_data(fetcher()).configure(routes)).await;
        let req = test::TestRequest::get().uri(&uri(OLD_URL, NEW_URL)).to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            serde_json::json!([
                {"kind": "REMOVED_PATH", "entry": "ENDPOINT", "endpoint": "/api/authors GET"}
            ])
        );
    }

    #[actix_web::test]
    async fn test_error_statuses() {
        let app = test::init_service(App::new().app_data(fetcher()).configure(routes)).await;

        let req = test::TestRequest::get().uri(&uri(OLD_URL, MISSING_URL)).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

        let req = test::TestRequest::get().uri(&uri(SECRET_URL, OLD_URL)).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::get()
            .uri("/api/comparison/compare?old=only")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_error_body_omits_document_text() {
        let app = test::init_service(App::new().app_data(fetcher()).configure(routes)).await;
        let req = test::TestRequest::get().uri(&uri(SECRET_URL, OLD_URL)).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = test::read_body(res).await;
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("is not a valid OpenAPI document"));
        assert!(!body.contains("hunter2"));
    }

    #[actix_web::test]
    async fn test_local_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let secret = dir.path().join("secret.txt");
        fs::write(&secret, "DB_PASSWORD=hunter2").unwrap();
        let secret = secret.to_string_lossy().to_string();

        let data: SharedFetcher = Arc::new(FileFetcher);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(data))
                .configure(routes),
        )
        .await;

        for target in [secret.clone(), format!("file://{}", secret)] {
            let req = test::TestRequest::get().uri(&uri(&target, &target)).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);

            let body = test::read_body(res).await;
            assert!(!String::from_utf8_lossy(&body).contains("hunter2"));
        }
    }

    #[actix_web::test]
    async fn test_empty_locator_is_bad_request() {
        let app = test::init_service(App::new().app_data(fetcher()).configure(routes)).await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/comparison/compare?old=&new={}", NEW_URL))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_build_server_start_stop() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let server = build_server(listener, Arc::new(FileFetcher)).unwrap();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        handle.stop(true).await;
    }
}
