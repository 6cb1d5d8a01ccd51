mod routes;
mod static_files;

use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use ticklist_core::config::AppConfig;
use ticklist_core::services::TasksService;
use tiny_http::{Header, Method, Request, Response, Server};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

pub use routes::response::{ApiError, ApiReply, ApiResponse};
pub use routes::{handle, Context as RouteContext, Route};
pub use static_files::StaticFiles;

const MAX_BODY_BYTES: u64 = 64 * 1024;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Runtime configuration for the ticklist HTTP backend.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub data_dir: Option<PathBuf>,
    pub web_root: Option<PathBuf>,
    pub seed: bool,
    pub log_filter: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            data_dir: None,
            web_root: None,
            seed: false,
            log_filter: None,
        }
    }
}

/// Serve the task API until the process is stopped.
pub fn run_server(config: ServerConfig) -> Result<()> {
    init_tracing(config.log_filter.clone())?;

    let app_config =
        AppConfig::discover(config.data_dir.clone()).context("failed to resolve data directory")?;
    let service =
        TasksService::new(app_config.clone()).context("failed to initialize task service")?;
    if config.seed && service.seed_sample_tasks()? {
        tracing::info!("seeded sample tasks into empty store");
    }
    let static_files = config
        .web_root
        .as_ref()
        .map(|root| StaticFiles::new(root.clone()))
        .transpose()?;

    let server = Server::http(config.addr)
        .map_err(|err| anyhow!("failed to bind {}: {}", config.addr, err))?;

    eprintln!(
        "Starting ticklist-server v{} on http://{} (data dir: {})",
        env!("CARGO_PKG_VERSION"),
        config.addr,
        app_config.data_dir().display()
    );
    if let Some(files) = &static_files {
        tracing::info!(root = %files.root().display(), "serving static files");
    }

    let ctx = RouteContext {
        service,
        static_files,
    };
    for request in server.incoming_requests() {
        if let Err(err) = handle_request(&ctx, request) {
            tracing::warn!(error = %err, "failed to write response");
        }
    }
    Ok(())
}

pub fn init_tracing(filter: Option<String>) -> Result<()> {
    let filter = filter.unwrap_or_else(|| "info".to_string());
    let directive: Directive = filter.parse()?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
    Ok(())
}

fn handle_request(ctx: &RouteContext, mut request: Request) -> std::io::Result<()> {
    let route = Route::resolve(request.method(), request.url());
    tracing::debug!(method = %request.method(), url = request.url(), ?route, "request");

    let mut body = String::new();
    let reply = if matches!(
        request.method(),
        Method::Post | Method::Put | Method::Patch
    ) {
        match request
            .as_reader()
            .take(MAX_BODY_BYTES)
            .read_to_string(&mut body)
        {
            Ok(_) => handle(ctx, route, &body),
            Err(err) => ApiReply::error(&ApiError::BadRequest(format!(
                "unreadable request body: {}",
                err
            ))),
        }
    } else {
        handle(ctx, route, &body)
    };

    let mut response = Response::from_data(reply.body).with_status_code(reply.status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        response = response.with_header(header);
    }
    request.respond(response)
}
