//! HTTP server for the solve endpoint.

use std::io::Read;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tiny_http::{Header, Response, Server, StatusCode};

use pour_solver::{Api, Config, MemoryCache, WaterJugService};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Address to listen on [default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on [default: 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Number of request threads (default: number of CPU cores)
    #[arg(short, long)]
    pub workers: Option<usize>,
}

pub fn execute(args: ServerArgs, config: &Config) -> Result<i32> {
    // CLI args take precedence over the config file
    let host = args
        .host
        .or_else(|| config.server.host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = args.port.or(config.server.port).unwrap_or(DEFAULT_PORT);
    let workers = match args.workers.or(config.server.workers).unwrap_or(0) {
        0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(4),
        n => n,
    };

    let addr = format!("{}:{}", host, port);
    let server = Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    let mut cache = MemoryCache::new(config.cache.ttl());
    cache.set_enabled(config.cache.enabled);
    let cache = Arc::new(cache);
    if cache.is_enabled() {
        spawn_cache_janitor(Arc::clone(&cache));
    }

    let service = Arc::new(WaterJugService::new(cache));
    let api = Arc::new(Api::new(service, config.limits.clone()));

    println!("pour server started at http://{} ({} workers)", addr, workers);
    println!("POST {} with {{\"XCapacity\", \"YCapacity\", \"ZAmountWanted\"}}", pour_solver::api::SOLVE_ROUTE);
    println!("Press Ctrl-C to quit.");

    serve(Arc::new(server), api, workers);
    Ok(0)
}

/// Answer requests on `workers` threads until the server shuts down
pub fn serve(server: Arc<Server>, api: Arc<Api>, workers: usize) {
    let handles: Vec<_> = (0..workers.max(1))
        .map(|_| {
            let server = Arc::clone(&server);
            let api = Arc::clone(&api);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    handle_request(&api, request);
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            log::error!("Server worker panicked");
        }
    }
}

/// Periodically drop expired solutions that are never looked up again
fn spawn_cache_janitor(cache: Arc<MemoryCache>) {
    let interval = cache.ttl().max(Duration::from_secs(1));
    thread::spawn(move || loop {
        thread::sleep(interval);
        cache.purge_expired();
    });
}

fn handle_request(api: &Api, mut request: tiny_http::Request) {
    let method = request.method().to_string();
    let url = request.url().to_string();

    let mut body = Vec::new();
    if let Err(e) = request.as_reader().read_to_end(&mut body) {
        log::warn!("Failed to read request body: {}", e);
        send_response(request, 400, r#"{"error":"Invalid request body"}"#.to_string(), &method, &url);
        return;
    }

    let response = api.handle(&method, &url, &body);
    send_response(request, response.status, response.body, &method, &url);
}

fn send_response(request: tiny_http::Request, status: u16, body: String, method: &str, url: &str) {
    let mut response = Response::from_string(body).with_status_code(StatusCode(status));
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response = response.with_header(header);
    }

    if let Err(e) = request.respond(response) {
        log::warn!("Failed to send response for {} {}: {}", method, url, e);
    }
    println!("{} {} - {}", method, url, status);
}
