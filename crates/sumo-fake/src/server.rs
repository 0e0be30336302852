use std::sync::Arc;
use std::thread;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::http::FieldsApi;

async fn handle(
    req: Request<Incoming>,
    api: Arc<FieldsApi>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let (parts, body) = req.into_parts();
    let body_bytes = body.collect().await?.to_bytes().to_vec();
    let http_resp = api.handle(Request::from_parts(parts, body_bytes));
    let (parts, body_bytes) = http_resp.into_parts();
    Ok(Response::from_parts(parts, Full::new(Bytes::from(body_bytes))))
}

/// Accepts connections until the listener fails.
pub async fn serve(listener: TcpListener, api: Arc<FieldsApi>) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "fake fields api listening");
    let http = http1::Builder::new();
    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let api = Arc::clone(&api);
        let conn = http.serve_connection(
            io,
            service_fn(move |req| {
                let api = Arc::clone(&api);
                handle(req, api)
            }),
        );
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                error!(%e, "connection error");
            }
        });
    }
}

/// Serves `api` on an ephemeral localhost port from a background thread and
/// returns the base URL (`http://127.0.0.1:<port>/api/`).
pub fn spawn(api: Arc<FieldsApi>) -> std::io::Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    listener.set_nonblocking(true)?;
    let addr = listener.local_addr()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::spawn(move || {
        runtime.block_on(async move {
            let listener = match TcpListener::from_std(listener) {
                Ok(l) => l,
                Err(e) => {
                    error!(%e, "failed to adopt listener");
                    return;
                }
            };
            if let Err(e) = serve(listener, api).await {
                error!(%e, "fake fields api stopped");
            }
        });
    });

    Ok(format!("http://{addr}/api/"))
}
