//! A minimal router served directly on hyper connections.
//!
//! Routing is a matchit radix tree from path to [`Route`], then a plain
//! `match` on `(method, route)`. There is no middleware stack: authorization,
//! body limits and request logging happen inline in [`MinimalRouter::dispatch`].

use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use http::{Method, StatusCode, header};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Incoming};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use itemstore_persistence::core::ItemStore;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use super::{ITEM_PATH, ITEMS_PATH, ITEMS_SLASH_PATH};
use crate::auth::request_host;
use crate::error::{ErrorResponse, RestError, RestResult};
use crate::handlers::{HandlerResult, RequestContext};
use crate::middleware::ConditionalHeaders;
use crate::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What a path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/items` or `/items/`
    Collection,
    /// `/items/{id}`
    Member,
}

/// Router over the item handlers without a framework.
pub struct MinimalRouter<S> {
    state: AppState<S>,
    routes: matchit::Router<Route>,
}

impl<S> MinimalRouter<S>
where
    S: ItemStore + 'static,
{
    /// Builds the route table.
    pub fn new(state: AppState<S>) -> RestResult<Self> {
        let mut routes = matchit::Router::new();
        for (path, route) in [
            (ITEMS_PATH, Route::Collection),
            (ITEMS_SLASH_PATH, Route::Collection),
            (ITEM_PATH, Route::Member),
        ] {
            routes
                .insert(path, route)
                .map_err(|e| RestError::Internal(format!("invalid route {}: {}", path, e)))?;
        }

        Ok(Self { state, routes })
    }

    /// Returns the application state.
    pub fn state(&self) -> &AppState<S> {
        &self.state
    }

    /// Resolves a path and its `id` parameter.
    pub fn resolve<'p>(&self, path: &'p str) -> Option<(Route, Option<&'p str>)> {
        let matched = self.routes.at(path).ok()?;
        Some((*matched.value, matched.params.get("id")))
    }

    /// Handles one request.
    ///
    /// Never fails: every error is rendered as a uniform JSON error body.
    pub async fn dispatch<B>(&self, request: http::Request<B>) -> http::Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = request.into_parts();
        let ctx = RequestContext::from_uri(&parts.uri);

        info!(
            method = %parts.method,
            uri = %parts.uri,
            user_agent = parts
                .headers
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-"),
            "Request"
        );

        let host = request_host(&parts.headers, &parts.uri);
        let result = if !self.state.policy().is_authorized(&parts.headers, host) {
            Err(ctx.fail(StatusCode::UNAUTHORIZED, RestError::Unauthorized))
        } else {
            self.route(&ctx, &parts, body).await
        };

        let response = match result {
            Ok(ok) => ok.into_http(),
            Err(err) => err.into_http(),
        };

        debug!(
            status = response.status().as_u16(),
            content_type = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-"),
            "Response"
        );

        response
    }

    async fn route<B>(&self, ctx: &RequestContext, parts: &http::request::Parts, body: B) -> HandlerResult
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let handlers = self.state.handlers();
        let path = parts.uri.path();

        match (&parts.method, self.resolve(path)) {
            (&Method::GET, Some((Route::Collection, _))) => handlers.list(ctx).await,
            (&Method::POST, Some((Route::Collection, _))) => {
                let body = self.read_body(ctx, body).await?;
                handlers.create(ctx, &body).await
            }
            (&Method::GET, Some((Route::Member, Some(id)))) => handlers.get(ctx, id).await,
            (&Method::PUT, Some((Route::Member, Some(id)))) => {
                let conditional = ConditionalHeaders::from_headers(&parts.headers);
                // A missing If-Match answers 428 before the body is read.
                let Some(if_match) = conditional.if_match() else {
                    return handlers.update(ctx, id, None, &[]).await;
                };
                let body = self.read_body(ctx, body).await?;
                handlers.update(ctx, id, Some(if_match), &body).await
            }
            (&Method::DELETE, Some((Route::Member, Some(id)))) => handlers.delete(ctx, id).await,
            (method, _) => Err(ctx.fail(
                StatusCode::METHOD_NOT_ALLOWED,
                RestError::NoRoute {
                    method: method.to_string(),
                    path: path.to_string(),
                },
            )),
        }
    }

    async fn read_body<B>(&self, ctx: &RequestContext, body: B) -> Result<Bytes, ErrorResponse>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let limit = self.state.config().max_body_size;
        match Limited::new(body, limit).collect().await {
            Ok(collected) => Ok(collected.to_bytes()),
            Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(ctx.fail(
                StatusCode::PAYLOAD_TOO_LARGE,
                RestError::InvalidBody(format!("request body exceeds {} bytes", limit)),
            )),
            Err(e) => Err(ctx.fail(
                StatusCode::BAD_REQUEST,
                RestError::InvalidBody(format!("failed to read request body: {}", e)),
            )),
        }
    }

    /// Accepts connections until `shutdown` resolves, then drains in-flight
    /// connections before returning.
    ///
    /// Each connection runs on its own task and speaks HTTP/1.1 or HTTP/2,
    /// whichever the client negotiates.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()>,
    {
        let router = Arc::new(self);
        info!(addr = %listener.local_addr()?, "Minimal router listening");

        let mut tasks = tokio::task::JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "Draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, peer) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!(error = %e, "Accept failed");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        let svc = service_fn(move |req: http::Request<Incoming>| {
                            let router = Arc::clone(&router);
                            async move { Ok::<_, Infallible>(router.dispatch(req).await) }
                        });

                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %peer, error = %e, "Connection error");
                        }
                    });
                }

                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("Minimal router stopped");
        Ok(())
    }
}
