//! Router builder for the libris HTTP server.

use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use libris_kernel::ModuleRegistry;

/// API version prefixes every module is mounted under. Both versions resolve
/// to the same handler set; versioning is purely a routing-table concern.
pub const API_VERSIONS: &[&str] = &["v1", "v2"];

/// Builder for constructing the main HTTP router.
///
/// Middleware requests are recorded and only applied in [`build`], after
/// every route is mounted: axum's `Router::layer` wraps only the routes
/// already present, so layering an empty router would cover nothing.
///
/// [`build`]: RouterBuilder::build
pub struct RouterBuilder {
    router: Router,
    tracing: bool,
    cors: bool,
    request_id: bool,
    timeout_ms: Option<u64>,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            tracing: false,
            cors: false,
            request_id: false,
            timeout_ms: None,
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under `/api/{version}/{module_name}` for
    /// every known API version.
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        for version in API_VERSIONS {
            let api_path = format!("/api/{}/{}", version, module_name);
            self.router = self.router.nest(&api_path, module_router.clone());
        }
        self
    }

    /// Request tracing middleware, applied to all routes at build time
    pub fn with_tracing(mut self) -> Self {
        self.tracing = true;
        self
    }

    /// Permissive CORS middleware, applied to all routes at build time
    pub fn with_cors(mut self) -> Self {
        self.cors = true;
        self
    }

    /// Request ID middleware, applied to all routes at build time
    pub fn with_request_id(mut self) -> Self {
        self.request_id = true;
        self
    }

    /// Timeout middleware, applied to all routes at build time
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Serve static files from `dir` for any path no API route claims
    pub fn with_static_files(mut self, dir: &str) -> Self {
        self.router = self.router.fallback_service(ServeDir::new(dir));
        self
    }

    /// Add OpenAPI documentation by collecting specs from all modules
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let mut openapi_spec = serde_json::json!({
            "openapi": "3.0.0",
            "info": {
                "title": "libris API",
                "version": "1.0.0",
                "description": "Book CRUD service over versioned HTTP APIs"
            },
            "paths": {},
            "components": {
                "schemas": {}
            }
        });

        // Collect OpenAPI fragments from all modules; module paths are
        // registered once per API version prefix.
        for module in registry.modules() {
            let Some(module_spec) = module.openapi() else {
                continue;
            };

            if let Some(paths) = module_spec.get("paths").and_then(|p| p.as_object()) {
                for (path, path_item) in paths {
                    let suffix = if path == "/" { "" } else { path.as_str() };
                    for version in API_VERSIONS {
                        let prefixed =
                            format!("/api/{}/{}{}", version, module.name(), suffix);
                        openapi_spec["paths"][prefixed] = path_item.clone();
                    }
                }
            }

            if let Some(schemas) = module_spec
                .pointer("/components/schemas")
                .and_then(|s| s.as_object())
            {
                for (schema_name, schema_def) in schemas {
                    openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
                }
            }
        }

        let openapi_obj: utoipa::openapi::OpenApi = serde_json::from_value(openapi_spec.clone())
            .unwrap_or_else(|_| {
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title("libris API")
                            .version("1.0.0")
                            .build(),
                    )
                    .build()
            });

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi_obj),
        );

        // Also serve the raw JSON spec for external consumers.
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
        );

        self
    }

    /// Build the final router, wrapping every mounted route in the
    /// requested middleware.
    pub fn build(self) -> Router {
        let mut router = self.router;

        // Successive `layer` calls nest outward, so tracing ends up
        // outermost and sees every request.
        if let Some(timeout_ms) = self.timeout_ms {
            router = router.layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        }

        if self.request_id {
            router = router.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        }

        if self.cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.tracing {
            router = router.layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                    .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
            );
        }

        router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
