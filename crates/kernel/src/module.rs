use async_trait::async_trait;
use axum::Router;
use sqlx::SqlitePool;

/// Context provided to modules during initialization and route construction.
///
/// The storage handle is passed explicitly here rather than living in a
/// process-wide global, so each module clones what it needs into its own
/// router state.
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
    pub db: &'a SqlitePool,
}

/// A single schema migration contributed by a module.
///
/// `up` must be one SQL statement; modules contribute one `Migration` per
/// statement and rely on `id` ordering within the module.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// Core trait every libris module implements.
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module; also the URL segment its routes are
    /// mounted under (`/api/{version}/{name}`).
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context.
    /// Called during application startup after migrations.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes.
    /// Routes are mounted once per API version.
    fn routes(&self, _ctx: &InitCtx<'_>) -> Router {
        Router::new()
    }

    /// Return OpenAPI specification fragment for this module as JSON.
    /// Will be merged with other modules' specs.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Return migrations contributed by this module.
    /// Migrations are executed in the order returned.
    fn migrations(&self) -> Vec<Migration> {
        vec![]
    }

    /// Start background tasks for this module.
    /// Called after init is complete for every module.
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stop the module and clean up resources.
    /// Called during application shutdown.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
