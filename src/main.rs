mod modules;

use anyhow::Context;
use libris_kernel::settings::Settings;
use libris_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load libris settings")?;

    libris_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.path,
        "libris bootstrap starting"
    );

    // Startup failures here are fatal; request-path failures never are.
    let pool = libris_db::connect(&settings.database)
        .await
        .with_context(|| "failed to connect database")?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    libris_db::apply_migrations(&pool, &registry.collect_migrations())
        .await
        .with_context(|| "failed to migrate database")?;

    let ctx = InitCtx {
        settings: &settings,
        db: &pool,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("libris bootstrap complete");

    libris_http::start_server(&registry, &ctx).await?;

    registry.stop_all().await?;

    Ok(())
}
