use std::path::Path;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod manifest;
mod resolver;
mod server;
mod stamp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, sizing the thread pool from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::bind_listener(addr)?;
    let state = Arc::new(config::AppState::new(&cfg));

    run_build_tasks(&cfg);

    if state.resolver.mounts().rules().is_empty() {
        logger::log_warning("No mounts configured; only the manifest route will be served");
    }

    logger::log_server_start(&addr, &state);

    server::serve(listener, state).await?;
    Ok(())
}

/// Startup integration with the build output: version stamp and manifest
/// emission. Failures warn and the server starts anyway.
fn run_build_tasks(cfg: &config::Config) {
    let build = &cfg.build;
    let output_dir = Path::new(&build.output_dir);

    if build.stamp_version {
        let version = stamp::app_version(build);
        match stamp::write_version_file(output_dir, &version) {
            Ok(path) => logger::log_version_stamped(&path, &version),
            Err(e) => logger::log_warning(&format!(
                "Could not write {}: {e}",
                output_dir.join(stamp::VERSION_FILE).display()
            )),
        }
    }

    if build.emit_manifest {
        if cfg.manifest.enabled {
            let rendered = manifest::WebManifest::from_config(&cfg.manifest);
            match rendered.write_to(output_dir, &cfg.manifest.route) {
                Ok(path) => logger::log_manifest_emitted(&path),
                Err(e) => logger::log_warning(&format!("Could not write manifest: {e}")),
            }
        } else {
            logger::log_warning("emit_manifest is set but the manifest is disabled");
        }
    }
}
