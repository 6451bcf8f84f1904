use crate::config::Config;
use crate::http::{album_cover, latest_album_cover};
use crate::services::now_playing::NowPlayingTracker;
use crate::services::presence::PresenceReconciler;
use crate::services::{CoverCache, CoverIdStore, DiscordPresenceClient, PlexClient};
use crate::translations::Translations;
use actix_rt::signal::unix;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use futures_lite::FutureExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

mod config;
mod http;
mod services;
mod translations;
mod types;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

enum Command {
    Shutdown,
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let mut terminate = unix::signal(unix::SignalKind::terminate())?;
    let mut interrupt = unix::signal(unix::SignalKind::interrupt())?;

    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Arc::from(Config::from_env());

    info!(version = VERSION, "Starting application...");

    let cover_cache = Arc::new(CoverCache::new());
    let cover_id_store = CoverIdStore::open(config.cover_id_file.clone())
        .await
        .expect("Unable to load the cover id store");
    let plex_client = PlexClient::create(
        &config.plex_url,
        &config.plex_token,
        &config.plex_username,
        config.platform_priority.clone(),
    );
    let presence_client = DiscordPresenceClient::connect(&config.discord_client_id)
        .expect("Unable to connect to Discord");

    let mut tracker = NowPlayingTracker::new(
        Arc::new(plex_client),
        cover_id_store,
        Arc::clone(&cover_cache),
        config.cover_size,
        config.cover_id_length,
    );
    let mut reconciler = PresenceReconciler::new(
        Arc::new(presence_client),
        Translations::for_language(&config.language),
        config.public_cover_url.clone(),
    );

    let server = HttpServer::new({
        let cover_cache = Arc::clone(&cover_cache);
        move || {
            App::new()
                .app_data(Data::new(Arc::clone(&cover_cache)))
                .service(web::resource("/album_cover").route(web::get().to(latest_album_cover)))
                .service(web::resource("/album_cover/{cover_id}").route(web::get().to(album_cover)))
        }
    })
    .shutdown_timeout(config.shutdown_timeout)
    .bind(&config.bind_address)?
    .run();

    let server_handle = server.handle();

    actix_rt::spawn({
        async move {
            if let Err(error) = server.await {
                error!(?error, "Error on http server");
            }
        }
    });

    let (commands, mut commands_rx) = tokio::sync::mpsc::channel::<Command>(1);

    actix_rt::spawn({
        async move {
            interrupt.recv().or(terminate.recv()).await;
            let _ = commands.send(Command::Shutdown).await;
        }
    });

    info!("Application started");

    let mut ticks = actix_rt::time::interval(Duration::from_secs(config.poll_interval.max(1)));

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                let snapshot = tracker.poll().await;
                reconciler.tick(snapshot).await;
            }
            command = commands_rx.recv() => {
                match command {
                    Some(Command::Shutdown) | None => break,
                }
            }
        }
    }

    info!("Received shutdown signal. Shutting down gracefully...");

    reconciler.shutdown().await;
    server_handle.stop(true).await;

    Ok(())
}
