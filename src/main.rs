use std::io::Error;
use std::sync::Arc;

use messaging_broadcast::{
    application::{
        services::messenger::MessengerClient, usecases::start_broadcast::StartBroadcastUseCase,
    },
    config::Config,
    infrastructure::messaging::telegram::TelegramClient,
    presentation::http::{build_app, endpoints::root::ApiState},
};
use poem::{Server, listener::TcpListener};
use tokio::main;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::try_parse().map_err(Error::other)?;

    let server_url = format!("{}://{}:{}", config.scheme, config.host, config.port);

    let client: Option<Arc<dyn MessengerClient>> = match &config.telegram_bot_token {
        Some(token) => Some(Arc::new(
            TelegramClient::new(&config.telegram_api_base, token).map_err(Error::other)?,
        )),
        None => {
            warn!("TELEGRAM_BOT_TOKEN is not set, broadcasts will be rejected");
            None
        }
    };

    let state = Arc::new(ApiState {
        start_broadcast_usecase: Arc::new(StartBroadcastUseCase::new(client, config.broadcast())),
    });

    info!(%server_url, batch_size = config.batch_size, "starting server");

    Server::new(TcpListener::bind(format!("{}:{}", config.host, config.port)))
        .run(build_app(state, &server_url))
        .await
}
