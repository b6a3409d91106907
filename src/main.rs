mod config;
mod di_container;
mod entities;
mod filters;
mod handlers;
mod handlers_utils;
mod interactors;
mod middlewares;
mod models;
mod services;
mod storage;
mod texts;
mod utils;

use config::{Config, ParseError};
use filters::{text_contains_link, text_is_not_command};
use handlers::{link, start, unrecognized};
use middlewares::ContainerMiddleware;
use std::{io, process};
use telers::{
    enums::ContentType as ContentTypeEnum,
    event::ToServiceProvider as _,
    filters::{Command, ContentType},
    Bot, Dispatcher, Router,
};
use tracing::{event, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Error reading .env file: {err}");
            process::exit(1);
        }
    }

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("LOGGING_LEVEL"))
        .init();

    let config_path = config::get_path();
    let config = match config::parse_from_fs(&*config_path) {
        Ok(config) => {
            event!(Level::DEBUG, path = %config_path, "Config loaded");
            config
        }
        Err(ParseError::IO(err)) if err.kind() == io::ErrorKind::NotFound => {
            event!(Level::INFO, path = %config_path, "Config file not found, defaults are used");
            Config::default()
        }
        Err(err) => {
            event!(Level::ERROR, %err, path = %config_path, "Parse config err");
            process::exit(1);
        }
    };
    let config = match config.with_secrets_from_env() {
        Ok(config) => config,
        Err(err) => {
            event!(Level::ERROR, %err, "Read secrets err");
            process::exit(1);
        }
    };
    if config.youtube_api.key.is_none() {
        event!(Level::WARN, "Data-provider key isn't set, YouTube links will fail with the provider's status");
    }

    let bot = Bot::new(&*config.bot.token);
    let container = di_container::init(bot.clone(), config);

    let mut router = Router::new("main");
    router
        .message
        .inner_middlewares
        .register(ContainerMiddleware::new(container.clone()));

    router.message.register(start).filter(Command::many(["start"]));
    router
        .message
        .register(link)
        .filter(ContentType::one(ContentTypeEnum::Text))
        .filter(text_is_not_command)
        .filter(text_contains_link);
    router
        .message
        .register(unrecognized)
        .filter(ContentType::one(ContentTypeEnum::Text))
        .filter(text_is_not_command);

    let dispatcher = Dispatcher::builder()
        .allowed_updates(router.resolve_used_update_types())
        .main_router(router)
        .bot(bot)
        .build();

    match dispatcher.to_service_provider_default() {
        Ok(service) => match service.run_polling().await {
            Ok(()) => {
                event!(Level::INFO, "Bot stopped");
            }
            Err(err) => {
                event!(Level::ERROR, error = %err, "Bot stopped");
            }
        },
        Err(err) => {
            event!(Level::ERROR, error = %err, "Create dispatcher service err");
        }
    }

    container.close().await;
}
