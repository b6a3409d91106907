use froodi::{async_impl::Container, async_registry, instance, registry, DefaultScope::App, Inject};
use reqwest::Client;
use telers::Bot;
use tracing::info;

use crate::{
    config::{BotConfig, Config, TikTokConfig, TimeoutsConfig, UsersConfig, YoutubeApiConfig},
    interactors::{DeliverPhotos, DeliverVideo, GetTikTokMedia, GetYoutubeStream, RegisterUser},
    services::{Ssstik, Tikwm},
    storage::UserStore,
};

pub(super) fn init(bot: Bot, config: Config) -> Container {
    let sync_registry = registry! {
        scope(App) [
            provide(instance(bot)),
            provide(instance(config.bot)),
            provide(instance(config.youtube_api)),
            provide(instance(config.tiktok)),
            provide(instance(config.users)),
            provide(instance(config.timeouts)),

            provide(|| Ok(Client::new())),

            provide(|
                Inject(client): Inject<Client>,
                Inject(youtube_api_cfg): Inject<YoutubeApiConfig>,
                Inject(timeouts_cfg): Inject<TimeoutsConfig>| Ok(GetYoutubeStream::new(client, youtube_api_cfg, timeouts_cfg))
            ),
            provide(|
                Inject(client): Inject<Client>,
                Inject(tiktok_cfg): Inject<TikTokConfig>,
                Inject(timeouts_cfg): Inject<TimeoutsConfig>| Ok(GetTikTokMedia::new(
                    Tikwm::new(client.clone(), tiktok_cfg.clone(), timeouts_cfg.clone()),
                    Ssstik::new(client, tiktok_cfg, timeouts_cfg),
                ))
            ),
            provide(|
                Inject(bot): Inject<Bot>,
                Inject(client): Inject<Client>,
                Inject(bot_cfg): Inject<BotConfig>,
                Inject(tiktok_cfg): Inject<TikTokConfig>,
                Inject(timeouts_cfg): Inject<TimeoutsConfig>| Ok(DeliverVideo::new(bot, client, bot_cfg, tiktok_cfg, timeouts_cfg))
            ),
            provide(|
                Inject(bot): Inject<Bot>,
                Inject(client): Inject<Client>,
                Inject(bot_cfg): Inject<BotConfig>,
                Inject(tiktok_cfg): Inject<TikTokConfig>,
                Inject(timeouts_cfg): Inject<TimeoutsConfig>| Ok(DeliverPhotos::new(bot, client, bot_cfg, tiktok_cfg, timeouts_cfg))
            ),
        ],
    };
    let registry_with_sync = async_registry! {
        provide(
            App,
            |Inject(users_cfg): Inject<UsersConfig>| async move {
                let store = UserStore::new(&*users_cfg.path);
                info!(path = %store.path().display(), count = store.load().await.len(), "User store opened");
                Ok(store)
            },
        ),
        provide(
            App,
            |Inject(store): Inject<UserStore>| async move { Ok(RegisterUser::new(store)) },
        ),
        extend(sync_registry),
    };

    Container::new(registry_with_sync)
}
