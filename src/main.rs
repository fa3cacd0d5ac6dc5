mod components;
mod error;
mod model;
mod state;
mod util;

use components::app::{App, AppProps};
use model::FeedConfig;

fn main() {
    console_error_panic_hook::set_once();
    util::init_logging(log::LevelFilter::Info);

    let config = FeedConfig::from_document().unwrap_or_else(|err| {
        log::warn!("falling back to default feed config: {err}");
        FeedConfig::default()
    });
    if let Some(level) = config.level_filter() {
        util::init_logging(level);
    }
    log::info!("rendering {} feed items from {}", config.count, config.image_base);

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
