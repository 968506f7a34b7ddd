use std::rc::Rc;

use crate::app::{App, AppProps};
use crate::config::AppConfig;

mod app;
mod browser;
mod components;
mod config;
mod logging;
mod services;

fn main() {
    logging::init(log::LevelFilter::Info);
    let config = AppConfig::from_build_env();
    log::set_max_level(config.log_level);
    log::info!("apply page talking to {}", config.api_base_url);

    yew::Renderer::<App>::with_props(AppProps {
        config: Rc::new(config),
    })
    .render();
}
