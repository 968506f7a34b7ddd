use std::rc::Rc;

use web_sys::UrlSearchParams;
use yew::{html, Component, Context, Html, Properties};

use crate::components::apply::ApplyPage;
use crate::config::AppConfig;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<AppConfig>,
}

pub struct App {
    job: Option<String>,
}

impl Component for App {
    type Message = ();
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { job: job_param() }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="apply-root">
                <ApplyPage job={self.job.clone()} config={Rc::clone(&ctx.props().config)} />
            </div>
        }
    }
}

/// Raw `?job=` value of the current URL, untouched.
fn job_param() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()?.get("job")
}
