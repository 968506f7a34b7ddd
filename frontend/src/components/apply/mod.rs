//! Apply page: root module wiring the Yew `Component` implementation to its
//! state, update and view submodules.
//!
//! The question fetch starts as soon as the page is created. An unusable
//! `job` parameter never reaches the network; the page just shows why.
//! Leaving the page tears the integrity session down.

use std::rc::Rc;

use common::workflow::QuestionLoader;
use yew::platform::spawn_local;
use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::ApplyProps;
pub use state::ApplyPage;

impl Component for ApplyPage {
    type Message = Msg;
    type Properties = ApplyProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut page = ApplyPage::new(Rc::clone(&props.config));

        if let Ok(job) = page.controller.mount(props.job.as_deref()) {
            let link = ctx.link().clone();
            let jobs = Rc::clone(&page.jobs);
            spawn_local(async move {
                let outcome = QuestionLoader::new(jobs).fetch(job).await;
                link.send_message(Msg::QuestionsLoaded(outcome));
            });
        }
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.controller.teardown();
    }
}
