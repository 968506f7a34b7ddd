//! Properties of the apply page.

use std::rc::Rc;

use yew::prelude::*;

use crate::config::AppConfig;

#[derive(Properties, PartialEq, Clone)]
pub struct ApplyProps {
    /// Raw `job` query parameter. Parsed (and possibly rejected) once, when
    /// the page is created; later changes are ignored.
    #[prop_or_default]
    pub job: Option<String>,

    pub config: Rc<AppConfig>,
}
