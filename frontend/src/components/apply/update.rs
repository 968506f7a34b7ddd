//! Update function for the apply page, Elm style: apply `msg` to the state
//! and return whether the view must re-render.
//!
//! Network calls and file reads run in `spawn_local` tasks that report back
//! with another message. All workflow rules (locking, validation, alerts,
//! integrity session) are enforced by the controller; this module only
//! moves data between the DOM and it.

use std::rc::Rc;

use common::model::attachment::Attachment;
use common::workflow::{EvaluationService, ReadTicket};
use gloo_file::futures::read_as_bytes;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::{escape_html, format_size, show_toast};
use super::messages::Msg;
use super::state::ApplyPage;

pub fn update(page: &mut ApplyPage, ctx: &Context<ApplyPage>, msg: Msg) -> bool {
    let controller = &mut page.controller;
    match msg {
        Msg::QuestionsLoaded(outcome) => {
            if let Err(err) = controller.questions_loaded(outcome) {
                log::error!("apply page unusable: {}", err);
            }
            true
        }
        Msg::SetAnswer(index, text) => {
            if let Err(err) = controller.set_answer(index, text) {
                log::warn!("{}", err);
            }
            true
        }
        Msg::SetName(name) => {
            if let Err(err) = controller.set_name(name) {
                log::warn!("{}", err);
            }
            true
        }
        Msg::SetEmail(email) => {
            if let Err(err) = controller.set_email(email) {
                log::warn!("{}", err);
            }
            true
        }
        Msg::OpenFilePicker => {
            if let Some(input) = page.file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FileSelected(file) => match controller.begin_file_read() {
            Ok(ticket) => {
                page.reading = Some(file.name());
                read_file(ctx, ticket, file);
                true
            }
            Err(err) => {
                log::warn!("{}", err);
                false
            }
        },
        Msg::FileRead { ticket, attachment } => {
            let summary = format!(
                "Attached {} ({})",
                escape_html(&attachment.name),
                format_size(attachment.size())
            );
            match controller.complete_file_read(ticket, attachment) {
                Ok(true) => {
                    page.reading = None;
                    show_toast(&summary);
                }
                Ok(false) => {}
                Err(err) => {
                    page.reading = None;
                    log::warn!("{}", err);
                }
            }
            true
        }
        Msg::FileReadFailed { ticket, name, reason } => {
            log::error!("reading {} failed: {}", name, reason);
            if !controller.file_read_failed(ticket) {
                return false;
            }
            page.reading = None;
            show_toast(&format!("Could not read {}", escape_html(&name)));
            true
        }
        Msg::DragEnter => {
            controller.drag_enter();
            true
        }
        Msg::DragOver => {
            let was_active = controller.attachment().is_drag_active();
            controller.drag_over();
            !was_active
        }
        Msg::DragLeave => {
            controller.drag_leave();
            true
        }
        Msg::Dropped(file) => {
            match (controller.drop_file(file.is_some()), file) {
                (Ok(Some(ticket)), Some(file)) => {
                    page.reading = Some(file.name());
                    read_file(ctx, ticket, file);
                }
                (Err(err), _) => log::warn!("{}", err),
                _ => {}
            }
            true
        }
        Msg::Submit => {
            if let Ok(submission) = controller.begin_submit() {
                let link = ctx.link().clone();
                let evaluator = Rc::clone(&page.evaluator);
                spawn_local(async move {
                    let outcome = evaluator.evaluate(&submission).await;
                    link.send_message(Msg::SubmitFinished(outcome));
                });
            }
            true
        }
        Msg::SubmitFinished(outcome) => {
            if let Ok(result) = controller.finish_submit(outcome) {
                show_toast(&format!("Application received: {}", result.band().label()));
            }
            true
        }
    }
}

/// Reads `file` in the background and reports back under `ticket`.
fn read_file(ctx: &Context<ApplyPage>, ticket: ReadTicket, file: web_sys::File) {
    let link = ctx.link().clone();
    let name = file.name();
    let media_type = file.type_();
    let file = gloo_file::File::from(file);
    spawn_local(async move {
        match read_as_bytes(&file).await {
            Ok(bytes) => link.send_message(Msg::FileRead {
                ticket,
                attachment: Attachment::new(name, bytes, Some(&media_type)),
            }),
            Err(err) => link.send_message(Msg::FileReadFailed {
                ticket,
                name,
                reason: err.to_string(),
            }),
        }
    });
}
