//! View rendering for the apply page.
//!
//! One screen per workflow state: a static notice for a missing job, a
//! spinner while questions load, the form (kept on screen while submitting,
//! with every input disabled) and finally the evaluation panel.

use common::model::attachment::{ResumeKind, ACCEPTED_EXTENSIONS};
use common::model::evaluation::EvaluationResult;
use common::workflow::WorkflowState;
use web_sys::{DragEvent, HtmlInputElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::{format_score, format_size, render_evaluation};
use super::messages::Msg;
use super::state::ApplyPage;

pub fn view(page: &ApplyPage, ctx: &Context<ApplyPage>) -> Html {
    let link = ctx.link();
    let controller = &page.controller;

    match controller.state() {
        WorkflowState::InvalidJob => notice(
            "No job selected",
            &controller
                .last_error()
                .map(ToString::to_string)
                .unwrap_or_default(),
        ),
        WorkflowState::Idle | WorkflowState::Loading => html! {
            <div class="apply-loading">{"Loading questions…"}</div>
        },
        WorkflowState::LoadFailed => notice(
            "Questions unavailable",
            &format!(
                "{} Reload the page to try again.",
                controller
                    .last_error()
                    .map(ToString::to_string)
                    .unwrap_or_default()
            ),
        ),
        WorkflowState::Ready | WorkflowState::Validating | WorkflowState::Submitting => {
            build_form(page, link)
        }
        WorkflowState::Submitted => match controller.result() {
            Some(result) => build_result(result),
            None => notice("Application submitted", ""),
        },
    }
}

fn notice(title: &str, body: &str) -> Html {
    html! {
        <div class="apply-notice">
            <h2>{ title.to_string() }</h2>
            <p>{ body.to_string() }</p>
        </div>
    }
}

fn build_form(page: &ApplyPage, link: &Scope<ApplyPage>) -> Html {
    let controller = &page.controller;
    let editable = page.editable();
    let submitting = controller.state() == WorkflowState::Submitting;
    let job = controller.job().map(|job| job.to_string()).unwrap_or_default();

    html! {
        <div class="apply-form">
            <h2>{ format!("Apply to Job #{}", job) }</h2>
            { build_integrity_banner() }
            { build_profile_fields(page, link, editable) }
            { build_questions(page, link, editable) }
            { build_drop_zone(page, link, editable) }
            <button
                class="submit-btn"
                disabled={!controller.can_submit()}
                onclick={link.callback(|_| Msg::Submit)}
            >
                { if submitting { "Submitting…" } else { "Submit application" } }
            </button>
        </div>
    }
}

fn build_integrity_banner() -> Html {
    html! {
        <div class="integrity-banner">
            <i class="material-icons">{"visibility"}</i>
            <span>
                {"Please stay on this page until you submit. Copy, paste, right-click and tab shortcuts are disabled."}
            </span>
        </div>
    }
}

fn build_profile_fields(page: &ApplyPage, link: &Scope<ApplyPage>, editable: bool) -> Html {
    let profile = page.controller.profile();
    html! {
        <div class="profile-fields">
            <label>
                {"Full name"}
                <input
                    type="text"
                    value={profile.name.clone()}
                    disabled={!editable}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetName(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </label>
            <label>
                {"Email"}
                <input
                    type="email"
                    value={profile.email.clone()}
                    disabled={!editable}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetEmail(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </label>
        </div>
    }
}

fn build_questions(page: &ApplyPage, link: &Scope<ApplyPage>, editable: bool) -> Html {
    let controller = &page.controller;
    let items = controller
        .questions()
        .iter()
        .map(|question| {
            let index = question.position;
            let answer = controller
                .answers()
                .get(index)
                .map(|a| a.answer.clone())
                .unwrap_or_default();
            html! {
                <div class="question" key={index}>
                    <p class="question-text">{ question.text.clone() }</p>
                    <textarea
                        rows={4}
                        value={answer}
                        disabled={!editable}
                        oninput={link.callback(move |e: InputEvent| {
                            Msg::SetAnswer(index, e.target_unchecked_into::<HtmlTextAreaElement>().value())
                        })}
                    />
                </div>
            }
        })
        .collect::<Html>();

    html! { <div class="questions">{ items }</div> }
}

fn build_drop_zone(page: &ApplyPage, link: &Scope<ApplyPage>, editable: bool) -> Html {
    let attachment = page.controller.attachment();
    let class = classes!(
        "drop-zone",
        attachment.is_drag_active().then_some("active"),
        (!editable).then_some("disabled")
    );

    let selected = match (&page.reading, attachment.current()) {
        (Some(name), _) => html! { <p class="file-info">{ format!("Reading {}…", name) }</p> },
        (None, Some(file)) => {
            let hint = match file.kind() {
                ResumeKind::Other => " (not a PDF or DOCX, it will be sent as is)",
                _ => "",
            };
            html! {
                <p class="file-info">
                    <i class="material-icons">{"description"}</i>
                    { format!("{} · {}{}", file.name, format_size(file.size()), hint) }
                </p>
            }
        }
        (None, None) => html! { <p class="file-info">{"No file selected"}</p> },
    };

    html! {
        <div
            class={class}
            ondragenter={link.callback(|e: DragEvent| {
                e.prevent_default();
                Msg::DragEnter
            })}
            ondragover={link.callback(|e: DragEvent| {
                e.prevent_default();
                Msg::DragOver
            })}
            ondragleave={link.callback(|_: DragEvent| Msg::DragLeave)}
            ondrop={link.callback(|e: DragEvent| {
                e.prevent_default();
                let file = e
                    .data_transfer()
                    .and_then(|transfer| transfer.files())
                    .and_then(|files| files.get(0));
                Msg::Dropped(file)
            })}
        >
            <p>{"Drag your résumé here (PDF or DOCX) or"}</p>
            <button
                type="button"
                class="icon-btn"
                disabled={!editable}
                onclick={link.callback(|_| Msg::OpenFilePicker)}
            >
                <i class="material-icons">{"upload_file"}</i>
                <span class="icon-label">{"Choose file"}</span>
            </button>
            <input
                type="file"
                ref={page.file_input_ref.clone()}
                accept={ACCEPTED_EXTENSIONS}
                style="display: none;"
                onchange={link.batch_callback(|e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    let file = input.files().and_then(|files| files.get(0));
                    input.set_value("");
                    file.map(Msg::FileSelected).into_iter().collect::<Vec<_>>()
                })}
            />
            { selected }
        </div>
    }
}

fn build_result(result: &EvaluationResult) -> Html {
    let band = result.band();
    html! {
        <div class="apply-result">
            <h2>{"Application submitted"}</h2>
            {
                match result.application_id {
                    Some(id) => html! { <p class="application-id">{ format!("Reference #{}", id) }</p> },
                    None => html! {},
                }
            }
            <div class={classes!("score-badge", band.css_class())}>
                <span class="score-value">{ format_score(result.score) }</span>
                <span class="score-label">{ band.label() }</span>
            </div>
            <div class="evaluation-text">
                { Html::from_html_unchecked(render_evaluation(&result.evaluation_text)) }
            </div>
        </div>
    }
}
