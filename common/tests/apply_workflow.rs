mod support;

use common::model::attachment::Attachment;
use common::model::question::Answer;
use common::requests::{FIELD_ANSWERS_JSON, FormPart};
use common::workflow::{
    AmbientEvent, ClipboardAction, KeyCombo, QuestionLoader, ServiceError, ValidationError,
    WorkflowError, WorkflowState,
};
use futures::executor::block_on;

use support::*;

const QUESTIONS: [&str; 2] = [
    "Question 1: Describe a system you designed end to end.",
    "Question 2: How do you approach code review?",
];

fn answers_json_of(parts: &[FormPart<'_>]) -> Vec<Answer> {
    let json = parts
        .iter()
        .find_map(|part| match part {
            FormPart::Text { name, value } if *name == FIELD_ANSWERS_JSON => Some(value.clone()),
            _ => None,
        })
        .expect("answers_json field present");
    serde_json::from_str(&json).expect("answers_json is a JSON array")
}

#[test]
fn scenario_a_full_submission_reaches_submitted() {
    init_logging();
    let page = RecordingDocument::titled("Apply to Job #42");
    let jobs = FakeJobs::with_questions(&QUESTIONS);
    let evaluator = FakeEvaluator::answering(vec![Ok(evaluation(
        "Final Score: 78\nHR Summary: Solid experience, clear answers.",
    ))]);
    let mut workflow = controller(&page);

    block_on(workflow.load(&QuestionLoader::new(&jobs), Some("42"))).expect("questions load");
    assert_eq!(workflow.state(), WorkflowState::Ready);
    assert!(workflow.is_integrity_active());

    workflow.set_name("Jane Doe").expect("editable");
    workflow.set_email("jane@x.com").expect("editable");
    workflow.set_file(resume_pdf()).expect("editable");
    workflow.set_answer(0, "A payments ledger in Rust.").expect("in range");
    workflow.set_answer(1, "Small diffs, fast feedback.").expect("in range");

    let result = block_on(workflow.submit(&evaluator)).expect("evaluation");
    assert_eq!(result.score, Some(7.8));
    assert_eq!(workflow.state(), WorkflowState::Submitted);

    let calls = evaluator.received();
    assert_eq!(calls.len(), 1);
    let parts = calls[0].form_parts().expect("form parts");
    let answers = answers_json_of(&parts);
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0].question, QUESTIONS[0]);
    assert_eq!(answers[1].answer, "Small diffs, fast feedback.");
    assert_eq!(calls[0].profile.name, "Jane Doe");
    assert_eq!(calls[0].job_id.get(), 42);
}

#[test]
fn scenario_b_zero_job_id_makes_no_calls() {
    init_logging();
    let page = RecordingDocument::titled("Apply");
    let jobs = FakeJobs::with_questions(&QUESTIONS);
    let evaluator = FakeEvaluator::default();
    let mut workflow = controller(&page);

    let outcome = block_on(workflow.load(&QuestionLoader::new(&jobs), Some("0")));
    assert!(matches!(outcome, Err(WorkflowError::InvalidJob { .. })));
    assert_eq!(workflow.state(), WorkflowState::InvalidJob);

    assert!(block_on(workflow.submit(&evaluator)).is_err());
    assert_eq!(jobs.calls(), 0);
    assert!(evaluator.received().is_empty());
    assert_eq!(page.attached(), 0);
}

#[test]
fn scenario_c_missing_attachment_blocks_the_call() {
    init_logging();
    let page = RecordingDocument::titled("Apply");
    let jobs = FakeJobs::with_questions(&QUESTIONS);
    let evaluator = FakeEvaluator::default();
    let mut workflow = controller(&page);
    block_on(workflow.load(&QuestionLoader::new(&jobs), Some("42"))).expect("questions load");

    let combos = [("", ""), ("Jane Doe", ""), ("", "jane@x.com"), ("Jane Doe", "jane@x.com")];
    for (name, email) in combos {
        workflow.set_name(name).expect("editable");
        workflow.set_email(email).expect("editable");
        workflow.set_answer(0, "something").expect("in range");

        let outcome = block_on(workflow.submit(&evaluator));
        assert!(matches!(
            outcome,
            Err(WorkflowError::Validation(ValidationError::MissingAttachment))
        ));
        assert_eq!(workflow.state(), WorkflowState::Ready);
    }
    assert!(evaluator.received().is_empty());
    assert_eq!(page.alerts().len(), combos.len());
}

#[test]
fn scenario_d_rejected_call_keeps_input_and_retry_sends_once() {
    init_logging();
    let page = RecordingDocument::titled("Apply");
    let jobs = FakeJobs::with_questions(&QUESTIONS);
    let evaluator = FakeEvaluator::answering(vec![
        Err(ServiceError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        }),
        Ok(evaluation("Final Score: 55")),
    ]);
    let mut workflow = controller(&page);
    block_on(workflow.load(&QuestionLoader::new(&jobs), Some("42"))).expect("questions load");
    workflow.set_name("Jane Doe").expect("editable");
    workflow.set_email("jane@x.com").expect("editable");
    workflow.set_file(resume_pdf()).expect("editable");
    workflow.set_answer(1, "second answer").expect("in range");

    let first = block_on(workflow.submit(&evaluator));
    assert!(matches!(first, Err(WorkflowError::Submission(_))));
    assert_eq!(workflow.state(), WorkflowState::Ready);
    assert!(workflow.is_integrity_active());
    assert_eq!(workflow.profile().name, "Jane Doe");
    assert_eq!(workflow.profile().email, "jane@x.com");
    assert_eq!(
        workflow.attachment().current().map(|a| a.name.as_str()),
        Some("resume.pdf")
    );
    assert_eq!(
        workflow.answers().get(1).map(|a| a.answer.as_str()),
        Some("second answer")
    );
    assert_eq!(evaluator.received().len(), 1);
    assert_eq!(page.alerts().len(), 1);

    block_on(workflow.submit(&evaluator)).expect("retry succeeds");
    let calls = evaluator.received();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    assert_eq!(workflow.state(), WorkflowState::Submitted);
}

#[test]
fn load_failure_leaves_workflow_in_failed_state() {
    init_logging();
    let page = RecordingDocument::titled("Apply");
    let jobs = FakeJobs::failing(ServiceError::Status {
        status: 404,
        body: r#"{"detail":"Job not found"}"#.to_string(),
    });
    let mut workflow = controller(&page);

    let outcome = block_on(workflow.load(&QuestionLoader::new(&jobs), Some("999")));
    assert!(matches!(outcome, Err(WorkflowError::QuestionLoad { .. })));
    assert_eq!(workflow.state(), WorkflowState::LoadFailed);
    assert_eq!(jobs.calls(), 1);
    assert_eq!(page.attached(), 0);
    assert_eq!(page.alerts().len(), 1);
}

#[test]
fn answers_match_questions_for_any_question_count() {
    init_logging();
    for count in 0..6 {
        let texts: Vec<String> = (1..=count).map(|i| format!("Question {i}: q{i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let jobs = FakeJobs::with_questions(&refs);
        let page = RecordingDocument::titled("Apply");
        let evaluator = FakeEvaluator::answering(vec![Ok(evaluation("Final Score: 5"))]);
        let mut workflow = controller(&page);

        block_on(workflow.load(&QuestionLoader::new(&jobs), Some("3"))).expect("questions load");
        assert_eq!(workflow.answers().len(), count);
        assert!(workflow.answers().as_slice().iter().all(|a| a.answer.is_empty()));

        workflow.set_name("A").expect("editable");
        workflow.set_email("a@b.c").expect("editable");
        workflow
            .set_file(Attachment::new("notes.txt", b"plain".to_vec(), None))
            .expect("editable");
        block_on(workflow.submit(&evaluator)).expect("submitted");

        let sent = evaluator.received();
        let parts = sent[0].form_parts().expect("form parts");
        let questions: Vec<String> = answers_json_of(&parts).into_iter().map(|a| a.question).collect();
        assert_eq!(questions, texts);
    }
}

#[test]
fn observers_live_exactly_between_ready_and_submitted() {
    init_logging();
    let page = RecordingDocument::titled("Apply to Job #42");
    let jobs = FakeJobs::with_questions(&QUESTIONS);
    let evaluator = FakeEvaluator::answering(vec![Ok(evaluation("Final Score: 9"))]);
    let mut workflow = controller(&page);
    block_on(workflow.load(&QuestionLoader::new(&jobs), Some("42"))).expect("questions load");

    assert!(page.fire(&AmbientEvent::Clipboard(ClipboardAction::Copy)));
    assert!(page.fire(&AmbientEvent::KeyDown(KeyCombo::ctrl("t"))));
    assert!(page.fire(&AmbientEvent::ContextMenu));
    assert!(!page.fire(&AmbientEvent::KeyDown(KeyCombo::plain("a"))));
    page.fire(&AmbientEvent::VisibilityChanged { hidden: true });
    assert_eq!(page.current_title(), "⚠ Return to your application");
    let warnings_before_submit = page.alerts().len();
    assert_eq!(warnings_before_submit, 4);

    workflow.set_name("Jane Doe").expect("editable");
    workflow.set_email("jane@x.com").expect("editable");
    workflow.set_file(resume_pdf()).expect("editable");
    block_on(workflow.submit(&evaluator)).expect("submitted");

    assert_eq!(page.attached(), 1);
    assert_eq!(page.detached(), 1);
    assert_eq!(page.current_title(), "Application submitted");

    assert!(!page.fire(&AmbientEvent::Clipboard(ClipboardAction::Paste)));
    assert!(!page.fire(&AmbientEvent::KeyDown(KeyCombo::plain("F5"))));
    page.fire(&AmbientEvent::VisibilityChanged { hidden: true });
    assert_eq!(page.alerts().len(), warnings_before_submit);
    assert_eq!(page.current_title(), "Application submitted");

    drop(workflow);
    assert_eq!(page.detached(), 1);
}

#[test]
fn teardown_before_submission_deregisters_once() {
    init_logging();
    let page = RecordingDocument::titled("Apply");
    let jobs = FakeJobs::with_questions(&QUESTIONS);
    {
        let mut workflow = controller(&page);
        block_on(workflow.load(&QuestionLoader::new(&jobs), Some("42"))).expect("questions load");
        page.fire(&AmbientEvent::VisibilityChanged { hidden: true });
        workflow.teardown();
    }
    assert_eq!(page.attached(), 1);
    assert_eq!(page.detached(), 1);
    assert_eq!(page.current_title(), "Apply");
}
