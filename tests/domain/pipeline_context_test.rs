use std::collections::BTreeMap;

use tategaki::domain::{
    ContextError, EssayDraft, ExtractionResult, FailureKind, GroupName, GroupSwitchPolicy,
    PipelineContext,
};

fn ok_result(group: &str, text: &str) -> ExtractionResult {
    ExtractionResult::from_response(group.into(), text.to_string(), &[], &[])
}

fn context_with(results: Vec<ExtractionResult>) -> PipelineContext {
    let map: BTreeMap<GroupName, ExtractionResult> = results
        .into_iter()
        .map(|r| (r.group.clone(), r))
        .collect();
    PipelineContext::default().with_extractions(map)
}

fn drafted(context: PipelineContext, group: &str) -> PipelineContext {
    context
        .add_feedback("もっと具体的に")
        .with_draft(EssayDraft::new("草稿".to_string(), group.into(), None))
}

#[test]
fn given_fresh_extractions_when_applied_then_selects_first_usable_group() {
    let context = context_with(vec![
        ExtractionResult::failed("a".into(), FailureKind::Exhausted, "down"),
        ExtractionResult::empty("b".into()),
        ok_result("c", "本文"),
    ]);

    assert_eq!(context.selected, Some(GroupName::from("c")));
}

#[test]
fn given_clear_draft_policy_when_switching_group_then_draft_and_feedback_dropped() {
    let context = drafted(context_with(vec![ok_result("a", "一"), ok_result("b", "二")]), "a");

    let context = context
        .select_group("b".into(), GroupSwitchPolicy::ClearDraft)
        .unwrap();

    assert_eq!(context.selected, Some(GroupName::from("b")));
    assert!(context.draft.is_none());
    assert!(context.feedback.is_empty());
}

#[test]
fn given_keep_draft_policy_when_switching_group_then_draft_survives() {
    let context = drafted(context_with(vec![ok_result("a", "一"), ok_result("b", "二")]), "a");

    let context = context
        .select_group("b".into(), GroupSwitchPolicy::KeepDraft)
        .unwrap();

    assert!(context.draft.is_some());
    assert_eq!(context.feedback.len(), 1);
}

#[test]
fn given_same_group_when_reselecting_then_draft_kept() {
    let context = drafted(context_with(vec![ok_result("a", "一")]), "a");

    let context = context
        .select_group("a".into(), GroupSwitchPolicy::ClearDraft)
        .unwrap();

    assert!(context.draft.is_some());
}

#[test]
fn given_unknown_group_when_selecting_then_errors() {
    let context = context_with(vec![ok_result("a", "一")]);

    let err = context
        .select_group("zzz".into(), GroupSwitchPolicy::ClearDraft)
        .unwrap_err();

    assert_eq!(err, ContextError::UnknownGroup("zzz".into()));
}

#[test]
fn given_correction_when_reading_basis_then_correction_wins() {
    let context = context_with(vec![ok_result("a", "誤字のある本文")])
        .correct("a".into(), "直した本文".to_string())
        .unwrap();

    let (group, basis) = context.basis_text().unwrap();

    assert_eq!(group.as_str(), "a");
    assert_eq!(basis, "直した本文");
}

#[test]
fn given_new_extraction_run_when_applied_then_corrections_superseded() {
    let context = context_with(vec![ok_result("a", "古い")])
        .correct("a".into(), "修正".to_string())
        .unwrap();

    let mut rerun = BTreeMap::new();
    rerun.insert(GroupName::from("a"), ok_result("a", "新しい"));
    let context = context.with_extractions(rerun);

    assert!(context.corrections.is_empty());
    assert_eq!(context.basis_text().unwrap().1, "新しい");
}

#[test]
fn given_no_selection_when_reading_basis_then_errors() {
    assert_eq!(
        PipelineContext::default().basis_text().unwrap_err(),
        ContextError::NoSelection
    );
}

#[test]
fn given_blank_feedback_when_adding_then_ignored() {
    let context = PipelineContext::default().add_feedback("   ");
    assert!(context.feedback.is_empty());
}

#[test]
fn given_context_when_round_tripping_json_then_preserved() {
    let context = drafted(context_with(vec![ok_result("a", "一")]), "a");

    let json = serde_json::to_string(&context).unwrap();
    let back: PipelineContext = serde_json::from_str(&json).unwrap();

    assert_eq!(back, context);
}
