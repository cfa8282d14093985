use chrono::Duration;
use kawaraban_core::application::{
    commands::{
        assignments::{
            CreateAssignmentCommand, DeleteAssignmentCommand, DeleteAssignmentsForPersonCommand,
            DistributeAssignmentCommand, LinkSubmissionCommand,
        },
        issues::ResolveIssueCommand,
    },
    queries::assignments::{ActiveAssignmentQuery, AssignmentsByIssueQuery, RotationHistoryQuery},
    services::ServiceSettings,
};
use kawaraban_core::domain::{
    assignment::{PersonId, RotationHistoryEntry},
    category::ContentCategory,
    issue::CycleKey,
};
use std::sync::atomic::Ordering;

mod support;

async fn current_issue_id(h: &support::Harness) -> i64 {
    h.services
        .issue_commands
        .resolve_current_issue()
        .await
        .unwrap()
        .id
}

fn create(issue_id: i64, person: &str, category: &str) -> CreateAssignmentCommand {
    CreateAssignmentCommand {
        issue_id,
        person: person.into(),
        category: category.into(),
        prompt_id: None,
    }
}

#[tokio::test]
async fn second_assignment_for_same_person_and_issue_is_a_conflict() {
    let h = support::Harness::new();
    let issue_id = current_issue_id(&h).await;

    h.services
        .assignment_commands
        .create_assignment(create(issue_id, "U123", "feature"))
        .await
        .unwrap();
    let err = h
        .services
        .assignment_commands
        .create_assignment(create(issue_id, "U123", "interview"))
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    let msg = err.to_string();
    assert!(msg.contains("U123"), "{msg}");
    assert!(msg.contains(&format!("#{issue_id}")), "{msg}");
    assert_eq!(h.assignments.all().len(), 1);
}

/// 事前チェックをすり抜けても、ストレージの一意制約が同じ競合として報告される
#[tokio::test]
async fn storage_constraint_reports_the_same_conflict_when_precheck_races() {
    let h = support::Harness::new();
    let issue_id = current_issue_id(&h).await;
    h.services
        .assignment_commands
        .create_assignment(create(issue_id, "U123", "feature"))
        .await
        .unwrap();

    h.assignments.blind_lookups.store(true, Ordering::SeqCst);
    let err = h
        .services
        .assignment_commands
        .create_assignment(create(issue_id, "U123", "feature"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert!(err.to_string().contains("U123 already has an assignment"));
}

#[tokio::test]
async fn invalid_inputs_are_rejected_before_storage() {
    let h = support::Harness::new();
    let issue_id = current_issue_id(&h).await;

    for command in [
        create(issue_id, "U1", "gossip"),
        create(0, "U1", "feature"),
        create(issue_id, "  ", "feature"),
    ] {
        let err = h
            .services
            .assignment_commands
            .create_assignment(command)
            .await
            .unwrap_err();
        assert!(err.is_validation(), "{err}");
    }

    let missing = h
        .services
        .assignment_commands
        .create_assignment(create(issue_id + 100, "U1", "feature"))
        .await
        .unwrap_err();
    assert!(missing.is_not_found());
    assert!(h.assignments.all().is_empty());
}

#[tokio::test]
async fn creation_appends_rotation_history() {
    let h = support::Harness::new();
    let issue_id = current_issue_id(&h).await;
    h.services
        .assignment_commands
        .create_assignment(create(issue_id, "U1", "tech_tip"))
        .await
        .unwrap();

    let history = h.history.all();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].person.as_str(), "U1");
    assert_eq!(history[0].category, ContentCategory::TechTip);
    assert_eq!(history[0].cycle, CycleKey::new(1, 2024).unwrap());

    let listed = h
        .services
        .assignment_queries
        .rotation_history(RotationHistoryQuery {
            person: Some("U1".into()),
            category: None,
            since_weeks: Some(4),
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].category, "tech_tip");
}

/// 遡り週数が日付の範囲を超える場合はパニックせず入力エラーになる
#[tokio::test]
async fn history_lookback_beyond_the_calendar_is_a_validation_error() {
    let h = support::Harness::new();
    let err = h
        .services
        .assignment_queries
        .rotation_history(RotationHistoryQuery {
            person: None,
            category: None,
            since_weeks: Some(u32::MAX),
        })
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("since_weeks"));
}

#[tokio::test]
async fn distribution_with_an_unrepresentable_lookback_is_rejected() {
    let h = support::Harness::with_settings(ServiceSettings {
        rotation_lookback_weeks: u32::MAX,
        ..support::test_settings()
    });
    let issue_id = current_issue_id(&h).await;
    let err = h
        .services
        .assignment_commands
        .distribute(DistributeAssignmentCommand {
            issue_id,
            category: "feature".into(),
            candidates: vec!["U1".into()],
            notify: false,
        })
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(h.assignments.all().is_empty());
}

#[tokio::test]
async fn active_assignment_lookup() {
    let h = support::Harness::new();
    let issue_id = current_issue_id(&h).await;
    h.services
        .assignment_commands
        .create_assignment(create(issue_id, "U9", "wellness"))
        .await
        .unwrap();

    let active = h
        .services
        .assignment_queries
        .active_for(ActiveAssignmentQuery {
            person: "U9".into(),
            category: "wellness".into(),
        })
        .await
        .unwrap();
    assert_eq!(active.issue_id, issue_id);

    let none = h
        .services
        .assignment_queries
        .active_for(ActiveAssignmentQuery {
            person: "U9".into(),
            category: "feature".into(),
        })
        .await
        .unwrap_err();
    assert!(none.is_not_found());
}

#[tokio::test]
async fn by_issue_lists_in_creation_order() {
    let h = support::Harness::new();
    let issue_id = current_issue_id(&h).await;
    for person in ["U3", "U1", "U2"] {
        h.clock.advance(Duration::seconds(1));
        h.services
            .assignment_commands
            .create_assignment(create(issue_id, person, "general"))
            .await
            .unwrap();
    }

    let listed = h
        .services
        .assignment_queries
        .by_issue(AssignmentsByIssueQuery { issue_id })
        .await
        .unwrap();
    let people: Vec<&str> = listed.iter().map(|a| a.person.as_str()).collect();
    assert_eq!(people, ["U3", "U1", "U2"]);
}

#[tokio::test]
async fn deleting_is_idempotent_but_keeps_fulfilled_assignments() {
    let h = support::Harness::new();
    let issue_id = current_issue_id(&h).await;
    let open = h
        .services
        .assignment_commands
        .create_assignment(create(issue_id, "U1", "feature"))
        .await
        .unwrap();
    let done = h
        .services
        .assignment_commands
        .create_assignment(create(issue_id, "U2", "feature"))
        .await
        .unwrap();
    h.services
        .assignment_commands
        .link_submission(LinkSubmissionCommand {
            assignment_id: done.id,
            submission_id: 42,
        })
        .await
        .unwrap();

    let removed = h
        .services
        .assignment_commands
        .delete_assignment(DeleteAssignmentCommand { id: open.id })
        .await
        .unwrap();
    assert_eq!(removed, 1);
    let again = h
        .services
        .assignment_commands
        .delete_assignment(DeleteAssignmentCommand { id: open.id })
        .await
        .unwrap();
    assert_eq!(again, 0);

    let err = h
        .services
        .assignment_commands
        .delete_assignment(DeleteAssignmentCommand { id: done.id })
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    let for_person = h
        .services
        .assignment_commands
        .delete_for_person(DeleteAssignmentsForPersonCommand { person: "U2".into() })
        .await
        .unwrap();
    assert_eq!(for_person, 0);
    assert_eq!(h.assignments.all().len(), 1);
}

#[tokio::test]
async fn linking_an_unknown_assignment_is_not_found() {
    let h = support::Harness::new();
    let err = h
        .services
        .assignment_commands
        .link_submission(LinkSubmissionCommand {
            assignment_id: 77,
            submission_id: 1,
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

/// 直近に担当した人を避け、未担当の候補を選ぶ
#[tokio::test]
async fn distribution_prefers_the_candidate_who_waited_longest() {
    let h = support::Harness::new();
    h.prompts.seed(
        "Which tool saved you the most time this quarter?",
        ContentCategory::TechTip,
        None,
    );
    let now = support::fixed_now();
    h.history.seed(RotationHistoryEntry {
        person: PersonId::new("U_RECENT").unwrap(),
        category: ContentCategory::TechTip,
        cycle: CycleKey::new(52, 2023).unwrap(),
        recorded_at: now - Duration::weeks(1),
    });
    h.history.seed(RotationHistoryEntry {
        person: PersonId::new("U_OLDER").unwrap(),
        category: ContentCategory::TechTip,
        cycle: CycleKey::new(48, 2023).unwrap(),
        recorded_at: now - Duration::weeks(5),
    });

    let issue = h
        .services
        .issue_commands
        .resolve_or_create_issue(ResolveIssueCommand { week: 2, year: 2024 })
        .await
        .unwrap();
    let assigned = h
        .services
        .assignment_commands
        .distribute(DistributeAssignmentCommand {
            issue_id: issue.id,
            category: "tech_tip".into(),
            candidates: vec!["U_RECENT".into(), "U_OLDER".into()],
            notify: true,
        })
        .await
        .unwrap();

    assert_eq!(assigned.person, "U_OLDER");
    assert_eq!(assigned.prompt_id, Some(1));
    let sent = h.messaging.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "U_OLDER");
    assert!(sent[0].1.contains("Which tool saved you"));
}

#[tokio::test]
async fn distribution_fails_when_every_candidate_is_taken() {
    let h = support::Harness::new();
    let issue_id = current_issue_id(&h).await;
    h.services
        .assignment_commands
        .create_assignment(create(issue_id, "U1", "feature"))
        .await
        .unwrap();

    let err = h
        .services
        .assignment_commands
        .distribute(DistributeAssignmentCommand {
            issue_id,
            category: "feature".into(),
            candidates: vec!["U1".into()],
            notify: false,
        })
        .await
        .unwrap_err();
    assert!(err.is_conflict());
}

/// 通知の失敗は割り当てを取り消さない
/// 既に割り当て済みと分かった時点で止まり、プロンプトは使用済みにならない
#[tokio::test]
async fn distribution_conflict_leaves_the_prompt_unclaimed() {
    let h = support::Harness::new();
    let prompt_id = h.prompts.seed("Show us your desk", ContentCategory::Feature, None);
    let issue_id = current_issue_id(&h).await;
    h.services
        .assignment_commands
        .create_assignment(create(issue_id, "U1", "interview"))
        .await
        .unwrap();
    h.assignments.stale_listing.store(true, Ordering::SeqCst);

    let err = h
        .services
        .assignment_commands
        .distribute(DistributeAssignmentCommand {
            issue_id,
            category: "feature".into(),
            candidates: vec!["U1".into()],
            notify: true,
        })
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(h.prompts.get(prompt_id).unwrap().last_used_at, None);
    assert_eq!(h.assignments.all().len(), 1);
    assert!(h.messaging.sent().is_empty());
}

#[tokio::test]
async fn distribution_keeps_the_assignment_when_notification_fails() {
    let messaging = support::FakeMessaging::default();
    messaging.fail_sends_to("U1");
    let h = support::Harness::with_messaging(messaging);
    let issue_id = current_issue_id(&h).await;

    let assigned = h
        .services
        .assignment_commands
        .distribute(DistributeAssignmentCommand {
            issue_id,
            category: "interview".into(),
            candidates: vec!["U1".into()],
            notify: true,
        })
        .await
        .unwrap();
    assert_eq!(assigned.person, "U1");
    assert_eq!(assigned.prompt_id, None);
    assert_eq!(h.assignments.all().len(), 1);
    assert!(h.messaging.sent().is_empty());
}
