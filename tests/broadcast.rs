use kawaraban_core::application::ports::messaging::DirectoryMember;

mod support;

fn directory(eligible: usize) -> Vec<DirectoryMember> {
    let mut members: Vec<DirectoryMember> = (0..eligible)
        .map(|n| support::member(&format!("U{n:02}")))
        .collect();
    members.push(DirectoryMember {
        is_bot: true,
        ..support::member("B_BOT")
    });
    members.push(DirectoryMember {
        deleted: true,
        ..support::member("U_GONE")
    });
    members.push(DirectoryMember {
        is_restricted: true,
        ..support::member("U_GUEST")
    });
    members.push(DirectoryMember {
        is_ultra_restricted: true,
        ..support::member("U_SINGLE")
    });
    members.push(support::member(DirectoryMember::SYSTEM_USER_ID));
    members
}

/// 10 人中 2 人への送信が失敗しても残りは届き、集計に反映される
#[tokio::test]
async fn failed_sends_are_tallied_without_stopping_the_rest() {
    let messaging = support::FakeMessaging::with_members(directory(10));
    messaging.fail_sends_to("U03");
    messaging.fail_sends_to("U07");
    let h = support::Harness::with_messaging(messaging);

    let report = h
        .services
        .broadcaster
        .broadcast(|m| format!("Hi {}, this week's prompt is out!", m.display_name))
        .await
        .unwrap();

    assert_eq!(report.total_users, 10);
    assert_eq!(report.successful_sends, 8);
    assert_eq!(report.failed_sends, 2);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors.iter().any(|e| e.starts_with("U03")));
    assert!(report.aggregate_error().is_some());

    let sent = h.messaging.sent();
    assert_eq!(sent.len(), 8);
    assert!(sent.iter().all(|(id, _)| id.starts_with("U") && id.len() == 3));
    let (id, text) = &sent[0];
    assert_eq!(text, &format!("Hi member {id}, this week's prompt is out!"));
}

#[tokio::test]
async fn ineligible_members_are_never_contacted() {
    let h = support::Harness::with_messaging(support::FakeMessaging::with_members(directory(0)));
    let report = h.services.broadcaster.broadcast(|_| "hello".into()).await.unwrap();
    assert_eq!(report.total_users, 0);
    assert!(report.aggregate_error().is_none());
    assert!(h.messaging.sent().is_empty());
}

#[tokio::test]
async fn directory_failure_aborts_the_broadcast() {
    let messaging = support::FakeMessaging::with_members(directory(3));
    messaging.fail_listing();
    let h = support::Harness::with_messaging(messaging);

    let err = h
        .services
        .broadcaster
        .broadcast(|_| "hello".into())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("cannot list directory members"));
    assert!(h.messaging.sent().is_empty());
}

#[tokio::test]
async fn direct_messages_require_recipient_and_text() {
    let h = support::Harness::new();
    assert!(
        h.services
            .broadcaster
            .send_direct(" ", "hello")
            .await
            .unwrap_err()
            .is_validation()
    );
    assert!(
        h.services
            .broadcaster
            .send_direct("U1", "")
            .await
            .unwrap_err()
            .is_validation()
    );
    h.services.broadcaster.send_direct("U1", "hello").await.unwrap();
    assert_eq!(h.messaging.sent(), vec![("U1".to_string(), "hello".to_string())]);
}
