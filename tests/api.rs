mod helpers;

use helpers::setup::{spawn_app, spawn_app_with, CRON_SECRET, NOW};
use sevent_reminders_api::CRON_SECRET_HEADER;
use sevent_reminders_api_structs::{check_reminders, ErrorResponse};
use sevent_reminders_sdk::{APIError, DispatchStats, SeventRemindersSDK};

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_unknown_route_is_json_not_found() {
    let (app, _) = spawn_app().await;
    let res = reqwest::get(&format!("{}/api/does-not-exist", app.address))
        .await
        .expect("To send request");
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    let body = res
        .json::<ErrorResponse>()
        .await
        .expect("To get json body");
    assert!(!body.success);
    assert!(body.message.contains("/api/does-not-exist"));
}

#[actix_web::main]
#[test]
async fn test_check_reminders_sends_due_reminder() {
    let (app, sdk) = spawn_app().await;
    let user = app.insert_user("lan@example.com", "Lan").await;
    let event = app.insert_event("Hanoi Jazz Night").await;
    let reminder = app.insert_reminder(&user, &event, NOW - 1000 * 30).await;

    let res = sdk
        .reminder
        .check()
        .await
        .expect("To trigger reminder check");
    assert!(res.success);
    assert_eq!(res.message, "Reminder check completed");
    assert_eq!(
        res.stats,
        DispatchStats {
            total: 1,
            sent: 1,
            failed: 0,
            skipped: 0
        }
    );
    assert!(app.is_sent(&reminder).await);

    let sent = app.email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "lan@example.com");
    assert_eq!(sent[0].subject, "Sevent reminds you about: Hanoi Jazz Night");
    assert!(sent[0].html.contains("Nhà hát Lớn"));
    assert!(sent[0]
        .html
        .contains(&format!("http://localhost:5174/events/{}", event.id)));

    // Nothing left to send on the next trigger
    let res = sdk.reminder.check().await.expect("To trigger reminder check");
    assert_eq!(res.stats.total, 0);
    assert_eq!(res.stats.sent, 0);
    assert_eq!(app.email.sent().len(), 1);
}

#[actix_web::main]
#[test]
async fn test_check_reminders_reports_failed_delivery() {
    let (app, sdk) = spawn_app().await;
    let user = app.insert_user("lan@example.com", "Lan").await;
    let event = app.insert_event("Hanoi Jazz Night").await;
    let reminder = app.insert_reminder(&user, &event, NOW - 1000 * 30).await;
    app.email.set_failing(true);

    let res = sdk.reminder.check().await.expect("To trigger reminder check");
    assert_eq!(
        res.stats,
        DispatchStats {
            total: 1,
            sent: 0,
            failed: 1,
            skipped: 0
        }
    );
    assert!(!app.is_sent(&reminder).await);
}

#[actix_web::main]
#[test]
async fn test_check_reminders_ignores_reminders_outside_window() {
    let (app, sdk) = spawn_app().await;
    let user = app.insert_user("lan@example.com", "Lan").await;
    let event = app.insert_event("Hanoi Jazz Night").await;
    let too_old = app.insert_reminder(&user, &event, NOW - 1000 * 500).await;
    let future = app.insert_reminder(&user, &event, NOW + 1000 * 60).await;

    let res = sdk.reminder.check().await.expect("To trigger reminder check");
    assert_eq!(
        res.stats,
        DispatchStats {
            total: 0,
            sent: 0,
            failed: 0,
            skipped: 0
        }
    );
    assert!(!app.is_sent(&too_old).await);
    assert!(!app.is_sent(&future).await);
    assert!(app.email.sent().is_empty());
}

#[actix_web::main]
#[test]
async fn test_check_reminders_mixed_outcomes() {
    let (app, sdk) = spawn_app().await;
    let user = app.insert_user("lan@example.com", "").await;
    let event = app.insert_event("Hanoi Jazz Night").await;
    let sent = app.insert_reminder(&user, &event, NOW - 1000 * 120).await;
    let orphan_user = sevent_reminders_domain::User::new("ghost@example.com", "Ghost");
    let orphan = app.insert_reminder(&orphan_user, &event, NOW).await;

    let res = sdk.reminder.check().await.expect("To trigger reminder check");
    assert_eq!(res.stats.total, 2);
    assert_eq!(res.stats.sent, 1);
    assert_eq!(res.stats.failed, 1);
    assert!(app.is_sent(&sent).await);
    assert!(!app.is_sent(&orphan).await);
    assert!(app.email.sent()[0]
        .html
        .contains("Dear <strong>lan@example.com</strong>"));
}

#[actix_web::main]
#[test]
async fn test_check_reminders_rejects_wrong_secret() {
    let (app, _) = spawn_app().await;
    let user = app.insert_user("lan@example.com", "Lan").await;
    let event = app.insert_event("Hanoi Jazz Night").await;
    let reminder = app.insert_reminder(&user, &event, NOW).await;

    let sdk = SeventRemindersSDK::new(app.address.clone(), "wrong-secret");
    match sdk.reminder.check().await {
        Err(APIError::Unauthorized) => (),
        res => panic!("Expected unauthorized, got: {:?}", res),
    }
    let sdk = SeventRemindersSDK::new(app.address.clone(), "");
    match sdk.reminder.check().await {
        Err(APIError::Unauthorized) => (),
        res => panic!("Expected unauthorized, got: {:?}", res),
    }
    assert!(!app.is_sent(&reminder).await);
    assert!(app.email.sent().is_empty());
}

#[actix_web::main]
#[test]
async fn test_rejected_trigger_explains_why() {
    let (app, _) = spawn_app().await;
    let res = reqwest::get(&format!("{}/api/check-reminders", app.address))
        .await
        .expect("To send request");
    assert_eq!(res.status(), reqwest::StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await.expect("To get json");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unauthorized");
    assert_eq!(body["debug"]["receivedSecret"], "missing");
    assert_eq!(body["debug"]["expectedSecret"], "configured");
}

#[actix_web::main]
#[test]
async fn test_trigger_is_rejected_without_configured_secret() {
    let (app, sdk) = spawn_app_with(|ctx| ctx.config.cron_secret = None).await;
    match sdk.reminder.check().await {
        Err(APIError::Unauthorized) => (),
        res => panic!("Expected unauthorized, got: {:?}", res),
    }

    let res = reqwest::get(&format!("{}/api/check-reminders?secret=anything", app.address))
        .await
        .expect("To send request");
    assert_eq!(res.status(), reqwest::StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await.expect("To get json");
    assert_eq!(body["debug"]["receivedSecret"], "provided");
    assert_eq!(body["debug"]["expectedSecret"], "not configured");
}

#[actix_web::main]
#[test]
async fn test_secret_in_query_string() {
    let (app, _) = spawn_app().await;
    let user = app.insert_user("lan@example.com", "Lan").await;
    let event = app.insert_event("Hanoi Jazz Night").await;
    let reminder = app.insert_reminder(&user, &event, NOW).await;

    let res = reqwest::get(&format!(
        "{}/api/check-reminders?secret={}",
        app.address, CRON_SECRET
    ))
    .await
    .expect("To send request");
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res
        .json::<check_reminders::APIResponse>()
        .await
        .expect("To get json");
    assert_eq!(body.stats.sent, 1);
    assert!(app.is_sent(&reminder).await);
}

#[actix_web::main]
#[test]
async fn test_header_secret_wins_over_query_string() {
    let (app, _) = spawn_app().await;
    let res = reqwest::Client::new()
        .get(&format!(
            "{}/api/check-reminders?secret={}",
            app.address, CRON_SECRET
        ))
        .header(CRON_SECRET_HEADER, "wrong-secret")
        .send()
        .await
        .expect("To send request");
    assert_eq!(res.status(), reqwest::StatusCode::UNAUTHORIZED);
}

#[actix_web::main]
#[test]
async fn test_get_missed_reminders() {
    let (app, sdk) = spawn_app().await;
    let user = app.insert_user("lan@example.com", "Lan").await;
    let event = app.insert_event("Hanoi Jazz Night").await;
    let missed = app.insert_reminder(&user, &event, NOW - 1000 * 500).await;
    app.insert_reminder(&user, &event, NOW - 1000 * 30).await;

    let res = sdk
        .reminder
        .get_missed()
        .await
        .expect("To list missed reminders");
    assert!(res.success);
    assert_eq!(res.reminders.len(), 1);
    assert_eq!(res.reminders[0].id, missed.id);
    assert_eq!(res.reminders[0].fire_at, missed.fire_at);
    assert!(!res.reminders[0].sent);

    let unauthorized = SeventRemindersSDK::new(app.address.clone(), "wrong-secret");
    assert!(unauthorized.reminder.get_missed().await.is_err());
}
