mod support;

use advising_admin::db::UpsertOutcome;
use advising_admin::service::session_upsert::{self, MergeMode};
use advising_admin::service::settings;
use advising_admin::types::session::SessionSubmission;
use advising_admin::types::setting::SettingInput;
use serde_json::json;
use support::TempDatabase;

const WRITERS: usize = 8;

fn submission(student: &str, period: &str, course: String) -> SessionSubmission {
    SessionSubmission {
        student_id: Some(student.to_string()),
        period_id: Some(period.to_string()),
        advised_courses: Some(vec![course]),
        ..Default::default()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_creators_for_one_pair_all_succeed_on_one_row() {
    let db = TempDatabase::open("same-pair").await;

    for round in 0..5 {
        let period = format!("P{round}");
        let handles: Vec<_> = (0..WRITERS)
            .map(|n| {
                let storage = db.storage.clone();
                let sub = submission("S1", &period, format!("CS{n}"));
                tokio::spawn(async move {
                    session_upsert::upsert_session(&storage, sub, MergeMode::Replace).await
                })
            })
            .collect();

        let mut ids = Vec::new();
        let mut created = 0;
        for handle in handles {
            let (session, outcome) = handle
                .await
                .expect("writer task panicked")
                .unwrap_or_else(|e| panic!("concurrent upsert failed: {e}"));
            if outcome == UpsertOutcome::Created {
                created += 1;
            }
            ids.push(session.id);
        }

        ids.dedup();
        assert_eq!(ids.len(), 1, "round {round} produced several ids");
        assert!(created >= 1);

        let rows = db
            .storage
            .list_sessions(Some("S1"), None)
            .await
            .expect("list failed");
        let for_period: Vec<_> = rows.iter().filter(|s| s.period_id == period).collect();
        assert_eq!(for_period.len(), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_creators_for_distinct_pairs_each_get_a_row() {
    let db = TempDatabase::open("distinct-pairs").await;

    let handles: Vec<_> = (0..WRITERS)
        .map(|n| {
            let storage = db.storage.clone();
            let sub = submission(&format!("S{n}"), "P1", "CS101".to_string());
            tokio::spawn(async move {
                session_upsert::upsert_session(&storage, sub, MergeMode::Replace).await
            })
        })
        .collect();

    for handle in handles {
        let (_, outcome) = handle
            .await
            .expect("writer task panicked")
            .unwrap_or_else(|e| panic!("concurrent upsert failed: {e}"));
        assert_eq!(outcome, UpsertOutcome::Created);
    }

    let rows = db
        .storage
        .list_sessions(None, Some("P1"))
        .await
        .expect("list failed");
    assert_eq!(rows.len(), WRITERS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_setting_writers_do_not_lock_each_other_out() {
    let db = TempDatabase::open("settings").await;

    let handles: Vec<_> = (0..WRITERS)
        .map(|n| {
            let storage = db.storage.clone();
            tokio::spawn(async move {
                let single = settings::upsert_setting(
                    &storage,
                    SettingInput {
                        key: Some("maxCredits".to_string()),
                        value: Some(json!(n)),
                        category: None,
                    },
                )
                .await
                .map(|_| ());
                let batch = settings::upsert_settings(
                    &storage,
                    vec![SettingInput {
                        key: Some(format!("writer{n}")),
                        value: Some(json!(true)),
                        category: Some("ui".to_string()),
                    }],
                )
                .await
                .map(|_| ());
                single.and(batch)
            })
        })
        .collect();

    for handle in handles {
        handle
            .await
            .expect("writer task panicked")
            .unwrap_or_else(|e| panic!("concurrent setting write failed: {e}"));
    }

    let all = db.storage.list_settings(None).await.expect("list failed");
    assert_eq!(all.len(), WRITERS + 1);
    let ui = db.storage.list_settings(Some("ui")).await.expect("list failed");
    assert_eq!(ui.len(), WRITERS);
}
