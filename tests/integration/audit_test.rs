//! Audit trail integration tests: entry emission, filtering, and limits.

use chrono::Duration;

use biblio::config::AppConfig;
use biblio::entity::audit::{AuditAction, AuditEntityType, AuditQuery};
use biblio::error::ErrorKind;
use biblio::types::id::AuditLogId;

use crate::helpers::TestApp;

#[tokio::test]
async fn every_mutation_leaves_a_matching_entry() {
    let app = TestApp::new();

    let user = app.seed_user("estraven").await;
    let book = app.seed_book("City of Illusions", "978-0060125608").await;
    app.library
        .catalog
        .resize_copies(&app.ctx(), book.id, 2)
        .await
        .unwrap();
    let loan = app
        .library
        .loans
        .create_loan(&app.ctx(), user.id, book.id)
        .await
        .unwrap();
    app.library.loans.return_loan(&app.ctx(), loan.id).await.unwrap();

    let entries = app.library.audit.query(&AuditQuery::default()).await;
    let actions: Vec<AuditAction> = entries.iter().map(|e| e.action).collect();
    // Newest first.
    assert_eq!(
        actions,
        vec![
            AuditAction::LoanReturned,
            AuditAction::LoanCreated,
            AuditAction::BookUpdated,
            AuditAction::BookCreated,
            AuditAction::UserCreated,
        ]
    );

    let loan_entries = app
        .library
        .audit
        .query(&AuditQuery::for_entity(
            AuditEntityType::Loan,
            loan.id.into_uuid(),
        ))
        .await;
    assert_eq!(loan_entries.len(), 2);
    for entry in &loan_entries {
        assert_eq!(entry.entity_id, loan.id.into_uuid());
        assert_eq!(entry.user_id, Some(user.id));
        assert_eq!(entry.source_address.as_deref(), Some("203.0.113.7"));
    }
}

#[tokio::test]
async fn on_time_return_emits_one_entry_late_return_two() {
    let app = TestApp::new();
    let user = app.seed_user("therem").await;

    let prompt = app.seed_book("Planet of Exile", "978-0060125622").await;
    let loan = app
        .library
        .loans
        .create_loan(&app.ctx(), user.id, prompt.id)
        .await
        .unwrap();
    app.library.loans.return_loan(&app.ctx(), loan.id).await.unwrap();

    let entries = app
        .library
        .audit
        .query(&AuditQuery::for_entity(
            AuditEntityType::Loan,
            loan.id.into_uuid(),
        ))
        .await;
    assert_eq!(entries.len(), 2); // loan_created + loan_returned
    assert!(entries.iter().all(|e| e.action != AuditAction::FineCalculated));

    let tardy = app.seed_book("The Beginning Place", "978-0060125677").await;
    let loan = app
        .library
        .loans
        .create_loan(&app.ctx(), user.id, tardy.id)
        .await
        .unwrap();
    app.clock.advance(Duration::days(20));
    app.library.loans.return_loan(&app.ctx(), loan.id).await.unwrap();

    let entries = app
        .library
        .audit
        .query(&AuditQuery::for_entity(
            AuditEntityType::Loan,
            loan.id.into_uuid(),
        ))
        .await;
    assert_eq!(entries.len(), 3); // + fine_calculated

    let fine_entry = entries
        .iter()
        .find(|e| e.action == AuditAction::FineCalculated)
        .expect("fine entry");
    let details = fine_entry.details.as_ref().expect("fine details");
    assert_eq!(details["days_overdue"], 6);
    assert_eq!(details["fine"], 3.0);
    assert_eq!(details["fine_per_day"], 0.5);
    assert_eq!(details["fine_cap"], 25.0);
}

#[tokio::test]
async fn loan_created_details_describe_the_reservation() {
    let app = TestApp::new();
    let user = app.seed_user("falk").await;
    let book = app
        .seed_book_with_copies("Worlds of Exile", "978-0765313959", 2)
        .await;

    let loan = app
        .library
        .loans
        .create_loan(&app.ctx(), user.id, book.id)
        .await
        .unwrap();

    let entries = app
        .library
        .audit
        .query(&AuditQuery {
            action: Some(AuditAction::LoanCreated),
            ..AuditQuery::default()
        })
        .await;
    assert_eq!(entries.len(), 1);

    let details = entries[0].details.as_ref().expect("details");
    assert_eq!(details["book_title"], "Worlds of Exile");
    assert_eq!(details["username"], "falk");
    assert_eq!(details["available_copies"], 1);
    assert_eq!(
        details["due_date"],
        serde_json::to_value(loan.due_date).unwrap()
    );
}

#[tokio::test]
async fn filters_are_conjunctive() {
    let app = TestApp::new();
    let user = app.seed_user("rolery").await;
    let book_a = app.seed_book("Book A", "978-4444444440").await;
    let book_b = app.seed_book("Book B", "978-4444444441").await;
    app.library
        .loans
        .create_loan(&app.ctx(), user.id, book_a.id)
        .await
        .unwrap();

    // action matches many entries, entity_id narrows to one book.
    let entries = app
        .library
        .audit
        .query(&AuditQuery {
            action: Some(AuditAction::BookCreated),
            entity_id: Some(book_b.id.into_uuid()),
            ..AuditQuery::default()
        })
        .await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entity_id, book_b.id.into_uuid());

    // A filter combination nothing satisfies.
    let entries = app
        .library
        .audit
        .query(&AuditQuery {
            action: Some(AuditAction::LoanCreated),
            entity_type: Some(AuditEntityType::Book),
            ..AuditQuery::default()
        })
        .await;
    assert!(entries.is_empty());
}

#[tokio::test]
async fn query_limit_defaults_and_clamps() {
    let mut config = AppConfig::default();
    config.audit.default_query_limit = 4;
    config.audit.max_query_limit = 6;
    let app = TestApp::with_config(config);

    for i in 0..10 {
        app.seed_book(&format!("Stack {i}"), &format!("978-555555555{i}"))
            .await;
    }

    let defaulted = app.library.audit.query(&AuditQuery::default()).await;
    assert_eq!(defaulted.len(), 4);

    let clamped = app
        .library
        .audit
        .query(&AuditQuery {
            limit: Some(100),
            ..AuditQuery::default()
        })
        .await;
    assert_eq!(clamped.len(), 6);

    let explicit = app
        .library
        .audit
        .query(&AuditQuery {
            limit: Some(2),
            ..AuditQuery::default()
        })
        .await;
    assert_eq!(explicit.len(), 2);
}

#[tokio::test]
async fn get_by_id_round_trips() {
    let app = TestApp::new();
    app.seed_user("semley").await;

    let entries = app.library.audit.query(&AuditQuery::default()).await;
    let entry = &entries[0];

    let fetched = app.library.audit.get_by_id(entry.id).await.unwrap();
    assert_eq!(fetched.action, AuditAction::UserCreated);
    assert_eq!(fetched.timestamp, entry.timestamp);

    let err = app
        .library
        .audit
        .get_by_id(AuditLogId::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn rejected_operations_record_nothing() {
    let app = TestApp::new();
    let user = app.seed_user("kurremkarmerruk").await;
    let book = app.seed_book("The Other Wind", "978-0151006847").await;

    // Exhaust the single copy, then fail a second borrow.
    app.library
        .loans
        .create_loan(&app.ctx(), user.id, book.id)
        .await
        .unwrap();
    let before = app.library.audit.count().await;

    let other = app.seed_user("alder").await;
    let after_seed = app.library.audit.count().await;
    let _ = app
        .library
        .loans
        .create_loan(&app.ctx(), other.id, book.id)
        .await
        .unwrap_err();

    assert_eq!(after_seed, before + 1); // only the user_created entry
    assert_eq!(app.library.audit.count().await, after_seed);
}
