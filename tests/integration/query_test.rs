//! Query façade integration tests: composite read-only views.

use chrono::Duration;

use biblio::error::ErrorKind;
use biblio::types::id::{BookId, UserId};

use crate::helpers::{TestApp, start_time};

#[tokio::test]
async fn book_detail_aggregates_loan_history() {
    let app = TestApp::new();
    let book = app
        .seed_book_with_copies("Changing Planes", "978-0151009718", 3)
        .await;

    let first = app.seed_user("sita").await;
    let second = app.seed_user("dulse").await;

    let done = app
        .library
        .loans
        .create_loan(&app.ctx(), first.id, book.id)
        .await
        .unwrap();
    app.library.loans.return_loan(&app.ctx(), done.id).await.unwrap();
    app.library
        .loans
        .create_loan(&app.ctx(), second.id, book.id)
        .await
        .unwrap();

    let detail = app.library.query.get_book_detail(book.id).await.unwrap();
    assert_eq!(detail.copies_on_loan, 1);
    assert_eq!(detail.book.available_copies, 2);
    assert_eq!(detail.loan_stats.total, 2);
    assert_eq!(detail.loan_stats.active, 1);
    assert_eq!(detail.loan_stats.completed, 1);
}

#[tokio::test]
async fn user_detail_sums_potential_fines() {
    let app = TestApp::new();
    let user = app.seed_user("irian").await;

    let first = app.seed_book("Gifts", "978-0152051235").await;
    let second = app.seed_book("Voices", "978-0152056780").await;
    app.library
        .loans
        .create_loan(&app.ctx(), user.id, first.id)
        .await
        .unwrap();
    app.library
        .loans
        .create_loan(&app.ctx(), user.id, second.id)
        .await
        .unwrap();

    // Both loans are 3 days overdue: 1.50 each.
    app.clock.advance(Duration::days(17));

    let detail = app.library.query.get_user_detail(user.id).await.unwrap();
    assert_eq!(detail.active_loans.len(), 2);
    for preview in &detail.active_loans {
        assert!(preview.is_overdue);
        assert_eq!(preview.days_overdue, 3);
        assert_eq!(preview.potential_fine, 1.50);
    }
    assert_eq!(detail.total_potential_fines, 3.00);

    // Previews never finalize anything.
    let loan = &detail.active_loans[0].loan;
    assert_eq!(loan.fine, 0.0);
    assert!(loan.is_active());
}

#[tokio::test]
async fn loan_detail_previews_active_and_reports_returned() {
    let app = TestApp::new();
    let user = app.seed_user("medra").await;
    let book = app.seed_book("Tales from Earthsea", "978-0151005611").await;

    let loan = app
        .library
        .loans
        .create_loan(&app.ctx(), user.id, book.id)
        .await
        .unwrap();

    app.clock.advance(Duration::days(18));
    let detail = app.library.loans.get_loan_detail(loan.id).await.unwrap();
    assert!(detail.is_overdue);
    assert_eq!(detail.days_overdue, 4);
    assert_eq!(detail.current_fine, 2.00);
    assert_eq!(detail.user.as_ref().unwrap().username, "medra");
    assert_eq!(detail.book.as_ref().unwrap().title, "Tales from Earthsea");

    app.library.loans.return_loan(&app.ctx(), loan.id).await.unwrap();
    app.clock.advance(Duration::days(10));

    let detail = app.library.loans.get_loan_detail(loan.id).await.unwrap();
    assert!(detail.is_overdue);
    assert_eq!(detail.days_overdue, 4);
    assert_eq!(detail.current_fine, 2.00);
}

#[tokio::test]
async fn overdue_listing_annotates_only_late_loans() {
    let app = TestApp::new();
    let user = app.seed_user("ivory").await;

    let early = app.seed_book("First Due", "978-6666666660").await;
    let early_loan = app
        .library
        .loans
        .create_loan(&app.ctx(), user.id, early.id)
        .await
        .unwrap();

    app.clock.advance(Duration::days(2));
    let later = app.seed_book("Second Due", "978-6666666661").await;
    app.library
        .loans
        .create_loan(&app.ctx(), user.id, later.id)
        .await
        .unwrap();

    // 15 days past start: first loan is 1 day overdue, second still has time.
    app.clock.set(start_time() + Duration::days(15));
    let overdue = app.library.loans.list_overdue().await;
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].loan.id, early_loan.id);
    assert_eq!(overdue[0].days_overdue, 1);
    assert_eq!(overdue[0].potential_fine, 0.50);

    // Listing twice changes nothing.
    let again = app.library.loans.list_overdue().await;
    assert_eq!(again.len(), 1);
    let detail = app.library.loans.get_loan_detail(early_loan.id).await.unwrap();
    assert_eq!(detail.loan.fine, 0.0);
}

#[tokio::test]
async fn missing_entities_yield_not_found() {
    let app = TestApp::new();

    let err = app
        .library
        .query
        .get_book_detail(BookId::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = app
        .library
        .query
        .get_user_detail(UserId::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
