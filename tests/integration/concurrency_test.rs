//! Concurrency properties: reservation and cap checks under parallel load.

use futures::future::join_all;

use biblio::error::ErrorKind;

use crate::helpers::TestApp;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_copy_yields_exactly_one_winner() {
    let app = TestApp::new();
    let book = app.seed_book("A Fisherman of the Inland Sea", "978-0060172466").await;

    let mut users = Vec::new();
    for i in 0..8 {
        users.push(app.seed_user(&format!("reader-{i}")).await);
    }

    let tasks: Vec<_> = users
        .iter()
        .map(|user| {
            let loans = app.library.loans.clone();
            let ctx = app.ctx();
            let user_id = user.id;
            let book_id = book.id;
            tokio::spawn(async move { loans.create_loan(&ctx, user_id, book_id).await })
        })
        .collect();

    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    for result in results.iter().filter(|r| r.is_err()) {
        assert_eq!(
            result.as_ref().unwrap_err().kind,
            ErrorKind::NoCopiesAvailable
        );
    }

    let book = app.library.catalog.get_book(book.id).await.unwrap();
    assert_eq!(book.available_copies, 0);
    assert_eq!(book.total_copies, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn loan_cap_holds_under_concurrent_creates() {
    let app = TestApp::new();
    let user = app.seed_user("voracious").await;

    // Four active loans; one slot left under the cap of five.
    for i in 0..4 {
        let book = app
            .seed_book(&format!("Shelf {i}"), &format!("978-222222222{i}"))
            .await;
        app.library
            .loans
            .create_loan(&app.ctx(), user.id, book.id)
            .await
            .unwrap();
    }

    let mut books = Vec::new();
    for i in 0..6 {
        books.push(
            app.seed_book(&format!("Rush {i}"), &format!("978-333333333{i}"))
                .await,
        );
    }

    let tasks: Vec<_> = books
        .iter()
        .map(|book| {
            let loans = app.library.loans.clone();
            let ctx = app.ctx();
            let user_id = user.id;
            let book_id = book.id;
            tokio::spawn(async move { loans.create_loan(&ctx, user_id, book_id).await })
        })
        .collect();

    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    for result in results.iter().filter(|r| r.is_err()) {
        assert_eq!(
            result.as_ref().unwrap_err().kind,
            ErrorKind::LoanLimitExceeded
        );
    }
    assert_eq!(app.library.membership.count_active_loans(user.id).await, 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn availability_counters_stay_in_range_under_churn() {
    let app = TestApp::new();
    let book = app
        .seed_book_with_copies("The Lathe of Heaven", "978-1416556961", 3)
        .await;

    let mut users = Vec::new();
    for i in 0..6 {
        users.push(app.seed_user(&format!("churn-{i}")).await);
    }

    // Each task borrows and, when it wins a copy, immediately returns.
    let tasks: Vec<_> = users
        .iter()
        .map(|user| {
            let loans = app.library.loans.clone();
            let ctx = app.ctx();
            let user_id = user.id;
            let book_id = book.id;
            tokio::spawn(async move {
                match loans.create_loan(&ctx, user_id, book_id).await {
                    Ok(loan) => loans.return_loan(&ctx, loan.id).await.map(|_| true),
                    Err(_) => Ok(false),
                }
            })
        })
        .collect();

    for joined in join_all(tasks).await {
        joined.expect("task panicked").expect("return never fails");
    }

    let book = app.library.catalog.get_book(book.id).await.unwrap();
    assert_eq!(book.total_copies, 3);
    // Every winner returned its copy, so availability is fully restored.
    assert_eq!(book.available_copies, 3);
}
