//! View controller scenarios: phases, optimistic reconciliation, and the
//! editor state machine.

use foodiefinds_core::ReviewId;

use foodiefinds_client::AppError;
use foodiefinds_client::models::ValidationError;
use foodiefinds_client::remote::StoreError;
use foodiefinds_client::session::AuthError;
use foodiefinds_client::viewstate::{
    AllReviewsController, EditorPhase, MyFavoritesController, MyReviewsController, Phase,
    ReviewDetailController, ReviewEditor,
};
use foodiefinds_integration_tests::TestContext;

#[tokio::test]
async fn all_reviews_walks_idle_loading_loaded() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    ctx.seed_review(&author, "Dish A", 4).await;
    ctx.seed_review(&author, "Dish B", 5).await;

    let mut all =
        AllReviewsController::new(ctx.reviews(), ctx.favorites(), ctx.session.clone());
    assert_eq!(all.state().phase(), Phase::Idle);

    all.refresh().await.expect("fixture never fails reads");
    assert_eq!(all.state().phase(), Phase::Loaded);
    assert_eq!(all.state().items().len(), 2);
    // Repository ordering adopted as-is: most-recent first
    assert_eq!(all.state().items()[0].food_name, "Dish B");
}

#[tokio::test]
async fn search_narrows_and_records_the_query() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    ctx.seed_review(&author, "Margherita Pizza", 5).await;
    ctx.seed_review(&author, "Tonkotsu Ramen", 5).await;

    let mut all =
        AllReviewsController::new(ctx.reviews(), ctx.favorites(), ctx.session.clone());
    all.search("PIZZA").await.expect("search reloads");

    assert_eq!(all.state().last_query(), Some("PIZZA"));
    assert_eq!(all.state().items().len(), 1);
    assert_eq!(all.state().items()[0].food_name, "Margherita Pizza");
}

#[tokio::test]
async fn favorite_from_list_requires_session() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    let review = ctx.seed_review(&author, "Tempting Dish", 5).await;
    ctx.session.sign_out().await;

    let mut all =
        AllReviewsController::new(ctx.reviews(), ctx.favorites(), ctx.session.clone());
    all.refresh().await.expect("public list loads signed out");

    let err = all
        .favorite(&review.id)
        .await
        .expect_err("favoriting is gated");
    assert!(matches!(
        err,
        AppError::Auth(AuthError::NotAuthenticated)
    ));
    assert_eq!(ctx.remote.favorite_count(), 0);
}

#[tokio::test]
async fn my_reviews_delete_keeps_optimistic_state_on_success() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    let keep = ctx.seed_review(&author, "Keeper", 5).await;
    let doomed = ctx.seed_review(&author, "Doomed", 2).await;

    let mut mine = MyReviewsController::new(ctx.reviews(), ctx.session.clone());
    mine.refresh().await.expect("owner list loads");
    assert_eq!(mine.state().items().len(), 2);

    let outcome = mine.delete(&doomed.id).await;
    assert!(outcome.is_applied());
    assert_eq!(mine.state().items().len(), 1);
    assert_eq!(mine.state().items()[0].id, keep.id);
}

#[tokio::test]
async fn my_reviews_delete_rolls_back_on_remote_refusal() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    ctx.seed_review(&author, "Dish A", 4).await;
    let target = ctx.seed_review(&author, "Dish B", 5).await;

    let mut mine = MyReviewsController::new(ctx.reviews(), ctx.session.clone());
    mine.refresh().await.expect("owner list loads");
    let before: Vec<ReviewId> = mine.state().items().iter().map(|r| r.id.clone()).collect();

    ctx.remote.fail_next_mutation();
    let outcome = mine.delete(&target.id).await;

    let err = outcome.into_result().expect_err("mutation was refused");
    assert!(matches!(
        err,
        AppError::Store(StoreError::Unexpected { .. })
    ));
    // Items after reconciliation equal items before the mutation
    let after: Vec<ReviewId> = mine.state().items().iter().map(|r| r.id.clone()).collect();
    assert_eq!(after, before);
}

#[tokio::test]
async fn my_favorites_remove_rolls_back_on_remote_refusal() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    let review = ctx.seed_review(&author, "Saved Dish", 5).await;

    ctx.session.sign_out().await;
    let fan = ctx.sign_up_as("fan@example.com", "Fan").await;
    let favorite = ctx
        .favorites()
        .add(&fan.email, &review)
        .await
        .expect("favorite saves");

    let mut saved = MyFavoritesController::new(ctx.favorites(), ctx.session.clone());
    saved.refresh().await.expect("favorites load");
    assert_eq!(saved.state().items().len(), 1);

    ctx.remote.fail_next_mutation();
    let outcome = saved.remove(&favorite.id).await;

    assert!(!outcome.is_applied());
    assert_eq!(saved.state().items().len(), 1);
    assert_eq!(saved.state().items()[0].id, favorite.id);
}

#[tokio::test]
async fn my_favorites_remove_applies_on_success() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    let review = ctx.seed_review(&author, "Saved Dish", 5).await;

    let fan = ctx.sign_up_as("fan@example.com", "Fan").await;
    let favorite = ctx
        .favorites()
        .add(&fan.email, &review)
        .await
        .expect("favorite saves");

    let mut saved = MyFavoritesController::new(ctx.favorites(), ctx.session.clone());
    saved.refresh().await.expect("favorites load");

    let outcome = saved.remove(&favorite.id).await;
    assert!(outcome.is_applied());
    assert!(saved.state().items().is_empty());
    assert_eq!(ctx.remote.favorite_count(), 0);
}

#[tokio::test]
async fn detail_view_reports_not_found_phase() {
    let ctx = TestContext::new();

    let mut detail = ReviewDetailController::new(ctx.reviews());
    let err = detail
        .load(&ReviewId::new("missing"))
        .await
        .expect_err("unknown id");

    assert!(matches!(err, AppError::Store(StoreError::NotFound(_))));
    assert_eq!(detail.phase(), Phase::Error);
    assert!(detail.review().is_none());
}

#[tokio::test]
async fn editor_refuses_unrated_draft_before_the_repository() {
    let ctx = TestContext::new();
    ctx.sign_up_as("author@example.com", "Author").await;

    let mut editor = ReviewEditor::create(ctx.reviews(), ctx.session.clone());
    let full = foodiefinds_integration_tests::draft("Unrated Dish", 3);
    *editor.draft_mut() = full;
    editor.draft_mut().rating = None;

    let err = editor.submit().await.expect_err("no stars selected");
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::MissingRating)
    ));
    // Refusal happens pre-submission: the editor stays ready for another try
    assert_eq!(editor.phase(), EditorPhase::Ready);
    assert!(ctx.reviews().list(None).await.expect("list loads").is_empty());
}

#[tokio::test]
async fn editor_create_flow_reaches_done() {
    let ctx = TestContext::new();
    ctx.sign_up_as("author@example.com", "Author").await;

    let mut editor = ReviewEditor::create(ctx.reviews(), ctx.session.clone());
    *editor.draft_mut() = foodiefinds_integration_tests::draft("Fresh Dish", 4);

    let review = editor.submit().await.expect("complete draft publishes");
    assert_eq!(editor.phase(), EditorPhase::Done);
    assert_eq!(review.food_name, "Fresh Dish");
}

#[tokio::test]
async fn editor_edit_flow_loads_then_updates() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    let review = ctx.seed_review(&author, "First Draft", 3).await;

    let mut editor = ReviewEditor::edit(ctx.reviews(), ctx.session.clone(), review.id.clone());
    assert_eq!(editor.phase(), EditorPhase::LoadingExisting);

    editor.load_existing().await.expect("review exists");
    assert_eq!(editor.phase(), EditorPhase::Ready);
    assert_eq!(editor.draft().food_name, "First Draft");

    editor.draft_mut().food_name = "Final Draft".to_owned();
    let updated = editor.submit().await.expect("owner may update");

    assert_eq!(editor.phase(), EditorPhase::Done);
    assert_eq!(updated.food_name, "Final Draft");
    assert_eq!(updated.id, review.id);
}

#[tokio::test]
async fn editor_submit_by_non_owner_lands_in_error_phase() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    let review = ctx.seed_review(&author, "Author's Dish", 4).await;

    ctx.session.sign_out().await;
    ctx.sign_up_as("intruder@example.com", "Intruder").await;

    let mut editor = ReviewEditor::edit(ctx.reviews(), ctx.session.clone(), review.id.clone());
    editor.load_existing().await.expect("review is public");
    editor.draft_mut().review_text = "Tampered.".to_owned();

    let err = editor.submit().await.expect_err("remote ownership check");
    assert!(matches!(err, AppError::Store(StoreError::Forbidden(_))));
    assert_eq!(editor.phase(), EditorPhase::Error);
}
