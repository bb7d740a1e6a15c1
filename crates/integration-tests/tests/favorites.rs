//! Favorite scenarios: duplicate prevention, snapshots, removal.

use foodiefinds_core::FavoriteId;

use foodiefinds_client::AppError;
use foodiefinds_client::remote::StoreError;
use foodiefinds_integration_tests::TestContext;

#[tokio::test]
async fn second_add_for_same_pair_is_duplicate_and_count_unchanged() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    let review = ctx.seed_review(&author, "Tonkotsu Ramen", 5).await;

    ctx.session.sign_out().await;
    let fan = ctx.sign_up_as("fan@example.com", "Fan").await;

    let favorite = ctx
        .favorites()
        .add(&fan.email, &review)
        .await
        .expect("first add creates the favorite");
    assert_eq!(favorite.review_id, review.id);
    assert_eq!(ctx.remote.favorite_count(), 1);

    let err = ctx
        .favorites()
        .add(&fan.email, &review)
        .await
        .expect_err("the pair already exists");
    assert!(matches!(
        err,
        AppError::Store(StoreError::DuplicateFavorite(_))
    ));
    assert_eq!(ctx.remote.favorite_count(), 1);
}

#[tokio::test]
async fn different_owners_may_favorite_the_same_review() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    let review = ctx.seed_review(&author, "Shared Dish", 4).await;

    let first = ctx.sign_up_as("first@example.com", "First").await;
    let second = ctx.sign_up_as("second@example.com", "Second").await;

    ctx.favorites()
        .add(&first.email, &review)
        .await
        .expect("first owner saves");
    ctx.favorites()
        .add(&second.email, &review)
        .await
        .expect("distinct pair, no duplicate");

    assert_eq!(ctx.remote.favorite_count(), 2);
}

#[tokio::test]
async fn favorite_snapshot_survives_review_edits() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    let review = ctx.seed_review(&author, "Original Name", 5).await;

    ctx.session.sign_out().await;
    let fan = ctx.sign_up_as("fan@example.com", "Fan").await;
    ctx.favorites()
        .add(&fan.email, &review)
        .await
        .expect("favorite saves");

    // The author renames the dish afterwards
    let revised = foodiefinds_integration_tests::draft("Renamed Dish", 5);
    ctx.reviews()
        .update(&review.id, &revised, &author)
        .await
        .expect("owner may update");

    // The favorite still shows the state captured at favorite-time
    let favorites = ctx
        .favorites()
        .list_by_owner(&fan.email)
        .await
        .expect("favorites reload");
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].food_name, "Original Name");
}

#[tokio::test]
async fn remove_deletes_only_the_requesters_favorite() {
    let ctx = TestContext::new();
    let author = ctx.sign_up_as("author@example.com", "Author").await;
    let review = ctx.seed_review(&author, "Contested Dish", 4).await;

    let fan = ctx.sign_up_as("fan@example.com", "Fan").await;
    let rival = ctx.sign_up_as("rival@example.com", "Rival").await;
    let favorite = ctx
        .favorites()
        .add(&fan.email, &review)
        .await
        .expect("favorite saves");

    let err = ctx
        .favorites()
        .remove(&favorite.id, &rival.email)
        .await
        .expect_err("only the owner may remove");
    assert!(matches!(err, AppError::Store(StoreError::Forbidden(_))));
    assert_eq!(ctx.remote.favorite_count(), 1);

    ctx.favorites()
        .remove(&favorite.id, &fan.email)
        .await
        .expect("owner removes");
    assert_eq!(ctx.remote.favorite_count(), 0);
}

#[tokio::test]
async fn remove_unknown_id_is_not_found() {
    let ctx = TestContext::new();
    let fan = ctx.sign_up_as("fan@example.com", "Fan").await;

    let err = ctx
        .favorites()
        .remove(&FavoriteId::new("missing"), &fan.email)
        .await
        .expect_err("id was never assigned");
    assert!(matches!(err, AppError::Store(StoreError::NotFound(_))));
}
