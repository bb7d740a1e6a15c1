//! Review browsing and publishing commands.

use std::sync::Arc;

use foodiefinds_core::{Rating, ReviewId};

use foodiefinds_client::models::Review;
use foodiefinds_client::repo::{FavoriteRepository, ReviewRepository};
use foodiefinds_client::viewstate::{
    AllReviewsController, FeaturedReviewsController, MyReviewsController, ReviewDetailController,
    ReviewEditor,
};

use super::{CliError, Context};

/// Arguments for posting a review.
pub struct PostArgs {
    pub food: String,
    pub image: String,
    pub restaurant: String,
    pub location: String,
    pub rating: u8,
    pub text: String,
}

/// List all reviews, optionally narrowed by a search term.
pub async fn list(search: Option<&str>) -> Result<(), CliError> {
    let context = Context::from_env()?;
    let reviews = ReviewRepository::new(Arc::new(context.api.clone()));
    let favorites = FavoriteRepository::new(Arc::new(context.api.clone()));

    let mut controller = AllReviewsController::new(reviews, favorites, context.session);
    match search {
        Some(term) => controller.search(term).await?,
        None => controller.refresh().await?,
    }

    print_reviews(controller.state().items());
    Ok(())
}

/// Show the top-rated subset.
pub async fn featured() -> Result<(), CliError> {
    let context = Context::from_env()?;
    let reviews = ReviewRepository::new(Arc::new(context.api));

    let mut controller = FeaturedReviewsController::new(reviews);
    controller.refresh().await?;

    print_reviews(controller.state().items());
    Ok(())
}

/// Show one review in full.
#[allow(clippy::print_stdout)]
pub async fn show(id: &str) -> Result<(), CliError> {
    let context = Context::from_env()?;
    let reviews = ReviewRepository::new(Arc::new(context.api));

    let mut controller = ReviewDetailController::new(reviews);
    controller.load(&ReviewId::new(id)).await?;

    if let Some(review) = controller.review() {
        println!("{} ({})", review.food_name, review.rating);
        println!("{} - {}", review.restaurant_name, review.location);
        println!();
        println!("{}", review.review_text);
        println!();
        println!(
            "Reviewed by {} on {}",
            review.owner_name,
            review.posted_at.format("%B %e, %Y")
        );
    }
    Ok(())
}

/// List the signed-in member's reviews.
pub async fn mine(email: &str, password: &str) -> Result<(), CliError> {
    let context = Context::signed_in(email, password).await?;
    let reviews = ReviewRepository::new(Arc::new(context.api.clone()));

    let mut controller = MyReviewsController::new(reviews, context.session);
    controller.refresh().await?;

    print_reviews(controller.state().items());
    Ok(())
}

/// Publish a new review.
#[allow(clippy::print_stdout)]
pub async fn post(email: &str, password: &str, args: PostArgs) -> Result<(), CliError> {
    let context = Context::signed_in(email, password).await?;
    let reviews = ReviewRepository::new(Arc::new(context.api.clone()));

    let mut editor = ReviewEditor::create(reviews, context.session);
    let draft = editor.draft_mut();
    draft.food_name = args.food;
    draft.food_image = args.image;
    draft.restaurant_name = args.restaurant;
    draft.location = args.location;
    draft.rating = Rating::new(args.rating).ok();
    draft.review_text = args.text;

    let review = editor.submit().await?;
    println!("Published {} ({})", review.food_name, review.id);
    Ok(())
}

/// Delete one of the member's reviews.
#[allow(clippy::print_stdout)]
pub async fn delete(email: &str, password: &str, id: &str) -> Result<(), CliError> {
    let context = Context::signed_in(email, password).await?;
    let reviews = ReviewRepository::new(Arc::new(context.api.clone()));

    let mut controller = MyReviewsController::new(reviews, context.session);
    controller.refresh().await?;

    controller.delete(&ReviewId::new(id)).await.into_result()?;
    println!("Deleted {id}");
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_reviews(reviews: &[Review]) {
    if reviews.is_empty() {
        println!("No reviews found.");
        return;
    }
    for review in reviews {
        println!(
            "{}  {}  {} @ {}  by {}",
            review.id, review.rating, review.food_name, review.restaurant_name, review.owner_name
        );
    }
}
