//! Favorite management commands.

use std::sync::Arc;

use foodiefinds_core::ReviewId;

use foodiefinds_client::repo::{FavoriteRepository, ReviewRepository};
use foodiefinds_client::viewstate::{AllReviewsController, MyFavoritesController};

use super::{CliError, Context};

/// List the signed-in member's favorites.
#[allow(clippy::print_stdout)]
pub async fn list(email: &str, password: &str) -> Result<(), CliError> {
    let context = Context::signed_in(email, password).await?;
    let favorites = FavoriteRepository::new(Arc::new(context.api.clone()));

    let mut controller = MyFavoritesController::new(favorites, context.session);
    controller.refresh().await?;

    let items = controller.state().items();
    if items.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }
    for favorite in items {
        println!(
            "{}  {}  {} @ {}  reviewed by {}",
            favorite.id,
            favorite.rating,
            favorite.food_name,
            favorite.restaurant_name,
            favorite.reviewer_name
        );
    }
    Ok(())
}

/// Save a review to the member's favorites.
#[allow(clippy::print_stdout)]
pub async fn add(email: &str, password: &str, id: &str) -> Result<(), CliError> {
    let context = Context::signed_in(email, password).await?;
    let reviews = ReviewRepository::new(Arc::new(context.api.clone()));
    let favorites = FavoriteRepository::new(Arc::new(context.api.clone()));

    // The favorite action snapshots from the loaded list, same as the UI
    let mut controller = AllReviewsController::new(reviews, favorites, context.session);
    controller.refresh().await?;

    let favorite = controller.favorite(&ReviewId::new(id)).await?;
    println!("Added {} to favorites ({})", favorite.food_name, favorite.id);
    Ok(())
}
