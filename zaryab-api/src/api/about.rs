//! About page endpoint

use axum::{extract::State, Json};
use zaryab_common::db::PostType;

use super::find_or_404;
use crate::error::ApiResult;
use crate::projection::AboutUs;
use crate::AppState;

/// Slug of the page served by `/about-us`
pub const ABOUT_SLUG: &str = "about-us";

/// GET /about-us
pub async fn get_about_us(State(state): State<AppState>) -> ApiResult<Json<AboutUs>> {
    let page = find_or_404(&state, PostType::Page, ABOUT_SLUG, "no_page", "No About Us page found").await?;
    Ok(Json(AboutUs::new(&page)))
}
