//! Episode endpoint

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;
use zaryab_common::db::{PostType, Taxonomy};

use super::find_or_404;
use crate::adjacency::{find_adjacent, Adjacent, SEQUENCE_FIELD, STORY_FIELD};
use crate::error::ApiResult;
use crate::projection::{EpisodeContext, EpisodeDetail};
use crate::AppState;

/// GET /episodes/{slug}
///
/// Author and collection come from the parent story. Previous/next links are
/// only resolved when the episode belongs to a story.
pub async fn get_episode(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<EpisodeDetail>> {
    let episode = find_or_404(
        &state,
        PostType::Episode,
        &slug,
        "no_episode",
        "No episode found with the provided slug",
    )
    .await?;

    let categories = state.repo.post_terms(episode.id, Taxonomy::Categories).await?;
    let story = state.repo.related(&episode, STORY_FIELD).await?;

    let (author, collection, previous, next) = match &story {
        Some(story) => {
            let sequence = episode.field_i64(SEQUENCE_FIELD).unwrap_or(0);
            let repo = state.repo.as_ref();
            (
                repo.related(story, "author").await?,
                repo.post_terms(story.id, Taxonomy::Collection).await?,
                find_adjacent(repo, story.id, sequence, Adjacent::Previous).await?,
                find_adjacent(repo, story.id, sequence, Adjacent::Next).await?,
            )
        }
        None => {
            debug!("Episode {} has no linked story", episode.slug);
            (None, Vec::new(), None, None)
        }
    };

    let ctx = EpisodeContext {
        story: story.as_ref(),
        author: author.as_ref(),
        categories: &categories,
        collection: &collection,
        previous,
        next,
    };
    Ok(Json(EpisodeDetail::new(&episode, ctx)))
}
