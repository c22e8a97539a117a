//! Previous/next episode lookup within a story

use zaryab_common::db::PostType;
use zaryab_common::Result;

use crate::pagination::PageRequest;
use crate::repository::{Compare, ContentQuery, ContentRepository, Direction, SortKey};

/// Custom field linking an episode to its story
pub const STORY_FIELD: &str = "story";

/// Custom field ordering episodes within a story
pub const SEQUENCE_FIELD: &str = "episode_number";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacent {
    Previous,
    Next,
}

/// Query selecting the closest episode of `story_id` before or after `current_seq`
pub fn adjacent_query(story_id: i64, current_seq: i64, adjacent: Adjacent) -> ContentQuery {
    let (compare, direction) = match adjacent {
        Adjacent::Previous => (Compare::Lt, Direction::Desc),
        Adjacent::Next => (Compare::Gt, Direction::Asc),
    };

    ContentQuery::new(PostType::Episode)
        .with_meta(STORY_FIELD, Compare::Eq, story_id)
        .with_meta(SEQUENCE_FIELD, compare, current_seq)
        .ordered_by(SortKey::MetaNumber(SEQUENCE_FIELD.to_string()), direction)
        .paged(PageRequest { page: 1, per_page: 1 })
}

/// Slug of the neighbouring episode, or `None` at either end of the sequence
///
/// Gaps in the numbering are skipped; equal numbers resolve to the lowest post id.
pub async fn find_adjacent(
    repo: &dyn ContentRepository,
    story_id: i64,
    current_seq: i64,
    adjacent: Adjacent,
) -> Result<Option<String>> {
    let result = repo.query(&adjacent_query(story_id, current_seq, adjacent)).await?;
    Ok(result.items.into_iter().next().map(|episode| episode.slug))
}

/// Every episode of a story in sequence order
pub fn story_episodes_query(story_id: i64) -> ContentQuery {
    ContentQuery::new(PostType::Episode)
        .with_meta(STORY_FIELD, Compare::Eq, story_id)
        .ordered_by(SortKey::MetaNumber(SEQUENCE_FIELD.to_string()), Direction::Asc)
}
