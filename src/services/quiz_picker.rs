use std::collections::HashSet;

use rand::{seq::IndexedRandom, Rng};

use crate::{
    errors::{AppError, AppResult},
    models::domain::Question,
};

/// Restricts quiz questions to one category, or plays across all of them.
///
/// On the wire the trivia frontend sends `0` for "all categories"; that value
/// never reaches storage as a category id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(i64),
}

impl CategoryFilter {
    pub fn from_wire(id: i64) -> AppResult<Self> {
        match id {
            0 => Ok(CategoryFilter::All),
            id if id > 0 => Ok(CategoryFilter::Category(id)),
            id => Err(AppError::ValidationError(format!(
                "quiz category id must be 0 or positive, got {}",
                id
            ))),
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => question.category == *id,
        }
    }
}

/// Picks one question uniformly among those matching `filter` whose id is
/// not in `previous`.
pub fn pick_question<'a>(
    pool: &'a [Question],
    filter: CategoryFilter,
    previous: &HashSet<i64>,
) -> AppResult<&'a Question> {
    pick_question_with(pool, filter, previous, &mut rand::rng())
}

pub fn pick_question_with<'a, R: Rng + ?Sized>(
    pool: &'a [Question],
    filter: CategoryFilter,
    previous: &HashSet<i64>,
    rng: &mut R,
) -> AppResult<&'a Question> {
    let candidates: Vec<&Question> = pool
        .iter()
        .filter(|q| filter.matches(q))
        .filter(|q| !previous.contains(&q.id))
        .collect();

    candidates
        .choose(rng)
        .copied()
        .ok_or_else(|| AppError::NotFound("No unseen questions left for this quiz".to_string()))
}
