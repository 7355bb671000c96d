//! Target selection
//!
//! Picks which active brick the player must hit next and words the prompt.

use super::rng::RandomSource;
use super::state::{Brick, Objective, PromptMode};
use crate::vocab::VocabPool;

/// Choose a new target among the active bricks and flag it
///
/// Returns `None` without touching any flag when no active brick can be targeted; the
/// caller treats that as level complete. Bricks whose id is missing from the pool are
/// skipped (debug builds assert, since layouts are only built from the pool).
pub fn refresh_target(
    bricks: &mut [Brick],
    pool: &VocabPool,
    rng: &mut dyn RandomSource,
) -> Option<Objective> {
    let candidates: Vec<usize> = bricks
        .iter()
        .enumerate()
        .filter(|(_, brick)| brick.active)
        .filter(|(_, brick)| {
            let known = pool.get(brick.id).is_some();
            debug_assert!(known, "brick {} references unknown vocabulary id", brick.id);
            if !known {
                log::error!("Brick {} references unknown vocabulary id, skipping", brick.id);
            }
            known
        })
        .map(|(index, _)| index)
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let chosen = candidates[rng.index(candidates.len())];
    let item = pool.get(bricks[chosen].id)?;

    let use_antonym = rng.chance(0.5) && !item.antonyms.is_empty();
    let (mode, clues) = if use_antonym {
        (PromptMode::Antonym, &item.antonyms)
    } else {
        (PromptMode::Synonym, &item.synonyms)
    };
    let clues: Vec<&String> = clues.iter().filter(|c| !c.trim().is_empty()).collect();
    // Pool validation guarantees at least one non-blank synonym
    let clue = if clues.is_empty() {
        item.word.clone()
    } else {
        clues[rng.index(clues.len())].clone()
    };

    let target_id = bricks[chosen].id;
    for brick in bricks.iter_mut() {
        brick.is_target = brick.id == target_id;
    }

    let objective = Objective {
        brick_id: target_id,
        mode,
        clue,
    };
    log::debug!("New target {} ({})", item.word, objective.prompt());
    Some(objective)
}
