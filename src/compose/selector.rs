//! Choice of the template slide used for a requested slide type.
use super::catalog::{SlideCatalog, SlideCatalogEntry};
use super::error::{ComposeError, Result};

/// Pick the entry of `slide_type` that declares the most of `requested`.
///
/// The score of a candidate is how many requested field names it declares.
/// Only a strictly higher score displaces the current best, so ties go to
/// the candidate that comes first in the template.
pub fn select<'c, 'r, I>(catalog: &'c SlideCatalog, slide_type: &str, requested: I) -> Result<&'c SlideCatalogEntry>
where
    I: IntoIterator<Item = &'r str> + Clone,
{
    let candidates = catalog
        .candidates(slide_type)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ComposeError::UnknownSlideType {
            requested: slide_type.to_string(),
            available: catalog.type_names().to_vec(),
        })?;

    let mut best = &candidates[0];
    if candidates.len() > 1 {
        let mut best_score = best.metadata.overlap(requested.clone());
        for candidate in &candidates[1..] {
            let score = candidate.metadata.overlap(requested.clone());
            if score > best_score {
                best = candidate;
                best_score = score;
            }
        }
        tracing::debug!(
            slide_type,
            candidates = candidates.len(),
            chosen = best.template_index,
            score = best_score,
            "selected among candidates"
        );
    }
    Ok(best)
}
