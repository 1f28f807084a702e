use crate::models::tour::Tour;
use std::collections::HashSet;

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 4;

/// Pick up to `limit` tours to show next to `current_id`, preferring the
/// same city, then the same country, then anything else.
///
/// Within each level tours keep catalog order. An unknown `current_id`
/// falls back to the head of the catalog.
pub fn recommend(all: &[Tour], current_id: u32, limit: usize) -> Vec<Tour> {
    let limit = limit.min(all.len());
    let Some(current) = all.iter().find(|tour| tour.id == current_id) else {
        return all.iter().take(limit).cloned().collect();
    };

    let others: Vec<&Tour> = all.iter().filter(|tour| tour.id != current_id).collect();

    let same_city: Vec<&Tour> = others
        .iter()
        .copied()
        .filter(|tour| same_place(&tour.city, &current.city))
        .collect();

    if same_city.len() >= limit {
        return same_city.into_iter().take(limit).cloned().collect();
    }

    let mut picked: Vec<&Tour> = Vec::with_capacity(limit);
    let mut seen: HashSet<u32> = HashSet::new();

    let by_country = others
        .iter()
        .filter(|tour| same_place(&tour.country, &current.country));

    for tour in same_city.iter().chain(by_country).chain(others.iter()) {
        if picked.len() == limit {
            break;
        }
        if seen.insert(tour.id) {
            picked.push(*tour);
        }
    }

    picked.into_iter().cloned().collect()
}

fn same_place(candidate: &Option<String>, current: &Option<String>) -> bool {
    match (candidate, current) {
        (Some(candidate), Some(current)) => candidate.to_lowercase() == current.to_lowercase(),
        _ => false,
    }
}
