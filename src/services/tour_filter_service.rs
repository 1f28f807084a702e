use crate::models::{
    filter::{FilterCriteria, SortKey},
    tour::{Tour, TourType},
};
use std::collections::{BTreeMap, HashMap};

/// Hours assumed for a duration text none of the known phrases describe
const FALLBACK_DURATION_HOURS: f64 = 8.0;

/// Narrow the catalog to the tours matching every facet of `criteria`.
///
/// Facets combine with AND; within a facet any selected value matches.
/// The input is left untouched and matching tours are cloned in catalog
/// order.
pub fn filter_tours(all: &[Tour], criteria: &FilterCriteria) -> Vec<Tour> {
    let needle = criteria.search_term.to_lowercase();

    all.iter()
        .filter(|tour| {
            matches_search(tour, &needle)
                && matches_type(tour, criteria)
                && matches_destination(tour, criteria)
                && matches_duration(tour, criteria)
                && matches_price(tour, criteria)
        })
        .cloned()
        .collect()
}

fn matches_search(tour: &Tour, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    tour.title.to_lowercase().contains(needle)
        || tour.description.to_lowercase().contains(needle)
        || tour
            .highlights
            .iter()
            .any(|highlight| highlight.to_lowercase().contains(needle))
}

fn matches_type(tour: &Tour, criteria: &FilterCriteria) -> bool {
    criteria.types.is_empty() || criteria.types.contains(&tour.tour_type)
}

fn matches_destination(tour: &Tour, criteria: &FilterCriteria) -> bool {
    criteria.destinations.is_empty()
        || tour
            .destinations
            .iter()
            .any(|destination| criteria.destinations.contains(destination))
}

fn matches_duration(tour: &Tour, criteria: &FilterCriteria) -> bool {
    criteria.durations.is_empty()
        || criteria
            .durations
            .iter()
            .any(|bucket| bucket.matches(&tour.duration))
}

fn matches_price(tour: &Tour, criteria: &FilterCriteria) -> bool {
    tour.price >= criteria.min_price && tour.price <= criteria.max_price
}

/// Approximate length in hours of a free-text duration such as "8 часов"
/// or "3 дня / 2 ночи".
pub fn duration_hours(duration: &str) -> f64 {
    const HOUR_MARKERS: [(&str, f64); 7] = [
        ("2 часа", 2.0),
        ("3 часа", 3.0),
        ("4.5 часа", 4.5),
        ("6 часов", 6.0),
        ("8 часов", 8.0),
        ("10 часов", 10.0),
        ("12 часов", 12.0),
    ];

    if let Some((_, hours)) = HOUR_MARKERS
        .iter()
        .find(|(marker, _)| duration.contains(marker))
    {
        return *hours;
    }

    if duration.contains("дня") || duration.contains("дней") {
        if let Some(days) = leading_integer(duration) {
            return days as f64 * 24.0;
        }
    }

    FALLBACK_DURATION_HOURS
}

fn leading_integer(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Order `tours` by `key`. The sort is stable, so ties keep their incoming
/// order. `SortKey::Default` restores the order the tours have in
/// `catalog`.
pub fn sort_tours(mut tours: Vec<Tour>, key: SortKey, catalog: &[Tour]) -> Vec<Tour> {
    match key {
        SortKey::PriceLow => tours.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => tours.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Rating => tours.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Popular => tours.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
        SortKey::Duration => tours.sort_by(|a, b| {
            duration_hours(&a.duration).total_cmp(&duration_hours(&b.duration))
        }),
        SortKey::Default => {
            let positions: HashMap<u32, usize> = catalog
                .iter()
                .enumerate()
                .map(|(position, tour)| (tour.id, position))
                .collect();
            tours.sort_by_key(|tour| positions.get(&tour.id).copied().unwrap_or(usize::MAX));
        }
    }
    tours
}

/// Per-type tallies for the facet counters. Every type is present, even
/// with a zero count.
pub fn count_by_type(all: &[Tour]) -> BTreeMap<TourType, usize> {
    let mut counts: BTreeMap<TourType, usize> =
        TourType::ALL.iter().map(|tour_type| (*tour_type, 0)).collect();
    for tour in all {
        *counts.entry(tour.tour_type).or_insert(0) += 1;
    }
    counts
}

/// Header search box: a looser match than the catalog filter that also
/// looks at tags and location.
pub fn search_tours(all: &[Tour], query: &str) -> Vec<Tour> {
    let query = query.trim();
    if query.is_empty() {
        return all.to_vec();
    }

    let needle = query.to_lowercase();
    let contains = |value: &str| value.to_lowercase().contains(&needle);

    all.iter()
        .filter(|tour| {
            contains(&tour.title)
                || contains(&tour.description)
                || tour.tags.iter().any(|tag| contains(tag))
                || tour.city.as_deref().map_or(false, contains)
                || tour.country.as_deref().map_or(false, contains)
        })
        .cloned()
        .collect()
}

pub fn featured_tours(all: &[Tour]) -> Vec<Tour> {
    all.iter().filter(|tour| tour.featured).cloned().collect()
}

pub fn tours_by_type(all: &[Tour], tour_type: TourType) -> Vec<Tour> {
    all.iter()
        .filter(|tour| tour.tour_type == tour_type)
        .cloned()
        .collect()
}

pub fn find_tour(all: &[Tour], id: u32) -> Option<&Tour> {
    all.iter().find(|tour| tour.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filter::DurationBucket;

    fn tour(id: u32, title: &str, tour_type: TourType, price: f64, duration: &str) -> Tour {
        let mut tour = Tour::new(id, title, tour_type, price);
        tour.duration = duration.to_string();
        tour
    }

    fn catalog() -> Vec<Tour> {
        let mut gobustan = tour(1, "Gobustan Tour", TourType::Group, 38.0, "6 часов");
        gobustan.destinations = vec!["gobustan".to_string(), "baku".to_string()];
        gobustan.highlights = vec!["Mud volcanoes".to_string()];
        gobustan.rating = 4.9;
        gobustan.review_count = 210;

        let mut qabala = tour(2, "Qabala Resort", TourType::Private, 49.0, "10 часов");
        qabala.destinations = vec!["qabala".to_string()];
        qabala.description = "Mountain lakes and cable cars".to_string();
        qabala.rating = 4.7;
        qabala.review_count = 340;

        let mut sheki = tour(3, "Sheki Weekend", TourType::Package, 220.0, "3 дня / 2 ночи");
        sheki.destinations = vec!["sheki".to_string()];
        sheki.rating = 4.9;
        sheki.review_count = 90;

        let mut transfer = tour(4, "Airport Driver", TourType::Driver, 25.0, "2 часа");
        transfer.destinations = vec!["baku".to_string()];
        transfer.rating = 4.2;
        transfer.review_count = 15;

        let grand = tour(5, "Grand Azerbaijan", TourType::Package, 540.0, "7 дней");

        vec![gobustan, qabala, sheki, transfer, grand]
    }

    fn ids(tours: &[Tour]) -> Vec<u32> {
        tours.iter().map(|tour| tour.id).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let all = catalog();
        let criteria = FilterCriteria {
            search_term: "gobustan".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tours(&all[..2], &criteria)), vec![1]);
    }

    #[test]
    fn test_search_matches_description_and_highlights() {
        let all = catalog();
        let by_highlight = FilterCriteria {
            search_term: "VOLCANO".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tours(&all, &by_highlight)), vec![1]);

        let by_description = FilterCriteria {
            search_term: "cable".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tours(&all, &by_description)), vec![2]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let all = catalog();
        let criteria = FilterCriteria {
            min_price: 40.0,
            max_price: 60.0,
            ..Default::default()
        };
        assert_eq!(ids(&filter_tours(&all[..2], &criteria)), vec![2]);

        let exact = FilterCriteria {
            min_price: 38.0,
            max_price: 49.0,
            ..Default::default()
        };
        assert_eq!(ids(&filter_tours(&all, &exact)), vec![1, 2]);
    }

    #[test]
    fn test_inverted_price_range_yields_nothing() {
        let criteria = FilterCriteria {
            min_price: 100.0,
            max_price: 50.0,
            ..Default::default()
        };
        assert!(filter_tours(&catalog(), &criteria).is_empty());
    }

    #[test]
    fn test_facets_or_within_and_across() {
        let all = catalog();
        let criteria = FilterCriteria {
            types: [TourType::Group, TourType::Driver].into_iter().collect(),
            destinations: ["baku".to_string()].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tours(&all, &criteria)), vec![1, 4]);

        let narrower = FilterCriteria {
            durations: [DurationBucket::FewHours].into_iter().collect(),
            ..criteria
        };
        assert_eq!(ids(&filter_tours(&all, &narrower)), vec![4]);
    }

    #[test]
    fn test_duration_buckets() {
        let all = catalog();
        let criteria = FilterCriteria {
            durations: [DurationBucket::TwoToThreeDays, DurationBucket::FourPlusDays]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tours(&all, &criteria)), vec![3, 5]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let all = catalog();
        let criteria = FilterCriteria {
            search_term: "a".to_string(),
            min_price: 30.0,
            max_price: 300.0,
            ..Default::default()
        };
        let once = filter_tours(&all, &criteria);
        let twice = filter_tours(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_extra_restriction_never_grows_result() {
        let all = catalog();
        let base = FilterCriteria::default();
        let restrictions = vec![
            FilterCriteria {
                types: [TourType::Package].into_iter().collect(),
                ..base.clone()
            },
            FilterCriteria {
                destinations: ["baku".to_string()].into_iter().collect(),
                ..base.clone()
            },
            FilterCriteria {
                durations: [DurationBucket::OneDay].into_iter().collect(),
                ..base.clone()
            },
            FilterCriteria {
                max_price: 100.0,
                ..base.clone()
            },
            FilterCriteria {
                search_term: "tour".to_string(),
                ..base.clone()
            },
        ];

        let base_len = filter_tours(&all, &base).len();
        for restricted in restrictions {
            assert!(filter_tours(&all, &restricted).len() <= base_len);
        }
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let all = catalog();
        let snapshot = all.clone();
        let _ = filter_tours(
            &all,
            &FilterCriteria {
                search_term: "sheki".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(all, snapshot);
    }

    #[test]
    fn test_duration_hours_heuristic() {
        assert_eq!(duration_hours("2 часа"), 2.0);
        assert_eq!(duration_hours("4.5 часа"), 4.5);
        assert_eq!(duration_hours("12 часов"), 12.0);
        assert_eq!(duration_hours("3 дня / 2 ночи"), 72.0);
        assert_eq!(duration_hours("Полный день"), 8.0);
        assert_eq!(duration_hours("несколько дней"), 8.0);
    }

    #[test]
    fn test_sort_by_price_and_popularity() {
        let all = catalog();
        assert_eq!(
            ids(&sort_tours(all.clone(), SortKey::PriceLow, &all)),
            vec![4, 1, 2, 3, 5]
        );
        assert_eq!(
            ids(&sort_tours(all.clone(), SortKey::PriceHigh, &all)),
            vec![5, 3, 2, 1, 4]
        );
        assert_eq!(
            ids(&sort_tours(all.clone(), SortKey::Popular, &all)),
            vec![2, 1, 3, 4, 5]
        );
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let all = catalog();
        // Tours 1 and 3 share a 4.9 rating; 5 has none.
        assert_eq!(
            ids(&sort_tours(all.clone(), SortKey::Rating, &all)),
            vec![1, 3, 2, 4, 5]
        );
    }

    #[test]
    fn test_sort_by_duration() {
        let all = catalog();
        assert_eq!(
            ids(&sort_tours(all.clone(), SortKey::Duration, &all)),
            vec![4, 1, 2, 3, 5]
        );
    }

    #[test]
    fn test_default_sort_restores_catalog_order() {
        let all = catalog();
        let shuffled = sort_tours(all.clone(), SortKey::PriceHigh, &all);
        let subset: Vec<Tour> = shuffled.into_iter().filter(|t| t.id != 2).collect();
        assert_eq!(
            ids(&sort_tours(subset, SortKey::Default, &all)),
            vec![1, 3, 4, 5]
        );
    }

    #[test]
    fn test_count_by_type_includes_every_type() {
        let counts = count_by_type(&catalog()[..2]);
        assert_eq!(counts[&TourType::Group], 1);
        assert_eq!(counts[&TourType::Private], 1);
        assert_eq!(counts[&TourType::Driver], 0);
        assert_eq!(counts[&TourType::Package], 0);
    }

    #[test]
    fn test_quick_search_covers_tags_and_location() {
        let mut all = catalog();
        all[2].city = Some("Sheki".to_string());
        all[3].tags = vec!["transfer".to_string()];

        assert_eq!(ids(&search_tours(&all, "SHEKI")), vec![3]);
        assert_eq!(ids(&search_tours(&all, "transfer")), vec![4]);
        assert_eq!(search_tours(&all, "   ").len(), all.len());
    }

    #[test]
    fn test_featured_and_by_type() {
        let mut all = catalog();
        all[1].featured = true;
        assert_eq!(ids(&featured_tours(&all)), vec![2]);
        assert_eq!(ids(&tours_by_type(&all, TourType::Package)), vec![3, 5]);
        assert_eq!(find_tour(&all, 4).map(|t| t.id), Some(4));
        assert!(find_tour(&all, 99).is_none());
    }
}
