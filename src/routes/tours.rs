use std::{collections::HashSet, hash::Hash, str::FromStr};

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_with::{formats::CommaSeparator, serde_as, StringWithSeparator};

use crate::{
    models::{
        filter::{FilterCriteria, SortKey, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE},
        search_response::{paginate, DEFAULT_PER_PAGE},
        tour::TourType,
    },
    services::{
        recommendation_service::{recommend, DEFAULT_RECOMMENDATION_LIMIT},
        tour_filter_service::{
            count_by_type, featured_tours, filter_tours, find_tour, search_tours, sort_tours,
            tours_by_type,
        },
    },
    state::AppState,
};

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct TourQuery {
    search: Option<String>,
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, String>")]
    #[serde(default)]
    types: Vec<String>,
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, String>")]
    #[serde(default)]
    destinations: Vec<String>,
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, String>")]
    #[serde(default)]
    durations: Vec<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    sort: Option<String>,
    page: Option<usize>,
    per_page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    limit: Option<usize>,
}

fn parse_set<T>(values: &[String]) -> Result<HashSet<T>, String>
where
    T: FromStr<Err = String> + Eq + Hash,
{
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(T::from_str)
        .collect()
}

impl TourQuery {
    fn criteria(&self) -> Result<FilterCriteria, String> {
        Ok(FilterCriteria {
            search_term: self.search.clone().unwrap_or_default(),
            types: parse_set(&self.types)?,
            destinations: self
                .destinations
                .iter()
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect(),
            durations: parse_set(&self.durations)?,
            min_price: self.min_price.unwrap_or(DEFAULT_MIN_PRICE),
            max_price: self.max_price.unwrap_or(DEFAULT_MAX_PRICE),
        })
    }

    fn sort_key(&self) -> Result<SortKey, String> {
        self.sort.as_deref().unwrap_or_default().parse()
    }
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}

/*
    /api/tours
*/
pub async fn list(state: web::Data<AppState>, query: web::Query<TourQuery>) -> impl Responder {
    let (criteria, sort_key) = match (query.criteria(), query.sort_key()) {
        (Ok(criteria), Ok(sort_key)) => (criteria, sort_key),
        (Err(err), _) | (_, Err(err)) => return bad_request(err),
    };

    let all = state.tours.all().await;
    let filtered = filter_tours(&all, &criteria);
    if state.debug {
        log::debug!("Filtered {} of {} tours", filtered.len(), all.len());
    }

    let sorted = sort_tours(filtered, sort_key, &all);
    let page = paginate(
        sorted,
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    );
    HttpResponse::Ok().json(page)
}

/*
    /api/tours/featured
*/
pub async fn featured(state: web::Data<AppState>) -> impl Responder {
    let all = state.tours.all().await;
    HttpResponse::Ok().json(featured_tours(&all))
}

/*
    /api/tours/counts
*/
pub async fn counts(state: web::Data<AppState>) -> impl Responder {
    let all = state.tours.all().await;
    HttpResponse::Ok().json(count_by_type(&all))
}

/*
    /api/tours/search?q=
*/
pub async fn search(state: web::Data<AppState>, query: web::Query<SearchQuery>) -> impl Responder {
    let all = state.tours.all().await;
    HttpResponse::Ok().json(search_tours(&all, &query.q))
}

/*
    /api/tours/type/{type}
*/
pub async fn by_type(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let tour_type = match path.parse::<TourType>() {
        Ok(tour_type) => tour_type,
        Err(err) => return bad_request(err),
    };

    let all = state.tours.all().await;
    HttpResponse::Ok().json(tours_by_type(&all, tour_type))
}

/*
    /api/tours/{id}
*/
pub async fn get_by_id(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    let id = path.into_inner();
    let all = state.tours.all().await;

    match find_tour(&all, id) {
        Some(tour) => HttpResponse::Ok().json(tour),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Tour not found" })),
    }
}

/*
    /api/tours/{id}/recommended?limit=
*/
pub async fn recommended(
    state: web::Data<AppState>,
    path: web::Path<u32>,
    query: web::Query<RecommendQuery>,
) -> impl Responder {
    let all = state.tours.all().await;
    let limit = query.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
    HttpResponse::Ok().json(recommend(&all, path.into_inner(), limit))
}
