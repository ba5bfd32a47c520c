//! HTTP handler functions for the LifeCost+ API.

use std::sync::PoisonError;

use actix_web::{HttpResponse, web};
use lifecost_city_models::{City, Priority};
use lifecost_engine::filter::{self, FilterParams};
use lifecost_engine::proximity::{self, DEFAULT_RADIUS_MILES, DistanceUnit};
use lifecost_engine::{EngineError, ranking};
use lifecost_ratings::{environment, safety, transportation};
use lifecost_ratings_models::{AirQualityTrend, CrimeTrend, RatingKind, TransportationTrend};
use lifecost_server_models::{
    ApiError, ApiHealth, ApiRating, CitiesQueryParams, CompareQueryParams, NearbyQueryParams,
    RatingQueryParams,
};

use crate::AppState;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiError::new(message))
}

fn engine_error(err: &EngineError) -> HttpResponse {
    match err {
        EngineError::InvalidIncome(_)
        | EngineError::InvalidMaxRent(_)
        | EngineError::InvalidRadius(_) => bad_request(err.to_string()),
        EngineError::CityNotFound { .. } => {
            HttpResponse::NotFound().json(ApiError::new(err.to_string()))
        }
        EngineError::Catalog(e) => {
            log::error!("Failed to read city catalog: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to read city catalog"))
        }
    }
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.catalog.cities() {
        Ok(cities) => HttpResponse::Ok().json(ApiHealth {
            healthy: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
            city_count: cities.len(),
        }),
        Err(e) => {
            log::error!("Health check failed: {e}");
            HttpResponse::ServiceUnavailable().json(ApiHealth {
                healthy: false,
                version: env!("CARGO_PKG_VERSION").to_string(),
                city_count: 0,
            })
        }
    }
}

/// `GET /api/cities`
///
/// With `income` and `maxRent`, filters to affordable matches. Without them,
/// lists the whole catalog (still honoring `maxCommute` and `minSafety`).
/// Either way results are ranked by `priorities`.
pub async fn cities(
    state: web::Data<AppState>,
    params: web::Query<CitiesQueryParams>,
) -> HttpResponse {
    let priorities = match params.priorities.as_deref().map(Priority::parse_list) {
        None => Vec::new(),
        Some(Ok(priorities)) => priorities,
        Some(Err(unknown)) => return bad_request(format!("Unknown priority: {unknown}")),
    };

    let result = match (params.income, params.max_rent) {
        (Some(income), Some(max_rent)) => {
            let filter = FilterParams {
                income,
                max_rent,
                max_commute: params.max_commute,
                min_safety: params.min_safety,
            };
            lifecost_engine::search(state.catalog.as_ref(), &filter, &priorities)
        }
        (None, None) => state
            .catalog
            .cities()
            .map(|cities| {
                let matched: Vec<City> = cities
                    .into_iter()
                    .filter(|city| {
                        filter::matches_constraints(city, params.max_commute, params.min_safety)
                    })
                    .collect();
                ranking::rank_cities(matched, &priorities)
            })
            .map_err(EngineError::from),
        _ => return bad_request("income and maxRent must be provided together"),
    };

    match result {
        Ok(ranked) => HttpResponse::Ok().json(ranked),
        Err(e) => engine_error(&e),
    }
}

/// `GET /api/cities/{slug}`
pub async fn city(state: web::Data<AppState>, slug: web::Path<String>) -> HttpResponse {
    match lifecost_engine::require_city(state.catalog.as_ref(), &slug) {
        Ok(city) => HttpResponse::Ok().json(city),
        Err(e) => engine_error(&e),
    }
}

/// `GET /api/cities/{slug}/nearby`
///
/// Results are cached per slug, radius, and unit.
pub async fn nearby(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    params: web::Query<NearbyQueryParams>,
) -> HttpResponse {
    let unit = match params.unit.as_deref().map(str::parse::<DistanceUnit>) {
        None => DistanceUnit::default(),
        Some(Ok(unit)) => unit,
        Some(Err(_)) => {
            return bad_request("unit must be 'miles' or 'kilometers'");
        }
    };
    let radius = params.radius.unwrap_or_else(|| {
        proximity::convert_distance(DEFAULT_RADIUS_MILES, DistanceUnit::Miles, unit)
    });

    let key = format!("{slug}:{radius}:{unit}");
    let cached = state
        .nearby_cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key);
    if let Some(cities) = cached {
        log::debug!("nearby cache hit for {key}");
        return HttpResponse::Ok().json(cities);
    }

    match lifecost_engine::nearby_by_slug(state.catalog.as_ref(), &slug, radius, unit) {
        Ok(cities) => {
            state
                .nearby_cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key, cities.clone());
            HttpResponse::Ok().json(cities)
        }
        Err(e) => engine_error(&e),
    }
}

/// `GET /api/compare`
pub async fn compare(
    state: web::Data<AppState>,
    params: web::Query<CompareQueryParams>,
) -> HttpResponse {
    match lifecost_engine::compare_by_slug(state.catalog.as_ref(), &params.city1, &params.city2)
    {
        Ok(comparison) => HttpResponse::Ok().json(comparison),
        Err(e) => engine_error(&e),
    }
}

/// `GET /api/ratings/{kind}`
pub async fn rating(
    kind: web::Path<String>,
    params: web::Query<RatingQueryParams>,
) -> HttpResponse {
    let Ok(kind) = kind.parse::<RatingKind>() else {
        return HttpResponse::NotFound()
            .json(ApiError::new(format!("Unknown rating kind: {kind}")));
    };
    let has_income_tax = params.has_income_tax.unwrap_or(true);

    HttpResponse::Ok().json(ApiRating {
        kind,
        value: params.value,
        band: lifecost_ratings::rate(kind, params.value, has_income_tax),
    })
}

const TOO_FEW_ENTRIES: &str = "At least two trend entries are required";

/// `POST /api/trends/safety`
pub async fn safety_trend(trends: web::Json<Vec<CrimeTrend>>) -> HttpResponse {
    safety::year_over_year_change(&trends).map_or_else(
        || bad_request(TOO_FEW_ENTRIES),
        |change| HttpResponse::Ok().json(change),
    )
}

/// `POST /api/trends/transportation`
pub async fn transportation_trend(trends: web::Json<Vec<TransportationTrend>>) -> HttpResponse {
    transportation::year_over_year_change(&trends).map_or_else(
        || bad_request(TOO_FEW_ENTRIES),
        |change| HttpResponse::Ok().json(change),
    )
}

/// `POST /api/trends/air-quality`
pub async fn air_quality_trend(trends: web::Json<Vec<AirQualityTrend>>) -> HttpResponse {
    environment::year_over_year_change(&trends).map_or_else(
        || bad_request(TOO_FEW_ENTRIES),
        |change| HttpResponse::Ok().json(change),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use lifecost_catalog::InMemoryCatalog;
    use lifecost_server_models::ApiHealth;
    use serde_json::{Value, json};

    use crate::{AppState, configure};

    fn state() -> web::Data<AppState> {
        let catalog = InMemoryCatalog::embedded().unwrap();
        web::Data::new(AppState::new(Arc::new(catalog), Duration::from_secs(60)))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state).configure(configure)).await
        };
    }

    #[actix_web::test]
    async fn health_reports_city_count() {
        let app = app!(state());
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: ApiHealth = test::call_and_read_body_json(&app, req).await;
        assert!(health.healthy);
        assert_eq!(health.city_count, 16);
    }

    #[actix_web::test]
    async fn filtered_cities_respect_rent_and_ratio() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/api/cities?income=60000&maxRent=1500&priorities=safety,commute")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let cities = body.as_array().unwrap();
        assert!(!cities.is_empty());
        for city in cities {
            let rent = city["avgRent"].as_f64().unwrap();
            assert!(rent <= 1500.0);
            assert!(rent * 12.0 / 60_000.0 <= 0.30);
        }
        let scores: Vec<f64> = cities
            .iter()
            .map(|c| c["rankScore"].as_f64().unwrap())
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[actix_web::test]
    async fn unfiltered_listing_returns_whole_catalog() {
        let app = app!(state());
        let req = test::TestRequest::get().uri("/api/cities").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 16);
    }

    #[actix_web::test]
    async fn unfiltered_listing_applies_commute_and_safety() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/api/cities?maxCommute=25&minSafety=60")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let cities = body.as_array().unwrap();
        // raleigh, pittsburgh, boise, madison
        assert_eq!(cities.len(), 4);
        for city in cities {
            assert!(city["commuteTime"].as_f64().unwrap() <= 25.0);
            assert!(city["scores"]["safety"].as_f64().unwrap() >= 60.0);
        }
    }

    #[actix_web::test]
    async fn invalid_filter_inputs_are_bad_requests() {
        let app = app!(state());
        for uri in [
            "/api/cities?income=0&maxRent=1500",
            "/api/cities?income=60000",
            "/api/cities?priorities=jobs",
            "/api/cities?income=abc&maxRent=1500",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
            let body: Value = test::read_body_json(resp).await;
            assert!(body["error"].is_string(), "{uri}");
        }
    }

    #[actix_web::test]
    async fn unknown_city_is_not_found() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/api/cities/atlantis-xx")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/api/cities/austin-tx").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], "Austin");
    }

    #[actix_web::test]
    async fn compare_highlights_are_antisymmetric() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/api/compare?city1=austin-tx&city2=denver-co")
            .to_request();
        let forward: Value = test::call_and_read_body_json(&app, req).await;
        let req = test::TestRequest::get()
            .uri("/api/compare?city1=denver-co&city2=austin-tx")
            .to_request();
        let backward: Value = test::call_and_read_body_json(&app, req).await;

        let forward_rows = forward["rows"].as_array().unwrap();
        let backward_rows = backward["rows"].as_array().unwrap();
        assert_eq!(forward_rows.len(), backward_rows.len());
        for (f, b) in forward_rows.iter().zip(backward_rows) {
            let swapped = match f["highlight"].as_str().unwrap() {
                "first" => "second",
                "second" => "first",
                other => other,
            };
            assert_eq!(b["highlight"], swapped);
        }

        let req = test::TestRequest::get()
            .uri("/api/compare?city1=austin-tx")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn nearby_results_are_sorted_and_cached() {
        let state = state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/api/cities/raleigh-nc/nearby?radius=200")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let distances: Vec<f64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["distanceMiles"].as_f64().unwrap())
            .collect();
        assert!(distances.iter().all(|d| *d <= 200.0));
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        assert!(body.as_array().unwrap().iter().any(|c| c["slug"] == "charlotte-nc"));
        assert_eq!(state.nearby_cache.lock().unwrap().len(), 1);

        let req = test::TestRequest::get()
            .uri("/api/cities/raleigh-nc/nearby?radius=-1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/cities/raleigh-nc/nearby?unit=furlongs")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn rates_values_by_kind() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/api/ratings/air-quality?value=51")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["rating"], "Moderate");
        assert_eq!(body["kind"], "air-quality");

        let req = test::TestRequest::get()
            .uri("/api/ratings/income-tax?value=5&hasIncomeTax=false")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["rating"], "No Income Tax");

        let req = test::TestRequest::get()
            .uri("/api/ratings/happiness?value=5")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn safety_trend_reports_change() {
        let app = app!(state());
        let req = test::TestRequest::post()
            .uri("/api/trends/safety")
            .set_json(json!([
                { "year": 2023, "violentCrimeRate": 380.0, "propertyCrimeRate": 1900.0, "overallCrimeIndex": 48.0 },
                { "year": 2022, "violentCrimeRate": 400.0, "propertyCrimeRate": 2000.0, "overallCrimeIndex": 50.0 },
            ]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["direction"], "improving");
        assert!((body["overallChange"].as_f64().unwrap() - -4.0).abs() < 1e-9);

        let req = test::TestRequest::post()
            .uri("/api/trends/air-quality")
            .set_json(json!([]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
