//! HTTP server for the school-day endpoints.
//!
//! Handlers are thin wrappers over pure summary functions that take "today"
//! as a parameter, so the response shapes are testable without a socket.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    response::{Html, Json},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::calendar::{count_by_weekdays, count_school_days, group_by_month};
use crate::config::CalendarConfig;

/// API server serving the landing page and the JSON endpoints.
pub struct ApiServer {
    config: Arc<CalendarConfig>,
    port: u16,
}

impl ApiServer {
    pub fn new(config: Arc<CalendarConfig>, port: u16) -> Self {
        Self { config, port }
    }

    /// Bind and serve until shutdown.
    pub async fn start(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let app = self.build_router();

        info!("Starting school-days server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    fn build_router(self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/api/dias", get(api_dias))
            .route("/api/meses", get(api_meses))
            .layer(CorsLayer::permissive())
            .with_state(self.config)
    }
}

/// Response body for `GET /api/dias`.
///
/// One extra integer field per configured class schedule is flattened in,
/// keyed by the schedule's `key` (`seg_ter`, `qui_sex` in the built-in
/// configuration).
#[derive(Debug, Serialize)]
pub struct DaysSummary {
    pub today: NaiveDate,
    pub target: NaiveDate,
    pub days_left: u32,
    pub holidays: Vec<NaiveDate>,
    pub finished: bool,
    #[serde(flatten)]
    pub schedules: Map<String, Value>,
}

/// Remaining-days summary for the window `[today, target]`.
///
/// When today is past the target the window is empty: zero days left, no
/// holidays listed, `finished` set.
pub fn days_summary(today: NaiveDate, config: &CalendarConfig) -> DaysSummary {
    let days_left = count_school_days(today, config.target, &config.holidays);
    let holidays = config.holidays.in_range(today, config.target);

    let mut schedules = Map::new();
    for schedule in &config.schedules {
        let count = count_by_weekdays(today, config.target, &config.holidays, &schedule.weekdays);
        schedules.insert(schedule.key.clone(), Value::from(count));
    }

    DaysSummary {
        today,
        target: config.target,
        days_left,
        holidays,
        finished: today > config.target,
        schedules,
    }
}

/// Per-month counts for `GET /api/meses`, "MM/YYYY" keys in chronological
/// order (insertion order is preserved through serialization).
pub fn months_summary(today: NaiveDate, config: &CalendarConfig) -> Map<String, Value> {
    let mut months = Map::new();
    for (key, count) in group_by_month(today, config.target, &config.holidays) {
        months.insert(key.to_string(), Value::from(count));
    }
    months
}

// Route handlers

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn api_dias(State(config): State<Arc<CalendarConfig>>) -> Json<DaysSummary> {
    Json(days_summary(Local::now().date_naive(), &config))
}

async fn api_meses(State(config): State<Arc<CalendarConfig>>) -> Json<Map<String, Value>> {
    Json(months_summary(Local::now().date_naive(), &config))
}

const INDEX_HTML: &str = r#"
<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Dias Letivos</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 2rem;
            background-color: #f5f5f5;
            color: #2c3e50;
        }
        .card {
            background: white;
            border-radius: 8px;
            box-shadow: 0 1px 3px rgba(0,0,0,0.12);
            padding: 1.5rem;
            margin-bottom: 1rem;
            max-width: 480px;
        }
        .big { font-size: 3rem; font-weight: 700; }
        .muted { color: #7f8c8d; }
        table { border-collapse: collapse; }
        td { padding: 0.25rem 1rem 0.25rem 0; }
    </style>
</head>
<body>
    <div class="card">
        <div class="muted">Dias letivos restantes até <span id="target"></span></div>
        <div class="big" id="days-left">–</div>
        <div id="finished" class="muted" hidden>Ano letivo encerrado!</div>
        <table id="schedules"></table>
    </div>
    <div class="card">
        <div class="muted">Por mês</div>
        <table id="months"></table>
    </div>
    <div class="card">
        <div class="muted">Feriados no período</div>
        <ul id="holidays"></ul>
    </div>
    <script>
        async function load() {
            const dias = await (await fetch('/api/dias')).json();
            document.getElementById('target').textContent = dias.target;
            document.getElementById('days-left').textContent = dias.days_left;
            document.getElementById('finished').hidden = !dias.finished;
            const schedules = document.getElementById('schedules');
            for (const key of Object.keys(dias)) {
                if (['today', 'target', 'days_left', 'holidays', 'finished'].includes(key)) continue;
                const row = schedules.insertRow();
                row.insertCell().textContent = key;
                row.insertCell().textContent = dias[key];
            }
            const holidays = document.getElementById('holidays');
            for (const d of dias.holidays) {
                const li = document.createElement('li');
                li.textContent = d;
                holidays.appendChild(li);
            }
            const meses = await (await fetch('/api/meses')).json();
            const months = document.getElementById('months');
            for (const [key, count] of Object.entries(meses)) {
                const row = months.insertRow();
                row.insertCell().textContent = key;
                row.insertCell().textContent = count;
            }
        }
        load();
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HolidaySet;
    use crate::config::ClassSchedule;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_config() -> CalendarConfig {
        CalendarConfig {
            holidays: HolidaySet::from_strs(&["2025-10-13", "2025-11-20", "2025-12-08"]).unwrap(),
            target: date(2025, 12, 18),
            schedules: vec![
                ClassSchedule::new("seg_ter", vec![Weekday::Mon, Weekday::Tue]),
                ClassSchedule::new("qui_sex", vec![Weekday::Thu, Weekday::Fri]),
            ],
        }
    }

    #[test]
    fn summary_on_target_day_counts_the_single_day() {
        let config = test_config();
        // 2025-12-18 is a Thursday, not a holiday.
        let summary = days_summary(config.target, &config);
        assert_eq!(summary.days_left, 1);
        assert!(!summary.finished);
        assert_eq!(summary.schedules["qui_sex"], Value::from(1u32));
        assert_eq!(summary.schedules["seg_ter"], Value::from(0u32));
    }

    #[test]
    fn summary_past_target_is_finished_and_empty() {
        let config = test_config();
        let summary = days_summary(config.target + chrono::Days::new(1), &config);
        assert_eq!(summary.days_left, 0);
        assert!(summary.finished);
        assert!(summary.holidays.is_empty());
        assert_eq!(summary.schedules["seg_ter"], Value::from(0u32));
        assert_eq!(summary.schedules["qui_sex"], Value::from(0u32));
    }

    #[test]
    fn summary_serializes_flat_schedule_fields() {
        let config = test_config();
        let value = serde_json::to_value(days_summary(date(2025, 12, 15), &config)).unwrap();
        assert_eq!(value["today"], "2025-12-15");
        assert_eq!(value["target"], "2025-12-18");
        assert!(value["seg_ter"].is_u64());
        assert!(value["qui_sex"].is_u64());
        assert!(value["finished"].is_boolean());
    }

    #[test]
    fn summary_lists_holidays_sorted_within_window() {
        let config = test_config();
        let summary = days_summary(date(2025, 11, 1), &config);
        let iso: Vec<String> = summary.holidays.iter().map(|d| d.to_string()).collect();
        assert_eq!(iso, vec!["2025-11-20", "2025-12-08"]);
    }

    #[test]
    fn month_keys_stay_chronological_across_year_boundary() {
        let mut config = test_config();
        config.target = date(2026, 2, 10);
        let months = months_summary(date(2025, 11, 24), &config);
        let keys: Vec<&String> = months.keys().collect();
        assert_eq!(keys, vec!["11/2025", "12/2025", "01/2026", "02/2026"]);
    }

    #[test]
    fn months_json_preserves_key_order() {
        let mut config = test_config();
        config.target = date(2026, 1, 15);
        let json = serde_json::to_string(&months_summary(date(2025, 12, 1), &config)).unwrap();
        let dec = json.find("12/2025").unwrap();
        let jan = json.find("01/2026").unwrap();
        assert!(dec < jan, "chronological order lost in {json}");
    }
}
