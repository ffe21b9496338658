use crate::config::{FilterConfig, MIN_STARS};
use chrono::{Duration, NaiveDate};

/// Compose the search expression for `filter`, counting the window back from `today`.
pub fn build_query(filter: &FilterConfig, today: NaiveDate) -> String {
    let since = today - Duration::days(filter.window.days());
    let mut parts = vec![format!("created:>{}", since.format("%Y-%m-%d"))];

    if let Some(language) = &filter.language {
        parts.push(format!("language:{}", language.to_lowercase()));
    }
    // Both filters compile to `language:`, so setting both narrows conjunctively.
    if let Some(spoken) = &filter.spoken_language {
        parts.push(format!("language:{}", spoken.to_lowercase()));
    }

    parts.push(format!("stars:>{}", MIN_STARS));
    parts.push("fork:false".to_string());
    parts.join(" ")
}

/// Full request URL with the query escaped and the limit as page size.
pub fn search_url(endpoint: &str, filter: &FilterConfig, today: NaiveDate) -> String {
    format!(
        "{}?q={}&sort=stars&order=desc&per_page={}",
        endpoint,
        urlencoding::encode(&build_query(filter, today)),
        filter.limit()
    )
}
