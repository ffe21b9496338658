use crate::types::Repository;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::warn;

fn parsed_age(repo: &Repository, now: DateTime<Utc>) -> Result<i64, chrono::ParseError> {
    DateTime::parse_from_rfc3339(&repo.created_at)
        .map(|created| (now - created.with_timezone(&Utc)).num_days().max(1))
}

/// Whole days since creation, floored at one. Unparsable timestamps count as one day.
pub fn age_in_days(repo: &Repository, now: DateTime<Utc>) -> i64 {
    match parsed_age(repo, now) {
        Ok(days) => days,
        Err(e) => {
            warn!(
                repo = %repo.full_name,
                created_at = %repo.created_at,
                "unparsable creation timestamp, treating age as one day: {}",
                e
            );
            1
        }
    }
}

/// Stars accumulated per day since creation.
pub fn daily_star_rate(repo: &Repository, now: DateTime<Utc>) -> f64 {
    repo.stargazers_count as f64 / age_in_days(repo, now) as f64
}

/// Same value as [`daily_star_rate`] without the data-quality warning, for
/// showing a set that `rank` already reported on.
pub fn display_rate(repo: &Repository, now: DateTime<Utc>) -> f64 {
    repo.stargazers_count as f64 / parsed_age(repo, now).unwrap_or(1) as f64
}

/// Sort by daily star rate, then stars, both descending, then name ascending.
pub fn rank(repos: &mut [Repository], now: DateTime<Utc>) {
    let mut scored: Vec<(f64, Repository)> = repos
        .iter()
        .map(|r| (daily_star_rate(r, now), r.clone()))
        .collect();

    scored.sort_by(|(rate_a, a), (rate_b, b)| compare(*rate_a, a, *rate_b, b));

    for (slot, (_, repo)) in repos.iter_mut().zip(scored) {
        *slot = repo;
    }
}

fn compare(rate_a: f64, a: &Repository, rate_b: f64, b: &Repository) -> Ordering {
    rate_b
        .total_cmp(&rate_a)
        .then_with(|| b.stargazers_count.cmp(&a.stargazers_count))
        .then_with(|| a.full_name.cmp(&b.full_name))
}
