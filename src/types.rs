use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Repository {
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stargazers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    pub html_url: String,
    /// Kept as received; ranking tolerates values that don't parse.
    pub created_at: String,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct GitHubSearchResponse {
    pub items: Vec<Repository>,
}

#[cfg(test)]
pub(crate) fn sample_repo(name: &str, stars: u64, created_at: &str) -> Repository {
    Repository {
        full_name: name.to_string(),
        description: Some(format!("{} description", name)),
        stargazers_count: stars,
        language: Some("Rust".to_string()),
        html_url: format!("https://github.com/{}", name),
        created_at: created_at.to_string(),
        fork: false,
        archived: false,
        topics: vec!["cli".to_string()],
    }
}
