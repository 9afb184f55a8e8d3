use super::Segment;
use crate::{config::CollectConfig, error::Error, Result};
use reqwest::blocking::Client;

/// Somewhere to read a player's game log page from
pub trait GameLogSource {
    fn fetch(&self, code: &str, segment: Segment) -> Result<String>;
}

/// `/players/M/MahoPa00/gamelog/2024/`
pub fn game_log_path(code: &str, segment: Segment, season: u16) -> String {
    let initial: String = code.chars().take(1).collect();
    format!("/players/{initial}/{code}/gamelog/{}/", segment.path(season))
}

pub struct HttpSource {
    client: Client,
    base_url: String,
    season: u16,
}

impl HttpSource {
    pub fn new(config: &CollectConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            season: config.season,
        })
    }

    pub fn url(&self, code: &str, segment: Segment) -> String {
        format!("{}{}", self.base_url, game_log_path(code, segment, self.season))
    }
}

impl GameLogSource for HttpSource {
    fn fetch(&self, code: &str, segment: Segment) -> Result<String> {
        let url = self.url(code, segment);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let html = response.text()?;
        log::trace!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_use_initial_code_and_segment() {
        assert_eq!(
            game_log_path("MahoPa00", Segment::Regular, 2024),
            "/players/M/MahoPa00/gamelog/2024/"
        );
        assert_eq!(
            game_log_path("KelcTr00", Segment::Postseason, 2024),
            "/players/K/KelcTr00/gamelog/post/"
        );
    }

    #[test]
    fn url_joins_base_without_double_slash() {
        let config = CollectConfig {
            base_url: "http://localhost:8080/".into(),
            ..Default::default()
        };
        let source = HttpSource::new(&config).unwrap();
        assert_eq!(
            source.url("AlleJo02", Segment::Regular),
            "http://localhost:8080/players/A/AlleJo02/gamelog/2024/"
        );
    }
}
