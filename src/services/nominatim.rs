use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::models::Coordinates;
use crate::services::geocoder::{GeocodeError, GeocodeProvider};

/// Default public Nominatim endpoint
pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

/// Default User-Agent sent with every lookup, as Nominatim's usage policy requires
pub const DEFAULT_USER_AGENT: &str = "HousingTrackerApp/1.0";

/// Nominatim search API client
///
/// Requests only the top match for each address and parses its
/// string-encoded `lat`/`lon` fields.
pub struct NominatimClient {
    base_url: String,
    user_agent: String,
    client: Client,
}

/// One search hit; Nominatim returns coordinates as strings
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

impl NominatimClient {
    /// Create a new Nominatim client
    pub fn new(
        base_url: String,
        user_agent: String,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            user_agent,
            client,
        })
    }

    fn search_url(&self, address: &str) -> String {
        format!(
            "{}/search?format=json&q={}&limit=1",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(address)
        )
    }
}

#[async_trait]
impl GeocodeProvider for NominatimClient {
    async fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let url = self.search_url(address);

        tracing::debug!("Geocoding via: {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status().as_u16()));
        }

        let results: Vec<SearchResult> = response.json().await?;

        let Some(top) = results.first() else {
            return Ok(None);
        };

        let latitude = top
            .lat
            .parse::<f64>()
            .map_err(|e| GeocodeError::InvalidResponse(format!("bad lat '{}': {}", top.lat, e)))?;
        let longitude = top
            .lon
            .parse::<f64>()
            .map_err(|e| GeocodeError::InvalidResponse(format!("bad lon '{}': {}", top.lon, e)))?;

        Ok(Some(Coordinates { latitude, longitude }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> NominatimClient {
        NominatimClient::new(
            server.url(),
            DEFAULT_USER_AGENT.to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn search_query(address: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("format".into(), "json".into()),
            Matcher::UrlEncoded("q".into(), address.into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ])
    }

    #[tokio::test]
    async fn test_lookup_parses_top_match() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(search_query("123 main st, denver, co"))
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"lat":"39.7392358","lon":"-104.990251","display_name":"Denver"}]"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let coords = client.lookup("123 main st, denver, co").await.unwrap().unwrap();

        assert!((coords.latitude - 39.7392358).abs() < 1e-9);
        assert!((coords.longitude - -104.990251).abs() < 1e-9);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_lookup_no_results() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = client_for(&server);

        assert!(client.lookup("nowhere at all").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.lookup("123 main st").await.unwrap_err();

        assert!(matches!(err, GeocodeError::Status(503)));
        assert_eq!(err.to_string(), "Geocoding failed: 503");
    }

    #[tokio::test]
    async fn test_lookup_bad_coordinates() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"lat":"north","lon":"-104.99"}]"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.lookup("123 main st").await.unwrap_err();

        assert!(matches!(err, GeocodeError::InvalidResponse(_)));
    }

    #[test]
    fn test_search_url_encodes_address() {
        let client = NominatimClient::new(
            "https://geo.test/".to_string(),
            DEFAULT_USER_AGENT.to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.search_url("1 main st, denver"),
            "https://geo.test/search?format=json&q=1%20main%20st%2C%20denver&limit=1"
        );
    }
}
