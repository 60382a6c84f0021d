use async_trait::async_trait;
use serde::Deserialize;
use tracing::{instrument, Instrument, Level};
use url::Url;

use crate::config::UserSummaryConfig;
use crate::contract::error::SourceError;
use crate::contract::model::UserRecord;
use crate::domain::ports::UserSource;

/// HTTP adapter implementing the UserSource port against a dummyjson-style
/// `/users` endpoint. Requests one bounded page per call and enriches each
/// record with the department taken from the nested company data.
#[derive(Debug)]
pub struct HttpUserSource {
    client: reqwest::Client,
    base_url: Url,
    fetch_limit: u32,
}

impl HttpUserSource {
    pub fn new(client: reqwest::Client, base_url: Url, fetch_limit: u32) -> Self {
        Self {
            client,
            base_url,
            fetch_limit,
        }
    }

    /// Build a source from module configuration, including the request timeout.
    pub fn from_config(config: &UserSummaryConfig) -> Result<Self, SourceError> {
        let base_url = Url::parse(&config.source_base_url)
            .map_err(|e| SourceError::invalid_url(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_sec))
            .build()?;

        Ok(Self::new(client, base_url, config.fetch_limit))
    }

    fn users_url(&self) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::invalid_url("base URL cannot be a base"))?
            .pop_if_empty()
            .push("users");
        url.query_pairs_mut()
            .append_pair("limit", &self.fetch_limit.to_string());
        Ok(url)
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    #[instrument(
        name = "user_summary.http.fetch_users",
        skip_all,
        fields(base_url = %self.base_url, limit = self.fetch_limit)
    )]
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, SourceError> {
        let url = self.users_url()?;

        let span = tracing::span!(
            Level::INFO, "outgoing_http",
            http.method = "GET",
            http.url = %url,
            http.status_code = tracing::field::Empty,
        );

        let response = self
            .client
            .get(url.as_str())
            .send()
            .instrument(span.clone())
            .await?;

        span.record("http.status_code", response.status().as_u16());
        if !response.status().is_success() {
            return Err(SourceError::status(response.status().as_u16()));
        }

        let page: UsersPage = response
            .json()
            .await
            .map_err(|e| SourceError::decode(e.to_string()))?;

        Ok(page.users.into_iter().map(ApiUser::into_record).collect())
    }
}

// --- wire model ---
// Shapes of the upstream JSON body. Unknown fields are ignored on purpose:
// the remote API carries far more than the summary needs.

#[derive(Debug, Deserialize)]
struct UsersPage {
    users: Vec<ApiUser>,
    #[allow(dead_code)]
    total: Option<u64>,
    #[allow(dead_code)]
    skip: Option<u64>,
    #[allow(dead_code)]
    limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiUser {
    id: u64,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    age: u32,
    #[serde(default)]
    hair: ApiHair,
    #[serde(default)]
    address: ApiAddress,
    #[serde(default)]
    company: ApiCompany,
}

#[derive(Debug, Default, Deserialize)]
struct ApiHair {
    #[serde(default)]
    color: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAddress {
    #[serde(default)]
    postal_code: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiCompany {
    #[serde(default)]
    department: Option<String>,
}

impl ApiUser {
    /// Map a raw upstream user into the contract record, deriving the
    /// department from the company data.
    fn into_record(self) -> UserRecord {
        UserRecord {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            age: self.age,
            hair_color: self.hair.color,
            postal_code: self.address.postal_code,
            department: self.company.department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_url_includes_limit() {
        let source = HttpUserSource::new(
            reqwest::Client::new(),
            Url::parse("https://dummyjson.com").unwrap(),
            100,
        );

        let url = source.users_url().unwrap();
        assert_eq!(url.as_str(), "https://dummyjson.com/users?limit=100");
    }

    #[test]
    fn wire_model_tolerates_missing_optional_fields() {
        let raw = r#"{"users":[{"id":7,"firstName":"A","lastName":"B"}],"total":1,"skip":0,"limit":100}"#;
        let page: UsersPage = serde_json::from_str(raw).unwrap();

        let record = page.users.into_iter().next().unwrap().into_record();
        assert_eq!(record.id, 7);
        assert_eq!(record.gender, "");
        assert_eq!(record.hair_color, "");
        assert_eq!(record.department, None);
    }
}
