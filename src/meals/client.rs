use super::{ApiEndpoint, DayMeals, MealQuery, MealRecord, MealsApi, MealsApiError};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct DateResponse {
    #[serde(default)]
    meals: Option<DayMeals>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    meal: Option<MealRecord>,
}

/// `MealsApi` over HTTP
#[derive(Debug, Clone)]
pub struct HttpMealsApi {
    client: Client,
}

impl HttpMealsApi {
    pub fn new(timeout: Duration) -> Result<Self, MealsApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, MealsApiError> {
        debug!("GET {}", url.path());
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Meals API answered with status {}", status);
            return Err(MealsApiError::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MealsApi for HttpMealsApi {
    async fn meals_for_date(
        &self,
        endpoint: &ApiEndpoint<'_>,
        date: NaiveDate,
    ) -> Result<DayMeals, MealsApiError> {
        let date = date.format("%Y-%m-%d").to_string();
        let url = endpoint.url_with(&[("date", date.as_str())])?;
        let response: DateResponse = self.get_json(url).await?;
        Ok(response.meals.unwrap_or_default())
    }

    async fn find_meal(
        &self,
        endpoint: &ApiEndpoint<'_>,
        query: &MealQuery,
    ) -> Result<Option<MealRecord>, MealsApiError> {
        let date = query.start_date.format("%Y-%m-%d").to_string();
        let url = endpoint.url_with(&[
            ("description", query.description.as_str()),
            ("direction", query.direction.as_str()),
            ("date", date.as_str()),
        ])?;
        let response: SearchResponse = self.get_json(url).await?;
        Ok(response.meal)
    }
}
