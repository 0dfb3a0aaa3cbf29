// src/controllers/analytics.rs
use crate::api::{ApiClient, ApiResponse};
use crate::models::{AnalyticsData, AnalyticsPeriod};

use super::note_outcome;

#[derive(Debug)]
pub struct AnalyticsController {
    client: ApiClient,
    period: AnalyticsPeriod,
    data: Option<AnalyticsData>,
    last_error: Option<String>,
}

impl AnalyticsController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            period: AnalyticsPeriod::default(),
            data: None,
            last_error: None,
        }
    }

    pub fn period(&self) -> AnalyticsPeriod {
        self.period
    }

    pub fn data(&self) -> Option<&AnalyticsData> {
        self.data.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn load(&mut self) -> bool {
        let envelope = self.client.get_analytics(self.period).await;
        if !note_outcome(&mut self.last_error, "load analytics", &envelope) {
            return false;
        }
        if let ApiResponse::Success { data } = envelope {
            self.data = Some(data);
        }
        true
    }

    /// Reloads only when the period actually changes
    pub async fn select_period(&mut self, period: AnalyticsPeriod) -> bool {
        if period == self.period && self.data.is_some() {
            return true;
        }
        self.period = period;
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_client;

    #[tokio::test]
    async fn test_select_period_reloads_on_change() {
        let (backend, client) = mock_client();
        let mut controller = AnalyticsController::new(client);

        assert!(controller.load().await);
        assert_eq!(controller.data().unwrap().top_by_revenue().unwrap().name, "Montre Connectée");

        assert!(controller.select_period(AnalyticsPeriod::Month).await);
        assert_eq!(backend.requests().len(), 1);

        assert!(controller.select_period(AnalyticsPeriod::Year).await);
        let requests = backend.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].url.ends_with("/analytics?period=1y"));
        assert_eq!(controller.period(), AnalyticsPeriod::Year);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let (backend, client) = mock_client();
        let mut controller = AnalyticsController::new(client);
        controller.load().await;
        backend.fail_transport("offline");

        assert!(!controller.select_period(AnalyticsPeriod::Week).await);
        assert!(controller.data().is_some());
        assert_eq!(controller.last_error(), Some("offline"));
    }
}
