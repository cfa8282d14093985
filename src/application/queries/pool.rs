use crate::{
    application::{dto::PoolStatusDto, error::ApplicationResult, ports::time::Clock},
    domain::pool::{PoolHealth, PoolRepository, WellnessTopic},
};
use chrono::Duration;
use std::{collections::BTreeMap, sync::Arc};

const USAGE_WINDOW_DAYS: i64 = 30;

pub struct PoolQueryService {
    repo: Arc<dyn PoolRepository>,
    clock: Arc<dyn Clock>,
}

impl PoolQueryService {
    pub fn new(repo: Arc<dyn PoolRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn status(&self) -> ApplicationResult<PoolStatusDto> {
        let mut by_category: BTreeMap<String, u64> = WellnessTopic::ALL
            .iter()
            .map(|topic| (topic.as_str().to_string(), 0))
            .collect();
        for (topic, count) in self.repo.count_active_by_topic().await? {
            by_category.insert(topic.as_str().to_string(), count);
        }
        let total_active: u64 = by_category.values().sum();

        let usage = self
            .repo
            .usage(self.clock.now() - Duration::days(USAGE_WINDOW_DAYS))
            .await?;
        let health = PoolHealth::from_active_count(total_active);

        Ok(PoolStatusDto {
            total_active,
            by_category,
            health: health.as_str().to_string(),
            recommended_action: health.recommended_action(total_active),
            total_used: usage.total_used,
            used_last_30_days: usage.used_since,
        })
    }
}
