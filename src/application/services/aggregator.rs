use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::application::ports::VisionExtractor;
use crate::domain::{ExtractionResult, FailureKind, GridShape, GroupName, ModelTier, SourceGroup};

use super::extraction_client::ExtractionClient;
use super::retry::RetryPolicy;
use super::task_pool::BoundedTaskPool;

struct TierRoute {
    client: Arc<ExtractionClient>,
    model: String,
}

/// Extracts every group concurrently on a bounded pool and returns one result per group.
pub struct MultiSourceAggregator {
    grid: GridShape,
    policy: RetryPolicy,
    routes: HashMap<ModelTier, TierRoute>,
    pool: BoundedTaskPool,
}

impl MultiSourceAggregator {
    pub fn new(grid: GridShape, policy: RetryPolicy, pool_width: usize) -> Self {
        Self {
            grid,
            policy,
            routes: HashMap::new(),
            pool: BoundedTaskPool::new(pool_width),
        }
    }

    pub fn with_route(
        mut self,
        tier: ModelTier,
        extractor: Arc<dyn VisionExtractor>,
        model: impl Into<String>,
    ) -> Self {
        let client = ExtractionClient::new(extractor, self.policy.clone(), self.grid);
        self.routes.insert(
            tier,
            TierRoute {
                client: Arc::new(client),
                model: model.into(),
            },
        );
        self
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    pub fn pool_width(&self) -> usize {
        self.pool.width()
    }

    pub async fn run(&self, groups: Vec<SourceGroup>) -> BTreeMap<GroupName, ExtractionResult> {
        self.run_on_grid(groups, self.grid).await
    }

    /// Runs every group with `grid` instead of the configured default.
    #[tracing::instrument(skip(self, groups), fields(groups = groups.len(), grid = %grid, pool_width = self.pool.width()))]
    pub async fn run_on_grid(
        &self,
        groups: Vec<SourceGroup>,
        grid: GridShape,
    ) -> BTreeMap<GroupName, ExtractionResult> {
        let mut results: BTreeMap<GroupName, ExtractionResult> = BTreeMap::new();
        let mut jobs = Vec::new();

        for group in merge_by_name(groups) {
            if group.is_empty() {
                results.insert(group.name.clone(), ExtractionResult::empty(group.name));
                continue;
            }

            let Some(route) = self.routes.get(&group.tier) else {
                tracing::error!(group = %group.name, tier = %group.tier, "No backend routed for tier");
                let reason = format!("no extraction backend configured for {} tier", group.tier);
                results.insert(
                    group.name.clone(),
                    ExtractionResult::failed(group.name, FailureKind::Configuration, reason),
                );
                continue;
            };

            let client = Arc::clone(&route.client);
            let model = route.model.clone();
            let name = group.name.clone();

            jobs.push((name, async move {
                client
                    .extract_on_grid(&group.name, group.pages(), &model, grid)
                    .await
            }));
        }

        tracing::info!(
            queued = jobs.len(),
            short_circuited = results.len(),
            "Starting concurrent extraction"
        );

        for (name, outcome) in self.pool.run_all(jobs).await {
            let result = outcome.unwrap_or_else(|panic| {
                ExtractionResult::failed(name.clone(), FailureKind::Internal, panic.to_string())
            });
            results.insert(name, result);
        }

        results
    }
}

fn merge_by_name(groups: Vec<SourceGroup>) -> Vec<SourceGroup> {
    let mut merged: BTreeMap<GroupName, SourceGroup> = BTreeMap::new();
    for group in groups {
        match merged.get_mut(&group.name) {
            Some(existing) => {
                for page in group.pages() {
                    existing.push_page(page.clone());
                }
            }
            None => {
                merged.insert(group.name.clone(), group);
            }
        }
    }
    merged.into_values().collect()
}
