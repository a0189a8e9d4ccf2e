//! Resource pool batch families

use super::{BatchService, item_data, lookup_probe, missing_item, operations, outcome_from};
use crate::core::batch::{
    BatchConfig, BatchPlan, BatchResponse, compensate, item_operation, rollback_operation,
};
use crate::core::models::ResourcePoolCreate;
use crate::utils::error::Result;
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

impl BatchService {
    /// Create resource pools concurrently; atomic batches delete what was
    /// created when any item fails
    pub async fn create_resource_pools(
        &self,
        cancel: &CancellationToken,
        resource_pools: Vec<ResourcePoolCreate>,
        atomic: bool,
    ) -> Result<BatchResponse> {
        let config = BatchConfig::new(operations::CREATE_RESOURCE_POOLS, resource_pools.len())
            .with_atomic(atomic)
            .with_worker_pool(true);
        let items = Arc::new(resource_pools);

        let adapter = self.resource_pools.clone();
        let operation = item_operation(move |_cancel, index| {
            let adapter = adapter.clone();
            let item = items.get(index).cloned();
            async move {
                let Some(item) = item else {
                    return missing_item(index);
                };
                outcome_from(
                    index,
                    201,
                    adapter.create_resource_pool(item).await,
                    |created| {
                        (
                            item_data("resource_pool", created),
                            Some(created.resource_pool_id.clone()),
                        )
                    },
                )
            }
        });

        let adapter = self.resource_pools.clone();
        let rollback = rollback_operation(move |_cancel, ids| {
            let adapter = adapter.clone();
            async move {
                compensate(&ids, |id| {
                    let adapter = adapter.clone();
                    async move { adapter.delete_resource_pool(&id).await }
                })
                .await
            }
        });

        let plan = BatchPlan::new(config, operation).with_rollback(rollback);
        self.orchestrator.run(cancel, plan).await
    }

    /// Delete resource pools one at a time; atomic batches first confirm
    /// every target exists
    pub async fn delete_resource_pools(
        &self,
        cancel: &CancellationToken,
        resource_pool_ids: Vec<String>,
        atomic: bool,
    ) -> Result<BatchResponse> {
        let config = BatchConfig::new(operations::DELETE_RESOURCE_POOLS, resource_pool_ids.len())
            .with_atomic(atomic)
            .with_worker_pool(false);
        let ids = Arc::new(resource_pool_ids);

        let adapter = self.resource_pools.clone();
        let targets = ids.clone();
        let operation = item_operation(move |_cancel, index| {
            let adapter = adapter.clone();
            let id = targets.get(index).cloned();
            async move {
                let Some(id) = id else {
                    return missing_item(index);
                };
                outcome_from(index, 200, adapter.delete_resource_pool(&id).await, |_| {
                    (json!({ "resourcePoolId": id }), None)
                })
            }
        });

        let mut plan = BatchPlan::new(config, operation);
        if atomic {
            let adapter = self.resource_pools.clone();
            let probe = lookup_probe("resource_pool", move |id: String| {
                let adapter = adapter.clone();
                async move { adapter.get_resource_pool(&id).await }
            });
            plan = plan.with_precheck(ids.as_ref().clone(), probe);
        }
        self.orchestrator.run(cancel, plan).await
    }
}
