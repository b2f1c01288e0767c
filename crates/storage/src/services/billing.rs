//! Per-competition billing and its folds over a tenant and over all tenants.

use std::collections::HashMap;

use crate::database::Database;
use crate::dto::billing::BillingReport;
use crate::dto::tenant::TenantWithBilling;
use crate::error::{Result, StorageError};
use crate::lock::TenantLock;
use crate::models::{Competition, VisitSummary};
use crate::repository::{
    CompetitionRepository, PlayerScoreRepository, TenantRepository, VisitHistoryRepository,
};
use crate::shard::{ShardGateway, TenantShard};

pub const TENANTS_BILLING_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attendance {
    Visitor,
    Player,
}

/// Count `(players, visitors)` of a competition. Visits after the close are
/// ignored and a score overrides a visit. Unfinished competitions bill nothing.
fn count_attendance(
    competition: &Competition,
    visits: &[VisitSummary],
    scored_player_ids: Vec<String>,
) -> (i64, i64) {
    let mut attendance: HashMap<String, Attendance> = visits
        .iter()
        .filter(|visit| competition.visited_in_period(visit.min_created_at))
        .map(|visit| (visit.player_id.clone(), Attendance::Visitor))
        .collect();

    for player_id in scored_player_ids {
        attendance.insert(player_id, Attendance::Player);
    }

    if !competition.is_finished() {
        return (0, 0);
    }

    attendance
        .values()
        .fold((0, 0), |(players, visitors), attendance| match attendance {
            Attendance::Player => (players + 1, visitors),
            Attendance::Visitor => (players, visitors + 1),
        })
}

async fn report_for(
    db: &Database,
    locks: &dyn TenantLock,
    shard: &mut TenantShard,
    competition: &Competition,
) -> Result<BillingReport> {
    let tenant_id = shard.tenant_id();

    let visits = VisitHistoryRepository::new(db.pool())
        .first_visits(tenant_id, &competition.id)
        .await?;

    let scored = {
        let _guard = locks.acquire(tenant_id).await?;
        PlayerScoreRepository::new(shard.conn())
            .scored_player_ids(tenant_id, &competition.id)
            .await?
    };

    let (player_count, visitor_count) = count_attendance(competition, &visits, scored);

    Ok(BillingReport::new(
        competition.id.clone(),
        competition.title.clone(),
        player_count,
        visitor_count,
    ))
}

/// Billing report of one competition.
pub async fn billing_report(
    db: &Database,
    locks: &dyn TenantLock,
    shard: &mut TenantShard,
    competition_id: &str,
) -> Result<BillingReport> {
    let competition = CompetitionRepository::new(shard.conn())
        .get(competition_id)
        .await?;

    report_for(db, locks, shard, &competition).await
}

/// Billing reports of every competition of the tenant, newest first.
pub async fn tenant_billing(
    db: &Database,
    locks: &dyn TenantLock,
    shard: &mut TenantShard,
) -> Result<Vec<BillingReport>> {
    let tenant_id = shard.tenant_id();
    let competitions = CompetitionRepository::new(shard.conn())
        .list(tenant_id)
        .await?;

    let mut reports = Vec::with_capacity(competitions.len());
    for competition in &competitions {
        reports.push(report_for(db, locks, shard, competition).await?);
    }

    Ok(reports)
}

/// One page of tenants with their total billing, by id descending.
///
/// Shards are opened one at a time and closed before the next tenant. A tenant
/// whose shard does not exist yet is billed 0.
pub async fn tenants_billing(
    db: &Database,
    shards: &ShardGateway,
    locks: &dyn TenantLock,
    before: Option<i64>,
) -> Result<Vec<TenantWithBilling>> {
    let tenants = TenantRepository::new(db.pool())
        .list_before(before, TENANTS_BILLING_PAGE_SIZE)
        .await?;

    let mut page = Vec::with_capacity(tenants.len());
    for tenant in tenants {
        let mut shard = match shards.open(tenant.id).await {
            Ok(shard) => shard,
            Err(StorageError::ShardUnavailable { tenant_id, source }) => {
                tracing::warn!(tenant_id, error = %source, "Tenant shard unavailable, billing as 0");
                page.push(TenantWithBilling::new(tenant, 0));
                continue;
            }
            Err(e) => return Err(e),
        };

        let billing_yen = tenant_billing(db, locks, &mut shard)
            .await?
            .iter()
            .map(|report| report.billing_yen)
            .sum();
        shard.close().await?;

        page.push(TenantWithBilling::new(tenant, billing_yen));
    }

    Ok(page)
}
