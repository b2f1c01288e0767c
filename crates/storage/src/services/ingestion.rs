//! Score sheet ingestion: validate the whole sheet, then swap the generation under the tenant lock.

use crate::error::{Result, StorageError};
use crate::id_dispenser::IdDispenser;
use crate::lock::{TenantLock, with_tenant_lock};
use crate::models::PlayerScore;
use crate::repository::{CompetitionRepository, PlayerRepository, PlayerScoreRepository};
use crate::shard::TenantShard;

const SHEET_HEADER: [&str; 2] = ["player_id", "score"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Ingested { rows: i64 },
    /// Scores are frozen once the competition is finished.
    CompetitionFinished,
}

/// One data row of a score sheet, before validation against the shard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub row_num: i64,
    pub player_id: String,
    pub score: String,
}

/// Parse CSV bytes with a mandatory `player_id,score` header.
pub fn parse_score_sheet(data: &[u8]) -> Result<Vec<SheetRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| StorageError::InvalidFormat(format!("unreadable header: {}", e)))?;
    if !headers.iter().eq(SHEET_HEADER) {
        return Err(StorageError::InvalidFormat(format!(
            "header must be {}, got {}",
            SHEET_HEADER.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row_num = index as i64 + 1;
        let record = record
            .map_err(|e| StorageError::InvalidFormat(format!("row {}: {}", row_num, e)))?;

        rows.push(SheetRow {
            row_num,
            player_id: record[0].to_string(),
            score: record[1].to_string(),
        });
    }

    Ok(rows)
}

/// Replace the score generation of `competition_id` with the rows of `data`.
///
/// Nothing is written unless every row references a registered player and
/// carries an integer score.
pub async fn ingest_scores(
    ids: &IdDispenser,
    locks: &dyn TenantLock,
    shard: &mut TenantShard,
    competition_id: &str,
    data: &[u8],
) -> Result<IngestOutcome> {
    let tenant_id = shard.tenant_id();

    let competition = CompetitionRepository::new(shard.conn())
        .get(competition_id)
        .await?;
    if competition.is_finished() {
        return Ok(IngestOutcome::CompetitionFinished);
    }

    let sheet = parse_score_sheet(data)?;

    let referenced: Vec<&str> = sheet.iter().map(|row| row.player_id.as_str()).collect();
    let registered = PlayerRepository::new(shard.conn())
        .existing_ids(&referenced)
        .await?;

    let mut scores = Vec::with_capacity(sheet.len());
    for row in &sheet {
        if !registered.contains(&row.player_id) {
            return Err(StorageError::UnknownPlayer(row.player_id.clone()));
        }
        let score: i64 = row.score.parse().map_err(|_| StorageError::InvalidScore {
            row_num: row.row_num,
            value: row.score.clone(),
        })?;
        scores.push((row, score));
    }

    let rows = scores.len() as i64;

    with_tenant_lock(locks, tenant_id, || async move {
        let now = chrono::Utc::now().timestamp();
        let mut generation = Vec::with_capacity(scores.len());
        for (row, score) in scores {
            generation.push(PlayerScore {
                id: ids.dispense().await?,
                tenant_id,
                player_id: row.player_id.clone(),
                competition_id: competition.id.clone(),
                score,
                row_num: row.row_num,
                created_at: now,
                updated_at: now,
            });
        }

        PlayerScoreRepository::new(shard.conn())
            .replace_generation(tenant_id, &competition.id, &generation)
            .await
    })
    .await?;

    tracing::info!(tenant_id, competition_id, rows, "Score generation replaced");

    Ok(IngestOutcome::Ingested { rows })
}
