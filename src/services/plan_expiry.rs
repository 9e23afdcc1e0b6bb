use {
    crate::{
        model::types::{Account, FreeTierDowngrade, PlanExpiry},
        store::{error::StoreError, ProfileStore},
    },
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    tracing::{error, info, instrument, warn},
};

pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_FREE_TIER_CHAR_LIMIT: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSettings {
    pub page_size: usize,
    pub free_tier_char_limit: i64,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            free_tier_char_limit: DEFAULT_FREE_TIER_CHAR_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingExpiry,
    InvalidExpiry(String),
}

/// What happened to one account during a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Downgraded,
    Unexpired,
    Skipped(SkipReason),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedAccount {
    pub id: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedAccount {
    pub id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepSummary {
    /// List calls made, including the final short or empty page.
    pub pages: usize,
    pub visited: usize,
    pub downgraded: usize,
    pub unexpired: usize,
    pub skipped: Vec<SkippedAccount>,
    pub failed: Vec<FailedAccount>,
}

impl SweepSummary {
    pub fn record(&mut self, id: &str, outcome: RecordOutcome) {
        self.visited += 1;
        match outcome {
            RecordOutcome::Downgraded => self.downgraded += 1,
            RecordOutcome::Unexpired => self.unexpired += 1,
            RecordOutcome::Skipped(reason) => self.skipped.push(SkippedAccount {
                id: id.to_owned(),
                reason,
            }),
            RecordOutcome::Failed(error) => self.failed.push(FailedAccount {
                id: id.to_owned(),
                error,
            }),
        }
    }
}

/// One full pass over the active accounts, comparing every expiry against `now`.
///
/// Only a failed list call aborts the pass. Downgrades applied before that
/// point stay applied.
#[instrument(skip_all, fields(now = %now))]
pub async fn sweep(
    store: &dyn ProfileStore,
    settings: &SweepSettings,
    now: DateTime<Utc>,
) -> Result<SweepSummary, StoreError> {
    let page_size = settings.page_size.max(1);
    let mut summary = SweepSummary::default();
    let mut offset = 0;

    loop {
        let accounts = store.list_active(page_size, offset).await?;
        summary.pages += 1;
        info!("Fetched {} active users at offset {offset}", accounts.len());

        let mut downgraded_in_page = 0;
        for account in &accounts {
            let outcome = process_account(store, account, settings, now).await;
            if outcome == RecordOutcome::Downgraded {
                downgraded_in_page += 1;
            }
            summary.record(&account.id, outcome);
        }

        if accounts.len() < page_size {
            break;
        }

        // Downgraded accounts drop out of the active filter, shifting the
        // rest of the result set down by as many positions.
        offset += accounts.len() - downgraded_in_page;
    }

    info!(
        "Sweep finished: {} visited, {} downgraded, {} skipped, {} failed",
        summary.visited,
        summary.downgraded,
        summary.skipped.len(),
        summary.failed.len()
    );
    Ok(summary)
}

async fn process_account(
    store: &dyn ProfileStore,
    account: &Account,
    settings: &SweepSettings,
    now: DateTime<Utc>,
) -> RecordOutcome {
    let expiry = match account.plan_expiry() {
        PlanExpiry::At(expiry) => expiry,
        PlanExpiry::Missing => {
            warn!(
                "User {} has no expiry date but is_active=true",
                account.label()
            );
            return RecordOutcome::Skipped(SkipReason::MissingExpiry);
        }
        PlanExpiry::Invalid(raw) => {
            warn!(
                "User {} has an unreadable expiry date {raw:?} but is_active=true",
                account.label()
            );
            return RecordOutcome::Skipped(SkipReason::InvalidExpiry(raw));
        }
    };

    if expiry > now {
        return RecordOutcome::Unexpired;
    }

    info!(
        "Subscription expired for user {} (expiry: {expiry})",
        account.label()
    );
    let downgrade = FreeTierDowngrade::for_account(account, settings.free_tier_char_limit);
    match store.apply_downgrade(&account.id, &downgrade).await {
        Ok(()) => {
            info!(
                "Updated user {} to inactive free-tier state",
                account.label()
            );
            RecordOutcome::Downgraded
        }
        Err(e) => {
            error!("Failed to update user {}: {e}", account.label());
            RecordOutcome::Failed(e.to_string())
        }
    }
}
