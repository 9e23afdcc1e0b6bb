use {
    chrono::{DateTime, NaiveDate, NaiveDateTime, Utc},
    serde::{Deserialize, Serialize},
};

pub const FREE_PLAN_TYPE: &str = "Free";

/// A user profile document as stored in the profiles collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    /// Kept as the raw string so an unparsable date is skipped per account
    /// instead of failing the page. A non-string value still fails the page.
    #[serde(default)]
    pub current_plan_expiry_date: Option<String>,
    #[serde(default)]
    pub plan_type: Option<String>,
    #[serde(default)]
    pub active_product_id: Option<String>,
    #[serde(default)]
    pub billing_cycle: Option<String>,
    #[serde(default)]
    pub char_allowed: Option<i64>,
    /// Unset quota reads as zero, so a downgrade never grants characters.
    #[serde(default)]
    pub char_remaining: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanExpiry {
    Missing,
    Invalid(String),
    At(DateTime<Utc>),
}

impl Account {
    /// Label used in log lines: the owning user when known, else the document id.
    pub fn label(&self) -> &str {
        self.user_id.as_deref().unwrap_or(&self.id)
    }

    pub fn plan_expiry(&self) -> PlanExpiry {
        match self.current_plan_expiry_date.as_deref() {
            None | Some("") => PlanExpiry::Missing,
            Some(raw) => match parse_expiry(raw) {
                Some(at) => PlanExpiry::At(at),
                None => PlanExpiry::Invalid(raw.to_owned()),
            },
        }
    }

    pub fn apply(&mut self, downgrade: &FreeTierDowngrade) {
        self.is_active = downgrade.is_active;
        self.plan_type = Some(downgrade.plan_type.clone());
        self.active_product_id = Some(downgrade.active_product_id.clone());
        self.billing_cycle = Some(downgrade.billing_cycle.clone());
        self.char_allowed = Some(downgrade.char_allowed);
        self.char_remaining = Some(downgrade.char_remaining);
        self.current_plan_expiry_date = downgrade.current_plan_expiry_date.clone();
    }
}

/// RFC 3339 first, then an offset-less date-time or a bare date, both read as UTC.
fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

/// Partial update that moves an account to the unpaid default state.
///
/// Serializes to exactly the fields it overwrites; `current_plan_expiry_date`
/// is written as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTierDowngrade {
    pub is_active: bool,
    pub plan_type: String,
    pub active_product_id: String,
    pub billing_cycle: String,
    pub char_allowed: i64,
    pub char_remaining: i64,
    pub current_plan_expiry_date: Option<String>,
}

impl FreeTierDowngrade {
    pub fn for_account(account: &Account, free_tier_char_limit: i64) -> Self {
        Self {
            is_active: false,
            plan_type: FREE_PLAN_TYPE.to_owned(),
            active_product_id: String::new(),
            billing_cycle: String::new(),
            char_allowed: free_tier_char_limit,
            char_remaining: account
                .char_remaining
                .unwrap_or_default()
                .min(free_tier_char_limit),
            current_plan_expiry_date: None,
        }
    }
}
