// Typed records for the ZeroTier Central API.
//
// The service returns JSON arrays of objects with a nested `config` object
// per element. Raw* structs mirror that wire shape exactly; the flat
// Network/Member records are what the rest of the app consumes. Each
// response type has its own explicit conversion instead of leaking wire
// structure upward.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use thiserror::Error;

/// A millisecond epoch the service sent that chrono cannot represent.
#[derive(Debug, Error)]
#[error("timestamp {0}ms is out of range")]
pub struct InvalidTimestamp(pub i64);

/// A virtual network managed by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub id: String,
    pub name: String,
    pub description: String,
    pub authorized_member_count: u32,
    /// Creation time at day granularity, in the machine's local zone.
    pub created_date: NaiveDate,
}

/// A device joined to a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub description: String,
    pub last_seen: DateTime<Local>,
    pub physical_address: String,
    pub client_version: String,
    /// Ordered as returned by the service; not deduplicated or sorted.
    pub ip_assignments: Vec<String>,
}

// ── Wire shapes ──────────────────────────────────────────────────────────

/// One element of `GET /network`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNetwork {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub authorized_member_count: u32,
    pub config: RawNetworkConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNetworkConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub creation_time: i64,
}

/// One element of `GET /network/{id}/member`. The member's own id lives in
/// the nested `config` object; the top-level `id` is a network/node
/// composite.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub last_seen: i64,
    #[serde(default)]
    pub physical_address: Option<String>,
    #[serde(default)]
    pub client_version: Option<String>,
    pub config: RawMemberConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMemberConfig {
    pub id: String,
    #[serde(default)]
    pub ip_assignments: Vec<String>,
}

// ── Conversions ──────────────────────────────────────────────────────────

impl RawNetwork {
    pub fn into_network(self) -> Result<Network, InvalidTimestamp> {
        let created_date = local_date(self.config.creation_time)?;
        Ok(Network {
            id: self.id,
            name: self.config.name,
            description: self.description.unwrap_or_default(),
            authorized_member_count: self.authorized_member_count,
            created_date,
        })
    }
}

impl RawMember {
    pub fn into_member(self) -> Result<Member, InvalidTimestamp> {
        let last_seen = local_datetime(self.last_seen)?;
        Ok(Member {
            id: self.config.id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            last_seen,
            physical_address: self.physical_address.unwrap_or_default(),
            client_version: self.client_version.unwrap_or_default(),
            ip_assignments: self.config.ip_assignments,
        })
    }
}

// ── Time helpers ─────────────────────────────────────────────────────────

fn datetime_in_zone<Tz: TimeZone>(ms: i64, tz: &Tz) -> Result<DateTime<Tz>, InvalidTimestamp> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|utc| utc.with_timezone(tz))
        .ok_or(InvalidTimestamp(ms))
}

fn local_datetime(ms: i64) -> Result<DateTime<Local>, InvalidTimestamp> {
    datetime_in_zone(ms, &Local)
}

fn local_date(ms: i64) -> Result<NaiveDate, InvalidTimestamp> {
    local_datetime(ms).map(|dt| dt.date_naive())
}
