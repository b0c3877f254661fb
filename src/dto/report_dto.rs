use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::quotation::Quotation;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub draft: u64,
    pub sent: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub expired: u64,
}

/// Payload for `GET /api/reports/dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub total_clients: u64,
    pub total_quotations: u64,
    pub status_counts: StatusCounts,
    /// Summed grand total of accepted quotations.
    pub accepted_total: Decimal,
    /// Most recent quotations, newest first.
    pub recent_quotations: Vec<Quotation>,
}
