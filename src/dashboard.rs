//! Dashboard controller.
//!
//! Owns the full record set and turns a [`ViewState`] into the read-only
//! views the front-end draws. Every call to [`Dashboard::view`] recomputes
//! from scratch; nothing is cached between selections.

use crate::charts::GeoDataset;
use crate::data::{
    columns, sort_rows, ColumnSpec, ColumnType, DataProcessor, Record, RoleFilter, SortState,
    StatusFilter,
};
use crate::normalize::{format_amount, format_amount_compact, AgentMatcher};
use crate::stats::{Bucket, StatsCalculator};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Selections the user can change. Passed explicitly into every view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub status: StatusFilter,
    pub role: RoleFilter,
    pub sort: SortState,
}

/// Headline numbers and breakdown lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryMetrics {
    /// Records left after every filter.
    pub total: usize,
    pub active: usize,
    pub closed: usize,
    pub other: usize,
    pub solo: usize,
    pub shared: usize,
    pub amount: f64,
    pub amount_display: String,
    /// Amount for the status filter alone, across both roles.
    pub amount_all_roles: f64,
    pub amount_all_roles_display: String,
    pub countries: usize,
    pub regions: usize,
    pub subtitle: String,
    pub status_breakdown: String,
    pub role_breakdown: String,
    pub amount_breakdown: String,
}

/// Sorted detail rows plus the column metadata needed to draw them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub columns: Vec<ColumnSpec>,
    pub sort: SortState,
    pub rows: Vec<Record>,
}

impl DetailView {
    /// Arrow for `key` when it is the active sort column.
    pub fn indicator(&self, key: &str) -> Option<&'static str> {
        (self.sort.key == key).then(|| self.sort.direction.indicator())
    }
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: SummaryMetrics,
    pub countries: Vec<Bucket>,
    pub regions: Vec<Bucket>,
    pub detail: DetailView,
    pub geo: GeoDataset,
}

/// Columns of the detail table, in display order.
pub fn detail_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Country", columns::COUNTRY_NAME, ColumnType::Text),
        ColumnSpec::new("Region", columns::REGION, ColumnType::Text),
        ColumnSpec::new("Grant type", columns::GRANT_TYPE, ColumnType::Text),
        ColumnSpec::new("Grant amount", columns::GRANT_AMOUNT, ColumnType::Amount),
        ColumnSpec::new("Approval date", columns::APPROVAL_DATE, ColumnType::Date),
        ColumnSpec::new("Start date", columns::START_DATE, ColumnType::Date),
        ColumnSpec::new("Status", columns::GRANT_STATUS, ColumnType::Text),
        ColumnSpec::new("Grant ID", columns::GRANT_ID, ColumnType::Text),
    ]
}

/// Top-level owner of the loaded records.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    records: Vec<Record>,
    processor: DataProcessor,
}

impl Dashboard {
    pub fn new(records: Vec<Record>, matcher: AgentMatcher) -> Self {
        Self {
            records,
            processor: DataProcessor::new(matcher),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records passing membership and status, before the role filter.
    pub fn status_filtered(&self, status: &StatusFilter) -> Vec<Record> {
        let members = self.processor.filter_agent(&self.records);
        self.processor.filter_by_status(&members, status)
    }

    /// Build all views for `state`.
    pub fn view(&self, state: &ViewState) -> DashboardView {
        let status_filtered = self.status_filtered(&state.status);
        let filtered = self.processor.filter_by_role(&status_filtered, state.role);
        debug!(
            status = %state.status,
            role = %state.role,
            members = status_filtered.len(),
            shown = filtered.len(),
            "recomputing dashboard view"
        );

        let counts = StatsCalculator::status_counts(&self.processor, &status_filtered);
        let amount = StatsCalculator::total_amount(&filtered);
        let countries = StatsCalculator::count_by(&filtered, columns::COUNTRY_NAME);
        let regions = StatsCalculator::count_by(&filtered, columns::REGION);

        let status_breakdown = match state.status {
            StatusFilter::All => format!(
                "Status breakdown: Active {} | Closed {} | Other {}",
                counts.active, counts.closed, counts.other
            ),
            StatusFilter::Only(ref status) => {
                format!("Status filter: {} ({})", status, counts.total)
            }
        };

        let summary = SummaryMetrics {
            total: filtered.len(),
            active: counts.active,
            closed: counts.closed,
            other: counts.other,
            solo: counts.solo,
            shared: counts.shared,
            amount,
            amount_display: format_amount_compact(amount),
            amount_all_roles: counts.amount,
            amount_all_roles_display: format_amount(counts.amount),
            countries: countries.len(),
            regions: regions.len(),
            subtitle: format!(
                "{} grants shown for status: {} • Role: {}",
                filtered.len(),
                state.status,
                state.role
            ),
            status_breakdown,
            role_breakdown: format!(
                "Role breakdown: Solo {} | Shared {}",
                counts.solo, counts.shared
            ),
            amount_breakdown: format!(
                "Amount (status filter, all roles): {}",
                format_amount(counts.amount)
            ),
        };

        let geo = GeoDataset::from_buckets(
            &countries,
            format!(
                "{} Grants by Country ({} / {})",
                self.processor.matcher().acronym(),
                state.status,
                state.role
            ),
        );

        let columns = detail_columns();
        let rows = sort_rows(&filtered, &columns, &state.sort);

        DashboardView {
            summary,
            countries,
            regions,
            detail: DetailView {
                columns,
                sort: state.sort.clone(),
                rows,
            },
            geo,
        }
    }
}
