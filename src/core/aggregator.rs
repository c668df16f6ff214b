//! Group cleaned rows by supplier and rank suppliers by spend

use crate::types::{CleanedTable, SupplierSummary};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Default)]
struct Totals {
    quantity: f64,
    total_cost: f64,
    lead_time_sum: f64,
    lead_time_count: usize,
}

/// One summary row per supplier, ordered by total cost, descending.
///
/// Groups are formed in supplier-name order and the cost sort is stable, so
/// suppliers with equal spend stay in name order. Rows without a supplier
/// belong to no group. Lead time is averaged over rows that have one.
pub fn summarize(table: &CleanedTable) -> Vec<SupplierSummary> {
    let mut groups: BTreeMap<&str, Totals> = BTreeMap::new();

    for record in &table.records {
        let Some(supplier) = record.supplier.as_deref() else {
            continue;
        };
        let totals = groups.entry(supplier).or_default();
        totals.quantity += record.quantity;
        totals.total_cost += record.total_cost;
        if let Some(lead_time) = record.lead_time {
            totals.lead_time_sum += lead_time;
            totals.lead_time_count += 1;
        }
    }

    let mut summary: Vec<SupplierSummary> = groups
        .into_iter()
        .map(|(supplier, totals)| SupplierSummary {
            supplier: supplier.to_string(),
            quantity: totals.quantity,
            total_cost: totals.total_cost,
            lead_time: (totals.lead_time_count > 0)
                .then(|| totals.lead_time_sum / totals.lead_time_count as f64),
        })
        .collect();

    summary.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));

    info!(suppliers = summary.len(), "aggregated supplier summary");
    summary
}
