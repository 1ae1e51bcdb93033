use serde::{Deserialize, Serialize};

use super::metric::BalanceMetric;
use super::payload::{GroupSummary, IntervalRecord};

const PALETTE: [&str; 12] = [
    "#45B29D", "#EFC94C", "#E27A3F", "#DF5A49", "#5F91B8", "#E2A37F", "#55DBC1", "#EFDA97",
    "#DF948A", "#A6D6B5", "#B8A1D6", "#7D8A96",
];
const DEPOSIT_COLOR: &str = "#45B29D";
const PAYMENT_COLOR: &str = "#DF5A49";

/// Chart the report is rendered as.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GraphType {
    TableGraph,
    #[default]
    BarGraph,
    AreaGraph,
    DonutGraph,
    LineGraph,
    StackedBarGraph,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: String,
    pub color: String,
}

impl LegendEntry {
    fn new(name: impl Into<String>, color: &str) -> Self {
        Self {
            name: name.into(),
            color: color.to_string(),
        }
    }
}

/// Legend entries for the final, sorted series.
pub fn build_legend(
    intervals: &[IntervalRecord],
    groups: &[GroupSummary],
    graph_type: GraphType,
    metric: BalanceMetric,
) -> Vec<LegendEntry> {
    match graph_type {
        GraphType::TableGraph => Vec::new(),
        GraphType::BarGraph | GraphType::AreaGraph | GraphType::LineGraph
            if metric == BalanceMetric::TotalTotals =>
        {
            vec![
                LegendEntry::new(BalanceMetric::TotalAssets.label(), DEPOSIT_COLOR),
                LegendEntry::new(BalanceMetric::TotalDebts.label(), PAYMENT_COLOR),
            ]
        }
        GraphType::StackedBarGraph => groups
            .iter()
            .filter(|group| {
                intervals.iter().any(|interval| {
                    interval
                        .stacked
                        .get(&group.name)
                        .is_some_and(|value| *value != 0)
                })
            })
            .enumerate()
            .map(|(index, group)| LegendEntry::new(&group.name, PALETTE[index % PALETTE.len()]))
            .collect(),
        _ => groups
            .iter()
            .enumerate()
            .map(|(index, group)| LegendEntry::new(&group.name, PALETTE[index % PALETTE.len()]))
            .collect(),
    }
}
