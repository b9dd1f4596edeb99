//! Static dashboard content: balance cards and the monthly revenue series.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub trend: &'static str,
    pub positive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevenuePoint {
    pub month: &'static str,
    pub earning: u64,
    pub expense: u64,
}

impl RevenuePoint {
    pub fn net(&self) -> i64 {
        self.earning as i64 - self.expense as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub cards: Vec<StatCard>,
    pub revenue: Vec<RevenuePoint>,
}

pub const STAT_CARDS: &[StatCard] = &[
    StatCard {
        title: "Total Balance",
        value: "$82,620",
        trend: "+8% to last month",
        positive: true,
    },
    StatCard {
        title: "Total Spending",
        value: "$54,870",
        trend: "-2% to last month",
        positive: false,
    },
];

pub const REVENUE: &[RevenuePoint] = &[
    RevenuePoint {
        month: "Jan",
        earning: 22_000,
        expense: 30_000,
    },
    RevenuePoint {
        month: "Feb",
        earning: 34_000,
        expense: 26_000,
    },
    RevenuePoint {
        month: "Mar",
        earning: 28_000,
        expense: 32_000,
    },
    RevenuePoint {
        month: "Apr",
        earning: 40_000,
        expense: 30_000,
    },
    RevenuePoint {
        month: "May",
        earning: 50_000,
        expense: 35_000,
    },
    RevenuePoint {
        month: "Jun",
        earning: 30_000,
        expense: 28_000,
    },
];

impl Dashboard {
    pub fn load() -> Self {
        Self {
            cards: STAT_CARDS.to_vec(),
            revenue: REVENUE.to_vec(),
        }
    }

    pub fn total_earning(&self) -> u64 {
        self.revenue.iter().map(|p| p.earning).sum()
    }

    pub fn total_expense(&self) -> u64 {
        self.revenue.iter().map(|p| p.expense).sum()
    }

    /// Month with the highest earning
    pub fn best_month(&self) -> Option<&RevenuePoint> {
        self.revenue.iter().max_by_key(|p| p.earning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_totals() {
        let dashboard = Dashboard::load();
        assert_eq!(dashboard.total_earning(), 204_000);
        assert_eq!(dashboard.total_expense(), 181_000);
        assert_eq!(dashboard.best_month().map(|p| p.month), Some("May"));
    }

    #[test]
    fn test_net_can_be_negative() {
        assert_eq!(REVENUE[0].net(), -8_000);
        assert_eq!(REVENUE[4].net(), 15_000);
    }

    #[test]
    fn test_cards() {
        insta::assert_debug_snapshot!(
            Dashboard::load().cards.iter().map(|c| (c.title, c.positive)).collect::<Vec<_>>(),
            @r#"
        [
            (
                "Total Balance",
                true,
            ),
            (
                "Total Spending",
                false,
            ),
        ]
        "#
        );
    }
}
