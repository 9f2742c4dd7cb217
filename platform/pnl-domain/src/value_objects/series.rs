pub const TOTAL_PROFIT_LOSS_LABEL: &str = "Total Profit/Loss";
pub const UNREALIZED_PROFIT_LABEL: &str = "Unrealized Profit";
pub const UNREALIZED_LOSS_LABEL: &str = "Unrealized Loss";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    TotalProfitLoss,
    UnrealizedProfit,
    UnrealizedLoss,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 3] = [
        SeriesKind::TotalProfitLoss,
        SeriesKind::UnrealizedProfit,
        SeriesKind::UnrealizedLoss,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::TotalProfitLoss => TOTAL_PROFIT_LOSS_LABEL,
            SeriesKind::UnrealizedProfit => UNREALIZED_PROFIT_LABEL,
            SeriesKind::UnrealizedLoss => UNREALIZED_LOSS_LABEL,
        }
    }
}

/// Named sequence of `(epoch seconds, value)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub kind: SeriesKind,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
