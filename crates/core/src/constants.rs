/// Returns at or above this percentage classify an investment as growing.
pub const GROWING_RETURNS_THRESHOLD: f64 = 10.0;

/// Progress percentage at which a goal is considered completed.
pub const GOAL_COMPLETION_PROGRESS: f64 = 100.0;

/// Default goal deadline, in years from creation.
pub const DEFAULT_GOAL_HORIZON_YEARS: i32 = 1;

/// Number of non-completed goals shown on the dashboard.
pub const DASHBOARD_ACTIVE_GOALS_LIMIT: i64 = 5;

/// Number of recent expenses shown on the dashboard.
pub const DASHBOARD_RECENT_EXPENSES_LIMIT: i64 = 10;

/// Format of a budget month label, e.g. `2024-01`.
pub const BUDGET_MONTH_FORMAT: &str = "%Y-%m";
