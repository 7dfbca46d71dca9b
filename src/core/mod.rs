// Core algorithm exports
pub mod distance;
pub mod ranking;
pub mod report;
pub mod scoring;

pub use distance::{distances_from, haversine_distance, km_to_miles, map_center, marker_bounds};
pub use ranking::{filter_tier1, rank_by_criterion, rank_by_total};
pub use report::{build_report, Report, ReportSort, ReportView};
pub use scoring::compute_score;
