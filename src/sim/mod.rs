pub mod arrivals;
pub mod clock;
pub mod error;
pub mod queue;
pub mod report;
pub mod sweep;
pub mod types;

pub use arrivals::{ArrivalSeries, REQUEST_MULTIPLIER};
pub use error::SimError;
pub use queue::simulate;
pub use report::SweepReport;
pub use sweep::{RateGrid, sweep};
pub use types::SimulationResult;
