//! # heliotraj
//!
//! Map spacecraft trajectory data (heliocentric distance, Carrington longitude and
//! latitude) onto arbitrary time grids, and derive alternative x-axes for time-series
//! panels, in particular the longitude distance from a reference event such as perihelion.
//!
//! * [`trajectory_table`] – ingestion of CSV / Parquet trajectory tables,
//! * [`mapper`] – linear interpolation onto query epochs, with optional longitude unwrap,
//! * [`angular_offset`] – signed longitude offsets in `[-180, 180)`,
//! * [`monotonic_filter`] – single-pass region around the reference event,
//! * [`reference`] – reference event resolution,
//! * [`coordinate_mode`] – per-panel axis selection with explicit fallback to time.
pub mod angular_offset;
pub mod axis_params;
pub mod constants;
pub mod coordinate_mode;
pub mod heliotraj_errors;
mod interpolation;
pub mod mapper;
pub mod monotonic_filter;
pub mod reference;
pub mod time;
pub mod trajectory_table;

pub use axis_params::AxisParams;
pub use coordinate_mode::{AxisSelection, CoordinateMode, CoordinateSelector, FallbackReason};
pub use heliotraj_errors::TrajectoryError;
pub use mapper::{MappedSeries, TrajectoryMapper};
pub use reference::{PerihelionCatalog, ReferenceEvent, ReferenceResolver};
pub use time::TimeWindow;
pub use trajectory_table::{table_file::TableFile, Quantity, TrajectoryTable};
