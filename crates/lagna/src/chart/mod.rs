pub mod assembler;
pub mod data;
pub mod houses;

pub use assembler::compute_chart;
pub use data::{AngleMarker, BodyPosition, Chart, House};
pub use houses::{assign_houses, house_number_for, house_sign, HOUSE_COUNT};
