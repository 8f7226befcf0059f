pub mod condition;
pub mod timestamp;
pub mod type_label;

pub use condition::{ConditionFormatter, operator_symbol, render_condition};
pub use timestamp::{format_datetime, render_timestamp};
pub use type_label::friendly_name;
