pub mod date_axis;
pub mod date_label;
pub mod layout;
pub mod stat_point;
