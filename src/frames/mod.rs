pub mod dataset;
pub mod filtered_view;
