pub mod header;
pub mod upload_area;
pub mod processing_indicator;
pub mod result_view;
pub mod toast;
