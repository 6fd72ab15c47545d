pub mod cache;
pub mod export_service;
pub mod question_service;
pub mod render;
pub mod selection_service;
pub mod unit_service;
