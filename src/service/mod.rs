pub mod error;
pub mod report_service;
pub mod workflow_service;
