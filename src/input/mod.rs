//! Input processing module
//! Handles file detection, text extraction and job posting records

pub mod file_detector;
pub mod manager;
pub mod posting;
pub mod text_extractor;
