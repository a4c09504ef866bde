// src/lib.rs - Library interface for RootLengthR

pub mod annotate;
pub mod binarize;
pub mod calibration;
pub mod config;
pub mod errors;
pub mod font;
pub mod gui;
pub mod image_io;
pub mod image_utils;
pub mod input;
pub mod measure;
pub mod pipeline;
pub mod session;

/// Test doubles for the interactive parts; not used by the binary
pub mod testing;

// Re-export commonly used types and functions
pub use errors::{RootLengthError, Result};
pub use config::{AnnotationStyle, Config, ShapeFilter};
pub use image_io::{InputImage, load_image};
pub use input::{Action, Frontend, View};

// Re-export the measurement core
pub use measure::{
    boundary_to_length,
    chain_length,
    passes_shape_filter,
    select_color,
    BoundingRect,
    RootMeasurement,
    RootMeasurer,
    ScaleFactor,
};

pub use binarize::{binarize, to_grayscale, Threshold};
pub use calibration::{calibrate, reference_region, Calibration};
pub use pipeline::{process_frame, Frame};
pub use session::{run_session, Session, SessionOutcome, Transition};
