//! PresentationML (.pptx) resolution library
//!
//! Reads a PowerPoint 2007+ (.pptx) package and resolves every slide's
//! layout/master/theme inheritance chain into a flat, renderer-agnostic
//! JSON tree: absolute-positioned shapes, text, images, tables, charts,
//! and diagrams, all in points with colors and fills fully decoded.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ppt_rs::process_presentation_file;
//!
//! let output = process_presentation_file("deck.pptx").unwrap();
//! println!("{} slides, {}x{} pt", output.slides.len(), output.size.width, output.size.height);
//! ```
//!
//! # Module Organization
//!
//! - **opc** - Open Packaging Convention (ZIP) handling
//! - **reader** - The resolution pipeline (§C1-C11): XML tree, color and
//!   fill algebra, geometry/inheritance, and the per-slide orchestrator
//! - **cli** - `pptcli` command parsing and execution
//! - **exc** - Error types

pub mod cli;
pub mod exc;
pub mod opc;
pub mod reader;

pub use exc::{PptxError, Result};
pub use reader::{process_presentation, process_presentation_file, ElementRecord, ProcessOutput, SlideOutput};

pub const VERSION: &str = "1.0.3";
