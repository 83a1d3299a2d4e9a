//! Error types for the glbook demos.

use thiserror::Error;

/// Errors produced while setting up or drawing a demo.
#[derive(Debug, Error)]
pub enum DemoError {
    /// The requested demo name is not in the catalog.
    #[error("unknown demo: {0}")]
    UnknownDemo(String),

    /// A texture or render target was requested with a zero edge.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    ShaderCompile {
        /// The shader stage that failed (e.g. "vertex", "fragment").
        stage: String,
        /// The driver's info log, prefixed with the numbered source.
        log: String,
    },

    /// The program failed to link.
    #[error("shader link error:\n{0}")]
    ShaderLink(String),

    /// The program does not expose an attribute the cube layout needs.
    #[error("attribute '{0}' not found in linked program")]
    MissingAttribute(&'static str),

    /// The GL context refused to create a resource.
    #[error("GL resource error: {0}")]
    Gl(String),

    /// An off-screen framebuffer was not complete after attachment.
    #[error("framebuffer incomplete: status 0x{0:04X}")]
    IncompleteFramebuffer(u32),

    /// A demo image could not be found among the bundled resources.
    #[error("missing asset: {0}")]
    MissingAsset(String),

    /// File system failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DemoError {
    fn from(e: std::io::Error) -> Self {
        DemoError::Io(e.to_string())
    }
}
