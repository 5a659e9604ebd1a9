//! Error Types
//!
//! This module defines the error types used throughout the renderer.
//!
//! # Overview
//!
//! The main error type [`RenderError`] covers all failure modes including:
//! - GPU initialization failures
//! - Render target and pipeline creation errors
//! - Asset loading and decoding errors
//! - Per-frame recoverable errors
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, RenderError>`.
//!
//! Initialization errors (`AdapterRequest`, `DeviceRequest`,
//! `ResourceCreation`, `PassOrdering`) propagate out of startup and abort.
//! `FrameSkip` abandons the current frame only; the render loop continues.
//! `AssetLoad` is logged and degraded to a placeholder, never fatal.

use thiserror::Error;

/// The main error type for the renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    // ========================================================================
    // GPU & Rendering Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequest(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    /// A render target, texture or buffer could not be created with the
    /// requested specification.
    #[error("Resource creation failed: {0}")]
    ResourceCreation(String),

    /// The current frame was abandoned before any pass ran (e.g. the surface
    /// texture could not be acquired). Recoverable: the next frame retries.
    #[error("Frame skipped: {0}")]
    FrameSkip(String),

    /// The pass sequence is not a valid topological order of its target
    /// reads/writes. Surfaces at graph construction, never mid-frame.
    #[error("Invalid pass ordering: {0}")]
    PassOrdering(String),

    /// More lights were supplied than the shaders are compiled for.
    #[error("Light count {count} exceeds the supported maximum of {max}")]
    LightCount {
        /// Number of lights requested
        count: usize,
        /// Compiled-in maximum
        max: usize,
    },

    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// An asset failed validation (e.g. mismatched cubemap face sizes).
    #[error("Asset load error: {0}")]
    AssetLoad(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    // ========================================================================
    // Platform Errors
    // ========================================================================
    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::ImageDecode(err.to_string())
    }
}

/// Alias for `Result<T, RenderError>`.
pub type Result<T> = std::result::Result<T, RenderError>;
