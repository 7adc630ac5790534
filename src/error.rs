//! Error types for pointstorm.
//!
//! The kernels cannot fail. Everything here comes from GPU setup, window
//! creation, or a configuration that can't be dispatched.

use thiserror::Error;

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reports no usable texture format or alpha mode.
    #[error("Surface is not supported by the selected adapter")]
    UnsupportedSurface,
}

/// Invalid simulation settings, caught before any GPU work starts.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("particle count must be greater than zero")]
    NoParticles,
    #[error("particle count {count} exceeds the GPU limit of {max}")]
    TooManyParticles { count: u32, max: u32 },
    #[error("max frame delta must be positive, got {0:?}")]
    InvalidMaxDelta(std::time::Duration),
    #[error("window size must be non-zero, got {width}x{height}")]
    InvalidWindowSize { width: u32, height: u32 },
}

/// Errors that can occur when running a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Failed to create or run the event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The builder was given settings that can't run.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
