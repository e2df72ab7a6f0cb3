//! Rendering constants.

/// Offscreen target settings.
pub mod viewport {
    /// Color format of every offscreen target; readback relies on RGBA order.
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    /// MSAA sample count when multisampling is enabled
    pub const MSAA_SAMPLES: u32 = 4;
}

/// Camera defaults.
pub mod camera {
    pub const FOV_DEGREES: f32 = 50.0;
    pub const DISTANCE: f32 = 8.0;
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;
    pub const DAMPING: f32 = 0.05;
    pub const MIN_DISTANCE: f32 = 2.0;
    pub const MAX_DISTANCE: f32 = 40.0;
}

/// Lighting rig.
pub mod light {
    /// Distance of the key light from the origin
    pub const KEY_DISTANCE: f32 = 10.0;
    pub const AMBIENT_INTENSITY: f32 = 0.3;
    pub const RIM_POSITION: [f32; 3] = [-5.0, 0.0, -5.0];
    pub const RIM_COLOR: u32 = 0x4488ff;
}

/// Text geometry.
pub mod text {
    pub const SIZE: f32 = 1.0;
    pub const CURVE_SEGMENTS: u32 = 12;
}

/// Particle field.
pub mod particles {
    /// Particles at full intensity
    pub const MAX_COUNT: usize = 1000;
    /// Half extent of the cube particles live in
    pub const HALF_EXTENT: f32 = 5.0;
    pub const MAX_HORIZONTAL_SPEED: f32 = 0.01;
    pub const MAX_RISE_SPEED: f32 = 0.02;
    pub const SIZE: f32 = 0.05;
    pub const COLOR: u32 = 0xffaa00;
    pub const OPACITY: f32 = 0.6;
}

/// Bloom pass.
pub mod bloom {
    pub const STRENGTH_SCALE: f32 = 2.0;
    pub const RADIUS: f32 = 0.4;
    pub const THRESHOLD: f32 = 0.85;
}

/// Per-frame animation.
pub mod animation {
    /// Spin around Y per frame at speed 1, in radians
    pub const SPIN_PER_FRAME: f32 = 0.01;
}
