// SPDX-License-Identifier: MIT OR Apache-2.0
//! Strongly typed pass options.
//!
//! The host engine accepts pass options as a string-keyed dictionary. Here each
//! pass type gets its own record type; [`PassOptions`] is the union keyed by
//! pass type. Records convert to and from the host dictionary form
//! ([`OptionDict`]) using the host's camelCase keys, and are validated when
//! they are built from a dictionary or attached to a graph node.

use crate::pass::PassType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Untyped option value as the host sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point
    Float(f64),
    /// Enumerated string
    String(String),
}

impl OptionValue {
    /// Name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for OptionValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Host-style option dictionary, in insertion order
pub type OptionDict = IndexMap<String, OptionValue>;

/// Error when building or validating pass options
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionError {
    /// Key is not an option of this pass
    #[error("{pass}: unknown option '{key}'")]
    UnknownKey {
        /// Pass type
        pass: PassType,
        /// Offending key
        key: String,
    },

    /// Value has the wrong kind
    #[error("{pass}.{key}: expected {expected}, got {found}")]
    TypeMismatch {
        /// Pass type
        pass: PassType,
        /// Offending key
        key: String,
        /// Expected kind
        expected: &'static str,
        /// Kind that was supplied
        found: &'static str,
    },

    /// String is not one of the allowed enumerants
    #[error("{pass}.{key}: invalid value '{value}'")]
    InvalidEnumValue {
        /// Pass type
        pass: PassType,
        /// Offending key
        key: String,
        /// Supplied string
        value: String,
    },

    /// Numeric value outside the accepted range
    #[error("{pass}.{key}: {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Pass type
        pass: PassType,
        /// Offending key
        key: String,
        /// Supplied value
        value: f64,
        /// Inclusive minimum
        min: f64,
        /// Inclusive maximum
        max: f64,
    },
}

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Name used by the host for this value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            /// All values, in declaration order
            pub fn all() -> &'static [$name] {
                &[$(Self::$variant),+]
            }

            /// Parse a host name
            pub fn parse(text: &str) -> Option<Self> {
                Self::all().iter().copied().find(|v| v.as_str() == text)
            }
        }
    };
}

option_enum! {
    /// Output resolution policy shared by most passes
    IoSize {
        /// Use the default size (usually the framebuffer size)
        Default => "Default",
        /// Fixed, user-specified size
        Fixed => "Fixed",
        /// Full window size
        Full => "Full",
        /// Half window size
        Half => "Half",
        /// Quarter window size
        Quarter => "Quarter",
        /// Double window size
        Double => "Double",
    }
}

option_enum! {
    /// Accumulation arithmetic precision
    PrecisionMode {
        /// Double precision
        Double => "Double",
        /// Single precision
        Single => "Single",
        /// Single precision with compensated summation
        SingleCompensated => "SingleCompensated",
    }
}

option_enum! {
    /// What the accumulator does once `maxFrameCount` is reached
    OverflowMode {
        /// Stop accumulating
        Stop => "Stop",
        /// Reset and start over
        Reset => "Reset",
        /// Switch to an exponential moving average
        Ema => "EMA",
    }
}

option_enum! {
    /// Tone mapping operator
    ToneMapOperator {
        /// Linear (exposure only)
        Linear => "Linear",
        /// Reinhard
        Reinhard => "Reinhard",
        /// Reinhard with white point
        ReinhardModified => "ReinhardModified",
        /// Heji-Hable ALU approximation
        HejiHableAlu => "HejiHableAlu",
        /// Hable (Uncharted 2)
        HableUc2 => "HableUc2",
        /// ACES filmic fit
        Aces => "Aces",
    }
}

option_enum! {
    /// Manual exposure parameter held fixed
    ExposureMode {
        /// Aperture priority
        AperturePriority => "AperturePriority",
        /// Shutter priority
        ShutterPriority => "ShutterPriority",
    }
}

option_enum! {
    /// Sub-pixel sample pattern for visibility buffer generation
    SamplePattern {
        /// Pixel center
        Center => "Center",
        /// DirectX MSAA pattern
        DirectX => "DirectX",
        /// Halton sequence
        Halton => "Halton",
        /// Stratified random
        Stratified => "Stratified",
    }
}

option_enum! {
    /// Triangle culling mode
    CullMode {
        /// No culling
        None => "None",
        /// Cull front faces
        Front => "Front",
        /// Cull back faces
        Back => "Back",
    }
}

option_enum! {
    /// Resampling mode of the ReSTIR DI pass
    RtxdiMode {
        /// Plain light sampling
        NoResampling => "NoResampling",
        /// Spatial reuse only
        SpatialResampling => "SpatialResampling",
        /// Temporal reuse only
        TemporalResampling => "TemporalResampling",
        /// Spatial and temporal reuse
        SpatiotemporalResampling => "SpatiotemporalResampling",
    }
}

fn expect_bool(pass: PassType, key: &str, value: &OptionValue) -> Result<bool, OptionError> {
    match value {
        OptionValue::Bool(b) => Ok(*b),
        other => Err(type_mismatch(pass, key, "bool", other)),
    }
}

fn expect_u32(pass: PassType, key: &str, value: &OptionValue) -> Result<u32, OptionError> {
    match value {
        OptionValue::Int(i) => u32::try_from(*i).map_err(|_| OptionError::OutOfRange {
            pass,
            key: key.to_string(),
            value: *i as f64,
            min: 0.0,
            max: f64::from(u32::MAX),
        }),
        other => Err(type_mismatch(pass, key, "int", other)),
    }
}

// Integers are accepted where floats are expected, as the host does.
fn expect_f32(pass: PassType, key: &str, value: &OptionValue) -> Result<f32, OptionError> {
    match value {
        OptionValue::Float(f) => Ok(*f as f32),
        OptionValue::Int(i) => Ok(*i as f32),
        other => Err(type_mismatch(pass, key, "float", other)),
    }
}

fn expect_enum<T>(
    pass: PassType,
    key: &str,
    value: &OptionValue,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, OptionError> {
    match value {
        OptionValue::String(s) => parse(s).ok_or_else(|| OptionError::InvalidEnumValue {
            pass,
            key: key.to_string(),
            value: s.clone(),
        }),
        other => Err(type_mismatch(pass, key, "string", other)),
    }
}

fn type_mismatch(pass: PassType, key: &str, expected: &'static str, found: &OptionValue) -> OptionError {
    OptionError::TypeMismatch {
        pass,
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

fn unknown_key(pass: PassType, key: &str) -> OptionError {
    OptionError::UnknownKey {
        pass,
        key: key.to_string(),
    }
}

fn check_range(pass: PassType, key: &str, value: f64, min: f64, max: f64) -> Result<(), OptionError> {
    if value.is_nan() || value < min || value > max {
        return Err(OptionError::OutOfRange {
            pass,
            key: key.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Common behaviour of the per-pass option records
pub trait TypedOptions: Default + Into<PassOptions> {
    /// Pass type these options belong to
    const PASS: PassType;

    /// Apply a single dictionary entry
    fn apply(&mut self, key: &str, value: &OptionValue) -> Result<(), OptionError>;

    /// Check value ranges
    fn validate(&self) -> Result<(), OptionError>;

    /// Convert to the host dictionary form
    fn to_dict(&self) -> OptionDict;

    /// Build from a host dictionary; missing keys keep their defaults
    fn from_dict(dict: &OptionDict) -> Result<Self, OptionError> {
        let mut options = Self::default();
        for (key, value) in dict {
            options.apply(key, value)?;
        }
        options.validate()?;
        Ok(options)
    }
}

/// Options of the temporal accumulation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulateOptions {
    /// Accumulation enabled; when disabled the input is passed through
    pub enabled: bool,
    /// Output size policy
    pub output_size: IoSize,
    /// Reset accumulation when the scene or camera changes
    pub auto_reset: bool,
    /// Accumulation precision
    pub precision_mode: PrecisionMode,
    /// Frames to accumulate before overflow handling (0 = unlimited)
    pub max_frame_count: u32,
    /// Behaviour after `max_frame_count` frames
    pub overflow_mode: OverflowMode,
}

impl Default for AccumulateOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            output_size: IoSize::Default,
            auto_reset: true,
            precision_mode: PrecisionMode::Single,
            max_frame_count: 0,
            overflow_mode: OverflowMode::Stop,
        }
    }
}

impl TypedOptions for AccumulateOptions {
    const PASS: PassType = PassType::AccumulatePass;

    fn apply(&mut self, key: &str, value: &OptionValue) -> Result<(), OptionError> {
        let pass = Self::PASS;
        match key {
            "enabled" => self.enabled = expect_bool(pass, key, value)?,
            "outputSize" => self.output_size = expect_enum(pass, key, value, IoSize::parse)?,
            "autoReset" => self.auto_reset = expect_bool(pass, key, value)?,
            "precisionMode" => {
                self.precision_mode = expect_enum(pass, key, value, PrecisionMode::parse)?;
            }
            "maxFrameCount" => self.max_frame_count = expect_u32(pass, key, value)?,
            "overflowMode" => {
                self.overflow_mode = expect_enum(pass, key, value, OverflowMode::parse)?;
            }
            _ => return Err(unknown_key(pass, key)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), OptionError> {
        Ok(())
    }

    fn to_dict(&self) -> OptionDict {
        let mut dict = OptionDict::new();
        dict.insert("enabled".into(), self.enabled.into());
        dict.insert("outputSize".into(), self.output_size.as_str().into());
        dict.insert("autoReset".into(), self.auto_reset.into());
        dict.insert("precisionMode".into(), self.precision_mode.as_str().into());
        dict.insert("maxFrameCount".into(), self.max_frame_count.into());
        dict.insert("overflowMode".into(), self.overflow_mode.as_str().into());
        dict
    }
}

/// Options of the tone mapping pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneMapperOptions {
    /// Output size policy
    pub output_size: IoSize,
    /// Take camera exposure settings from scene metadata
    pub use_scene_metadata: bool,
    /// Exposure compensation in stops
    pub exposure_compensation: f32,
    /// Automatic exposure from average luminance
    pub auto_exposure: bool,
    /// Film speed (ISO)
    pub film_speed: f32,
    /// Apply white balancing
    pub white_balance: bool,
    /// White point in Kelvin
    pub white_point: f32,
    /// Tone mapping operator
    pub operator: ToneMapOperator,
    /// Clamp output to [0, 1]
    pub clamp: bool,
    /// White luminance for `ReinhardModified`
    pub white_max_luminance: f32,
    /// Linear white for the Hable operators
    pub white_scale: f32,
    /// Lens aperture
    pub f_number: f32,
    /// Shutter speed (1/s)
    pub shutter: f32,
    /// Which exposure parameter is held fixed
    pub exposure_mode: ExposureMode,
}

impl Default for ToneMapperOptions {
    fn default() -> Self {
        Self {
            output_size: IoSize::Default,
            use_scene_metadata: true,
            exposure_compensation: 0.0,
            auto_exposure: false,
            film_speed: 100.0,
            white_balance: false,
            white_point: 6500.0,
            operator: ToneMapOperator::Aces,
            clamp: true,
            white_max_luminance: 1.0,
            white_scale: 11.2,
            f_number: 1.0,
            shutter: 1.0,
            exposure_mode: ExposureMode::AperturePriority,
        }
    }
}

impl TypedOptions for ToneMapperOptions {
    const PASS: PassType = PassType::ToneMapper;

    fn apply(&mut self, key: &str, value: &OptionValue) -> Result<(), OptionError> {
        let pass = Self::PASS;
        match key {
            "outputSize" => self.output_size = expect_enum(pass, key, value, IoSize::parse)?,
            "useSceneMetadata" => self.use_scene_metadata = expect_bool(pass, key, value)?,
            "exposureCompensation" => self.exposure_compensation = expect_f32(pass, key, value)?,
            "autoExposure" => self.auto_exposure = expect_bool(pass, key, value)?,
            "filmSpeed" => self.film_speed = expect_f32(pass, key, value)?,
            "whiteBalance" => self.white_balance = expect_bool(pass, key, value)?,
            "whitePoint" => self.white_point = expect_f32(pass, key, value)?,
            "operator" => self.operator = expect_enum(pass, key, value, ToneMapOperator::parse)?,
            "clamp" => self.clamp = expect_bool(pass, key, value)?,
            "whiteMaxLuminance" => self.white_max_luminance = expect_f32(pass, key, value)?,
            "whiteScale" => self.white_scale = expect_f32(pass, key, value)?,
            "fNumber" => self.f_number = expect_f32(pass, key, value)?,
            "shutter" => self.shutter = expect_f32(pass, key, value)?,
            "exposureMode" => {
                self.exposure_mode = expect_enum(pass, key, value, ExposureMode::parse)?;
            }
            _ => return Err(unknown_key(pass, key)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), OptionError> {
        let pass = Self::PASS;
        check_range(pass, "exposureCompensation", f64::from(self.exposure_compensation), -12.0, 12.0)?;
        check_range(pass, "filmSpeed", f64::from(self.film_speed), 1.0, 6400.0)?;
        check_range(pass, "whitePoint", f64::from(self.white_point), 1905.0, 25000.0)?;
        check_range(pass, "whiteMaxLuminance", f64::from(self.white_max_luminance), 0.1, f64::MAX)?;
        check_range(pass, "whiteScale", f64::from(self.white_scale), 0.01, 100.0)?;
        check_range(pass, "fNumber", f64::from(self.f_number), 0.1, 100.0)?;
        check_range(pass, "shutter", f64::from(self.shutter), 0.1, 10000.0)?;
        Ok(())
    }

    fn to_dict(&self) -> OptionDict {
        let mut dict = OptionDict::new();
        dict.insert("outputSize".into(), self.output_size.as_str().into());
        dict.insert("useSceneMetadata".into(), self.use_scene_metadata.into());
        dict.insert("exposureCompensation".into(), self.exposure_compensation.into());
        dict.insert("autoExposure".into(), self.auto_exposure.into());
        dict.insert("filmSpeed".into(), self.film_speed.into());
        dict.insert("whiteBalance".into(), self.white_balance.into());
        dict.insert("whitePoint".into(), self.white_point.into());
        dict.insert("operator".into(), self.operator.as_str().into());
        dict.insert("clamp".into(), self.clamp.into());
        dict.insert("whiteMaxLuminance".into(), self.white_max_luminance.into());
        dict.insert("whiteScale".into(), self.white_scale.into());
        dict.insert("fNumber".into(), self.f_number.into());
        dict.insert("shutter".into(), self.shutter.into());
        dict.insert("exposureMode".into(), self.exposure_mode.as_str().into());
        dict
    }
}

/// Options of the ray-traced visibility buffer pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VBufferRtOptions {
    /// Output size policy
    pub output_size: IoSize,
    /// Sub-pixel sample pattern
    pub sample_pattern: SamplePattern,
    /// Number of samples in the pattern
    pub sample_count: u32,
    /// Alpha test on hit
    pub use_alpha_test: bool,
    /// Adjust shading normals facing away from the viewer
    pub adjust_shading_normals: bool,
    /// Override the scene's cull mode with `cull`
    pub force_cull_mode: bool,
    /// Cull mode used when `force_cull_mode` is set
    pub cull: CullMode,
    /// Trace with inline ray queries instead of a ray tracing pipeline
    pub use_trace_ray_inline: bool,
    /// Depth of field
    pub use_dof: bool,
}

impl Default for VBufferRtOptions {
    fn default() -> Self {
        Self {
            output_size: IoSize::Default,
            sample_pattern: SamplePattern::Center,
            sample_count: 16,
            use_alpha_test: true,
            adjust_shading_normals: true,
            force_cull_mode: false,
            cull: CullMode::Back,
            use_trace_ray_inline: false,
            use_dof: true,
        }
    }
}

impl TypedOptions for VBufferRtOptions {
    const PASS: PassType = PassType::VBufferRt;

    fn apply(&mut self, key: &str, value: &OptionValue) -> Result<(), OptionError> {
        let pass = Self::PASS;
        match key {
            "outputSize" => self.output_size = expect_enum(pass, key, value, IoSize::parse)?,
            "samplePattern" => {
                self.sample_pattern = expect_enum(pass, key, value, SamplePattern::parse)?;
            }
            "sampleCount" => self.sample_count = expect_u32(pass, key, value)?,
            "useAlphaTest" => self.use_alpha_test = expect_bool(pass, key, value)?,
            "adjustShadingNormals" => self.adjust_shading_normals = expect_bool(pass, key, value)?,
            "forceCullMode" => self.force_cull_mode = expect_bool(pass, key, value)?,
            "cull" => self.cull = expect_enum(pass, key, value, CullMode::parse)?,
            "useTraceRayInline" => self.use_trace_ray_inline = expect_bool(pass, key, value)?,
            "useDOF" => self.use_dof = expect_bool(pass, key, value)?,
            _ => return Err(unknown_key(pass, key)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), OptionError> {
        check_range(Self::PASS, "sampleCount", f64::from(self.sample_count), 1.0, 1024.0)
    }

    fn to_dict(&self) -> OptionDict {
        let mut dict = OptionDict::new();
        dict.insert("outputSize".into(), self.output_size.as_str().into());
        dict.insert("samplePattern".into(), self.sample_pattern.as_str().into());
        dict.insert("sampleCount".into(), self.sample_count.into());
        dict.insert("useAlphaTest".into(), self.use_alpha_test.into());
        dict.insert("adjustShadingNormals".into(), self.adjust_shading_normals.into());
        dict.insert("forceCullMode".into(), self.force_cull_mode.into());
        dict.insert("cull".into(), self.cull.as_str().into());
        dict.insert("useTraceRayInline".into(), self.use_trace_ray_inline.into());
        dict.insert("useDOF".into(), self.use_dof.into());
        dict
    }
}

/// Options of the ReSTIR direct illumination pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtxdiOptions {
    /// Resampling mode
    pub mode: RtxdiMode,
    /// Number of presampled light tiles
    pub presampled_tile_count: u32,
    /// Lights per presampled tile
    pub presampled_tile_size: u32,
    /// Initial candidates drawn from local lights
    pub local_light_candidate_count: u32,
    /// Initial candidates drawn from infinite lights
    pub infinite_light_candidate_count: u32,
    /// Initial candidates drawn from the environment light
    pub env_light_candidate_count: u32,
    /// Initial candidates drawn by BRDF sampling
    pub brdf_candidate_count: u32,
    /// Spatial resampling iterations
    pub spatial_iterations: u32,
    /// Neighbours per spatial iteration
    pub spatial_sample_count: u32,
    /// Temporal history clamp
    pub max_history_length: u32,
    /// Treat emissive textures as lights
    pub use_emissive_textures: bool,
}

impl Default for RtxdiOptions {
    fn default() -> Self {
        Self {
            mode: RtxdiMode::SpatiotemporalResampling,
            presampled_tile_count: 128,
            presampled_tile_size: 1024,
            local_light_candidate_count: 24,
            infinite_light_candidate_count: 8,
            env_light_candidate_count: 8,
            brdf_candidate_count: 1,
            spatial_iterations: 5,
            spatial_sample_count: 1,
            max_history_length: 20,
            use_emissive_textures: false,
        }
    }
}

impl TypedOptions for RtxdiOptions {
    const PASS: PassType = PassType::RtxdiPass;

    fn apply(&mut self, key: &str, value: &OptionValue) -> Result<(), OptionError> {
        let pass = Self::PASS;
        match key {
            "mode" => self.mode = expect_enum(pass, key, value, RtxdiMode::parse)?,
            "presampledTileCount" => self.presampled_tile_count = expect_u32(pass, key, value)?,
            "presampledTileSize" => self.presampled_tile_size = expect_u32(pass, key, value)?,
            "localLightCandidateCount" => {
                self.local_light_candidate_count = expect_u32(pass, key, value)?;
            }
            "infiniteLightCandidateCount" => {
                self.infinite_light_candidate_count = expect_u32(pass, key, value)?;
            }
            "envLightCandidateCount" => self.env_light_candidate_count = expect_u32(pass, key, value)?,
            "brdfCandidateCount" => self.brdf_candidate_count = expect_u32(pass, key, value)?,
            "spatialIterations" => self.spatial_iterations = expect_u32(pass, key, value)?,
            "spatialSampleCount" => self.spatial_sample_count = expect_u32(pass, key, value)?,
            "maxHistoryLength" => self.max_history_length = expect_u32(pass, key, value)?,
            "useEmissiveTextures" => self.use_emissive_textures = expect_bool(pass, key, value)?,
            _ => return Err(unknown_key(pass, key)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), OptionError> {
        let pass = Self::PASS;
        check_range(pass, "presampledTileCount", f64::from(self.presampled_tile_count), 1.0, 1024.0)?;
        check_range(pass, "presampledTileSize", f64::from(self.presampled_tile_size), 1.0, 8192.0)?;
        check_range(pass, "spatialSampleCount", f64::from(self.spatial_sample_count), 1.0, 32.0)?;
        check_range(pass, "maxHistoryLength", f64::from(self.max_history_length), 1.0, 100.0)?;
        Ok(())
    }

    fn to_dict(&self) -> OptionDict {
        let mut dict = OptionDict::new();
        dict.insert("mode".into(), self.mode.as_str().into());
        dict.insert("presampledTileCount".into(), self.presampled_tile_count.into());
        dict.insert("presampledTileSize".into(), self.presampled_tile_size.into());
        dict.insert("localLightCandidateCount".into(), self.local_light_candidate_count.into());
        dict.insert("infiniteLightCandidateCount".into(), self.infinite_light_candidate_count.into());
        dict.insert("envLightCandidateCount".into(), self.env_light_candidate_count.into());
        dict.insert("brdfCandidateCount".into(), self.brdf_candidate_count.into());
        dict.insert("spatialIterations".into(), self.spatial_iterations.into());
        dict.insert("spatialSampleCount".into(), self.spatial_sample_count.into());
        dict.insert("maxHistoryLength".into(), self.max_history_length.into());
        dict.insert("useEmissiveTextures".into(), self.use_emissive_textures.into());
        dict
    }
}

/// Options of any pass, keyed by pass type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PassOptions {
    /// `AccumulatePass`
    Accumulate(AccumulateOptions),
    /// `ToneMapper`
    ToneMapper(ToneMapperOptions),
    /// `VBufferRT`
    VBufferRt(VBufferRtOptions),
    /// `RTXDIPass`
    Rtxdi(RtxdiOptions),
}

impl PassOptions {
    /// Host defaults for a pass type
    pub fn default_for(pass_type: PassType) -> Self {
        match pass_type {
            PassType::AccumulatePass => AccumulateOptions::default().into(),
            PassType::ToneMapper => ToneMapperOptions::default().into(),
            PassType::VBufferRt => VBufferRtOptions::default().into(),
            PassType::RtxdiPass => RtxdiOptions::default().into(),
        }
    }

    /// Build options for `pass_type` from a host dictionary
    pub fn from_dict(pass_type: PassType, dict: &OptionDict) -> Result<Self, OptionError> {
        Ok(match pass_type {
            PassType::AccumulatePass => AccumulateOptions::from_dict(dict)?.into(),
            PassType::ToneMapper => ToneMapperOptions::from_dict(dict)?.into(),
            PassType::VBufferRt => VBufferRtOptions::from_dict(dict)?.into(),
            PassType::RtxdiPass => RtxdiOptions::from_dict(dict)?.into(),
        })
    }

    /// Pass type these options belong to
    pub fn pass_type(&self) -> PassType {
        match self {
            Self::Accumulate(_) => AccumulateOptions::PASS,
            Self::ToneMapper(_) => ToneMapperOptions::PASS,
            Self::VBufferRt(_) => VBufferRtOptions::PASS,
            Self::Rtxdi(_) => RtxdiOptions::PASS,
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), OptionError> {
        match self {
            Self::Accumulate(o) => o.validate(),
            Self::ToneMapper(o) => o.validate(),
            Self::VBufferRt(o) => o.validate(),
            Self::Rtxdi(o) => o.validate(),
        }
    }

    /// Host dictionary form
    pub fn to_dict(&self) -> OptionDict {
        match self {
            Self::Accumulate(o) => o.to_dict(),
            Self::ToneMapper(o) => o.to_dict(),
            Self::VBufferRt(o) => o.to_dict(),
            Self::Rtxdi(o) => o.to_dict(),
        }
    }
}

impl From<AccumulateOptions> for PassOptions {
    fn from(options: AccumulateOptions) -> Self {
        Self::Accumulate(options)
    }
}

impl From<ToneMapperOptions> for PassOptions {
    fn from(options: ToneMapperOptions) -> Self {
        Self::ToneMapper(options)
    }
}

impl From<VBufferRtOptions> for PassOptions {
    fn from(options: VBufferRtOptions) -> Self {
        Self::VBufferRt(options)
    }
}

impl From<RtxdiOptions> for PassOptions {
    fn from(options: RtxdiOptions) -> Self {
        Self::Rtxdi(options)
    }
}
