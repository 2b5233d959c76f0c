// SPDX-License-Identifier: MIT OR Apache-2.0
//! ReSTIR direct illumination graph.
//!
//! `VBufferRT` traces primary visibility, `RTXDIPass` resamples direct
//! lighting from it, `AccumulatePass` averages the resampled frames and
//! `ToneMapper` produces the displayable image. Both the tone-mapped and the
//! raw accumulated image are marked as outputs.

use crate::graph::{GraphError, RenderGraph};
use crate::options::{
    AccumulateOptions, CullMode, ExposureMode, IoSize, OverflowMode, PrecisionMode,
    RtxdiOptions, SamplePattern, ToneMapOperator, ToneMapperOptions, VBufferRtOptions,
};

/// Name the graph is registered under
pub const RTXDI_GRAPH_NAME: &str = "RTXDI";

/// Accumulation options: pass-through until enabled from the UI
pub fn accumulate_options() -> AccumulateOptions {
    AccumulateOptions {
        enabled: false,
        output_size: IoSize::Default,
        auto_reset: true,
        precision_mode: PrecisionMode::Single,
        max_frame_count: 0,
        overflow_mode: OverflowMode::Stop,
    }
}

/// Tone mapping options: linear operator, scene-provided exposure
pub fn tone_mapper_options() -> ToneMapperOptions {
    ToneMapperOptions {
        output_size: IoSize::Default,
        use_scene_metadata: true,
        exposure_compensation: 0.0,
        auto_exposure: false,
        film_speed: 100.0,
        white_balance: false,
        white_point: 6500.0,
        operator: ToneMapOperator::Linear,
        clamp: true,
        white_max_luminance: 1.0,
        white_scale: 11.2,
        f_number: 1.0,
        shutter: 1.0,
        exposure_mode: ExposureMode::AperturePriority,
    }
}

/// Visibility buffer options: 16 centered samples, no depth of field
pub fn vbuffer_options() -> VBufferRtOptions {
    VBufferRtOptions {
        output_size: IoSize::Default,
        sample_pattern: SamplePattern::Center,
        sample_count: 16,
        use_alpha_test: true,
        adjust_shading_normals: true,
        force_cull_mode: false,
        cull: CullMode::Back,
        use_trace_ray_inline: false,
        use_dof: false,
    }
}

/// Build the ReSTIR DI render graph
pub fn render_graph_rtxdi() -> Result<RenderGraph, GraphError> {
    let mut g = RenderGraph::new(RTXDI_GRAPH_NAME);

    g.create_pass("AccumulatePass", accumulate_options())?;
    g.create_pass("ToneMapper", tone_mapper_options())?;
    g.create_pass("VBufferRT", vbuffer_options())?;
    g.create_pass("RTXDIPass", RtxdiOptions::default())?;

    g.add_edge("AccumulatePass.output", "ToneMapper.src")?;
    g.add_edge("VBufferRT.mvec", "RTXDIPass.mvec")?;
    g.add_edge("VBufferRT.vbuffer", "RTXDIPass.vbuffer")?;
    g.add_edge("RTXDIPass.color", "AccumulatePass.input")?;

    g.mark_output("ToneMapper.dst")?;
    g.mark_output("AccumulatePass.output")?;

    Ok(g)
}
