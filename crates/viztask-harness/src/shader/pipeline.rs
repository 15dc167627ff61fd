use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::error::{ShaderError, ShaderStage};

use super::annotate::annotate_source;

/// Everything the link step needs besides the two stage sources.
///
/// Entry point names default to the usual `vs_main` / `fs_main` pair.
pub struct PipelineDesc<'a> {
    pub label: &'a str,
    pub vertex_entry: &'a str,
    pub fragment_entry: &'a str,
    pub vertex_layouts: &'a [wgpu::VertexBufferLayout<'a>],
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub target_format: wgpu::TextureFormat,
}

impl<'a> PipelineDesc<'a> {
    pub fn new(label: &'a str, target_format: wgpu::TextureFormat) -> Self {
        Self {
            label,
            vertex_entry: "vs_main",
            fragment_entry: "fs_main",
            vertex_layouts: &[],
            bind_group_layouts: &[],
            target_format,
        }
    }
}

/// A fully linked shader program.
///
/// Created once at task construction, immutable thereafter, dropped with the
/// task. Construction either yields a usable pipeline or fails; there is no
/// half-built state.
pub struct ShaderProgram {
    pub vertex: wgpu::ShaderModule,
    pub fragment: wgpu::ShaderModule,
    pub pipeline: wgpu::RenderPipeline,
}

/// Runs the GPU-free front end over both stage sources.
///
/// Each stage is parsed and validated independently so a failure is tagged
/// with the correct stage, then both are checked for the expected entry
/// point. Returns the two IR modules on success.
pub fn validate_program_sources(
    vertex_src: &str,
    fragment_src: &str,
    vertex_entry: &str,
    fragment_entry: &str,
) -> Result<(naga::Module, naga::Module), ShaderError> {
    let vertex = compile_stage(ShaderStage::Vertex, vertex_src)?;
    let fragment = compile_stage(ShaderStage::Fragment, fragment_src)?;

    check_entry_point(&vertex, naga::ShaderStage::Vertex, vertex_entry)?;
    check_entry_point(&fragment, naga::ShaderStage::Fragment, fragment_entry)?;

    Ok((vertex, fragment))
}

fn compile_stage(stage: ShaderStage, source: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
        stage,
        log: e.emit_to_string(source),
        annotated_source: annotate_source(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|e| ShaderError::Compile {
            stage,
            log: e.emit_to_string(source),
            annotated_source: annotate_source(source),
        })?;

    Ok(module)
}

fn check_entry_point(
    module: &naga::Module,
    stage: naga::ShaderStage,
    entry: &str,
) -> Result<(), ShaderError> {
    let found = module
        .entry_points
        .iter()
        .any(|ep| ep.stage == stage && ep.name == entry);

    if found {
        Ok(())
    } else {
        Err(ShaderError::Link(format!(
            "missing {stage:?} entry point '{entry}'"
        )))
    }
}

/// Compiles and links two WGSL stages into a [`ShaderProgram`].
pub struct ShaderPipelineBuilder<'a> {
    device: &'a wgpu::Device,
}

impl<'a> ShaderPipelineBuilder<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Builds a validated program from the two stage sources.
    ///
    /// Front-end failures come back as [`ShaderError::Compile`]; anything the
    /// device rejects during module or pipeline creation comes back as
    /// [`ShaderError::Link`] via a validation error scope.
    pub fn build(
        &self,
        vertex_src: &str,
        fragment_src: &str,
        desc: &PipelineDesc<'_>,
    ) -> Result<ShaderProgram, ShaderError> {
        validate_program_sources(
            vertex_src,
            fragment_src,
            desc.vertex_entry,
            desc.fragment_entry,
        )?;

        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{} vertex stage", desc.label)),
                source: wgpu::ShaderSource::Wgsl(vertex_src.into()),
            });

        let fragment = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{} fragment stage", desc.label)),
                source: wgpu::ShaderSource::Wgsl(fragment_src.into()),
            });

        let layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{} pipeline layout", desc.label)),
                bind_group_layouts: desc.bind_group_layouts,
                immediate_size: 0,
            });

        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(desc.label),
                layout: Some(&layout),

                vertex: wgpu::VertexState {
                    module: &vertex,
                    entry_point: Some(desc.vertex_entry),
                    compilation_options: Default::default(),
                    buffers: desc.vertex_layouts,
                },

                fragment: Some(wgpu::FragmentState {
                    module: &fragment,
                    entry_point: Some(desc.fragment_entry),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: desc.target_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        // A validation failure inside the scope means the link step rejected
        // something the front end could not see (device limits, layout
        // mismatches). Fail the whole build; the caller gets no program.
        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(ShaderError::Link(err.to_string()));
        }

        Ok(ShaderProgram {
            vertex,
            fragment,
            pipeline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_VERTEX: &str = "\
@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 1.0);
}
";

    const GOOD_FRAGMENT: &str = "\
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
";

    // ── front end ─────────────────────────────────────────────────────────

    #[test]
    fn valid_pair_passes_the_front_end() {
        validate_program_sources(GOOD_VERTEX, GOOD_FRAGMENT, "vs_main", "fs_main").unwrap();
    }

    #[test]
    fn broken_vertex_stage_is_tagged_vertex() {
        let bad = "@vertex fn vs_main( -> oops";
        let err = validate_program_sources(bad, GOOD_FRAGMENT, "vs_main", "fs_main").unwrap_err();
        match err {
            ShaderError::Compile { stage, .. } => assert_eq!(stage, ShaderStage::Vertex),
            other => panic!("expected Compile, got {other:?}"),
        }
    }

    #[test]
    fn broken_fragment_stage_is_tagged_fragment() {
        let bad = "\
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return not_a_thing;
}
";
        let err = validate_program_sources(GOOD_VERTEX, bad, "vs_main", "fs_main").unwrap_err();
        match err {
            ShaderError::Compile { stage, .. } => assert_eq!(stage, ShaderStage::Fragment),
            other => panic!("expected Compile, got {other:?}"),
        }
    }

    #[test]
    fn compile_error_carries_annotated_source() {
        let bad = "@fragment\nfn fs_main() {\n    nope\n}\n";
        let err = validate_program_sources(GOOD_VERTEX, bad, "vs_main", "fs_main").unwrap_err();
        let ShaderError::Compile {
            annotated_source, ..
        } = err
        else {
            panic!("expected Compile");
        };

        let lines: Vec<&str> = annotated_source.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("   1 | "));
        assert!(lines[2].starts_with("   3 | "));
    }

    #[test]
    fn missing_entry_point_is_a_link_error() {
        let renamed = GOOD_VERTEX.replace("vs_main", "vertex_entry");
        let err =
            validate_program_sources(&renamed, GOOD_FRAGMENT, "vs_main", "fs_main").unwrap_err();
        match err {
            ShaderError::Link(msg) => assert!(msg.contains("vs_main")),
            other => panic!("expected Link, got {other:?}"),
        }
    }

    #[test]
    fn fragment_entry_point_in_vertex_module_does_not_satisfy_vertex() {
        // Stage and name must both match.
        let err = validate_program_sources(GOOD_FRAGMENT, GOOD_FRAGMENT, "fs_main", "fs_main")
            .unwrap_err();
        assert!(matches!(err, ShaderError::Link(_)));
    }
}
