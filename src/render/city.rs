use crate::constants::{FOG_DENSITY, FOG_HEX, POINT_LIGHTS, SUN_POSITION};
use skyline_core::{BoxPart, CityLayout, LightingSnapshot, Rgb, CITY_WGSL, MAX_GLOW_SLOTS};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CubeVertex {
    pos: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PartInstance {
    center_slot: [f32; 4],
    size_intensity: [f32; 4],
    color: [f32; 4],
    emissive: [f32; 4],
}

impl From<&BoxPart> for PartInstance {
    fn from(p: &BoxPart) -> Self {
        let slot = p
            .glow_slot
            .filter(|s| *s < MAX_GLOW_SLOTS)
            .map_or(-1.0, |s| s as f32);
        Self {
            center_slot: [p.center.x, p.center.y, p.center.z, slot],
            size_intensity: [p.size.x, p.size.y, p.size.z, p.emissive_intensity],
            color: [p.color.0[0], p.color.0[1], p.color.0[2], 1.0],
            emissive: [p.emissive.0[0], p.emissive.0[1], p.emissive.0[2], 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointLightUniform {
    position_range: [f32; 4],
    color_intensity: [f32; 4],
}

/// Mirrors `Globals` in city.wgsl.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CityUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) eye: [f32; 4],
    pub(crate) ambient: [f32; 4],
    pub(crate) sun_color: [f32; 4],
    pub(crate) sun_dir: [f32; 4],
    pub(crate) fog: [f32; 4],
    pub(crate) points: [PointLightUniform; 2],
    pub(crate) glow: [[f32; 4]; MAX_GLOW_SLOTS / 4],
}

impl CityUniforms {
    pub(crate) fn new() -> Self {
        let fog = Rgb::from_hex(FOG_HEX).0;
        let mut u = Self {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0; 4],
            ambient: [0.0; 4],
            sun_color: [0.0; 4],
            sun_dir: [SUN_POSITION[0], SUN_POSITION[1], SUN_POSITION[2], 0.0],
            fog: [fog[0], fog[1], fog[2], FOG_DENSITY],
            points: POINT_LIGHTS.map(|p| {
                let c = Rgb::from_hex(p.color_hex).0;
                PointLightUniform {
                    position_range: [p.position[0], p.position[1], p.position[2], p.range],
                    color_intensity: [c[0], c[1], c[2], p.intensity],
                }
            }),
            glow: [[0.0; 4]; MAX_GLOW_SLOTS / 4],
        };
        u.set_lighting(&LightingSnapshot::default());
        u
    }

    pub(crate) fn set_lighting(&mut self, l: &LightingSnapshot) {
        let a = l.ambient_color.0;
        let d = l.directional_color.0;
        self.ambient = [a[0], a[1], a[2], l.ambient_intensity];
        self.sun_color = [d[0], d[1], d[2], l.directional_intensity];
    }

    pub(crate) fn set_glow(&mut self, slot: usize, value: f32) {
        if slot < MAX_GLOW_SLOTS {
            self.glow[slot / 4][slot % 4] = value;
        }
    }
}

pub(crate) struct CityPass {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) cube_vb: wgpu::Buffer,
    pub(crate) cube_ib: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) instance_vb: wgpu::Buffer,
    pub(crate) instance_count: u32,
}

pub(crate) fn create_city_pass(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
    city: &CityLayout,
) -> CityPass {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("city_shader"),
        source: wgpu::ShaderSource::Wgsl(CITY_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("city_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("city_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    let vertex_layouts = [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    shader_location: 0,
                    offset: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    shader_location: 1,
                    offset: 12,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PartInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    shader_location: 2,
                    offset: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    shader_location: 3,
                    offset: 16,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    shader_location: 4,
                    offset: 32,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    shader_location: 5,
                    offset: 48,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        },
    ];

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("city_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &vertex_layouts,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: depth_format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("city_uniforms"),
        contents: bytemuck::bytes_of(&CityUniforms::new()),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("city_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    let (vertices, indices) = cube_mesh();
    let cube_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("cube_vb"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let cube_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("cube_ib"),
        contents: bytemuck::cast_slice(&indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    let instances: Vec<PartInstance> = city.parts.iter().map(PartInstance::from).collect();
    let instance_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("city_instances"),
        contents: bytemuck::cast_slice(&instances),
        usage: wgpu::BufferUsages::VERTEX,
    });
    log::info!("[render] city pass: {} parts", instances.len());

    CityPass {
        pipeline,
        uniform_buffer,
        bind_group,
        cube_vb,
        cube_ib,
        index_count: indices.len() as u32,
        instance_vb,
        instance_count: instances.len() as u32,
    }
}

/// Unit cube centred on the origin, four vertices per face for flat normals.
fn cube_mesh() -> (Vec<CubeVertex>, Vec<u16>) {
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        // normal, u axis, v axis
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (n, u, v) in FACES {
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let pos = [0, 1, 2].map(|k| 0.5 * (n[k] + su * u[k] + sv * v[k]));
            vertices.push(CubeVertex { pos, normal: n });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}
