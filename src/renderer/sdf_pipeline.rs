//! SDF-based WebGPU render pipeline
//!
//! Renders the whole scene in a fragment shader using signed distance fields:
//! track lanes, curbs, trees, vehicles and hit zone markers.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::consts::*;
use crate::scene::{ObjectKind, SceneGraph, VehicleRole};
use crate::settings::Config;
use crate::sim::{VehicleKind, arc_center_x};

/// Maximum number of vehicle bodies drawn
pub const MAX_VEHICLES: usize = 64;
/// Maximum number of hit zone markers drawn
pub const MAX_MARKERS: usize = 192;

/// Globals flag bits
const FLAG_SHADOWS: u32 = 1;
const FLAG_TREES: u32 = 2;
const FLAG_CURBS: u32 = 4;
const FLAG_GRID: u32 = 8;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    resolution: [f32; 2],  // offset 0
    camera_size: [f32; 2], // offset 8
    track_radius: f32,     // offset 16
    track_width: f32,      // offset 20
    arc_center_x: f32,     // offset 24
    vehicle_count: u32,    // offset 28
    marker_count: u32,     // offset 32
    flags: u32,            // offset 36
    _pad: [u32; 2],        // pad to 48 bytes
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct VehicleData {
    pub pos: [f32; 2],
    pub rotation: f32,
    /// 0 = car, 1 = truck
    pub kind: u32,
    /// 0 = player, 1 = traffic
    pub role: u32,
    /// Palette index for traffic
    pub color: u32,
    _pad: [u32; 2], // 32-byte stride for uniform arrays
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MarkerData {
    pub pos: [f32; 2],
    _pad: [f32; 2], // 16-byte stride for uniform arrays
}

/// Flatten the scene graph into shader arrays (truncated to the buffer sizes)
pub fn pack_scene(scene: &SceneGraph) -> (Vec<VehicleData>, Vec<MarkerData>) {
    let mut vehicles = Vec::new();
    let mut markers = Vec::new();

    for object in scene.objects() {
        match object.kind {
            ObjectKind::Vehicle { kind, role } => {
                if vehicles.len() < MAX_VEHICLES {
                    let color = vehicles.len() as u32;
                    vehicles.push(VehicleData {
                        pos: [object.position.x, object.position.y],
                        rotation: object.rotation,
                        kind: match kind {
                            VehicleKind::Car => 0,
                            VehicleKind::Truck => 1,
                        },
                        role: match role {
                            VehicleRole::Player => 0,
                            VehicleRole::Traffic => 1,
                        },
                        color,
                        _pad: [0; 2],
                    });
                }
            }
            ObjectKind::HitZoneMarker => {
                if markers.len() < MAX_MARKERS {
                    markers.push(MarkerData {
                        pos: [object.position.x, object.position.y],
                        _pad: [0.0; 2],
                    });
                }
            }
        }
    }

    (vehicles, markers)
}

/// Shader flag bits for the visual toggles
fn config_flags(config: &Config) -> u32 {
    let mut flags = 0;
    if config.shadows {
        flags |= FLAG_SHADOWS;
    }
    if config.trees {
        flags |= FLAG_TREES;
    }
    if config.curbs {
        flags |= FLAG_CURBS;
    }
    if config.grid {
        flags |= FLAG_GRID;
    }
    flags
}

/// Visible world area for a viewport (fixed width, height from aspect ratio)
pub fn camera_size(width: u32, height: u32) -> [f32; 2] {
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    [CAMERA_WIDTH, CAMERA_WIDTH / aspect]
}

// ============================================================================
// SDF RENDER STATE
// ============================================================================

pub struct SdfRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    // Uniform buffers
    globals_buffer: wgpu::Buffer,
    vehicles_buffer: wgpu::Buffer,
    markers_buffer: wgpu::Buffer,

    bind_group: wgpu::BindGroup,

    pub size: (u32, u32),
    flags: u32,
}

impl SdfRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        game_config: &Config,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sdf-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sdf_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sdf_shader.wgsl").into()),
        });

        let flags = config_flags(game_config);

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Self::globals((width, height), flags, 0, 0)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let vehicles_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vehicles"),
            size: (std::mem::size_of::<VehicleData>() * MAX_VEHICLES) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let markers_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("markers"),
            size: (std::mem::size_of::<MarkerData>() * MAX_MARKERS) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sdf_bind_group_layout"),
            entries: &[uniform_entry(0), uniform_entry(1), uniform_entry(2)],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sdf_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: vehicles_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: markers_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sdf_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sdf_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            vehicles_buffer,
            markers_buffer,
            bind_group,
            size: (width, height),
            flags,
        })
    }

    fn globals(size: (u32, u32), flags: u32, vehicle_count: u32, marker_count: u32) -> Globals {
        Globals {
            resolution: [size.0 as f32, size.1 as f32],
            camera_size: camera_size(size.0, size.1),
            track_radius: TRACK_RADIUS,
            track_width: TRACK_WIDTH,
            arc_center_x: arc_center_x(),
            vehicle_count,
            marker_count,
            flags,
            _pad: [0; 2],
        }
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Update GPU buffers from the scene graph and render
    pub fn render(&mut self, scene: &SceneGraph) -> Result<(), wgpu::SurfaceError> {
        let (mut vehicles, mut markers) = pack_scene(scene);

        let globals = Self::globals(
            self.size,
            self.flags,
            vehicles.len() as u32,
            markers.len() as u32,
        );
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        // Uniform arrays are fixed-size; pad with zeroed entries
        vehicles.resize(MAX_VEHICLES, VehicleData::zeroed());
        markers.resize(MAX_MARKERS, MarkerData::zeroed());
        self.queue
            .write_buffer(&self.vehicles_buffer, 0, bytemuck::cast_slice(&vehicles));
        self.queue
            .write_buffer(&self.markers_buffer, 0, bytemuck::cast_slice(&markers));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sdf_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sdf_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
