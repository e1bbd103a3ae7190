//! The wgpu implementation of the scene's device seams.
//!
//! [`GpuBackend`] owns every GPU resource the scene creates: textures and the
//! bind groups of the texture units, vertex and index buffers per primitive
//! kind, the frame and per-object uniform buffers, and the scene pipeline.
//!
//! Draw calls arrive one at a time through [`MeshProvider::draw_mesh`] while
//! uniform state is still being staged for the next one, so each call is
//! recorded together with a snapshot of its [`ObjectUniform`]. At the end of
//! the frame [`GpuBackend::encode`] writes every snapshot into its own slot of
//! a dynamic-offset uniform buffer and replays the draws in one render pass.

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::{
    camera::CameraUniform,
    data_structures::{
        mesh::{MeshKind, ShapeVertex},
        texture::Texture,
    },
    error::{SceneError, SceneResult},
    pipelines::basic::{self, FRAME_GROUP, OBJECT_GROUP, TEXTURE_GROUP},
    resources::{DecodedImage, MAX_TEXTURE_UNITS, MeshProvider, TextureDevice, TextureId},
    shader::{LightingUniform, ObjectUniform},
};

/// Uploaded geometry of one primitive kind.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

#[derive(Debug)]
struct GpuTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// A recorded draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingDraw {
    pub kind: MeshKind,
    pub object: ObjectUniform,
}

/// Growable uniform buffer holding one [`ObjectUniform`] per draw.
#[derive(Debug)]
struct ObjectSlots {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    stride: u64,
    capacity: usize,
}

impl ObjectSlots {
    const INITIAL_CAPACITY: usize = 32;

    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, capacity: usize) -> Self {
        let stride = slot_stride(
            std::mem::size_of::<ObjectUniform>() as u64,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniform Buffer"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bind_group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                }),
            }],
        });
        Self {
            buffer,
            bind_group,
            stride,
            capacity,
        }
    }

    /// Dynamic offset of slot `index`.
    fn offset(&self, index: usize) -> u32 {
        (self.stride * index as u64) as u32
    }
}

/// Round `size` up to the next multiple of `alignment`.
pub fn slot_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

pub struct GpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    texture_layout: wgpu::BindGroupLayout,
    object_layout: wgpu::BindGroupLayout,
    camera_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    objects: ObjectSlots,
    textures: HashMap<TextureId, GpuTexture>,
    next_texture: u32,
    units: [Option<TextureId>; MAX_TEXTURE_UNITS],
    /// White 1×1 texture bound while a draw is in flat-colour mode.
    fallback: GpuTexture,
    meshes: HashMap<MeshKind, GpuMesh>,
    pending: Vec<PendingDraw>,
}

impl GpuBackend {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, color_format: wgpu::TextureFormat) -> Self {
        let frame_layout = basic::frame_layout(device);
        let object_layout = basic::object_layout(device);
        let texture_layout = basic::texture_layout(device);
        let pipeline = basic::mk_scene_pipeline(
            device,
            color_format,
            &frame_layout,
            &object_layout,
            &texture_layout,
        );

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::new()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lighting_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lighting Buffer"),
            contents: bytemuck::cast_slice(&[LightingUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lighting_buffer.as_entire_binding(),
                },
            ],
        });

        let objects = ObjectSlots::new(device, &object_layout, ObjectSlots::INITIAL_CAPACITY);
        let fallback = {
            let texture = Texture::create_solid([255, 255, 255, 255], device, queue, "fallback");
            let bind_group = texture_bind_group(device, &texture_layout, &texture, "fallback");
            GpuTexture {
                texture,
                bind_group,
            }
        };

        Self {
            device: device.clone(),
            queue: queue.clone(),
            pipeline,
            texture_layout,
            object_layout,
            camera_buffer,
            lighting_buffer,
            frame_bind_group,
            objects,
            textures: HashMap::new(),
            next_texture: 0,
            units: [None; MAX_TEXTURE_UNITS],
            fallback,
            meshes: HashMap::new(),
            pending: Vec::new(),
        }
    }

    pub fn write_camera(&self, camera: &CameraUniform) {
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[*camera]));
    }

    pub fn write_lighting(&self, lighting: &LightingUniform) {
        self.queue
            .write_buffer(&self.lighting_buffer, 0, bytemuck::cast_slice(&[*lighting]));
    }

    /// Draws recorded since the last [`encode`](Self::encode).
    pub fn pending_draws(&self) -> &[PendingDraw] {
        &self.pending
    }

    /// Forget the recorded draws without encoding them.
    pub fn take_pending(&mut self) -> Vec<PendingDraw> {
        std::mem::take(&mut self.pending)
    }

    /// Record one render pass that clears the targets and replays every
    /// pending draw.
    pub fn encode(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        clear_colour: wgpu::Color,
    ) {
        let draws = std::mem::take(&mut self.pending);
        self.upload_objects(&draws);

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_colour),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
            multiview_mask: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(FRAME_GROUP, &self.frame_bind_group, &[]);
        for (slot, draw) in draws.iter().enumerate() {
            // draw_mesh only records loaded kinds.
            let Some(mesh) = self.meshes.get(&draw.kind) else {
                continue;
            };
            render_pass.set_bind_group(
                OBJECT_GROUP,
                &self.objects.bind_group,
                &[self.objects.offset(slot)],
            );
            render_pass.set_bind_group(TEXTURE_GROUP, self.texture_for(&draw.object), &[]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.num_elements, 0, 0..1);
        }
    }

    fn texture_for(&self, object: &ObjectUniform) -> &wgpu::BindGroup {
        if !object.uses_texture() {
            return &self.fallback.bind_group;
        }
        self.units
            .get(object.texture_unit as usize)
            .copied()
            .flatten()
            .and_then(|id| self.textures.get(&id))
            .map(|texture| &texture.bind_group)
            .unwrap_or(&self.fallback.bind_group)
    }

    fn upload_objects(&mut self, draws: &[PendingDraw]) {
        if draws.len() > self.objects.capacity {
            let capacity = draws.len().next_power_of_two();
            log::debug!("growing object uniform buffer to {capacity} slots");
            self.objects = ObjectSlots::new(&self.device, &self.object_layout, capacity);
        }
        let stride = self.objects.stride as usize;
        let mut bytes = vec![0u8; stride * draws.len()];
        for (slot, draw) in draws.iter().enumerate() {
            let start = slot * stride;
            let object = bytemuck::bytes_of(&draw.object);
            bytes[start..start + object.len()].copy_from_slice(object);
        }
        if !bytes.is_empty() {
            self.queue.write_buffer(&self.objects.buffer, 0, &bytes);
        }
    }
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
    label: &str,
) -> wgpu::BindGroup {
    let sampler = texture
        .sampler
        .clone()
        .unwrap_or_else(|| crate::data_structures::texture::create_repeat_sampler(device));
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}

impl TextureDevice for GpuBackend {
    fn create_texture(&mut self, image: &DecodedImage, label: &str) -> SceneResult<TextureId> {
        let rgba = image.to_rgba8().ok_or_else(|| SceneError::TextureUpload {
            tag: label.to_string(),
            reason: format!(
                "{}x{} image with {} channels does not fit its pixel buffer",
                image.width, image.height, image.channels
            ),
        })?;
        let max_dimension = self.device.limits().max_texture_dimension_2d;
        if rgba.width() > max_dimension || rgba.height() > max_dimension {
            return Err(SceneError::TextureUpload {
                tag: label.to_string(),
                reason: format!("larger than the device limit of {max_dimension} pixels"),
            });
        }

        let texture = Texture::from_rgba8(&self.device, &self.queue, &rgba, label, true);
        let bind_group = texture_bind_group(&self.device, &self.texture_layout, &texture, label);
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(
            id,
            GpuTexture {
                texture,
                bind_group,
            },
        );
        Ok(id)
    }

    fn bind_unit(&mut self, unit: usize, texture: TextureId) {
        match self.units.get_mut(unit) {
            Some(slot) => *slot = Some(texture),
            None => log::error!("texture unit {unit} does not exist"),
        }
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        if let Some(gpu_texture) = self.textures.remove(&texture) {
            gpu_texture.texture.texture.destroy();
        }
        for slot in self.units.iter_mut() {
            if *slot == Some(texture) {
                *slot = None;
            }
        }
    }
}

impl MeshProvider for GpuBackend {
    fn load_mesh(&mut self, kind: MeshKind) -> SceneResult<()> {
        if self.meshes.contains_key(&kind) {
            return Ok(());
        }
        let data = kind.geometry();
        if data.indices.is_empty() {
            return Err(SceneError::MeshUpload {
                kind,
                reason: "generated geometry is empty".to_string(),
            });
        }

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{kind:?} Vertex Buffer")),
                contents: bytemuck::cast_slice::<ShapeVertex, u8>(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{kind:?} Index Buffer")),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        log::debug!(
            "uploaded {kind:?} mesh: {} vertices, {} triangles",
            data.vertices.len(),
            data.triangle_count()
        );
        self.meshes.insert(
            kind,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                num_elements: data.indices.len() as u32,
            },
        );
        Ok(())
    }

    fn draw_mesh(&mut self, kind: MeshKind, object: &ObjectUniform) -> SceneResult<()> {
        if !self.meshes.contains_key(&kind) {
            return Err(SceneError::MeshNotLoaded(kind));
        }
        self.pending.push(PendingDraw {
            kind,
            object: *object,
        });
        Ok(())
    }
}
