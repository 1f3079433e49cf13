//! Corner atlas textures on wgpu
//!
//! Atlases are uploaded once per rebuild as 2D `Rgba8Unorm` textures. The
//! rasterizer already produces premultiplied alpha, which is what the corner
//! shader expects, so the pixels go up unchanged.

use std::sync::Arc;

use rounder_raster::CornerImage;

/// An uploaded corner atlas
pub struct GpuTexture {
    /// The atlas texture
    pub texture: wgpu::Texture,
    /// Texture view for binding, shared with any bind group that samples it
    pub view: Arc<wgpu::TextureView>,
    /// Width and height in pixels
    pub side: u32,
}

impl GpuTexture {
    /// Create a texture sized for `image` and upload its pixels
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &CornerImage,
    ) -> Self {
        let side = image.side();
        let size = wgpu::Extent3d {
            width: side,
            height: side,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.data(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(side * 4),
                rows_per_image: Some(side),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view: Arc::new(view),
            side,
        }
    }
}
