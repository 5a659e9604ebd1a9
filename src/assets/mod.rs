//! Asset Loading
//!
//! Texture and cubemap loading via the `image` crate. A missing or broken
//! file is never fatal: it logs a warning and substitutes a 1×1 placeholder
//! so the scene still renders, just degraded.

use std::path::Path;

use crate::errors::Result;

/// Per-face sky blue used when a cubemap face cannot be loaded.
const PLACEHOLDER_SKY: [u8; 4] = [96, 130, 180, 255];
/// Neutral gray used when a 2D texture cannot be loaded.
const PLACEHOLDER_GRAY: [u8; 4] = [180, 180, 180, 255];

fn decode_rgba(path: &Path) -> Result<image::RgbaImage> {
    let bytes = std::fs::read(path)?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

fn upload_layer(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    layer: u32,
    pixels: &[u8],
    width: u32,
    height: u32,
) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: 0,
                y: 0,
                z: layer,
            },
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

fn create_color_texture(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
    layers: u32,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: layers,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

/// Loads a 2D sRGB texture, falling back to a 1×1 gray placeholder.
pub fn load_texture(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> wgpu::TextureView {
    let label = path.display().to_string();
    let (pixels, width, height) = match decode_rgba(path) {
        Ok(img) => {
            let (width, height) = img.dimensions();
            (img.into_raw(), width, height)
        }
        Err(err) => {
            log::warn!("Texture {label} failed to load ({err}), using placeholder");
            (PLACEHOLDER_GRAY.to_vec(), 1, 1)
        }
    };

    let texture = create_color_texture(device, &label, width, height, 1);
    upload_layer(queue, &texture, 0, &pixels, width, height);
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Loads a 6-face cubemap from `directory`, faces ordered
/// +X, −X, +Y, −Y, +Z, −Z.
///
/// Any face that fails to load, or whose size differs from the first loaded
/// face, is replaced by a sky-blue placeholder pixel of the common size.
pub fn load_cubemap(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    directory: &Path,
    faces: &[&str; 6],
) -> wgpu::TextureView {
    let mut images: [Option<image::RgbaImage>; 6] = [const { None }; 6];
    let mut face_size: Option<(u32, u32)> = None;

    for (index, face) in faces.iter().enumerate() {
        let path = directory.join(face);
        match decode_rgba(&path) {
            Ok(img) => {
                let size = img.dimensions();
                match face_size {
                    None => {
                        face_size = Some(size);
                        images[index] = Some(img);
                    }
                    Some(expected) if expected == size => images[index] = Some(img),
                    Some(expected) => {
                        log::warn!(
                            "Cubemap face {} is {}x{}, expected {}x{}; using placeholder",
                            path.display(),
                            size.0,
                            size.1,
                            expected.0,
                            expected.1
                        );
                    }
                }
            }
            Err(err) => {
                log::warn!(
                    "Cubemap face {} failed to load ({err}), using placeholder",
                    path.display()
                );
            }
        }
    }

    let (width, height) = face_size.unwrap_or((1, 1));
    let texture = create_color_texture(device, "Skybox Cubemap", width, height, 6);

    let placeholder = vec![PLACEHOLDER_SKY; (width * height) as usize]
        .into_iter()
        .flatten()
        .collect::<Vec<u8>>();
    for (layer, image) in images.into_iter().enumerate() {
        let pixels = image.map_or_else(|| placeholder.clone(), image::RgbaImage::into_raw);
        upload_layer(queue, &texture, layer as u32, &pixels, width, height);
    }

    texture.create_view(&wgpu::TextureViewDescriptor {
        dimension: Some(wgpu::TextureViewDimension::Cube),
        ..Default::default()
    })
}
