//! Reading rendered frames back from the GPU

use std::sync::Arc;

use logo_core::CapturedFrame;
use parking_lot::Mutex;

/// Rows copied into a buffer must be 256-byte aligned
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Strip the row padding of a buffer copy
pub fn unpad_rows(data: &[u8], width: u32, height: u32, padded_bytes_per_row: u32) -> Vec<u8> {
    let row_len = (width * 4) as usize;
    let padded = padded_bytes_per_row as usize;
    let mut rgba = Vec::with_capacity(row_len * height as usize);
    for row in data.chunks(padded).take(height as usize) {
        rgba.extend_from_slice(&row[..row_len.min(row.len())]);
    }
    rgba
}

type MapResult = Result<(), wgpu::BufferAsyncError>;

/// A frame copy in flight.
///
/// Mapping completes asynchronously: on the web only after control returns
/// to the browser, natively on the next device poll.
pub struct PendingCapture {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_bytes_per_row: u32,
    mapped: Arc<Mutex<Option<MapResult>>>,
}

impl PendingCapture {
    /// Encode a copy of `texture` into a new readback buffer
    pub(super) fn encode(
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        texture: &wgpu::Texture,
    ) -> Self {
        let width = texture.width();
        let height = texture.height();
        let padded_bytes_per_row = padded_bytes_per_row(width);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Capture Readback Buffer"),
            size: (padded_bytes_per_row * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        encoder.copy_texture_to_buffer(
            texture.as_image_copy(),
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            texture.size(),
        );

        Self {
            buffer,
            width,
            height,
            padded_bytes_per_row,
            mapped: Arc::new(Mutex::new(None)),
        }
    }

    /// Request the mapping. Call after the copy was submitted.
    pub(super) fn start(&self) {
        let mapped = Arc::clone(&self.mapped);
        self.buffer
            .slice(..)
            .map_async(wgpu::MapMode::Read, move |result| {
                *mapped.lock() = Some(result);
            });
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// `None` while the copy is in flight, then the frame once.
    ///
    /// The inner `None` means the readback failed.
    pub fn poll(&self, device: &wgpu::Device) -> Option<Option<CapturedFrame>> {
        let _ = device.poll(wgpu::Maintain::Poll);

        let result = self.mapped.lock().take()?;
        if let Err(e) = result {
            tracing::error!("Frame readback failed: {}", e);
            return Some(None);
        }

        let rgba = {
            let data = self.buffer.slice(..).get_mapped_range();
            unpad_rows(&data, self.width, self.height, self.padded_bytes_per_row)
        };
        self.buffer.unmap();

        Some(Some(CapturedFrame {
            width: self.width,
            height: self.height,
            rgba,
        }))
    }

    /// Block until the frame is read back
    #[cfg(not(target_arch = "wasm32"))]
    pub fn wait(self, device: &wgpu::Device) -> Option<CapturedFrame> {
        loop {
            let _ = device.poll(wgpu::Maintain::Wait);
            if let Some(frame) = self.poll(device) {
                return frame;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_padding() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(1920), 7680);
        assert_eq!(padded_bytes_per_row(1), 256);
    }

    #[test]
    fn test_unpad_rows() {
        let width = 3;
        let height = 2;
        let padded = padded_bytes_per_row(width);
        let mut data = vec![0xEE; (padded * height) as usize];
        for y in 0..height as usize {
            for x in 0..(width * 4) as usize {
                data[y * padded as usize + x] = (y * 100 + x) as u8;
            }
        }

        let rgba = unpad_rows(&data, width, height, padded);
        assert_eq!(rgba.len(), 24);
        assert_eq!(rgba[0], 0);
        assert_eq!(rgba[11], 11);
        assert_eq!(rgba[12], 100);
        assert!(!rgba.contains(&0xEE));
    }
}
