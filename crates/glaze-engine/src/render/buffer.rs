use std::borrow::Cow;

/// GPU buffer that reallocates when an upload outgrows it.
///
/// Contents are not preserved across growth; callers rewrite the whole buffer
/// every frame.
pub struct GrowableBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    min_size: u64,
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
}

impl GrowableBuffer {
    /// `usage` is extended with `COPY_DST`. `min_size` is the first allocation size in bytes.
    pub fn new(label: &'static str, usage: wgpu::BufferUsages, min_size: u64) -> Self {
        Self {
            label,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            min_size: align_to_copy(min_size.max(wgpu::COPY_BUFFER_ALIGNMENT)),
            buffer: None,
            capacity: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    #[inline]
    pub fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }

    /// Makes room for at least `required` bytes. Returns `true` if a new buffer was created.
    pub fn ensure_capacity(&mut self, device: &wgpu::Device, required: u64) -> bool {
        if self.buffer.is_some() && required <= self.capacity {
            return false;
        }

        let new_cap = grown_capacity(required, self.min_size);
        log::debug!("{}: {} -> {} bytes", self.label, self.capacity, new_cap);

        self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(self.label),
            size: new_cap,
            usage: self.usage,
            mapped_at_creation: false,
        }));
        self.capacity = new_cap;
        true
    }

    /// Uploads `bytes` at offset 0, growing first if needed.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }

        let data = pad_to_copy_alignment(bytes);
        self.ensure_capacity(device, data.len() as u64);

        let Some(buffer) = self.buffer.as_ref() else { return };
        queue.write_buffer(buffer, 0, &data);
    }
}

/// Next power of two of `required`, at least `min_size`, aligned for copies.
pub(crate) fn grown_capacity(required: u64, min_size: u64) -> u64 {
    align_to_copy(required.next_power_of_two().max(min_size))
}

#[inline]
fn align_to_copy(size: u64) -> u64 {
    size.div_ceil(wgpu::COPY_BUFFER_ALIGNMENT) * wgpu::COPY_BUFFER_ALIGNMENT
}

/// `queue.write_buffer` requires a length that is a multiple of `COPY_BUFFER_ALIGNMENT`.
pub(crate) fn pad_to_copy_alignment(bytes: &[u8]) -> Cow<'_, [u8]> {
    let padded = align_to_copy(bytes.len() as u64) as usize;
    if padded == bytes.len() {
        Cow::Borrowed(bytes)
    } else {
        let mut v = Vec::with_capacity(padded);
        v.extend_from_slice(bytes);
        v.resize(padded, 0);
        Cow::Owned(v)
    }
}
