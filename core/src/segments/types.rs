use crate::image::SegmentDescriptor;
use crate::types::BootImageError;
use crate::utils::to_u32;

/// One loadable region of the source executable.
///
/// `size` always equals `payload.len()`; both constructors enforce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    physical_address: u32,
    size: u32,
    payload: Vec<u8>,
}

impl Segment {
    /// Build a segment whose size is taken from the payload.
    pub fn new(physical_address: u32, payload: Vec<u8>) -> Result<Self, BootImageError> {
        let size = to_u32("segment size", payload.len() as u64)?;
        Ok(Self { physical_address, size, payload })
    }

    /// Build a segment from a declared on-disk size, rejecting a payload of any other length.
    pub fn with_declared_size(
        physical_address: u32,
        size: u32,
        payload: Vec<u8>,
    ) -> Result<Self, BootImageError> {
        if size as usize != payload.len() {
            return Err(BootImageError::SegmentSizeMismatch { declared: size, actual: payload.len() });
        }
        Ok(Self { physical_address, size, payload })
    }

    pub fn physical_address(&self) -> u32 {
        self.physical_address
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// The 8-byte header record for this segment.
    pub fn descriptor(&self) -> SegmentDescriptor {
        SegmentDescriptor { physical_address: self.physical_address, size: self.size }
    }

    /// Descriptor and payload already known to agree (decoder path).
    pub(crate) fn from_descriptor(d: SegmentDescriptor, payload: Vec<u8>) -> Self {
        debug_assert_eq!(d.size as usize, payload.len());
        Self { physical_address: d.physical_address, size: d.size, payload }
    }
}

/// Anything that can hand out an entry point and an ordered list of
/// loadable segments.
pub trait SegmentSource {
    fn entry_point(&self) -> Result<u32, BootImageError>;
    fn segments(&self) -> Result<Vec<Segment>, BootImageError>;
}

/// Pre-extracted segments held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySource {
    pub entry_point: u32,
    pub segments: Vec<Segment>,
}

impl SegmentSource for MemorySource {
    fn entry_point(&self) -> Result<u32, BootImageError> {
        Ok(self.entry_point)
    }

    fn segments(&self) -> Result<Vec<Segment>, BootImageError> {
        Ok(self.segments.clone())
    }
}
