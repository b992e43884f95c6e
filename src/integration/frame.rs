use crate::spot::FrameSize;

/// Size the preview frame is downscaled to before it is shown to the user.
pub const PREVIEW_SIZE: FrameSize = FrameSize {
    width: 960,
    height: 540,
};

/// A decoded video frame handed to the detector.
///
/// The pixel layout of `data` is whatever the detector expects; this crate
/// never inspects it.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub data: &'a [u8],
    pub size: FrameSize,
    /// Position of the frame in the video, starting at 0
    pub index: u64,
}

impl<'a> Frame<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32, index: u64) -> Self {
        Self {
            data,
            size: FrameSize::new(width, height),
            index,
        }
    }
}

/// Index of the frame shown as preview: the one at the one second mark.
///
/// Non-finite or negative frame rates fall back to the first frame.
pub fn preview_frame_index(fps: f64) -> u64 {
    if fps.is_finite() && fps > 0.0 {
        fps.floor() as u64
    } else {
        0
    }
}
