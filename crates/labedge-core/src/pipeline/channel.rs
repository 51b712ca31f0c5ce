//! Chroma channel extraction from a Lab buffer.

use crate::buffer::PixelBuffer;
use crate::error::PipelineResult;
use crate::types::{ChannelVisualization, LabBuffer, LabChannel};

/// Copy one Lab chroma channel into all three channels of a new buffer.
///
/// The result looks grayscale but keeps 3-channel layout so it can be fed
/// straight to the gradient stage and encoded like any color image.
pub fn extract_channel(
    lab: &LabBuffer,
    channel: LabChannel,
) -> PipelineResult<ChannelVisualization> {
    let src = lab.pixels();
    let index = channel.index();

    let mut out = PixelBuffer::new(src.width(), src.height(), 3)?;
    for y in 0..src.height() {
        for x in 0..src.width() {
            let value = src.get(x, y, index)?;
            for c in 0..3 {
                out.set(x, y, c, value)?;
            }
        }
    }

    tracing::debug!(
        "Extracted {} channel ({}x{})",
        channel,
        src.width(),
        src.height()
    );
    Ok(ChannelVisualization::new(out))
}
