//! Per-band offset state and the discrete events that adjust it

/// Which movable band an offset event targets.
///
/// Green is the fixed reference and is never shifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetTarget {
    RedEdge,
    Nir,
}

/// Axis of an offset event: `X` moves columns, `Y` moves rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetAxis {
    X,
    Y,
}

/// A single discrete alignment adjustment.
///
/// Interactive front-ends emit one of these per input gesture (delta ±1);
/// programmatic callers may use any signed magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetEvent {
    pub target: OffsetTarget,
    pub axis: OffsetAxis,
    pub delta: i32,
}

/// Integer pixel displacement in full-resolution space.
///
/// `dx` is the column-axis shift, `dy` the row-axis shift; the sign
/// convention matches [`circular_shift`](crate::alignment::circular_shift)
/// and is shared by the preview and the index computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelOffset {
    pub dx: i32,
    pub dy: i32,
}

impl PixelOffset {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// Current offsets for both movable bands, zero at construction.
///
/// Offsets are unbounded: the shifter wraps, so any value remains a valid
/// periodic shift and no clamping is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentOffsets {
    pub red_edge: PixelOffset,
    pub nir: PixelOffset,
}

impl AlignmentOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one discrete adjustment event.
    pub fn apply(&mut self, event: OffsetEvent) {
        self.nudge(event.target, event.axis, event.delta);
    }

    /// Move one band's offset along one axis by a signed step.
    pub fn nudge(&mut self, target: OffsetTarget, axis: OffsetAxis, delta: i32) {
        let offset = match target {
            OffsetTarget::RedEdge => &mut self.red_edge,
            OffsetTarget::Nir => &mut self.nir,
        };
        match axis {
            OffsetAxis::X => offset.dx += delta,
            OffsetAxis::Y => offset.dy += delta,
        }
    }

    /// Zero both offsets.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
