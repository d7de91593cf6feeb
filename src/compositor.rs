use crate::config::{FilterConfig, SplitConfig};
use crate::filter::ColorFilter;
use crate::frame::Frame;
use crate::mode::Mode;
use tracing::{debug, trace};

pub use crate::config::{FilteredSide, SplitAxis};

/// Axis-aligned rectangle of a frame, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Whether the colour filter is applied to this region
    pub filtered: bool,
}

impl Region {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// Where the split falls: row index for `Rows`, column index for `Columns`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitBoundary {
    pub axis: SplitAxis,
    pub index: u32,
}

/// Row or column at which a dimension is cut.
///
/// The index is kept strictly inside the dimension whenever it has room for two
/// regions; a dimension under two pixels degenerates to a single region.
pub fn split_index(dimension: u32, fraction: f64) -> u32 {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.5
    };
    let raw = (dimension as f64 * fraction).floor() as u32;

    if dimension < 2 {
        raw.min(dimension)
    } else {
        raw.clamp(1, dimension - 1)
    }
}

/// Chooses the regions of a frame that get the colour filter and stitches the result back
#[derive(Debug, Clone)]
pub struct RegionCompositor {
    filter: ColorFilter,
    axis: SplitAxis,
    fraction: f64,
    filtered_side: FilteredSide,
}

impl RegionCompositor {
    pub fn new(
        filter: ColorFilter,
        axis: SplitAxis,
        fraction: f64,
        filtered_side: FilteredSide,
    ) -> Self {
        Self {
            filter,
            axis,
            fraction,
            filtered_side,
        }
    }

    pub fn from_config(split: &SplitConfig, filter: &FilterConfig) -> Self {
        debug!(
            "Split: {:?} at {:.2}, filtering the {:?} region",
            split.axis, split.fraction, split.filtered_side
        );
        Self::new(
            ColorFilter::from_config(filter),
            split.axis,
            split.fraction,
            split.filtered_side,
        )
    }

    pub fn filter(&self) -> &ColorFilter {
        &self.filter
    }

    pub fn axis(&self) -> SplitAxis {
        self.axis
    }

    pub fn filtered_side(&self) -> FilteredSide {
        self.filtered_side
    }

    fn split_dimension(&self, width: u32, height: u32) -> u32 {
        match self.axis {
            SplitAxis::Rows => height,
            SplitAxis::Columns => width,
        }
    }

    /// Split position for a frame of the given size in split mode
    pub fn split_position(&self, width: u32, height: u32) -> u32 {
        split_index(self.split_dimension(width, height), self.fraction)
    }

    /// Boundary to draw a divider on, only when split mode yields two non-empty regions
    pub fn boundary(&self, width: u32, height: u32, mode: Mode) -> Option<SplitBoundary> {
        if mode != Mode::Split {
            return None;
        }

        let dimension = self.split_dimension(width, height);
        let index = split_index(dimension, self.fraction);
        (index > 0 && index < dimension).then_some(SplitBoundary {
            axis: self.axis,
            index,
        })
    }

    /// Non-empty regions covering a `width` x `height` frame without gaps or overlap
    pub fn regions(&self, width: u32, height: u32, mode: Mode) -> Vec<Region> {
        let whole = |filtered| Region {
            x: 0,
            y: 0,
            width,
            height,
            filtered,
        };

        let regions = match mode {
            Mode::HumanOnly => vec![whole(false)],
            Mode::DogOnly => vec![whole(true)],
            Mode::Split => {
                let index = self.split_position(width, height);
                let second_filtered = self.filtered_side == FilteredSide::Second;
                match self.axis {
                    SplitAxis::Rows => vec![
                        Region {
                            x: 0,
                            y: 0,
                            width,
                            height: index,
                            filtered: !second_filtered,
                        },
                        Region {
                            x: 0,
                            y: index,
                            width,
                            height: height - index,
                            filtered: second_filtered,
                        },
                    ],
                    SplitAxis::Columns => vec![
                        Region {
                            x: 0,
                            y: 0,
                            width: index,
                            height,
                            filtered: !second_filtered,
                        },
                        Region {
                            x: index,
                            y: 0,
                            width: width - index,
                            height,
                            filtered: second_filtered,
                        },
                    ],
                }
            }
        };

        regions.into_iter().filter(|r| !r.is_empty()).collect()
    }

    /// Composite one frame for `mode`. Output has the input's dimensions and channel order.
    pub fn apply(&self, frame: &Frame, mode: Mode) -> Frame {
        match mode {
            Mode::HumanOnly => frame.clone(),
            Mode::DogOnly => self.filter.apply(frame),
            Mode::Split => {
                let index = self.split_position(frame.width, frame.height);
                trace!("Compositing split frame {} at {:?} {}", frame.id, self.axis, index);

                let (first, second) = match self.axis {
                    SplitAxis::Rows => split_rows(frame, index),
                    SplitAxis::Columns => split_columns(frame, index),
                };

                let (first, second) = match self.filtered_side {
                    FilteredSide::First => (self.filter_region(first), second),
                    FilteredSide::Second => (first, self.filter_region(second)),
                };

                match self.axis {
                    SplitAxis::Rows => join_rows(frame, &first, &second),
                    SplitAxis::Columns => join_columns(frame, &first, &second),
                }
            }
        }
    }

    fn filter_region(&self, region: Frame) -> Frame {
        if region.width == 0 || region.height == 0 {
            region
        } else {
            self.filter.apply(&region)
        }
    }
}

/// Top `index` rows and the rest
fn split_rows(frame: &Frame, index: u32) -> (Frame, Frame) {
    let cut = (index as usize * frame.stride()).min(frame.data.len());
    let (top, bottom) = frame.data.split_at(cut);

    (
        frame.with_pixels(frame.width, index, top.to_vec()),
        frame.with_pixels(frame.width, frame.height - index, bottom.to_vec()),
    )
}

/// Left `index` columns and the rest
fn split_columns(frame: &Frame, index: u32) -> (Frame, Frame) {
    let cut = index as usize * 3;
    let left_len = cut * frame.height as usize;
    let mut left = Vec::with_capacity(left_len);
    let mut right = Vec::with_capacity(frame.data.len().saturating_sub(left_len));

    for row in frame.data.chunks_exact(frame.stride().max(1)) {
        let (l, r) = row.split_at(cut);
        left.extend_from_slice(l);
        right.extend_from_slice(r);
    }

    (
        frame.with_pixels(index, frame.height, left),
        frame.with_pixels(frame.width - index, frame.height, right),
    )
}

fn join_rows(frame: &Frame, top: &Frame, bottom: &Frame) -> Frame {
    let mut data = Vec::with_capacity(frame.data.len());
    data.extend_from_slice(&top.data);
    data.extend_from_slice(&bottom.data);
    frame.with_pixels(frame.width, frame.height, data)
}

fn join_columns(frame: &Frame, left: &Frame, right: &Frame) -> Frame {
    let mut data = Vec::with_capacity(frame.data.len());
    let left_rows = left.data.chunks(left.stride().max(1));
    let right_rows = right.data.chunks(right.stride().max(1));

    if left.width == 0 {
        data.extend_from_slice(&right.data);
    } else if right.width == 0 {
        data.extend_from_slice(&left.data);
    } else {
        for (l, r) in left_rows.zip(right_rows) {
            data.extend_from_slice(l);
            data.extend_from_slice(r);
        }
    }

    frame.with_pixels(frame.width, frame.height, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ChannelOrder;

    fn colourful_frame(width: u32, height: u32) -> Frame {
        let data = (0..width * height)
            .flat_map(|i| {
                let i = i as u8;
                [i.wrapping_mul(37), 200u8.wrapping_sub(i), i.wrapping_mul(11)]
            })
            .collect();
        Frame::new(9, width, height, ChannelOrder::Bgr, data)
    }

    fn compositor(axis: SplitAxis, fraction: f64, side: FilteredSide) -> RegionCompositor {
        RegionCompositor::new(ColorFilter::default(), axis, fraction, side)
    }

    #[test]
    fn test_split_index_clamping() {
        assert_eq!(split_index(10, 0.5), 5);
        assert_eq!(split_index(10, 0.4), 4);
        assert_eq!(split_index(10, 0.0), 1);
        assert_eq!(split_index(10, 1.0), 9);
        assert_eq!(split_index(10, -3.0), 1);
        assert_eq!(split_index(10, f64::NAN), 5);
        assert_eq!(split_index(2, 0.01), 1);
        assert_eq!(split_index(1, 0.5), 0);
        assert_eq!(split_index(1, 1.0), 1);
        assert_eq!(split_index(0, 0.5), 0);
    }

    #[test]
    fn test_human_only_is_identity() {
        let frame = colourful_frame(6, 4);
        let out =
            compositor(SplitAxis::Rows, 0.5, FilteredSide::Second).apply(&frame, Mode::HumanOnly);
        assert_eq!(out, frame);
    }

    #[test]
    fn test_dog_only_filters_everything() {
        let frame = colourful_frame(6, 4);
        let c = compositor(SplitAxis::Rows, 0.5, FilteredSide::Second);
        assert_eq!(c.apply(&frame, Mode::DogOnly), c.filter().apply(&frame));
    }

    #[test]
    fn test_split_rows_keeps_size_and_unfiltered_region() {
        let frame = colourful_frame(5, 8);
        let c = compositor(SplitAxis::Rows, 0.4, FilteredSide::Second);
        let out = c.apply(&frame, Mode::Split);

        assert_eq!((out.width, out.height), (5, 8));
        assert!(out.validate_size());

        let filtered = c.filter().apply(&frame);
        let index = c.split_position(5, 8);
        assert_eq!(index, 3);
        for y in 0..8 {
            for x in 0..5 {
                let expected = if y < index {
                    frame.pixel(x, y)
                } else {
                    filtered.pixel(x, y)
                };
                assert_eq!(out.pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_split_columns_filtering_first_side() {
        let frame = colourful_frame(7, 3);
        let c = compositor(SplitAxis::Columns, 0.5, FilteredSide::First);
        let out = c.apply(&frame, Mode::Split);

        assert_eq!((out.width, out.height), (7, 3));
        let filtered = c.filter().apply(&frame);
        for y in 0..3 {
            for x in 0..7 {
                let expected = if x < 3 {
                    filtered.pixel(x, y)
                } else {
                    frame.pixel(x, y)
                };
                assert_eq!(out.pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_regions_partition_the_frame() {
        for axis in [SplitAxis::Rows, SplitAxis::Columns] {
            for side in [FilteredSide::First, FilteredSide::Second] {
                for fraction in [0.0, 0.1, 0.4, 0.5, 0.99, 1.0] {
                    let c = compositor(axis, fraction, side);
                    let regions = c.regions(9, 7, Mode::Split);

                    assert_eq!(regions.len(), 2);
                    let total: usize = regions.iter().map(Region::pixel_count).sum();
                    assert_eq!(total, 63);
                    assert_eq!(regions.iter().filter(|r| r.filtered).count(), 1);

                    for y in 0..7 {
                        for x in 0..9 {
                            assert_eq!(regions.iter().filter(|r| r.contains(x, y)).count(), 1);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_single_mode_regions() {
        let c = compositor(SplitAxis::Rows, 0.5, FilteredSide::Second);
        assert_eq!(
            c.regions(4, 4, Mode::HumanOnly),
            vec![Region {
                x: 0,
                y: 0,
                width: 4,
                height: 4,
                filtered: false,
            }]
        );
        assert!(c.regions(4, 4, Mode::DogOnly)[0].filtered);
    }

    #[test]
    fn test_boundary_only_in_split() {
        let c = compositor(SplitAxis::Columns, 0.5, FilteredSide::Second);
        assert_eq!(c.boundary(10, 4, Mode::DogOnly), None);
        assert_eq!(
            c.boundary(10, 4, Mode::Split),
            Some(SplitBoundary {
                axis: SplitAxis::Columns,
                index: 5,
            })
        );
    }

    #[test]
    fn test_degenerate_dimensions_do_not_crash() {
        // One row: the split collapses, second side filtered means the whole frame is filtered
        let frame = colourful_frame(4, 1);
        let c = compositor(SplitAxis::Rows, 0.5, FilteredSide::Second);
        let out = c.apply(&frame, Mode::Split);
        assert_eq!(out, c.filter().apply(&frame));
        assert_eq!(c.boundary(4, 1, Mode::Split), None);
        assert_eq!(c.regions(4, 1, Mode::Split).len(), 1);

        let c = compositor(SplitAxis::Columns, 0.5, FilteredSide::First);
        let frame = colourful_frame(1, 3);
        let out = c.apply(&frame, Mode::Split);
        assert_eq!(out, frame);

        let empty = Frame::new(0, 0, 0, ChannelOrder::Bgr, Vec::new());
        assert_eq!(c.apply(&empty, Mode::Split), empty);
    }
}
