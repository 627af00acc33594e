//! Stack component for flexbox-like layouts.

use super::{Component, ComponentSize, DrawContext, MeasureContext};

/// Direction for the stack layout.
#[derive(Debug, Clone, Copy, Default)]
pub enum StackDirection {
    #[default]
    Vertical,
    Horizontal,
}

/// Alignment for items perpendicular to the stack direction.
#[derive(Debug, Clone, Copy, Default)]
pub enum StackAlign {
    #[default]
    Start,
    Center,
    End,
}

/// A flexbox-like container component.
pub struct Stack {
    /// Layout direction
    direction: StackDirection,
    /// Gap between children
    gap: f64,
    /// Cross-axis alignment
    align: StackAlign,
    /// Child components
    children: Vec<Box<dyn Component>>,
}

impl Stack {
    /// Creates a new vertical stack.
    pub fn vertical() -> Self {
        Self {
            direction: StackDirection::Vertical,
            gap: 0.0,
            align: StackAlign::Start,
            children: Vec::new(),
        }
    }

    /// Creates a new horizontal stack.
    pub fn horizontal() -> Self {
        Self {
            direction: StackDirection::Horizontal,
            ..Self::vertical()
        }
    }

    /// Sets the gap between children.
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the cross-axis alignment.
    pub fn align(mut self, align: StackAlign) -> Self {
        self.align = align;
        self
    }

    /// Centers items on the cross-axis.
    pub fn center(mut self) -> Self {
        self.align = StackAlign::Center;
        self
    }

    /// Adds a child component.
    pub fn child(mut self, child: impl Component + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    /// Adds multiple children.
    pub fn children(mut self, children: impl IntoIterator<Item = Box<dyn Component>>) -> Self {
        self.children.extend(children);
        self
    }

    /// Measures every child. Horizontal children each get the width left
    /// over by their predecessors, so a trailing fill child takes the rest.
    fn child_sizes(&self, max_width: f64) -> Vec<ComponentSize> {
        let mut used = 0.0;
        self.children
            .iter()
            .map(|child| {
                let available = match self.direction {
                    StackDirection::Vertical => max_width,
                    StackDirection::Horizontal => (max_width - used).max(0.0),
                };
                let size = child.measure(&MeasureContext {
                    max_width: available,
                });
                used += size.width + self.gap;
                size
            })
            .collect()
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::vertical()
    }
}

impl Component for Stack {
    fn measure(&self, ctx: &MeasureContext) -> ComponentSize {
        if self.children.is_empty() {
            return ComponentSize {
                width: 0.0,
                height: 0.0,
            };
        }

        let sizes = self.child_sizes(ctx.max_width);
        let gaps = self.gap * (sizes.len() - 1) as f64;

        match self.direction {
            StackDirection::Vertical => ComponentSize {
                width: sizes.iter().map(|s| s.width).fold(0.0f64, f64::max),
                height: sizes.iter().map(|s| s.height).sum::<f64>() + gaps,
            },
            StackDirection::Horizontal => ComponentSize {
                width: sizes.iter().map(|s| s.width).sum::<f64>() + gaps,
                height: sizes.iter().map(|s| s.height).fold(0.0f64, f64::max),
            },
        }
    }

    fn draw(&self, ctx: &mut DrawContext) {
        if self.children.is_empty() {
            return;
        }

        let child_sizes = self.child_sizes(ctx.width);

        // Calculate max cross-axis size for alignment
        let max_cross = match self.direction {
            StackDirection::Vertical => child_sizes.iter().map(|s| s.width).fold(0.0f64, f64::max),
            StackDirection::Horizontal => {
                child_sizes.iter().map(|s| s.height).fold(0.0f64, f64::max)
            }
        };

        let mut main_pos = match self.direction {
            StackDirection::Vertical => ctx.y,
            StackDirection::Horizontal => ctx.x,
        };

        for (child, child_size) in self.children.iter().zip(&child_sizes) {
            let cross_size = match self.direction {
                StackDirection::Vertical => child_size.width,
                StackDirection::Horizontal => child_size.height,
            };
            let cross_offset = match self.align {
                StackAlign::Start => 0.0,
                StackAlign::Center => (max_cross - cross_size) / 2.0,
                StackAlign::End => max_cross - cross_size,
            };

            let (x, y) = match self.direction {
                StackDirection::Vertical => (ctx.x + cross_offset, main_pos),
                StackDirection::Horizontal => (main_pos, ctx.y + cross_offset),
            };

            let mut child_ctx = DrawContext {
                image: &mut *ctx.image,
                x,
                y,
                width: child_size.width,
                height: child_size.height,
                color: ctx.color,
                time: ctx.time,
                direction: ctx.direction,
            };
            child.draw(&mut child_ctx);

            // Move to next position
            main_pos += match self.direction {
                StackDirection::Vertical => child_size.height + self.gap,
                StackDirection::Horizontal => child_size.width + self.gap,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Skeleton;
    use crate::effect::LayoutDirection;
    use image::RgbaImage;
    use std::time::Duration;

    #[test]
    fn test_empty_stack_is_zero_sized() {
        let size = Stack::vertical().measure(&MeasureContext { max_width: 100.0 });
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 0.0);
    }

    #[test]
    fn test_vertical_measure_sums_heights() {
        let stack = Stack::vertical()
            .gap(4.0)
            .child(Skeleton::new().width(30.0).height(10.0))
            .child(Skeleton::new().width(50.0).height(6.0));
        let size = stack.measure(&MeasureContext { max_width: 100.0 });
        assert_eq!(size.width, 50.0);
        assert_eq!(size.height, 20.0);
    }

    #[test]
    fn test_horizontal_fill_takes_remaining_width() {
        let stack = Stack::horizontal()
            .gap(10.0)
            .child(Skeleton::new().width(20.0).height(5.0))
            .child(Skeleton::new().fill().height(5.0));
        let size = stack.measure(&MeasureContext { max_width: 100.0 });
        assert_eq!(size.width, 100.0);
    }

    #[test]
    fn test_draw_places_children() {
        let mut image = RgbaImage::new(30, 10);
        let stack = Stack::horizontal()
            .gap(10.0)
            .child(Skeleton::new().width(10.0).height(10.0).corner_radius(0.0))
            .child(Skeleton::new().width(10.0).height(10.0).corner_radius(0.0));
        let mut ctx = DrawContext {
            image: &mut image,
            x: 0.0,
            y: 0.0,
            width: 30.0,
            height: 10.0,
            color: (1.0, 1.0, 1.0, 1.0),
            time: Duration::ZERO,
            direction: LayoutDirection::LeftToRight,
        };
        stack.draw(&mut ctx);

        assert_eq!(image.get_pixel(5, 5).0[3], 255);
        assert_eq!(image.get_pixel(15, 5).0[3], 0);
        assert_eq!(image.get_pixel(25, 5).0[3], 255);
    }

    #[test]
    fn test_center_alignment_offsets_smaller_children() {
        let mut image = RgbaImage::new(10, 20);
        let stack = Stack::horizontal()
            .center()
            .child(Skeleton::new().width(4.0).height(20.0).corner_radius(0.0))
            .child(Skeleton::new().width(4.0).height(4.0).corner_radius(0.0));
        let mut ctx = DrawContext {
            image: &mut image,
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 20.0,
            color: (1.0, 1.0, 1.0, 1.0),
            time: Duration::ZERO,
            direction: LayoutDirection::LeftToRight,
        };
        stack.draw(&mut ctx);

        assert_eq!(image.get_pixel(5, 0).0[3], 0);
        assert_eq!(image.get_pixel(5, 9).0[3], 255);
    }

    #[test]
    fn test_end_alignment_with_boxed_children() {
        let mut image = RgbaImage::new(10, 20);
        let children: Vec<Box<dyn Component>> = vec![
            Box::new(Skeleton::new().width(4.0).height(20.0).corner_radius(0.0)),
            Box::new(Skeleton::new().width(4.0).height(4.0).corner_radius(0.0)),
        ];
        let stack = Stack::horizontal().align(StackAlign::End).children(children);
        assert_eq!(
            stack.measure(&MeasureContext { max_width: 10.0 }),
            ComponentSize { width: 8.0, height: 20.0 }
        );

        let mut ctx = DrawContext {
            image: &mut image,
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 20.0,
            color: (1.0, 1.0, 1.0, 1.0),
            time: Duration::ZERO,
            direction: LayoutDirection::LeftToRight,
        };
        stack.draw(&mut ctx);

        // The short child hugs the bottom edge.
        assert_eq!(image.get_pixel(5, 2).0[3], 0);
        assert_eq!(image.get_pixel(5, 18).0[3], 255);
        assert_eq!(image.get_pixel(9, 18).0[3], 0);
    }
}
