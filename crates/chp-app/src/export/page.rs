//! Resolution-independent page model produced by the layout engine.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner.

/// Landscape US Letter
pub const PAGE_WIDTH: f32 = 792.0;
pub const PAGE_HEIGHT: f32 = 612.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::gray(0.0);
    pub const GRAY: Color = Color::gray(0.4);
    pub const LIGHT_GRAY: Color = Color::gray(0.6);
    pub const RED: Color = Color::rgb(0.7, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }
}

/// The two standard fonts used on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Stroked rectangle outline
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        line_width: f32,
        color: Color,
    },
    /// Text with its baseline starting at `(x, y)`
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: FontFace,
        color: Color,
        text: String,
    },
    /// Raster image scaled into the given box; `image` indexes `Page::images`
    Image {
        image: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Decoded raster, 8-bit RGB with an optional alpha plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// `mark` is the colour of the cross drawn in the "on" state
    CheckBox { checked: bool, mark: Color },
    Text { value: String, font_size: f32 },
}

/// Fillable field placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Fully qualified field name, unique within the document
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: FieldKind,
}

impl FormField {
    pub fn is_checked(&self) -> bool {
        matches!(self.kind, FieldKind::CheckBox { checked: true, .. })
    }

    pub fn text_value(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Text { value, .. } => Some(value),
            FieldKind::CheckBox { .. } => None,
        }
    }
}

/// One rendered page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
    pub fields: Vec<FormField>,
    pub images: Vec<RasterImage>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, line_width: f32) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            line_width,
        });
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), line_width: f32, color: Color) {
        self.ops.push(DrawOp::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            line_width,
            color,
        });
    }

    pub fn text(
        &mut self,
        x: f32,
        y: f32,
        size: f32,
        font: FontFace,
        color: Color,
        text: impl Into<String>,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text {
            x,
            y,
            size,
            font,
            color,
            text,
        });
    }

    /// Text horizontally centered on `center_x`
    pub fn centered_text(
        &mut self,
        center_x: f32,
        y: f32,
        size: f32,
        font: FontFace,
        color: Color,
        text: &str,
    ) {
        let width = super::metrics::text_width(text, font, size);
        self.text(center_x - width / 2.0, y, size, font, color, text);
    }

    /// Text ending at `right_x`
    pub fn right_aligned_text(
        &mut self,
        right_x: f32,
        y: f32,
        size: f32,
        font: FontFace,
        color: Color,
        text: &str,
    ) {
        let width = super::metrics::text_width(text, font, size);
        self.text(right_x - width, y, size, font, color, text);
    }

    /// Register an image and draw it into the given box
    pub fn image(&mut self, image: RasterImage, x: f32, y: f32, width: f32, height: f32) {
        self.images.push(image);
        self.ops.push(DrawOp::Image {
            image: self.images.len() - 1,
            x,
            y,
            width,
            height,
        });
    }

    pub fn field(&mut self, field: FormField) {
        self.fields.push(field);
    }

    /// All text runs on the page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    pub fn find_field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn image_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Image { .. }))
            .count()
    }
}
