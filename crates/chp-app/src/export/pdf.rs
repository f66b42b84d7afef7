//! PDF serialization of laid-out pages
//!
//! Text uses the standard Helvetica faces with WinAnsiEncoding, so no font
//! program is embedded. Content streams and images are Flate-compressed.

use std::collections::HashMap;

use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::types::{AnnotationFlags, CheckBoxState, FieldType};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use super::metrics::encode_win_ansi;
use super::page::{
    Color, DrawOp, FieldKind, FontFace, FormField, Page, RasterImage, PAGE_HEIGHT, PAGE_WIDTH,
};

const COMPRESSION_LEVEL: u8 = 6;
const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");
const FIELD_FONT: Name<'static> = Name(b"Helv");
const CHECKED: Name<'static> = Name(b"Yes");
const UNCHECKED: Name<'static> = Name(b"Off");

/// Document-level metadata
#[derive(Debug, Clone, Default)]
pub struct PdfMetadata {
    pub title: String,
    /// Written as both halves of the trailer `/ID`
    pub file_id: Vec<u8>,
}

/// Appearance streams are shared between checkboxes of equal size and mark
type AppearanceKey = (u32, u32, [u32; 3]);

fn appearance_key(field: &FormField, mark: Color) -> AppearanceKey {
    (
        field.width.to_bits(),
        field.height.to_bits(),
        [mark.r.to_bits(), mark.g.to_bits(), mark.b.to_bits()],
    )
}

/// Non-terminal field standing for one segment of a dotted field name
struct FieldNode {
    id: Ref,
    partial_name: String,
    parent: Option<Ref>,
    kids: Vec<Ref>,
}

/// Field hierarchy built from fully qualified names.
///
/// `item1.JAN.ok` becomes the fields `item1` and `JAN` with the widget `ok`
/// as the terminal kid, so no partial name carries a period.
#[derive(Default)]
struct FieldTree {
    nodes: Vec<FieldNode>,
    by_path: HashMap<String, usize>,
    roots: Vec<Ref>,
}

impl FieldTree {
    /// Register a terminal widget, creating any missing ancestors. Returns
    /// the widget's parent and its partial name.
    fn insert<'a>(
        &mut self,
        alloc: &mut Ref,
        name: &'a str,
        widget: Ref,
    ) -> (Option<Ref>, &'a str) {
        let Some((prefix, leaf)) = name.rsplit_once('.') else {
            self.roots.push(widget);
            return (None, name);
        };

        let mut parent: Option<usize> = None;
        let mut end = 0;
        for segment in prefix.split('.') {
            end += segment.len();
            let path = &prefix[..end];
            end += 1;
            let index = match self.by_path.get(path) {
                Some(&index) => index,
                None => self.add_node(alloc, path, segment, parent),
            };
            parent = Some(index);
        }

        let Some(parent) = parent else {
            self.roots.push(widget);
            return (None, leaf);
        };
        self.nodes[parent].kids.push(widget);
        (Some(self.nodes[parent].id), leaf)
    }

    fn add_node(
        &mut self,
        alloc: &mut Ref,
        path: &str,
        segment: &str,
        parent: Option<usize>,
    ) -> usize {
        let id = alloc.bump();
        let parent_id = match parent {
            Some(index) => {
                self.nodes[index].kids.push(id);
                Some(self.nodes[index].id)
            }
            None => {
                self.roots.push(id);
                None
            }
        };
        self.nodes.push(FieldNode {
            id,
            partial_name: segment.to_string(),
            parent: parent_id,
            kids: Vec::new(),
        });
        let index = self.nodes.len() - 1;
        self.by_path.insert(path.to_string(), index);
        index
    }

    fn write(&self, pdf: &mut Pdf) {
        for node in &self.nodes {
            let mut field = pdf.form_field(node.id);
            field.partial_name(TextStr(&node.partial_name));
            if let Some(parent) = node.parent {
                field.parent(parent);
            }
            field.children(node.kids.iter().copied());
        }
    }
}

fn font_name(font: FontFace) -> Name<'static> {
    match font {
        FontFace::Regular => FONT_REGULAR,
        FontFace::Bold => FONT_BOLD,
    }
}

/// Serialize pages into a complete PDF file
pub fn write_pdf(pages: &[Page], metadata: &PdfMetadata) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut alloc = Ref::new(1);

    let catalog_id = alloc.bump();
    let pages_id = alloc.bump();
    let info_id = alloc.bump();
    let regular_id = alloc.bump();
    let bold_id = alloc.bump();

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let mut checkbox_appearances: HashMap<AppearanceKey, (Ref, Ref)> = HashMap::new();
    let mut page_ids = Vec::with_capacity(pages.len());
    let mut field_tree = FieldTree::default();

    for page in pages {
        let page_id = alloc.bump();
        let content_id = alloc.bump();
        page_ids.push(page_id);

        let image_names: Vec<(String, Ref)> = page
            .images
            .iter()
            .enumerate()
            .map(|(i, image)| (format!("Im{}", i + 1), write_image(&mut pdf, &mut alloc, image)))
            .collect();

        let content = render_content(&page.ops, &image_names);
        let compressed = compress_to_vec_zlib(&content, COMPRESSION_LEVEL);
        pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

        let mut annotation_ids = Vec::with_capacity(page.fields.len());
        for field in &page.fields {
            let field_id = alloc.bump();
            let (parent, partial_name) = field_tree.insert(&mut alloc, &field.name, field_id);
            let widget = Widget {
                id: field_id,
                page: page_id,
                parent,
                partial_name,
                field,
            };
            match &field.kind {
                FieldKind::CheckBox { checked, mark } => {
                    let (on_id, off_id) = *checkbox_appearances
                        .entry(appearance_key(field, *mark))
                        .or_insert_with(|| {
                            write_checkbox_appearances(&mut pdf, &mut alloc, field, *mark)
                        });
                    write_checkbox(&mut pdf, &widget, *checked, on_id, off_id);
                }
                FieldKind::Text { value, font_size } => {
                    write_text_field(&mut pdf, &widget, value, *font_size);
                }
            }
            annotation_ids.push(field_id);
        }

        let mut page_writer = pdf.page(page_id);
        page_writer
            .media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(pages_id)
            .contents(content_id);
        if !annotation_ids.is_empty() {
            page_writer.annotations(annotation_ids.iter().copied());
        }
        {
            let mut resources = page_writer.resources();
            resources
                .fonts()
                .pair(FONT_REGULAR, regular_id)
                .pair(FONT_BOLD, bold_id);
            if !image_names.is_empty() {
                let mut x_objects = resources.x_objects();
                for (name, id) in &image_names {
                    x_objects.pair(Name(name.as_bytes()), *id);
                }
            }
        }
        page_writer.finish();
    }

    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    {
        let mut catalog = pdf.catalog(catalog_id);
        catalog.pages(pages_id);
        if !field_tree.roots.is_empty() {
            let mut form = catalog.form();
            form.fields(field_tree.roots.iter().copied());
            form.pair(Name(b"NeedAppearances"), true);
            form.default_appearance(Str(b"/Helv 7 Tf 0 g"));
            form.default_resources().fonts().pair(FIELD_FONT, regular_id);
        }
    }

    field_tree.write(&mut pdf);

    pdf.document_info(info_id)
        .title(TextStr(&metadata.title))
        .producer(TextStr(concat!("chp-inspector ", env!("CARGO_PKG_VERSION"))));
    if !metadata.file_id.is_empty() {
        pdf.set_file_id((metadata.file_id.clone(), metadata.file_id.clone()));
    }

    pdf.finish()
}

fn render_content(ops: &[DrawOp], image_names: &[(String, Ref)]) -> Vec<u8> {
    let mut content = Content::new();
    for op in ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                line_width,
            } => {
                content.set_stroke_gray(0.0);
                content.set_line_width(*line_width);
                content.rect(*x, *y, *width, *height);
                content.stroke();
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                line_width,
                color,
            } => {
                content.set_stroke_rgb(color.r, color.g, color.b);
                content.set_line_width(*line_width);
                content.move_to(*x1, *y1);
                content.line_to(*x2, *y2);
                content.stroke();
            }
            DrawOp::Text {
                x,
                y,
                size,
                font,
                color,
                text,
            } => {
                let encoded = encode_win_ansi(text);
                content.set_fill_rgb(color.r, color.g, color.b);
                content.begin_text();
                content.set_font(font_name(*font), *size);
                content.next_line(*x, *y);
                content.show(Str(&encoded));
                content.end_text();
            }
            DrawOp::Image {
                image,
                x,
                y,
                width,
                height,
            } => {
                let Some((name, _)) = image_names.get(*image) else {
                    continue;
                };
                content.save_state();
                content.transform([*width, 0.0, 0.0, *height, *x, *y]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
        }
    }
    content.finish()
}

fn write_image(pdf: &mut Pdf, alloc: &mut Ref, image: &RasterImage) -> Ref {
    let image_id = alloc.bump();
    let mask_id = image.alpha.as_ref().map(|alpha| {
        let mask_id = alloc.bump();
        let compressed = compress_to_vec_zlib(alpha, COMPRESSION_LEVEL);
        let mut mask = pdf.image_xobject(mask_id, &compressed);
        mask.filter(Filter::FlateDecode);
        mask.width(image.width as i32);
        mask.height(image.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask_id
    });

    let compressed = compress_to_vec_zlib(&image.rgb, COMPRESSION_LEVEL);
    let mut xobject = pdf.image_xobject(image_id, &compressed);
    xobject.filter(Filter::FlateDecode);
    xobject.width(image.width as i32);
    xobject.height(image.height as i32);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    if let Some(mask_id) = mask_id {
        xobject.s_mask(mask_id);
    }
    image_id
}

/// "On" (a cross) and "Off" (empty) appearance streams for a checkbox size
fn write_checkbox_appearances(
    pdf: &mut Pdf,
    alloc: &mut Ref,
    field: &FormField,
    mark: Color,
) -> (Ref, Ref) {
    let on_id = alloc.bump();
    let off_id = alloc.bump();
    let bbox = Rect::new(0.0, 0.0, field.width, field.height);
    let inset = 1.5;

    let mut on = Content::new();
    on.set_stroke_rgb(mark.r, mark.g, mark.b);
    on.set_line_width(0.8);
    on.move_to(inset, inset);
    on.line_to(field.width - inset, field.height - inset);
    on.move_to(inset, field.height - inset);
    on.line_to(field.width - inset, inset);
    on.stroke();
    let on = on.finish();
    pdf.form_xobject(on_id, &on).bbox(bbox);

    let off = Content::new().finish();
    pdf.form_xobject(off_id, &off).bbox(bbox);

    (on_id, off_id)
}

fn field_rect(field: &FormField) -> Rect {
    Rect::new(field.x, field.y, field.x + field.width, field.y + field.height)
}

/// Terminal field merged with its widget annotation
struct Widget<'a> {
    id: Ref,
    page: Ref,
    parent: Option<Ref>,
    partial_name: &'a str,
    field: &'a FormField,
}

fn write_checkbox(pdf: &mut Pdf, widget: &Widget, checked: bool, on_id: Ref, off_id: Ref) {
    let (value, state) = if checked {
        (CheckBoxState::Yes, CHECKED)
    } else {
        (CheckBoxState::Off, UNCHECKED)
    };
    let mut writer = pdf.form_field(widget.id);
    writer.partial_name(TextStr(widget.partial_name));
    if let Some(parent) = widget.parent {
        writer.parent(parent);
    }
    writer.field_type(FieldType::Button);
    writer.checkbox_value(value);
    let mut annotation = writer.into_annotation();
    annotation.rect(field_rect(widget.field));
    annotation.page(widget.page);
    annotation.flags(AnnotationFlags::PRINT);
    annotation.appearance_state(state);
    annotation
        .appearance()
        .normal()
        .streams()
        .pair(CHECKED, on_id)
        .pair(UNCHECKED, off_id);
}

fn write_text_field(pdf: &mut Pdf, widget: &Widget, value: &str, font_size: f32) {
    let appearance = format!("/Helv {} Tf 0 g", font_size);
    let mut writer = pdf.form_field(widget.id);
    writer.partial_name(TextStr(widget.partial_name));
    if let Some(parent) = widget.parent {
        writer.parent(parent);
    }
    writer.field_type(FieldType::Text);
    if !value.is_empty() {
        writer.text_value(TextStr(value));
    }
    writer.vartext_default_appearance(Str(appearance.as_bytes()));
    let mut annotation = writer.into_annotation();
    annotation.rect(field_rect(widget.field));
    annotation.page(widget.page);
    annotation.flags(AnnotationFlags::PRINT);
}
