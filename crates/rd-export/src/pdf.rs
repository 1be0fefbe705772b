//! PDF backend on `printpdf`.
//!
//! Plans use a top-left origin; PDF user space starts bottom-left, so every
//! y coordinate is flipped against the page height here.

use crate::backend::ExportBackend;
use crate::error::ExportError;
use crate::plan::{DrawOp, ExportPlan, FOOTER_FONT_PT, FOOTER_OFFSET_MM, PT_TO_MM};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
};
use std::io::{BufWriter, Cursor};

/// Approximate Helvetica advance width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f64 = 0.5;

fn pdf_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Backend {
        backend: "pdf",
        message: e.to_string(),
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfBackend;

impl PdfBackend {
    fn draw(layer: &PdfLayerReference, fonts: &Fonts, op: &DrawOp, plan: &ExportPlan) {
        let flip = |y: f64| Mm((plan.height_mm - y) as f32);
        match op {
            DrawOp::Text {
                x,
                y,
                size_pt,
                bold,
                text,
            } => {
                let font = if *bold { &fonts.bold } else { &fonts.regular };
                layer.use_text(text.as_str(), *size_pt as f32, Mm(*x as f32), flip(*y), font);
            }
            DrawOp::Line { x1, y1, x2, y2 } => {
                layer.set_outline_thickness(0.75);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x1 as f32), flip(*y1)), false),
                        (Point::new(Mm(*x2 as f32), flip(*y2)), false),
                    ],
                    is_closed: false,
                });
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                stroke_pt,
            } => {
                layer.set_outline_thickness(*stroke_pt as f32);
                let (x0, x1) = (Mm(*x as f32), Mm((x + width) as f32));
                let (top, bottom) = (flip(*y), flip(y + height));
                layer.add_line(Line {
                    points: vec![
                        (Point::new(x0, top), false),
                        (Point::new(x1, top), false),
                        (Point::new(x1, bottom), false),
                        (Point::new(x0, bottom), false),
                    ],
                    is_closed: true,
                });
            }
            DrawOp::Footer { text } => {
                let text_width = text.chars().count() as f64 * FOOTER_FONT_PT * AVG_GLYPH_WIDTH * PT_TO_MM;
                let x = (plan.width_mm - text_width) / 2.0;
                layer.use_text(
                    text.as_str(),
                    FOOTER_FONT_PT as f32,
                    Mm(x as f32),
                    Mm(FOOTER_OFFSET_MM as f32),
                    &fonts.regular,
                );
            }
        }
    }
}

impl ExportBackend for PdfBackend {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, plan: &ExportPlan) -> Result<Vec<u8>, ExportError> {
        let (width, height) = (Mm(plan.width_mm as f32), Mm(plan.height_mm as f32));
        let (doc, first_page, first_layer) = PdfDocument::new(&plan.title, width, height, "Layer 1");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_error)?,
        };

        for (i, page) in plan.pages.iter().enumerate() {
            let layer = if i == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (p, l) = doc.add_page(width, height, "Layer 1");
                doc.get_page(p).get_layer(l)
            };
            for op in &page.ops {
                Self::draw(&layer, &fonts, op, plan);
            }
        }

        let mut buf = Vec::new();
        {
            let mut writer = BufWriter::new(Cursor::new(&mut buf));
            doc.save(&mut writer).map_err(pdf_error)?;
        }
        Ok(buf)
    }
}
