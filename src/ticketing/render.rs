use std::io::Cursor;
use std::sync::OnceLock;

use ab_glyph::{FontRef, PxScale};
use image::{imageops, GrayImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::models::ticket::TicketRecord;
use crate::pricing::PriceTable;
use crate::ticketing::identity::format_long_date;
use crate::ticketing::TicketError;

/// Canvas geometry of the ticket artwork. The two original deployments only
/// differed in size and QR resolution, so those are the knobs.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Upper bound on the generated QR resolution before compositing.
    pub qr_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 450,
            qr_size: 256,
        }
    }
}

/// A composited ticket ready for preview and download.
#[derive(Debug, Clone)]
pub struct RenderedTicket {
    pub file_name: String,
    pub image: RgbaImage,
}

impl RenderedTicket {
    /// PNG bytes for the download link.
    pub fn png_bytes(&self) -> Result<Vec<u8>, TicketError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| TicketError::Render(e.to_string()))?;
        Ok(bytes)
    }
}

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([0x1F, 0x29, 0x37, 255]);
const QR_FRAME_COLOR: Rgba<u8> = Rgba([0xE5, 0xE7, 0xEB, 255]);

const BORDER_INSET: i32 = 10;
const BORDER_WIDTH: i32 = 8;

const HEADER_TEXT: &str = "WildLife Zoo";
const HEADER_SIZE: f32 = 48.0;
const BANNER_SIZE: f32 = 24.0;
const FIELD_SIZE: f32 = 20.0;
const FIELD_START_Y: i32 = 200;
const LINE_HEIGHT: i32 = 35;

const QR_FRAME: u32 = 220;
const QR_TARGET: u32 = 180;

fn sans() -> &'static FontRef<'static> {
    static FONT: OnceLock<FontRef<'static>> = OnceLock::new();
    FONT.get_or_init(|| {
        FontRef::try_from_slice(include_bytes!("../../assets/fonts/DejaVuSans.ttf"))
            .expect("bundled font is valid")
    })
}

fn sans_bold() -> &'static FontRef<'static> {
    static FONT: OnceLock<FontRef<'static>> = OnceLock::new();
    FONT.get_or_init(|| {
        FontRef::try_from_slice(include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf"))
            .expect("bundled font is valid")
    })
}

/// Composites the full ticket artwork: white background, category-colored
/// border and gradient accent, header and banner, the textual fields, and
/// the QR image in its reserved region on the right.
pub fn compose(
    record: &TicketRecord,
    prices: &PriceTable,
    qr: &GrayImage,
    options: &RenderOptions,
) -> RgbaImage {
    let accent = parse_hex_color(prices.color_of(record.category));
    let width = options.width;
    let height = options.height;

    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);

    draw_gradient_accent(&mut img, accent);
    draw_border(&mut img, accent);

    // Header and category banner
    draw_text_mut(
        &mut img,
        accent,
        40,
        text_top(70, HEADER_SIZE),
        PxScale::from(HEADER_SIZE),
        sans_bold(),
        HEADER_TEXT,
    );
    draw_filled_rect_mut(&mut img, Rect::at(40, 90).of_size(300, 40), accent);
    let banner = format!("{} TICKET", record.category.as_str().to_uppercase());
    draw_text_mut(
        &mut img,
        BACKGROUND,
        50,
        text_top(120, BANNER_SIZE),
        PxScale::from(BANNER_SIZE),
        sans_bold(),
        &banner,
    );

    draw_text_mut(
        &mut img,
        TEXT_COLOR,
        40,
        text_top(160, BANNER_SIZE),
        PxScale::from(BANNER_SIZE),
        sans_bold(),
        &format!("Ticket ID: {}", record.id),
    );

    let fields = [
        format!("Name: {}", record.name),
        format!("Age: {}", record.age),
        format!("Gender: {}", record.gender),
        format!("Price: CHF{}", record.price),
        format!("Visit Date: {}", format_long_date(record.visit_date)),
        format!("Valid Until: {}", format_long_date(record.valid_until)),
    ];
    for (row, field) in fields.iter().enumerate() {
        let baseline = FIELD_START_Y + LINE_HEIGHT * row as i32;
        draw_text_mut(
            &mut img,
            TEXT_COLOR,
            40,
            text_top(baseline, FIELD_SIZE),
            PxScale::from(FIELD_SIZE),
            sans(),
            field,
        );
    }

    draw_qr_region(&mut img, qr, width);

    img
}

/// Translucent horizontal gradient in the accent color over the bordered
/// area: strongest at the edges, lightest in the middle.
fn draw_gradient_accent(img: &mut RgbaImage, accent: Rgba<u8>) {
    let width = img.width() as i32;
    let height = img.height() as i32;
    let x0 = BORDER_INSET;
    let x1 = width - BORDER_INSET;
    let span = (x1 - x0 - 1).max(1) as f32;

    for x in x0..x1 {
        let t = (x - x0) as f32 / span;
        let alpha = (0x11 as f32 + 0x11 as f32 * (2.0 * t - 1.0).abs()) / 255.0;
        for y in BORDER_INSET..(height - BORDER_INSET) {
            let pixel = img.get_pixel_mut(x as u32, y as u32);
            for channel in 0..3 {
                let base = pixel[channel] as f32;
                pixel[channel] = (accent[channel] as f32 * alpha + base * (1.0 - alpha)) as u8;
            }
        }
    }
}

fn draw_border(img: &mut RgbaImage, accent: Rgba<u8>) {
    let width = img.width() as i32;
    let height = img.height() as i32;
    let outer_w = (width - 2 * BORDER_INSET) as u32;
    let outer_h = (height - 2 * BORDER_INSET) as u32;
    let bw = BORDER_WIDTH as u32;

    let bars = [
        Rect::at(BORDER_INSET, BORDER_INSET).of_size(outer_w, bw),
        Rect::at(BORDER_INSET, height - BORDER_INSET - BORDER_WIDTH).of_size(outer_w, bw),
        Rect::at(BORDER_INSET, BORDER_INSET).of_size(bw, outer_h),
        Rect::at(width - BORDER_INSET - BORDER_WIDTH, BORDER_INSET).of_size(bw, outer_h),
    ];
    for bar in bars {
        draw_filled_rect_mut(img, bar, accent);
    }
}

fn draw_qr_region(img: &mut RgbaImage, qr: &GrayImage, width: u32) {
    let frame_x = width as i32 - 260;
    draw_hollow_rect_mut(
        img,
        Rect::at(frame_x, 40).of_size(QR_FRAME, QR_FRAME),
        QR_FRAME_COLOR,
    );

    let resized = imageops::resize(qr, QR_TARGET, QR_TARGET, imageops::FilterType::Nearest);
    let mut qr_rgba = RgbaImage::new(QR_TARGET, QR_TARGET);
    for (x, y, pixel) in resized.enumerate_pixels() {
        qr_rgba.put_pixel(x, y, Rgba([pixel[0], pixel[0], pixel[0], 255]));
    }
    imageops::overlay(img, &qr_rgba, (width - 240) as i64, 60);
}

/// The layout constants are canvas text baselines; the drawing API takes
/// the top of the glyph box.
fn text_top(baseline: i32, size: f32) -> i32 {
    baseline - size as i32
}

fn parse_hex_color(hex: &str) -> Rgba<u8> {
    let hex = hex.trim_start_matches('#');
    let channel =
        |i: usize| u8::from_str_radix(hex.get(i..i + 2).unwrap_or("00"), 16).unwrap_or(0);
    Rgba([channel(0), channel(2), channel(4), 255])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::{Gender, TicketCategory};
    use crate::ticketing::qr;
    use chrono::Utc;

    fn sample_record(category: TicketCategory) -> TicketRecord {
        TicketRecord::issue(
            "Mara Keller".to_string(),
            34,
            Gender::Female,
            category,
            Utc::now().date_naive(),
            &PriceTable::default(),
        )
    }

    fn render(category: TicketCategory, options: &RenderOptions) -> RgbaImage {
        let record = sample_record(category);
        let prices = PriceTable::default();
        let qr = qr::encode(&record, options.qr_size).unwrap();
        compose(&record, &prices, &qr, options)
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#10B981"), Rgba([0x10, 0xB9, 0x81, 255]));
        assert_eq!(parse_hex_color("EC4899"), Rgba([0xEC, 0x48, 0x99, 255]));
        assert_eq!(parse_hex_color("junk"), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_artwork_has_configured_dimensions() {
        let img = render(TicketCategory::Adult, &RenderOptions::default());
        assert_eq!((img.width(), img.height()), (1000, 450));

        let small = RenderOptions {
            width: 800,
            height: 400,
            qr_size: 200,
        };
        let img = render(TicketCategory::Adult, &small);
        assert_eq!((img.width(), img.height()), (800, 400));
    }

    #[test]
    fn test_border_uses_category_color() {
        let img = render(TicketCategory::Adult, &RenderOptions::default());
        assert_eq!(*img.get_pixel(12, 12), Rgba([0x10, 0xB9, 0x81, 255]));

        let img = render(TicketCategory::Family, &RenderOptions::default());
        assert_eq!(*img.get_pixel(12, 12), Rgba([0xEC, 0x48, 0x99, 255]));
    }

    #[test]
    fn test_banner_is_filled_with_category_color() {
        let img = render(TicketCategory::Senior, &RenderOptions::default());
        assert_eq!(*img.get_pixel(338, 92), Rgba([0x3B, 0x82, 0xF6, 255]));
    }

    #[test]
    fn test_qr_region_is_composited() {
        let img = render(TicketCategory::Child, &RenderOptions::default());
        let mut dark = 0;
        for x in (1000 - 240)..(1000 - 60) {
            for y in 60..240 {
                if img.get_pixel(x, y)[0] < 128 {
                    dark += 1;
                }
            }
        }
        assert!(dark > 100, "expected QR modules in the reserved region");
    }

    #[test]
    fn test_png_bytes_have_png_signature() {
        let record = sample_record(TicketCategory::Adult);
        let prices = PriceTable::default();
        let options = RenderOptions::default();
        let qr = qr::encode(&record, options.qr_size).unwrap();
        let rendered = RenderedTicket {
            file_name: record.file_name(),
            image: compose(&record, &prices, &qr, &options),
        };
        let bytes = rendered.png_bytes().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
