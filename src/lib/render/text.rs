//! Module responsible for rendering caption text.
//!
//! Text isn't painted onto the picture directly. Instead, it's rasterized
//! into a coverage mask first, so that the outline can be derived from
//! the very same glyph shapes before any color is applied.

use std::collections::HashSet;
use std::fmt;

use image::{GrayImage, Luma, Pixel, Rgba, RgbaImage};
use itertools::Itertools;
use regex::Regex;
use rusttype::{point, Point, Rect, Scale};

use model::{CaptionStyle, Color, HAlign, VAlign};
use resources::Font;


/// Check if given font has all the glyphs for given text.
pub fn check(font: &Font, text: &str) {
    let missing: HashSet<_> = text.chars()
        .filter(|&ch| !ch.is_whitespace() && font.glyph(ch).id().0 == 0)
        .map(|ch| ch as u32)
        .collect();
    if !missing.is_empty() {
        warn!("Missing glyphs for {} codepoint(s): {}", missing.len(),
            missing.into_iter().sorted().map(|c| format!("{:#x}", c)).join(", "));
    }
}


/// Alignment of text within a rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub vertical: VAlign,
    pub horizontal: HAlign,
}

impl Alignment {
    #[inline]
    pub fn new(vertical: VAlign, horizontal: HAlign) -> Self {
        Alignment{vertical, horizontal}
    }
}

impl From<(VAlign, HAlign)> for Alignment {
    fn from((v, h): (VAlign, HAlign)) -> Self {
        Alignment::new(v, h)
    }
}

impl fmt::Debug for Alignment {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Alignment::{:?}{:?}", self.vertical, self.horizontal)
    }
}

impl Alignment {
    /// The origin point for this alignment within given rectangle.
    /// Returns one of six possible points at the edges of the rectangle.
    pub fn origin_within(&self, rect: Rect<f32>) -> Point<f32> {
        let x = match self.horizontal {
            HAlign::Left => rect.min.x,
            HAlign::Center => rect.min.x + rect.width() / 2.0,
            HAlign::Right => rect.max.x,
        };
        let y = match self.vertical {
            VAlign::Top => rect.min.y,
            VAlign::Bottom => rect.max.y,
        };
        point(x, y)
    }
}


/// Font & size that the text is laid out with.
pub struct Style<'f> {
    font: &'f Font,
    size: f32,
}

impl<'f> Style<'f> {
    #[inline]
    pub fn new(font: &'f Font, size: f32) -> Self {
        // Non-positive sizes would make rusttype produce no glyphs at all
        // (or worse, mirrored ones), so clamp them to something visible.
        let size = if size > 0.0 { size } else {
            warn!("Invalid text size {}, using 1.0 instead", size);
            1.0
        };
        Style{font, size}
    }

    #[inline]
    pub fn scale(&self) -> Scale {
        Scale::uniform(self.size)
    }

    /// Distance between baselines of consecutive lines.
    #[inline]
    pub fn line_height(&self) -> f32 {
        let v_metrics = self.font.v_metrics(self.scale());
        v_metrics.ascent - v_metrics.descent + v_metrics.line_gap
    }
}

impl<'f> fmt::Debug for Style<'f> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Style")
            .field("font", &self.font)
            .field("size", &self.size)
            .finish()
    }
}


/// Rasterize text into a coverage mask of given dimensions.
///
/// The text is broken into lines fitting the width of `rect`. With top alignment
/// the lines flow downwards from the top edge, with bottom alignment
/// they stack upwards from the bottom edge, so a caption never spills over
/// the edge of the screen it's anchored to.
pub fn render_mask<A: Into<Alignment>>(width: u32, height: u32,
                                       s: &str,
                                       align: A, rect: Rect<f32>,
                                       style: &Style) -> GrayImage {
    let align: Alignment = align.into();
    trace!("render_mask({}x{}, <length: {}>, {:?}, {:?}, {:?})",
        width, height, s.len(), align, rect, style);

    let mut mask = GrayImage::new(width, height);

    let mut lines = break_lines(s, style, rect.width());
    trace!("Text broken into {} line(s)", lines.len());
    if align.vertical == VAlign::Bottom {
        lines.reverse();
    }

    let line_height = style.line_height();
    let mut rect = rect;
    for line in lines {
        render_line(&mut mask, &line, align, rect, style);

        // Shrink the rectangle by the line that has just been rendered.
        match align.vertical {
            VAlign::Top => rect.min.y += line_height,
            VAlign::Bottom => rect.max.y -= line_height,
        }
    }
    mask
}

/// Rasterize a single line of text into the mask.
///
/// Text should be single-line (line breaks are ignored)
/// and short enough to fit (or it will be clipped).
fn render_line(mask: &mut GrayImage, s: &str, align: Alignment, rect: Rect<f32>,
               style: &Style) {
    let scale = style.scale();
    let v_metrics = style.font.v_metrics(scale);

    // Unless the text starts at the left edge, its width has to be known
    // before the starting position can be determined.
    let mut position = align.origin_within(rect);
    match align.horizontal {
        HAlign::Left => {}
        HAlign::Center => position.x -= text_width(s, style) / 2.0,
        HAlign::Right => position.x -= text_width(s, style),
    }
    match align.vertical {
        VAlign::Top => position.y += v_metrics.ascent,
        VAlign::Bottom => position.y -= v_metrics.descent.abs(),  // it's usually negative
    }

    let (width, height) = mask.dimensions();
    for glyph in style.font.layout(s, scale, position) {
        if let Some(bbox) = glyph.pixel_bounding_box() {
            glyph.draw(|x, y, v| {
                let x = bbox.min.x + x as i32;
                let y = bbox.min.y + y as i32;
                if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                    return;
                }
                let coverage = (v * 255.0).round().min(255.0) as u8;
                let pixel = mask.get_pixel_mut(x as u32, y as u32);
                // Glyphs may overlap slightly (kerning), so keep the stronger coverage.
                if coverage > pixel[0] {
                    *pixel = Luma([coverage]);
                }
            });
        }
    }
}


/// Paint the coverage mask onto the canvas using caption style's colors.
///
/// The outline is the mask dilated by style's outline width. For filled text
/// the outline goes underneath the fill, for hollow text it's the only thing painted.
pub fn paint(canvas: &mut RgbaImage, mask: &GrayImage, style: &CaptionStyle) {
    debug_assert_eq!(canvas.dimensions(), mask.dimensions());

    let radius = style.outline_px();
    let outline = if radius > 0 { Some(dilate(mask, radius)) } else { None };

    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let coverage = mask.get_pixel(x, y)[0];
        if let Some(ref outline) = outline {
            let mut stroke = outline.get_pixel(x, y)[0];
            if !style.is_filled() {
                stroke = stroke.saturating_sub(coverage);
            }
            blend(pixel, style.stroke_color, stroke);
        }
        if style.is_filled() {
            blend(pixel, style.color, coverage);
        }
    }
}

/// Blend the color with given opacity onto the pixel.
#[inline]
fn blend(pixel: &mut Rgba<u8>, color: Color, alpha: u8) {
    match alpha {
        0 => {}
        0xff => *pixel = color.to_rgba(alpha),
        _ => pixel.blend(&color.to_rgba(alpha)),
    }
}

/// Grow the mask by `radius` pixels in every direction (square max filter).
fn dilate(mask: &GrayImage, radius: u32) -> GrayImage {
    let (width, height) = mask.dimensions();
    let r = radius as i64;

    // The filter is separable, so do the horizontal pass first...
    let mut horizontal = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let lo = (x as i64 - r).max(0) as u32;
            let hi = (x as i64 + r).min(width as i64 - 1) as u32;
            let max = (lo..hi + 1).map(|sx| mask.get_pixel(sx, y)[0]).max().unwrap_or(0);
            horizontal.put_pixel(x, y, Luma([max]));
        }
    }
    // ...and then the vertical one over its result.
    let mut result = GrayImage::new(width, height);
    for y in 0..height {
        let lo = (y as i64 - r).max(0) as u32;
        let hi = (y as i64 + r).min(height as i64 - 1) as u32;
        for x in 0..width {
            let max = (lo..hi + 1).map(|sy| horizontal.get_pixel(x, sy)[0]).max().unwrap_or(0);
            result.put_pixel(x, y, Luma([max]));
        }
    }
    result
}


// Utility functions

/// Break the text into lines, fitting given width.
fn break_lines(s: &str, style: &Style, line_width: f32) -> Vec<String> {
    s.lines()
        .flat_map(|line| break_single_line(line, style, line_width))
        .collect()
}

/// Break a single line into multiple lines.
/// The line should not contain explicit line breaks.
fn break_single_line(s: &str, style: &Style, line_width: f32) -> Vec<String> {
    lazy_static! {
        static ref WORD_OR_GAP: Regex = Regex::new(r"\S+|\s+").unwrap();
    }

    let mut result = vec![];
    let mut current_line = String::new();
    let mut current_width = 0.0;
    for segment in WORD_OR_GAP.find_iter(s).map(|m| m.as_str()) {
        let segment_width = text_width(segment, style);

        // Simplest case is when the segment trivially fits within the line.
        if current_width + segment_width <= line_width {
            current_line.push_str(segment);
            current_width += segment_width;
            continue;
        }

        // Whitespace that overflows is adequately represented
        // by the line break itself.
        if segment.chars().all(char::is_whitespace) {
            if !current_line.is_empty() {
                result.push(current_line.trim_end().to_owned());
                current_line.clear();
                current_width = 0.0;
            }
            continue;
        }

        // A word that doesn't fit but isn't longer than a whole line
        // goes to the next line.
        if segment_width <= line_width {
            if !current_line.is_empty() {
                result.push(current_line.trim_end().to_owned());
            }
            current_line = segment.to_owned();
            current_width = segment_width;
            continue;
        }

        // Otherwise the word itself is longer than the line
        // and has to be broken up character by character.
        for ch in segment.chars() {
            let ch_width = char_width(ch, style);
            if current_width + ch_width > line_width && !current_line.is_empty() {
                result.push(current_line.trim_end().to_owned());
                current_line.clear();
                current_width = 0.0;
            }
            current_line.push(ch);
            current_width += ch_width;
        }
    }
    let current_line = current_line.trim_end();
    if !current_line.is_empty() {
        result.push(current_line.to_owned());
    }

    result
}

/// Compute the pixel width of given text.
fn text_width(s: &str, style: &Style) -> f32 {
    // This is the final X position of the "caret"
    // after laying out all the glyphs, starting from X=0.
    style.font
        .layout(s, style.scale(), point(0.0, /* unused */ 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Compute the pixel width of given character.
fn char_width(c: char, style: &Style) -> f32 {
    style.font.glyph(c).scaled(style.scale()).h_metrics().advance_width
}


#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma, Rgba, RgbaImage};
    use rusttype::{point, Rect};
    use spectral::prelude::*;

    use model::{CaptionStyle, Color, HAlign, VAlign};
    use resources::Font;
    use super::{Alignment, Style, break_lines, dilate, paint, render_mask, text_width};

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect<f32> {
        Rect{min: point(x0, y0), max: point(x1, y1)}
    }

    fn covered_rows(mask: &GrayImage) -> Vec<u32> {
        (0..mask.height())
            .filter(|&y| (0..mask.width()).any(|x| mask.get_pixel(x, y)[0] > 0))
            .collect()
    }

    #[test]
    fn origin_within() {
        let r = rect(10.0, 20.0, 110.0, 220.0);
        let origin = |v, h| Alignment::new(v, h).origin_within(r);
        assert_eq!(point(10.0, 20.0), origin(VAlign::Top, HAlign::Left));
        assert_eq!(point(60.0, 20.0), origin(VAlign::Top, HAlign::Center));
        assert_eq!(point(10.0, 220.0), origin(VAlign::Bottom, HAlign::Left));
        assert_eq!(point(110.0, 220.0), origin(VAlign::Bottom, HAlign::Right));
    }

    #[test]
    fn short_text_is_one_line() {
        let font = Font::builtin();
        let style = Style::new(&font, 40.0);
        assert_eq!(vec!["HELLO"], break_lines("HELLO", &style, 1000.0));
    }

    #[test]
    fn long_text_wraps_at_words() {
        let font = Font::builtin();
        let style = Style::new(&font, 40.0);
        let width = text_width("ONE TWO", &style) + 1.0;
        let lines = break_lines("ONE TWO THREE", &style, width);
        assert_that!(lines).has_length(2);
        assert_eq!("ONE TWO", lines[0]);
        assert_eq!("THREE", lines[1]);
    }

    #[test]
    fn overlong_word_is_split() {
        let font = Font::builtin();
        let style = Style::new(&font, 40.0);
        let width = text_width("WWW", &style) + 1.0;
        let lines = break_lines("WWWWWWW", &style, width);
        assert_eq!(vec!["WWW", "WWW", "W"], lines);
    }

    #[test]
    fn explicit_line_breaks() {
        let font = Font::builtin();
        let style = Style::new(&font, 40.0);
        assert_eq!(vec!["A", "B"], break_lines("A\nB", &style, 1000.0));
    }

    #[test]
    fn top_text_is_drawn_near_the_top() {
        let font = Font::builtin();
        let style = Style::new(&font, 40.0);
        let mask = render_mask(300, 300, "HELLO", (VAlign::Top, HAlign::Center),
                               rect(0.0, 0.0, 300.0, 300.0), &style);
        let rows = covered_rows(&mask);
        assert_that!(rows).is_not_empty();
        assert!(*rows.last().unwrap() < 60);
    }

    #[test]
    fn bottom_text_is_drawn_near_the_bottom() {
        let font = Font::builtin();
        let style = Style::new(&font, 40.0);
        let mask = render_mask(300, 300, "WORLD", (VAlign::Bottom, HAlign::Center),
                               rect(0.0, 0.0, 300.0, 300.0), &style);
        let rows = covered_rows(&mask);
        assert_that!(rows).is_not_empty();
        assert!(rows[0] > 240);
    }

    #[test]
    fn horizontal_alignment_moves_text() {
        let font = Font::builtin();
        let style = Style::new(&font, 40.0);
        let first_column = |halign| {
            let mask = render_mask(400, 100, "HI", (VAlign::Top, halign),
                                   rect(0.0, 0.0, 400.0, 100.0), &style);
            (0..mask.width())
                .find(|&x| (0..mask.height()).any(|y| mask.get_pixel(x, y)[0] > 0))
        };
        let left = first_column(HAlign::Left).unwrap();
        let center = first_column(HAlign::Center).unwrap();
        let right = first_column(HAlign::Right).unwrap();
        assert!(left < 20);
        assert!(left < center && center < right);
        assert!(right > 300);
    }

    #[test]
    fn empty_text_draws_nothing() {
        let font = Font::builtin();
        let style = Style::new(&font, 40.0);
        let mask = render_mask(100, 100, "", (VAlign::Top, HAlign::Center),
                               rect(0.0, 0.0, 100.0, 100.0), &style);
        assert_that!(covered_rows(&mask)).is_empty();
    }

    #[test]
    fn dilate_grows_by_radius() {
        let mut mask = GrayImage::new(9, 9);
        mask.put_pixel(4, 4, Luma([255]));
        let grown = dilate(&mask, 2);
        assert_eq!(255, grown.get_pixel(2, 2)[0]);
        assert_eq!(255, grown.get_pixel(6, 6)[0]);
        assert_eq!(0, grown.get_pixel(1, 4)[0]);
        assert_eq!(0, grown.get_pixel(4, 7)[0]);
    }

    #[test]
    fn paint_fill_over_outline() {
        let mut mask = GrayImage::new(5, 5);
        mask.put_pixel(2, 2, Luma([255]));
        let mut canvas = RgbaImage::from_pixel(5, 5, Rgba([0x80, 0x80, 0x80, 0xff]));
        paint(&mut canvas, &mask, &CaptionStyle::default());

        assert_eq!(Color::white().to_rgba(0xff), *canvas.get_pixel(2, 2));
        assert_eq!(Color::black().to_rgba(0xff), *canvas.get_pixel(1, 1));
        assert_eq!(Rgba([0x80, 0x80, 0x80, 0xff]), *canvas.get_pixel(0, 0));
    }

    #[test]
    fn paint_hollow() {
        let mut mask = GrayImage::new(5, 5);
        mask.put_pixel(2, 2, Luma([255]));
        let mut canvas = RgbaImage::from_pixel(5, 5, Rgba([0x80, 0x80, 0x80, 0xff]));
        let style = CaptionStyle{stroke_width: 2.5, ..CaptionStyle::default()};
        paint(&mut canvas, &mask, &style);

        // Interior is left alone, only the outline is painted.
        assert_eq!(Rgba([0x80, 0x80, 0x80, 0xff]), *canvas.get_pixel(2, 2));
        assert_eq!(Color::black().to_rgba(0xff), *canvas.get_pixel(1, 2));
    }
}
