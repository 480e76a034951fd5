//! Tests for the meme composer.

use std::sync::Arc;

use image::{DynamicImage, Rgba, RgbaImage};
use spectral::prelude::*;

use model::{CaptionField, ContentFit, DeviceOrientation, MAX_CAPTION_LENGTH, Size};
use platform::{Completion, ImageSource, PickOutcome, ShareItem, ShareOutcome, ShareSink,
               SourceKind};
use render::Chrome;
use resources::Font;
use super::{BuildError, ComposeError, Composer, Config, Phase};


const PORTRAIT_SCREEN: (u32, u32) = (375, 667);
const LANDSCAPE_SCREEN: (u32, u32) = (667, 375);


/// How the fake picker replies to being presented.
#[derive(Clone)]
enum PickReply {
    Pick(Arc<DynamicImage>),
    Cancel,
    Hold,
    Drop,
}

struct FakeSource {
    camera: bool,
    reply: PickReply,
    presented: Vec<SourceKind>,
    held: Option<Completion<PickOutcome>>,
    dismissed: usize,
}

impl FakeSource {
    fn new(reply: PickReply) -> Self {
        FakeSource{camera: false, reply, presented: vec![], held: None, dismissed: 0}
    }

    fn with_camera(mut self) -> Self {
        self.camera = true; self
    }
}

impl ImageSource for FakeSource {
    fn is_camera_available(&self) -> bool {
        self.camera
    }

    fn present(&mut self, kind: SourceKind, done: Completion<PickOutcome>) {
        self.presented.push(kind);
        match self.reply.clone() {
            PickReply::Pick(image) => done.complete(PickOutcome::Picked(image)),
            PickReply::Cancel => done.complete(PickOutcome::Canceled),
            PickReply::Hold => self.held = Some(done),
            PickReply::Drop => drop(done),
        }
    }

    fn dismiss(&mut self) {
        self.dismissed += 1;
    }
}

/// How the fake share surface replies.
#[derive(Clone)]
enum ShareReply {
    Reply(ShareOutcome),
    Hold,
}

struct FakeSink {
    reply: ShareReply,
    items: Vec<ShareItem>,
    held: Option<Completion<ShareOutcome>>,
}

impl FakeSink {
    fn new(reply: ShareReply) -> Self {
        FakeSink{reply, items: vec![], held: None}
    }
}

impl ShareSink for FakeSink {
    fn present(&mut self, item: ShareItem, done: Completion<ShareOutcome>) {
        self.items.push(item);
        match self.reply.clone() {
            ShareReply::Reply(outcome) => done.complete(outcome),
            ShareReply::Hold => self.held = Some(done),
        }
    }
}


fn picture(width: u32, height: u32) -> Arc<DynamicImage> {
    let img = RgbaImage::from_pixel(width, height, Rgba([0x20, 0x40, 0x80, 0xff]));
    Arc::new(DynamicImage::ImageRgba8(img))
}

fn composer(source: FakeSource, sink: FakeSink) -> Composer<FakeSource, FakeSink> {
    let mut composer = Composer::builder()
        .image_source(source)
        .share_sink(sink)
        .build()
        .unwrap();
    composer.initialize(PORTRAIT_SCREEN.into());
    composer
}

/// Composer on a portrait screen which will pick given picture.
fn picking(width: u32, height: u32) -> Composer<FakeSource, FakeSink> {
    composer(FakeSource::new(PickReply::Pick(picture(width, height))),
             FakeSink::new(ShareReply::Reply(ShareOutcome::Completed)))
}

/// Composer on a portrait screen which already has a picture.
fn ready(width: u32, height: u32) -> Composer<FakeSource, FakeSink> {
    let mut composer = picking(width, height);
    assert!(composer.request_image(SourceKind::Library));
    assert_eq!(Phase::Ready, composer.phase());
    composer
}

fn ready_sharing(reply: ShareReply) -> Composer<FakeSource, FakeSink> {
    let mut composer = composer(FakeSource::new(PickReply::Pick(picture(200, 400))),
                                FakeSink::new(reply));
    assert!(composer.request_image(SourceKind::Library));
    composer
}


// Initialization

#[test]
fn initialize_disables_controls() {
    let composer = picking(10, 10);
    let controls = composer.controls();
    assert!(!controls.are_enabled());
    assert!(!controls.share);
    assert!(controls.album);
    assert!(!controls.camera);
    assert_eq!(Phase::Empty, composer.phase());
    assert_eq!("TOP", composer.text(CaptionField::Top));
    assert_eq!("BOTTOM", composer.text(CaptionField::Bottom));
}

#[test]
fn initialize_with_camera() {
    let composer = composer(FakeSource::new(PickReply::Cancel).with_camera(),
                            FakeSink::new(ShareReply::Hold));
    assert!(composer.controls().camera);
}

#[test]
fn initialize_orientation_from_bounds() {
    let mut composer = picking(10, 10);
    assert!(composer.is_portrait_device());
    composer.initialize(LANDSCAPE_SCREEN.into());
    assert!(!composer.is_portrait_device());
    composer.initialize(Size::new(300, 300));
    assert!(!composer.is_portrait_device());
}

#[test]
fn initialize_applies_caption_style() {
    let composer = picking(10, 10);
    let style = composer.screen().style();
    assert_eq!(40.0, style.size);
    assert_eq!(-3.0, style.stroke_width);
    assert!(style.is_filled());
}


// Picking

#[test]
fn picking_enables_controls() {
    let composer = ready(400, 200);
    let controls = composer.controls();
    assert!(controls.are_enabled());
    assert!(controls.share);
    assert!(composer.is_landscape_image());
    assert_eq!(vec![SourceKind::Library], composer.source().presented);
    assert_eq!(1, composer.source().dismissed);
    assert!(!composer.is_pending());
}

#[test]
fn pick_cancel_leaves_state_unchanged() {
    let mut composer = composer(FakeSource::new(PickReply::Cancel),
                                FakeSink::new(ShareReply::Hold));
    let before = composer.state();
    assert!(composer.request_image(SourceKind::Library));
    assert_eq!(before, composer.state());
    assert_eq!(1, composer.source().dismissed);
    assert_eq!(Phase::Empty, composer.phase());
}

#[test]
fn dropped_picker_counts_as_cancel() {
    let mut composer = composer(FakeSource::new(PickReply::Drop),
                                FakeSink::new(ShareReply::Hold));
    let before = composer.state();
    assert!(composer.request_image(SourceKind::Library));
    assert_eq!(before, composer.state());
    assert!(!composer.is_pending());
    assert_eq!(1, composer.source().dismissed);
}

#[test]
fn overlapping_picker_requests_are_ignored() {
    let mut composer = composer(FakeSource::new(PickReply::Hold),
                                FakeSink::new(ShareReply::Hold));
    assert!(composer.request_image(SourceKind::Library));
    assert!(composer.is_pending());
    assert!(!composer.request_image(SourceKind::Library));
    assert_that!(composer.source().presented).has_length(1);

    // Replying later delivers the picture on the next pump.
    let done = composer.source_mut().held.take().unwrap();
    done.complete(PickOutcome::Picked(picture(30, 60)));
    assert!(composer.pump());
    assert_eq!(Phase::Ready, composer.phase());
    assert!(!composer.is_pending());
    assert!(!composer.pump());
}

#[test]
fn camera_request_without_camera() {
    let mut composer = picking(10, 10);
    let before = composer.state();
    assert!(!composer.request_image(SourceKind::Camera));
    assert_that!(composer.source().presented).is_empty();
    assert_eq!(before, composer.state());
}

#[test]
fn camera_request_with_camera() {
    let mut composer = composer(
        FakeSource::new(PickReply::Pick(picture(10, 20))).with_camera(),
        FakeSink::new(ShareReply::Hold));
    assert!(composer.request_image(SourceKind::Camera));
    assert_eq!(vec![SourceKind::Camera], composer.source().presented);
}

#[test]
fn picked_image_can_be_replaced() {
    let mut composer = ready(400, 200);
    composer.on_image_picked(picture(100, 300));
    assert!(!composer.is_landscape_image());
    assert_eq!(ContentFit::Fill, composer.content_fit());
}


// Content fit

#[test]
fn content_fit_for_all_orientations() {
    for orientation in DeviceOrientation::iter_variants() {
        for &(width, height) in &[(400, 200), (200, 400), (300, 300)] {
            let mut composer = ready(width, height);
            composer.on_device_rotated(orientation, PORTRAIT_SCREEN.into());

            let expected = if orientation.is_portrait() && width <= height {
                ContentFit::Fill
            } else {
                ContentFit::Fit
            };
            assert_eq!(expected, composer.content_fit(),
                "{:?} with {}x{} picture", orientation, width, height);
            assert_eq!(expected, composer.screen().image_view.content_fit);
        }
    }
}

#[test]
fn landscape_picture_is_always_fit() {
    let mut composer = ready(400, 200);
    assert_eq!(ContentFit::Fit, composer.content_fit());
    composer.on_device_rotated(DeviceOrientation::LandscapeLeft, LANDSCAPE_SCREEN.into());
    assert_eq!(ContentFit::Fit, composer.content_fit());
    composer.on_device_rotated(DeviceOrientation::Portrait, PORTRAIT_SCREEN.into());
    assert_eq!(ContentFit::Fit, composer.content_fit());
}

#[test]
fn portrait_picture_fills_portrait_screen() {
    let mut composer = ready(200, 400);
    assert_eq!(ContentFit::Fill, composer.content_fit());
    composer.on_device_rotated(DeviceOrientation::LandscapeRight, LANDSCAPE_SCREEN.into());
    assert_eq!(ContentFit::Fit, composer.content_fit());
    assert_eq!(Size::new(667, 375), composer.screen().bounds());
}


// Cancel

#[test]
fn cancel_resets_everything() {
    let mut composer = ready(200, 400);
    composer.begin_editing(CaptionField::Top);
    composer.insert_text(CaptionField::Top, "HELLO");
    composer.end_editing(CaptionField::Top);
    composer.set_text(CaptionField::Bottom, "WORLD");

    composer.on_cancel();
    assert_eq!(Phase::Empty, composer.phase());
    assert_eq!("TOP", composer.text(CaptionField::Top));
    assert_eq!("BOTTOM", composer.text(CaptionField::Bottom));
    assert!(!composer.controls().are_enabled());
    assert!(!composer.controls().share);
    assert_that!(composer.picked_image()).is_none();
}

#[test]
fn cancel_when_empty() {
    let mut composer = picking(10, 10);
    composer.on_cancel();
    assert_eq!("TOP", composer.text(CaptionField::Top));
    assert_eq!("BOTTOM", composer.text(CaptionField::Bottom));
    assert!(!composer.controls().are_enabled());
}


// Editing

#[test]
fn begin_editing_clears_the_field() {
    let mut composer = ready(10, 10);
    composer.begin_editing(CaptionField::Top);
    assert_eq!("", composer.text(CaptionField::Top));
    assert_eq!("BOTTOM", composer.text(CaptionField::Bottom));
    assert_eq!(Some(CaptionField::Top), composer.active_field());

    // Confirming without typing leaves it empty.
    assert!(!composer.end_editing(CaptionField::Top));
    assert_eq!("", composer.text(CaptionField::Top));
    assert_that!(composer.active_field()).is_none();
}

#[test]
fn editing_disabled_fields_is_ignored() {
    let mut composer = picking(10, 10);
    let before = composer.state();
    composer.begin_editing(CaptionField::Top);
    composer.insert_text(CaptionField::Top, "nope");
    composer.set_text(CaptionField::Bottom, "nope");
    assert_eq!(before, composer.state());
}

#[test]
fn typed_text_is_normalized() {
    let mut composer = ready(10, 10);
    composer.begin_editing(CaptionField::Top);
    composer.insert_text(CaptionField::Top, "CAFE");
    composer.insert_text(CaptionField::Top, "\u{301}");
    assert_eq!("CAF\u{c9}", composer.text(CaptionField::Top));
}

#[test]
fn long_text_is_truncated() {
    let mut composer = ready(10, 10);
    let long: String = ::std::iter::repeat('\u{17c}').take(MAX_CAPTION_LENGTH + 10).collect();
    composer.set_text(CaptionField::Bottom, long);
    assert_eq!(MAX_CAPTION_LENGTH, composer.text(CaptionField::Bottom).chars().count());
}

#[test]
fn end_editing_restores_offset() {
    let mut composer = ready(10, 10);
    composer.begin_editing(CaptionField::Bottom);
    composer.on_keyboard_show(216.0);
    assert_eq!(-216.0, composer.view_y_offset());

    assert!(!composer.end_editing(CaptionField::Bottom));
    assert_eq!(0.0, composer.view_y_offset());
    assert!(composer.controls().album);
    assert!(!composer.controls().camera);
}


// Keyboard

#[test]
fn keyboard_shifts_view_for_bottom_field() {
    let mut composer = composer(FakeSource::new(PickReply::Pick(picture(10, 10))).with_camera(),
                                FakeSink::new(ShareReply::Hold));
    composer.request_image(SourceKind::Library);
    composer.begin_editing(CaptionField::Bottom);
    composer.on_keyboard_show(216.0);

    assert_eq!(-216.0, composer.view_y_offset());
    assert!(!composer.controls().camera);
    assert!(!composer.controls().album);

    composer.end_editing(CaptionField::Bottom);
    assert!(composer.controls().camera);
    assert!(composer.controls().album);
}

#[test]
fn keyboard_shift_is_one_shot() {
    let mut composer = ready(10, 10);
    composer.begin_editing(CaptionField::Bottom);
    composer.on_keyboard_show(216.0);
    composer.on_keyboard_show(216.0);
    assert_eq!(-216.0, composer.view_y_offset());
}

#[test]
fn keyboard_ignored_for_top_field() {
    let mut composer = ready(10, 10);
    composer.begin_editing(CaptionField::Top);
    composer.on_keyboard_show(216.0);
    assert_eq!(0.0, composer.view_y_offset());
    assert!(composer.controls().album);
}

#[test]
fn keyboard_ignored_without_editing() {
    let mut composer = ready(10, 10);
    let before = composer.state();
    composer.on_keyboard_show(216.0);
    assert_eq!(before, composer.state());
    assert!(composer.controls().pick(SourceKind::Library));
}


// Rendering

#[test]
fn render_without_picture() {
    let mut composer = picking(10, 10);
    assert_eq!(ComposeError::NoImage, composer.render_meme().unwrap_err());
}

#[test]
fn render_hello_world() {
    let mut composer = ready(200, 400);
    composer.begin_editing(CaptionField::Top);
    composer.insert_text(CaptionField::Top, "HELLO");
    composer.end_editing(CaptionField::Top);
    composer.begin_editing(CaptionField::Bottom);
    composer.insert_text(CaptionField::Bottom, "WORLD");
    composer.end_editing(CaptionField::Bottom);

    let meme = composer.render_meme().unwrap();
    assert_eq!("HELLO", meme.top_text());
    assert_eq!("WORLD", meme.bottom_text());
    assert!(Arc::ptr_eq(composer.picked_image().unwrap(), meme.original_image()));
    assert_eq!(PORTRAIT_SCREEN, meme.rendered_image().dimensions());

    let white = Rgba([0xff, 0xff, 0xff, 0xff]);
    assert!(meme.rendered_image().pixels().any(|p| *p == white));
}

#[test]
fn render_restores_chrome() {
    let mut composer = ready(200, 400);
    composer.render_meme().unwrap();
    assert_eq!(Chrome::visible(), composer.screen().chrome);
}

#[test]
fn render_does_not_show_toolbars() {
    let mut composer = ready(400, 200);
    composer.set_text(CaptionField::Top, "");
    composer.set_text(CaptionField::Bottom, "");
    let meme = composer.render_meme().unwrap();

    // Landscape picture is letterboxed, so the very top is the black background.
    assert_eq!(Rgba([0x0, 0x0, 0x0, 0xff]), *meme.rendered_image().get_pixel(10, 0));
}

#[test]
fn each_render_is_fresh() {
    let mut composer = ready(200, 400);
    let first = composer.render_meme().unwrap();
    composer.set_text(CaptionField::Top, "AGAIN");
    let second = composer.render_meme().unwrap();
    assert!(!Arc::ptr_eq(first.rendered_image(), second.rendered_image()));
    assert_eq!("TOP", first.top_text());
    assert_eq!("AGAIN", second.top_text());
}


// Sharing

#[test]
fn share_completed_keeps_state() {
    let mut composer = ready_sharing(ShareReply::Reply(ShareOutcome::Completed));
    let before = composer.state();
    let meme = composer.share().unwrap();
    assert_eq!(before, composer.state());
    assert!(!composer.is_pending());

    let items = &composer.sink().items;
    assert_that!(*items).has_length(1);
    assert_eq!(meme.rendered_image().dimensions(), items[0].bitmap().dimensions());
}

#[test]
fn share_failed_keeps_state() {
    let mut composer = ready_sharing(
        ShareReply::Reply(ShareOutcome::Failed("no space left".into())));
    let before = composer.state();
    composer.share().unwrap();
    assert_eq!(before, composer.state());
    assert!(!composer.is_pending());
}

#[test]
fn share_canceled_keeps_state() {
    let mut composer = ready_sharing(ShareReply::Reply(ShareOutcome::Canceled));
    let before = composer.state();
    composer.share().unwrap();
    assert_eq!(before, composer.state());
}

#[test]
fn share_while_pending() {
    let mut composer = ready_sharing(ShareReply::Hold);
    composer.share().unwrap();
    assert!(composer.is_pending());
    assert_eq!(ComposeError::SharePending, composer.share().unwrap_err());

    composer.sink_mut().held.take().unwrap().complete(ShareOutcome::Completed);
    assert!(composer.pump());
    assert!(composer.share().is_ok());
}

#[test]
fn share_without_picture() {
    let mut composer = picking(10, 10);
    assert_eq!(ComposeError::NoImage, composer.share().unwrap_err());
    assert_that!(composer.sink().items).is_empty();
}

#[test]
fn share_disabled() {
    let mut composer = Composer::builder()
        .image_source(FakeSource::new(PickReply::Pick(picture(10, 10))))
        .share_sink(FakeSink::new(ShareReply::Hold))
        .share_button(false)
        .build()
        .unwrap();
    composer.initialize(PORTRAIT_SCREEN.into());
    composer.request_image(SourceKind::Library);

    assert!(composer.controls().are_enabled());
    assert!(!composer.controls().share);
    assert_eq!(ComposeError::ShareDisabled, composer.share().unwrap_err());
}

#[test]
fn share_item_encodes() {
    let mut composer = ready_sharing(ShareReply::Reply(ShareOutcome::Completed));
    composer.share().unwrap();
    let output = composer.sink().items[0].encode(::image::ImageFormat::Png).unwrap();
    assert_eq!(Some(::mime::IMAGE_PNG), output.mime_type());
}


// Building

#[test]
fn build_without_collaborators() {
    let result = Composer::<FakeSource, FakeSink>::builder()
        .share_sink(FakeSink::new(ShareReply::Hold))
        .build();
    match result {
        Err(BuildError::NoImageSource) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }

    let result = Composer::<FakeSource, FakeSink>::builder()
        .image_source(FakeSource::new(PickReply::Cancel))
        .build();
    match result {
        Err(BuildError::NoShareSink) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn build_with_invalid_jpeg_quality() {
    let result = Composer::builder()
        .image_source(FakeSource::new(PickReply::Cancel))
        .share_sink(FakeSink::new(ShareReply::Hold))
        .jpeg_quality(101)
        .build();
    match result {
        Err(BuildError::Invalid(_)) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn build_with_missing_font() {
    let result = Composer::builder()
        .image_source(FakeSource::new(PickReply::Cancel))
        .share_sink(FakeSink::new(ShareReply::Hold))
        .font_directory(::std::env::temp_dir())
        .font_name("surely-there-is-no-such-font")
        .build();
    match result {
        Err(BuildError::Font(ref name, _)) => assert_eq!("surely-there-is-no-such-font", name),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn build_with_font_and_font_location() {
    let builders = vec![
        Composer::<FakeSource, FakeSink>::builder().font_directory(".").font(Font::builtin()),
        Composer::<FakeSource, FakeSink>::builder().font_name("Impact").font(Font::builtin()),
        Composer::<FakeSource, FakeSink>::builder().font(Font::builtin()).font_directory("."),
        Composer::<FakeSource, FakeSink>::builder().font(Font::builtin()).font_name("Impact"),
    ];
    for builder in builders {
        let result = builder
            .image_source(FakeSource::new(PickReply::Cancel))
            .share_sink(FakeSink::new(ShareReply::Hold))
            .build();
        match result {
            Err(BuildError::Invalid(ref msg)) => assert!(msg.contains("font")),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}

#[test]
fn build_with_config() {
    let config = Config{share_button: false, jpeg_quality: 50, ..Config::default()};
    let composer = Composer::builder()
        .image_source(FakeSource::new(PickReply::Cancel))
        .share_sink(FakeSink::new(ShareReply::Hold))
        .config(config)
        .jpeg_quality(70)
        .build()
        .unwrap();
    assert!(!composer.config().share_button);
    assert_eq!(70, composer.config().jpeg_quality);
}
