//! Integration tests for lighthouse.
//!
//! These tests drive a headless page through the public API: registering
//! lightboxes, clicking thumbnails and close controls, letting time pass, and
//! checking the resulting markup and geometry.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use lighthouse::css::{Scalar, StyleProperty};
use lighthouse::dom::{NodeData, NodeId};
use lighthouse::geometry::Rect;
use lighthouse::lightbox::Phase;
use lighthouse::testing::{Pilot, StaticImageSource, Thumbnail};
use lighthouse::{LightboxConfig, LightboxEvent, Orientation};
use pretty_assertions::assert_eq;

const THUMB_BOX: Rect = Rect::new(40.0, 40.0, 200.0, 150.0);

fn source() -> StaticImageSource {
    StaticImageSource::new()
        .with_image("big.jpg", 1600, 1200)
        .with_image("tall.jpg", 600, 900)
        .with_image("thumb.jpg", 200, 150)
}

fn pilot() -> Pilot {
    Pilot::new(1000.0, 800.0, source())
}

fn style(pilot: &Pilot, selector: &str, property: StyleProperty) -> Option<Scalar> {
    let node = pilot.find(selector)?;
    pilot.page().dom.get(node)?.style.get(property)
}

// ---------------------------------------------------------------------------
// Image content
// ---------------------------------------------------------------------------

#[tokio::test]
async fn worked_example_open_and_close() {
    let mut pilot = pilot();
    let (container, thumb) = pilot
        .add(Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX))
        .unwrap();
    let pristine = pilot.markup(container);
    let id = pilot.lighthouse(&LightboxConfig::default()).unwrap();
    pilot.settle().await;

    let anchor = pilot.page().dom.children(container)[0];
    let meta = pilot.page().dom.get(anchor).unwrap().media.unwrap();
    assert_eq!(meta.orientation, Orientation::Landscape);

    // Open.
    assert!(pilot.click(thumb));
    assert_eq!(pilot.phase(id, container), Phase::Opening);
    insta::assert_snapshot!(
        pilot.markup(container),
        @r##"<div class="lighthouse"><a href="big.jpg"><img src="thumb.jpg"></a><div class="content active"><a href="big.jpg"><img src="big.jpg"></a><div class="background active"></div><a class="close active" href="#">X</a></div></div>"##
    );

    let child = pilot.find(".lighthouse > .content").unwrap();
    assert_eq!(pilot.page().dom.rendered_box(child), Some(THUMB_BOX));

    // The cloned image is centered by the landscape rule in a 200x150 frame.
    assert_eq!(
        style(&pilot, ".content a", StyleProperty::Width),
        Some(Scalar::px(200.0))
    );
    assert_eq!(
        style(&pilot, ".content img", StyleProperty::Left),
        Some(Scalar::percent(50.0))
    );
    assert_eq!(
        style(&pilot, ".content img", StyleProperty::Height),
        Some(Scalar::auto())
    );
    let margin = style(&pilot, ".content img", StyleProperty::MarginLeft).unwrap();
    assert!((margin.value + 133.333).abs() < 1e-2, "{margin}");

    pilot.run_until_idle();
    assert_eq!(pilot.phase(id, container), Phase::Open);
    assert_eq!(
        pilot.page().dom.rendered_box(child),
        Some(Rect::new(0.0, 0.0, 1000.0, 800.0))
    );
    assert_eq!(
        pilot.events(),
        vec![LightboxEvent::Opened {
            lightbox: id,
            container
        }]
    );

    // Close via the control.
    let close = pilot.find(".close").unwrap();
    assert!(pilot.click(close));
    assert_eq!(pilot.phase(id, container), Phase::Closing);
    assert!(pilot.find(".close").is_none());
    assert!(pilot.find(".background").is_none());
    assert!(!pilot.page().dom.get(child).unwrap().has_class("active"));

    pilot.run_until_idle();
    assert_eq!(pilot.phase(id, container), Phase::Closed);
    assert_eq!(pilot.markup(container), pristine);
    assert!(!pilot.page().dom.contains(child));
    assert_eq!(
        pilot.events(),
        vec![LightboxEvent::Closed {
            lightbox: id,
            container
        }]
    );
}

#[tokio::test]
async fn durations_are_honored() {
    let mut pilot = pilot();
    let (container, thumb) = pilot
        .add(Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX))
        .unwrap();
    let config = LightboxConfig::new()
        .with_open_duration(500)
        .with_close_duration(100)
        .with_secondary_duration(50);
    let id = pilot.lighthouse(&config).unwrap();

    pilot.click(thumb);
    pilot.advance_ms(499);
    assert_eq!(pilot.phase(id, container), Phase::Opening);
    pilot.advance_ms(1);
    assert_eq!(pilot.phase(id, container), Phase::Open);

    let close = pilot.find(".close").unwrap();
    pilot.click(close);
    pilot.advance_ms(99);
    assert_eq!(pilot.phase(id, container), Phase::Closing);
    pilot.advance_ms(1);
    assert_eq!(pilot.phase(id, container), Phase::Closed);
}

#[tokio::test]
async fn zero_durations_complete_on_next_advance() {
    let mut pilot = pilot();
    let (container, thumb) = pilot
        .add(Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX))
        .unwrap();
    let config = LightboxConfig::new()
        .with_duration(0)
        .with_secondary_duration(0);
    let id = pilot.lighthouse(&config).unwrap();

    pilot.click(thumb);
    assert_eq!(pilot.phase(id, container), Phase::Opening);
    pilot.advance_ms(0);
    assert_eq!(pilot.phase(id, container), Phase::Open);
}

#[tokio::test]
async fn repeated_activation_is_idempotent() {
    let mut pilot = pilot();
    let (container, thumb) = pilot
        .add(Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX))
        .unwrap();
    let id = pilot.lighthouse(&LightboxConfig::default()).unwrap();

    pilot.click(thumb);
    let opening = pilot.markup(container);
    pilot.click(thumb);
    pilot.advance_ms(100);
    pilot.click(thumb);
    assert_eq!(pilot.markup(container), opening);

    pilot.run_until_idle();
    assert!(!pilot.click(thumb), "open while open is a no-op");
    assert_eq!(pilot.page().dom.select(".content").unwrap().len(), 1);

    let close = pilot.find(".close").unwrap();
    pilot.click(close);
    pilot.run_until_idle();
    assert_eq!(pilot.phase(id, container), Phase::Closed);

    // A second full cycle behaves like the first.
    assert!(pilot.click(thumb));
    pilot.run_until_idle();
    assert_eq!(pilot.phase(id, container), Phase::Open);
    assert_eq!(pilot.page().dom.select(".close").unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn geometry_before_and_after_preload() {
    let slow = StaticImageSource::new().with_delayed_image(
        "tall.jpg",
        600,
        900,
        Duration::from_secs(2),
    );
    let mut pilot = Pilot::new(1000.0, 800.0, slow);
    let (container, thumb) = pilot
        .add(Thumbnail::new("tall.jpg", "thumb.jpg", THUMB_BOX))
        .unwrap();
    let id = pilot.lighthouse(&LightboxConfig::default()).unwrap();

    // Metadata is still loading: stretch fill.
    pilot.click(thumb);
    assert_eq!(style(&pilot, ".content img", StyleProperty::Left), Some(Scalar::ZERO));
    assert_eq!(
        style(&pilot, ".content img", StyleProperty::Width),
        Some(Scalar::percent(100.0))
    );
    assert_eq!(
        style(&pilot, ".content img", StyleProperty::Height),
        Some(Scalar::percent(100.0))
    );
    pilot.run_until_idle();
    let close = pilot.find(".close").unwrap();
    pilot.click(close);
    pilot.run_until_idle();
    assert_eq!(pilot.phase(id, container), Phase::Closed);

    // Loaded: portrait rule.
    pilot.settle().await;
    pilot.click(thumb);
    assert_eq!(
        style(&pilot, ".content img", StyleProperty::Top),
        Some(Scalar::percent(50.0))
    );
    assert_eq!(
        style(&pilot, ".content img", StyleProperty::Width),
        Some(Scalar::auto())
    );
    let margin = style(&pilot, ".content img", StyleProperty::MarginTop).unwrap();
    assert!((margin.value + 112.5).abs() < 1e-3, "{margin}");
    assert_eq!(pilot.source().load_count("tall.jpg"), 1);
}

#[tokio::test]
async fn containers_are_independent() {
    let mut pilot = pilot();
    let (first, first_thumb) = pilot
        .add(Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX))
        .unwrap();
    let (second, _) = pilot
        .add(Thumbnail::new(
            "tall.jpg",
            "thumb.jpg",
            Rect::new(260.0, 40.0, 200.0, 150.0),
        ))
        .unwrap();
    let id = pilot.lighthouse(&LightboxConfig::default()).unwrap();
    pilot.settle().await;

    pilot.click(first_thumb);
    pilot.run_until_idle();
    assert_eq!(pilot.phase(id, first), Phase::Open);
    assert_eq!(pilot.phase(id, second), Phase::Closed);
    assert_eq!(pilot.source().load_count("thumb.jpg"), 1);
}

#[tokio::test]
async fn close_returns_to_current_container_box() {
    let mut pilot = pilot();
    let (container, thumb) = pilot
        .add(
            Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX)
                .with_class("html")
                .with_content("Hello", false),
        )
        .unwrap();
    let id = pilot.lighthouse(&LightboxConfig::default()).unwrap();

    pilot.click(thumb);
    pilot.run_until_idle();
    let moved = Rect::new(40.0, 300.0, 200.0, 150.0);
    pilot.relayout(container, moved);

    let close = pilot.find(".close").unwrap();
    pilot.click(close);
    pilot.run_until_idle();
    assert_eq!(pilot.phase(id, container), Phase::Closed);
    let child = pilot.find(".content").unwrap();
    assert_eq!(pilot.page().dom.rendered_box(child), Some(moved));
}

// ---------------------------------------------------------------------------
// Html content
// ---------------------------------------------------------------------------

#[tokio::test]
async fn static_html_child_is_reused_and_kept() {
    let mut pilot = pilot();
    let (container, thumb) = pilot
        .add(
            Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX)
                .with_class("html")
                .with_content("Hello", false),
        )
        .unwrap();
    let id = pilot.lighthouse(&LightboxConfig::default()).unwrap();
    let child = pilot.find(".content").unwrap();

    assert!(pilot.click(thumb));
    assert_eq!(pilot.find(".lighthouse > .content"), Some(child));
    assert!(pilot.page().dom.is_visible(child));
    pilot.run_until_idle();
    assert_eq!(pilot.phase(id, container), Phase::Open);

    let close = pilot.find(".close").unwrap();
    pilot.click(close);
    pilot.run_until_idle();
    assert_eq!(pilot.phase(id, container), Phase::Closed);
    insta::assert_snapshot!(
        pilot.markup(container),
        @r#"<div class="lighthouse html"><a href="big.jpg"><img src="thumb.jpg"></a><div class="content" hidden><p>Hello</p></div></div>"#
    );
}

#[tokio::test]
async fn static_html_image_fits_thumbnail_frame() {
    let mut pilot = pilot();
    let (container, thumb) = pilot
        .add(Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX).with_class("html"))
        .unwrap();
    let dom = &mut pilot.page_mut().dom;
    let content = dom
        .insert_child(container, NodeData::new("div").with_class("content").hidden())
        .unwrap();
    // The host lays the frame out larger than the thumbnail.
    let frame = dom
        .insert_child(
            content,
            NodeData::new("a").with_layout(Rect::new(100.0, 100.0, 800.0, 600.0)),
        )
        .unwrap();
    let image = dom
        .insert_child(frame, NodeData::new("img").with_attr("src", "tall.jpg"))
        .unwrap();
    let id = pilot.lighthouse(&LightboxConfig::default()).unwrap();
    pilot.settle().await;
    let meta = pilot.page().dom.get(image).unwrap().media.unwrap();
    assert_eq!(meta.orientation, Orientation::Portrait);

    assert!(pilot.click(thumb));
    assert_eq!(pilot.phase(id, container), Phase::Opening);
    let style_of = |node: NodeId, property: StyleProperty| pilot.page().dom.get(node).unwrap().style.get(property);
    assert_eq!(style_of(frame, StyleProperty::Width), Some(Scalar::px(200.0)));
    assert_eq!(style_of(frame, StyleProperty::Height), Some(Scalar::px(150.0)));
    assert_eq!(style_of(image, StyleProperty::Top), Some(Scalar::percent(50.0)));
    assert_eq!(style_of(image, StyleProperty::Width), Some(Scalar::auto()));
    // -(150 / (600 / 900)) / 2
    let margin = style_of(image, StyleProperty::MarginTop).unwrap();
    assert!((margin.value + 112.5).abs() < 1e-3, "{margin}");
}

#[tokio::test]
async fn close_removes_only_inserted_controls() {
    let mut pilot = pilot();
    let (container, thumb) = pilot
        .add(Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX).with_class("html"))
        .unwrap();
    let dom = &mut pilot.page_mut().dom;
    let content = dom
        .insert_child(container, NodeData::new("div").with_class("content").hidden())
        .unwrap();
    let own = dom
        .insert_child(content, NodeData::new("span").with_class("close").with_text("Back"))
        .unwrap();
    let id = pilot.lighthouse(&LightboxConfig::default()).unwrap();

    pilot.click(thumb);
    pilot.run_until_idle();
    let closes = pilot.page().dom.select(".close").unwrap();
    assert_eq!(closes.len(), 2);
    let inserted = closes[1];
    assert_ne!(inserted, own);

    assert!(pilot.click(inserted));
    pilot.run_until_idle();
    assert_eq!(pilot.phase(id, container), Phase::Closed);
    assert_eq!(pilot.page().dom.select(".close").unwrap(), vec![own]);
    insta::assert_snapshot!(
        pilot.markup(container),
        @r#"<div class="lighthouse html"><a href="big.jpg"><img src="thumb.jpg"></a><div class="content" hidden><span class="close">Back</span></div></div>"#
    );
}

#[tokio::test]
async fn visible_static_child_starts_open() {
    let mut pilot = pilot();
    let (container, thumb) = pilot
        .add(
            Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX)
                .with_class("html")
                .with_content("Hello", true),
        )
        .unwrap();
    let id = pilot.lighthouse(&LightboxConfig::default()).unwrap();
    assert_eq!(pilot.phase(id, container), Phase::Open);
    assert!(!pilot.click(thumb));
    assert!(pilot.find(".close").is_none());
}

// ---------------------------------------------------------------------------
// Registration and preloading
// ---------------------------------------------------------------------------

#[tokio::test]
async fn config_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lighthouse.toml");
    std::fs::write(
        &path,
        "container_selector = \".gallery\"\nclose_selector = \"a.dismiss\"\nduration = 100\n",
    )
    .unwrap();

    let mut pilot = pilot();
    let (container, thumb) = pilot
        .add(Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX).with_class("gallery"))
        .unwrap();
    let id = pilot.page_mut().lighthouse_from_file(&path).unwrap();

    pilot.click(thumb);
    pilot.advance_ms(200);
    assert_eq!(pilot.phase(id, container), Phase::Open);
    let close = pilot.find("a.dismiss").unwrap();
    assert!(pilot.click(close));
    pilot.advance_ms(100);
    assert_eq!(pilot.phase(id, container), Phase::Closed);
}

#[tokio::test]
async fn invalid_selector_is_a_registration_error() {
    let mut pilot = pilot();
    pilot
        .add(Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX))
        .unwrap();
    let config = LightboxConfig::new().with_container_selector("div >");
    let err = pilot.lighthouse(&config).unwrap_err();
    assert!(err.to_string().contains("div >"), "{err}");
}

#[tokio::test]
async fn preload_reports_batch() {
    let mut pilot = pilot();
    let (container, _) = pilot
        .add(Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX))
        .unwrap();
    let anchor = pilot.page().dom.children(container)[0];
    let missing = pilot
        .page_mut()
        .dom
        .insert_child(container, NodeData::new("a").with_attr("href", "nope.jpg"))
        .unwrap();

    let settled = Rc::new(Cell::new(None));
    let sink = Rc::clone(&settled);
    pilot.page_mut().preload(
        [anchor, missing],
        "href",
        Some(Box::new(move |report| sink.set(Some(report)))),
    );
    pilot.settle().await;

    let report = settled.get().unwrap();
    assert_eq!((report.loaded, report.failed), (1, 1));
}

#[tokio::test]
async fn unbound_lightbox_ignores_clicks() {
    let mut pilot = pilot();
    let (container, thumb) = pilot
        .add(Thumbnail::new("big.jpg", "thumb.jpg", THUMB_BOX))
        .unwrap();
    let pristine = pilot.markup(container);
    let id = pilot.lighthouse(&LightboxConfig::default()).unwrap();
    assert!(pilot.page_mut().unbind(id));
    assert!(!pilot.click(thumb));
    assert_eq!(pilot.markup(container), pristine);
}

#[tokio::test]
async fn page_loads_images_from_disk() {
    use std::io::Cursor;
    use std::sync::Arc;

    use lighthouse::media::FileImageSource;
    use lighthouse::Page;

    let dir = tempfile::tempdir().unwrap();
    let mut png = Cursor::new(Vec::new());
    image::RgbImage::new(30, 60)
        .write_to(&mut png, image::ImageFormat::Png)
        .unwrap();
    std::fs::write(dir.path().join("tall.png"), png.into_inner()).unwrap();

    let mut page = Page::new(Arc::new(FileImageSource::new(dir.path())));
    let body = page.dom.insert(NodeData::new("body"));
    let container = page
        .dom
        .insert_child(body, NodeData::new("div").with_class("lighthouse").with_layout(THUMB_BOX))
        .unwrap();
    let anchor = page
        .dom
        .insert_child(container, NodeData::new("a").with_attr("href", "tall.png"))
        .unwrap();
    page.lighthouse_all(&LightboxConfig::default()).unwrap();
    page.settle_preloads().await;

    let meta = page.dom.get(anchor).unwrap().media.unwrap();
    assert_eq!((meta.natural_width, meta.natural_height), (30, 60));
    assert_eq!(meta.orientation, Orientation::Portrait);
}
