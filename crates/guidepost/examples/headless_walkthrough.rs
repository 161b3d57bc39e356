//! Walk a three-step tour on the headless surface and print each step's
//! final geometry as JSON lines, followed by the surface journal.
//!
//! Run:
//!   cargo run -p guidepost --example headless_walkthrough

use guidepost::prelude::*;
use guidepost::{OverlayGeometry, Size};
use guidepost_harness::HeadlessSurface;
use serde_json::json;

fn geometry_json(step: usize, geometry: &OverlayGeometry) -> serde_json::Value {
    let message = geometry.message.map(|m| {
        json!({
            "message_y": m.message_y,
            "arrow_x": m.arrow_origin.x,
            "arrow_y": m.arrow_origin.y,
        })
    });
    json!({
        "step": step,
        "backdrop": [
            geometry.backdrop.x,
            geometry.backdrop.y,
            geometry.backdrop.width,
            geometry.backdrop.height,
        ],
        "scroll_y": geometry.scroll.y,
        "message": message,
    })
}

fn main() -> guidepost::Result<()> {
    let mut surface = HeadlessSurface::new()
        .with_viewport(Size::new(1024.0, 768.0))
        .with_line_height(20.0);

    let header = surface.add_target(Rect::new(24.0, 16.0, 400.0, 48.0));
    let sidebar = surface.add_target(Rect::new(24.0, 600.0, 200.0, 320.0));
    let footer = surface.add_target(Rect::new(24.0, 2200.0, 900.0, 60.0));

    let steps = vec![
        Step::new(header, "<b>Welcome</b>\nThis is the header."),
        Step::new(sidebar, "Navigation lives here.").placement(Placement::Bottom),
        Step::new(footer, "Links and legal.\nThat's the tour.").placement(Placement::Top),
    ];

    let mut tour = Tour::new(&mut surface, steps, TourConfig::default())?;
    tour.start_first(&mut surface)?;

    loop {
        for ticket in surface.paint() {
            if let PaintOutcome::Applied(geometry) = tour.after_paint(&mut surface, ticket)? {
                println!("{}", geometry_json(ticket.step(), &geometry));
            }
        }
        match tour.next(&mut surface)? {
            Some(TourEvent::Finished { .. }) | None => break,
            Some(_) => {}
        }
    }

    print!("{}", surface.journal_jsonl());
    Ok(())
}
