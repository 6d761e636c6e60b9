//! Mount a profile card and log what the page paints.
//!
//! ```sh
//! RUST_LOG=info cargo run -p cardkit-card --example render_card -- "Software engineer based in the city"
//! ```

use cardkit_card::{HostPage, ProfileCard, TEXT_BOX_ID};
use cardkit_render::DisplayItem;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let description = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Software engineer based in the city".to_string());

    let mut page: HostPage<ProfileCard> = HostPage::default();
    let handle = page.mount(ProfileCard::new(description))?;

    if let Some(card) = page.component(handle) {
        log::info!("Fit check: {:?}", card.fit_state());
    }
    log::info!(
        "#{TEXT_BOX_ID}: {:?}",
        page.inner_text_of(TEXT_BOX_ID).unwrap_or_default()
    );

    for item in &page.display_list().items {
        match item {
            DisplayItem::TextLine { origin, text, .. } => {
                log::info!("text  ({:>6.1}, {:>6.1}) {text}", origin.x, origin.y)
            }
            DisplayItem::Image { bounds, src, .. } => {
                log::info!("image ({:>6.1}, {:>6.1}) {src}", bounds.x, bounds.y)
            }
            DisplayItem::Fill(rect) => log::debug!("fill  {:?}", rect.bounds),
            DisplayItem::Border { bounds, .. } => log::debug!("border {bounds:?}"),
        }
    }

    let stats = page.stats();
    log::info!(
        "{} rect(s), {} image(s), {} text line(s)",
        stats.rect_count,
        stats.image_count,
        stats.text_lines
    );
    Ok(())
}
