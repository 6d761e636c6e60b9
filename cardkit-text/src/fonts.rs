//! Bundled fonts.
//!
//! The engine never asks the OS for fonts. DejaVu Sans Mono (regular and
//! bold, see `fonts/LICENSE`) is compiled into the crate and is the only
//! face in the database, so measurements are identical on every machine.

use cosmic_text::{fontdb, FontSystem};

/// Family name of the bundled face.
pub const BODY_FAMILY: &str = "DejaVu Sans Mono";

const REGULAR: &[u8] = include_bytes!("../fonts/DejaVuSansMono.ttf");
const BOLD: &[u8] = include_bytes!("../fonts/DejaVuSansMono-Bold.ttf");

/// Font database holding only the bundled faces. Every generic family
/// resolves to [`BODY_FAMILY`].
pub fn bundled_database() -> fontdb::Database {
    let mut db = fontdb::Database::new();
    db.load_font_data(REGULAR.to_vec());
    db.load_font_data(BOLD.to_vec());

    db.set_sans_serif_family(BODY_FAMILY);
    db.set_serif_family(BODY_FAMILY);
    db.set_monospace_family(BODY_FAMILY);
    log::debug!("Loaded {} bundled font face(s)", db.len());
    db
}

pub fn bundled_font_system() -> FontSystem {
    FontSystem::new_with_locale_and_db(String::from("en-US"), bundled_database())
}
