// Caption font resolution.
// Fonts degrade in three steps instead of failing: a platform font looked up
// by name, then the embedded DejaVu Sans mapped to `sans-serif`, then no
// captions at all.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use usvg::fontdb::{Database, Family, Query};

// Name variants tried, in order, for the platform font.
pub const PLATFORM_FAMILIES: [&str; 2] = ["arial", "Arial"];

pub const BUILTIN_FAMILY: &str = "DejaVu Sans";
pub static BUILTIN_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    // PLATFORM_FAMILIES hit, or an explicit font file
    Platform(String),
    // embedded face
    Default(String),
    None,
}

pub struct FontBook {
    db: Arc<Database>,
    source: FontSource,
}

impl FontBook {
    // System fonts plus an optional extra file.
    pub fn load(extra: Option<&Path>) -> Self {
        let mut db = Database::new();
        if let Some(path) = extra {
            match db.load_font_file(path) {
                Ok(()) => debug!(path = %path.display(), "font file loaded"),
                Err(e) => warn!(path = %path.display(), error = %e, "font file ignored"),
            }
        }
        let extra_family = extra.and(first_family(&db));
        db.load_system_fonts();
        resolve_chain(db, extra_family, BUILTIN_FONT)
    }

    pub fn resolve(db: Database) -> Self {
        resolve_chain(db, None, BUILTIN_FONT)
    }

    // Bottom of the chain: captions are skipped.
    pub fn without_fonts() -> Self {
        Self {
            db: Arc::new(Database::new()),
            source: FontSource::None,
        }
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn family(&self) -> Option<&str> {
        match &self.source {
            FontSource::Platform(name) | FontSource::Default(name) => Some(name.as_str()),
            FontSource::None => None,
        }
    }

    pub fn database(&self) -> Arc<Database> {
        self.db.clone()
    }
}

fn resolve_chain(mut db: Database, preferred: Option<String>, builtin: &[u8]) -> FontBook {
    let source = if let Some(name) = preferred {
        FontSource::Platform(name)
    } else if let Some(name) = platform_family(&db) {
        FontSource::Platform(name)
    } else if let Some(name) = load_builtin(&mut db, builtin) {
        debug!(family = %name, "platform font missing, using embedded face");
        db.set_sans_serif_family(name.clone());
        FontSource::Default(name)
    } else {
        warn!("no fonts available, labels will have no captions");
        FontSource::None
    };
    let book = FontBook {
        db: Arc::new(db),
        source,
    };
    if let Some(family) = book.family() {
        info!(family, faces = book.db.len(), "caption font resolved");
    }
    book
}

fn platform_family(db: &Database) -> Option<String> {
    for name in PLATFORM_FAMILIES {
        if let Some(family) = query_family(db, name) {
            return Some(family);
        }
        debug!(family = name, "platform font not found");
    }
    None
}

fn load_builtin(db: &mut Database, data: &[u8]) -> Option<String> {
    let mut scratch = Database::new();
    scratch.load_font_data(data.to_vec());
    let family = first_family(&scratch)?;
    db.load_font_data(data.to_vec());
    Some(family)
}

fn query_family(db: &Database, name: &str) -> Option<String> {
    let query = Query {
        families: &[Family::Name(name)],
        ..Default::default()
    };
    let id = db.query(&query)?;
    let family = db
        .face(id)
        .and_then(|face| face.families.first())
        .map(|(n, _)| n.clone())
        .unwrap_or_else(|| name.to_string());
    Some(family)
}

fn first_family(db: &Database) -> Option<String> {
    db.faces()
        .find_map(|face| face.families.first().map(|(n, _)| n.clone()))
}
