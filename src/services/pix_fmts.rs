//! Pixel format catalog.
//!
//! Resolves a pixel format name (e.g. `yuv420p10le`) to a per-component bit
//! depth using the table printed by `ffmpeg -pix_fmts`:
//!
//! ```text
//! FLAGS NAME            NB_COMPONENTS BITS_PER_PIXEL BIT_DEPTHS
//! -----
//! IO... yuv420p                3             12      8-8-8
//! IO... yuv420p10le            3             15      10-10-10
//! ```
//!
//! The listing is fetched once per catalog value and lookups are memoised,
//! so one catalog should be shared across a whole batch run.

use super::MediaToolkit;
use crate::models::media::{BitDepth, PixelFormatEntry};
use crate::Result;
use std::collections::HashMap;

/// One catalog row: 5 flag characters, then name, components, bpp, depths.
const ENTRY_PATTERN: &str = r"^.{5}\s+(?P<name>[^\s=]+)\s+(?P<nb_components>[0-9]+)\s+(?P<bpp>[0-9]+)\s+(?P<bit_depth>(?:[0-9]+-)*[0-9]+)$";

/// Parse the full `-pix_fmts` listing, skipping headers and odd lines.
pub fn parse_listing(listing: &str) -> Vec<PixelFormatEntry> {
    let Ok(re) = regex::Regex::new(ENTRY_PATTERN) else {
        return Vec::new();
    };

    listing
        .lines()
        .filter_map(|line| parse_line_with(&re, line))
        .collect()
}

/// Parse a single listing line.
pub fn parse_line(line: &str) -> Option<PixelFormatEntry> {
    let re = regex::Regex::new(ENTRY_PATTERN).ok()?;
    parse_line_with(&re, line)
}

fn parse_line_with(re: &regex::Regex, line: &str) -> Option<PixelFormatEntry> {
    let caps = re.captures(line.trim_end_matches('\r'))?;

    Some(PixelFormatEntry {
        name: caps["name"].to_string(),
        nb_components: caps["nb_components"].parse().ok()?,
        bits_per_pixel: caps["bpp"].parse().ok()?,
        bit_depth: caps["bit_depth"].to_string(),
    })
}

/// Bit depth reported for an entry.
///
/// Multi-component formats report only the first component's depth; an
/// unparseable field yields 0.
pub fn entry_bit_depth(entry: &PixelFormatEntry) -> u32 {
    let field = if entry.nb_components > 1 {
        entry.bit_depth.split('-').next().unwrap_or_default()
    } else {
        entry.bit_depth.as_str()
    };

    field.parse().unwrap_or(0)
}

/// Find the bit depth of `name` in parsed entries.
///
/// The first entry with a matching name and at least one component wins.
pub fn find_bit_depth(entries: &[PixelFormatEntry], name: &str) -> Result<u32> {
    entries
        .iter()
        .find(|e| e.name == name && e.nb_components > 0)
        .map(entry_bit_depth)
        .ok_or_else(|| crate::Error::BitDepthNotFound(name.to_string()))
}

/// Lazily loaded, memoising pixel format lookup table.
#[derive(Debug, Default)]
pub struct PixelFormatCatalog {
    entries: Option<Vec<PixelFormatEntry>>,
    resolved: HashMap<String, u32>,
}

impl PixelFormatCatalog {
    /// Create an empty catalog; the listing is fetched on first lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from an already captured listing.
    pub fn from_listing(listing: &str) -> Self {
        Self {
            entries: Some(parse_listing(listing)),
            resolved: HashMap::new(),
        }
    }

    /// Whether the listing has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.entries.is_some()
    }

    /// Look up the bit depth of a pixel format.
    pub fn lookup(&mut self, toolkit: &dyn MediaToolkit, name: &str) -> Result<u32> {
        if name.is_empty() {
            return Err(crate::Error::BitDepthNotFound("<none>".to_string()));
        }

        if let Some(depth) = self.resolved.get(name) {
            return Ok(*depth);
        }

        if self.entries.is_none() {
            let listing = toolkit.list_pixel_formats()?;
            let entries = parse_listing(&listing);
            tracing::debug!("Loaded {} pixel formats", entries.len());
            self.entries = Some(entries);
        }

        let entries = self.entries.as_deref().unwrap_or_default();
        let depth = find_bit_depth(entries, name)?;
        self.resolved.insert(name.to_string(), depth);
        Ok(depth)
    }

    /// Resolve a bit depth, falling back to the default on any failure.
    pub fn resolve(&mut self, toolkit: &dyn MediaToolkit, name: &str) -> BitDepth {
        match self.lookup(toolkit, name) {
            Ok(depth) => BitDepth::Resolved(depth),
            Err(e) => BitDepth::defaulted(e.to_string()),
        }
    }
}
