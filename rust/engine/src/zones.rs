//! Calibrated capture region and seat-zone geometry.
//!
//! This is tooling for the capture side of the table monitor: it has no
//! runtime interaction with the round state tracker. Zones attribute an
//! observed card to a seat or the dealer; this module manages their
//! polygons and persists them alongside the project.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::errors::ZonesError;

/// Number of player seats generated in the default layout.
pub const DEFAULT_SEAT_COUNT: usize = 7;

/// A polygon vertex, serialized as a `[x, y]` pair.
pub type Point = (f64, f64);

/// The calibrated capture region on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Region {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Converts an absolute point into the region's 0-1 coordinate space.
    pub fn normalize(&self, point: Point) -> Point {
        if self.w == 0.0 || self.h == 0.0 {
            return (0.0, 0.0);
        }
        let (px, py) = point;
        ((px - self.x) / self.w, (py - self.y) / self.h)
    }

    /// Converts a 0-1 point back into absolute coordinates.
    pub fn denormalize(&self, point: Point) -> Point {
        let (px, py) = point;
        (self.x + px * self.w, self.y + py * self.h)
    }
}

/// Individual seat or dealer polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    #[serde(default)]
    pub polygon: Vec<Point>,
}

impl Zone {
    pub fn centroid(&self) -> Point {
        if self.polygon.is_empty() {
            return (0.0, 0.0);
        }
        let n = self.polygon.len() as f64;
        let (sx, sy) = self
            .polygon
            .iter()
            .fold((0.0, 0.0), |(ax, ay), &(x, y)| (ax + x, ay + y));
        (sx / n, sy / n)
    }

    /// Axis-aligned bounds as `((min_x, min_y), (max_x, max_y))`.
    pub fn bounds(&self) -> (Point, Point) {
        if self.polygon.is_empty() {
            return ((0.0, 0.0), (0.0, 0.0));
        }
        let mut min = (f64::INFINITY, f64::INFINITY);
        let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(x, y) in &self.polygon {
            min.0 = min.0.min(x);
            min.1 = min.1.min(y);
            max.0 = max.0.max(x);
            max.1 = max.1.max(y);
        }
        (min, max)
    }

    /// Returns a copy of this zone with its polygon scaled from the old
    /// region's coordinate space into the new one.
    pub fn rescale(&self, old_region: &Region, new_region: &Region) -> Zone {
        let polygon = self
            .polygon
            .iter()
            .map(|&point| {
                if old_region.w == 0.0 || old_region.h == 0.0 {
                    new_region.denormalize((0.0, 0.0))
                } else {
                    new_region.denormalize(old_region.normalize(point))
                }
            })
            .collect();
        Zone {
            id: self.id.clone(),
            polygon,
        }
    }
}

/// Collection of seat zones scoped to a capture region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonesConfig {
    pub region: Region,
    pub zones: Vec<Zone>,
}

impl ZonesConfig {
    /// Default rectangular layout: `seat_1..seat_N` across the bottom and
    /// a centered dealer box up top.
    pub fn default_layout(region: Option<Region>, seat_count: usize) -> Self {
        let region = region.unwrap_or_else(|| Region::new(0.0, 0.0, 1280.0, 720.0));
        let zones = generate_default_zones(&region, seat_count);
        Self { region, zones }
    }

    pub fn rescaled(&self, new_region: Region) -> ZonesConfig {
        let zones = self
            .zones
            .iter()
            .map(|zone| zone.rescale(&self.region, &new_region))
            .collect();
        ZonesConfig {
            region: new_region,
            zones,
        }
    }
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self::default_layout(None, DEFAULT_SEAT_COUNT)
    }
}

pub fn generate_default_zones(region: &Region, seat_count: usize) -> Vec<Zone> {
    let seat_count = seat_count.max(1);
    let mut zones = Vec::with_capacity(seat_count + 1);

    let horizontal_margin = region.w * 0.05;
    let vertical_margin = region.h * 0.1;
    let usable_width = (region.w - 2.0 * horizontal_margin).max(1.0);
    let seat_stride = usable_width / seat_count as f64;
    let seat_width = seat_stride * 0.75;
    let seat_height = (region.h * 0.18).max(1.0);
    let base_y = region.y + region.h - vertical_margin - seat_height;

    for index in 0..seat_count {
        let left = region.x + horizontal_margin + index as f64 * seat_stride;
        let right = left + seat_width;
        let top = base_y;
        let bottom = base_y + seat_height;
        zones.push(Zone {
            id: format!("seat_{}", index + 1),
            polygon: vec![(left, top), (right, top), (right, bottom), (left, bottom)],
        });
    }

    let dealer_width = (region.w * 0.2).max(seat_width);
    let dealer_height = (region.h * 0.15).max(1.0);
    let dealer_left = region.x + (region.w - dealer_width) / 2.0;
    let dealer_top = region.y + vertical_margin;
    zones.push(Zone {
        id: "dealer".to_string(),
        polygon: vec![
            (dealer_left, dealer_top),
            (dealer_left + dealer_width, dealer_top),
            (dealer_left + dealer_width, dealer_top + dealer_height),
            (dealer_left, dealer_top + dealer_height),
        ],
    });
    zones
}

/// Persists the zones configuration as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ZonesConfigStore {
    pub path: PathBuf,
}

impl ZonesConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the stored configuration; a missing file yields the default
    /// layout rather than an error.
    pub fn load(&self) -> Result<ZonesConfig, ZonesError> {
        if !self.path.exists() {
            return Ok(ZonesConfig::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, config: &ZonesConfig) -> Result<(), ZonesError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Persists a new capture region, either scaling the existing polygons
    /// into it or regenerating the default layout.
    pub fn set_region(
        &self,
        region: Region,
        preserve_zones: bool,
    ) -> Result<ZonesConfig, ZonesError> {
        let current = self.load()?;
        let updated = if preserve_zones && !current.zones.is_empty() {
            current.rescaled(region)
        } else {
            ZonesConfig::default_layout(Some(region), DEFAULT_SEAT_COUNT)
        };
        self.save(&updated)?;
        Ok(updated)
    }
}
