//! Bounded planar Voronoi tessellation of the station set.
//!
//! Cells are built in `(lng, lat)` space by clipping the bounding rectangle
//! with one half-plane per other station, then stored in an R-tree keyed by
//! cell envelope. Lookups test only the cells whose envelope contains the
//! query point.

use aqi_map_spatial_models::{Bounds, VoronoiRegion};
use aqi_map_station_models::Station;
use geo::{BoundingRect, Coord, Intersects, LineString, Polygon};
use rstar::{AABB, RTree, RTreeObject};

/// A station cell stored in the R-tree.
struct CellEntry {
    station_index: usize,
    envelope: AABB<[f64; 2]>,
    polygon: Polygon<f64>,
}

impl RTreeObject for CellEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Pre-built Voronoi cells for a fixed station list.
///
/// Constructed once per resolver and reused for every lookup.
pub struct Tessellation {
    cells: RTree<CellEntry>,
}

impl Tessellation {
    /// Builds one clipped cell per station. Stations whose cell is empty
    /// (e.g. located far outside `bounds`) get no cell.
    #[must_use]
    pub fn build(stations: &[Station], bounds: &Bounds) -> Self {
        let rect = vec![
            Coord {
                x: bounds.min_lng,
                y: bounds.min_lat,
            },
            Coord {
                x: bounds.max_lng,
                y: bounds.min_lat,
            },
            Coord {
                x: bounds.max_lng,
                y: bounds.max_lat,
            },
            Coord {
                x: bounds.min_lng,
                y: bounds.max_lat,
            },
        ];

        let mut entries = Vec::with_capacity(stations.len());

        for (i, site) in stations.iter().enumerate() {
            let mut ring = rect.clone();

            for (j, other) in stations.iter().enumerate() {
                if i == j {
                    continue;
                }
                ring = clip_to_closer_half(&ring, site, other);
                if ring.is_empty() {
                    break;
                }
            }

            if ring.len() < 3 {
                log::debug!("Station {} has an empty Voronoi cell", site.id);
                continue;
            }

            let polygon = Polygon::new(LineString::from(ring), vec![]);
            let envelope = compute_envelope(&polygon);

            entries.push(CellEntry {
                station_index: i,
                envelope,
                polygon,
            });
        }

        log::info!(
            "Built Voronoi tessellation with {} cells for {} stations",
            entries.len(),
            stations.len()
        );

        Self {
            cells: RTree::bulk_load(entries),
        }
    }

    /// Index of the station whose cell contains the point (boundary
    /// inclusive). A point on a shared edge belongs to several cells; the
    /// station with the lowest id wins.
    #[must_use]
    pub fn locate(&self, stations: &[Station], lat: f64, lng: f64) -> Option<usize> {
        let point = Coord { x: lng, y: lat };
        let query_env = AABB::from_point([lng, lat]);

        let mut best: Option<usize> = None;

        for entry in self.cells.locate_in_envelope_intersecting(&query_env) {
            if entry.polygon.intersects(&point) {
                match best {
                    None => best = Some(entry.station_index),
                    Some(current)
                        if stations[entry.station_index].id < stations[current].id =>
                    {
                        best = Some(entry.station_index);
                    }
                    _ => {}
                }
            }
        }

        best
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.size()
    }

    /// Cell polygons as map-layer regions, in station order.
    #[must_use]
    pub fn regions(&self, stations: &[Station]) -> Vec<VoronoiRegion> {
        let mut entries: Vec<&CellEntry> = self.cells.iter().collect();
        entries.sort_by_key(|e| e.station_index);

        entries
            .into_iter()
            .map(|entry| {
                let station = &stations[entry.station_index];
                VoronoiRegion {
                    station_id: station.id.clone(),
                    station_name: station.name.clone(),
                    positions: entry
                        .polygon
                        .exterior()
                        .coords()
                        .map(|c| [c.x, c.y])
                        .collect(),
                }
            })
            .collect()
    }
}

/// Clips a convex ring to the half-plane of points at least as close to
/// `site` as to `other` (Sutherland-Hodgman against a single edge).
fn clip_to_closer_half(ring: &[Coord<f64>], site: &Station, other: &Station) -> Vec<Coord<f64>> {
    // |p - s|^2 <= |p - o|^2  <=>  (o - s) . p <= (|o|^2 - |s|^2) / 2
    let ax = other.lng - site.lng;
    let ay = other.lat - site.lat;
    let c = (other.lng.mul_add(other.lng, other.lat * other.lat)
        - site.lng.mul_add(site.lng, site.lat * site.lat))
        / 2.0;

    let side = |p: &Coord<f64>| ax.mul_add(p.x, ay * p.y) - c;

    let mut out = Vec::with_capacity(ring.len() + 1);

    for (k, current) in ring.iter().enumerate() {
        let next = &ring[(k + 1) % ring.len()];
        let d_cur = side(current);
        let d_next = side(next);

        if d_cur <= 0.0 {
            out.push(*current);
        }
        if (d_cur < 0.0 && d_next > 0.0) || (d_cur > 0.0 && d_next < 0.0) {
            let t = d_cur / (d_cur - d_next);
            out.push(Coord {
                x: t.mul_add(next.x - current.x, current.x),
                y: t.mul_add(next.y - current.y, current.y),
            });
        }
    }

    out
}

/// Compute the bounding box envelope for a [`Polygon`].
fn compute_envelope(polygon: &Polygon<f64>) -> AABB<[f64; 2]> {
    polygon.bounding_rect().map_or_else(
        || AABB::from_point([0.0, 0.0]),
        |rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    )
}
